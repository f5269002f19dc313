use crate::output::{fmt_ftes, print_json};
use anyhow::Context;
use opsdiag_core::io;
use std::path::Path;

pub fn run(root: &Path, doc: Option<&Path>, save: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let (_, loaded) = super::load_document(root, doc)?;
    let document = &loaded.document;
    let drift = document.benchmark_drift();
    for d in &drift {
        tracing::warn!(
            role = %d.role,
            stored = d.stored_pct,
            recomputed = d.recomputed_pct,
            "stored pct_vs_benchmark disagrees with recomputation"
        );
    }

    if let Some(path) = save {
        io::atomic_write(path, document.to_json_pretty()?.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    if json {
        return print_json(&serde_json::json!({
            "origin": loaded.origin,
            "company": document.company.name,
            "functions": document.functions.len(),
            "summary": document.summary,
            "benchmark_drift": drift,
        }));
    }

    println!("Loaded from {}", loaded.origin);
    println!("  company:    {}", document.company.name);
    println!("  functions:  {}", document.functions.len());
    println!(
        "  total FTEs: {}",
        fmt_ftes(document.summary.total_customer_ops_ftes)
    );
    if !drift.is_empty() {
        println!("  {} role(s) with stale benchmark deltas", drift.len());
    }
    if let Some(path) = save {
        println!("Saved to {}", path.display());
    }
    Ok(())
}
