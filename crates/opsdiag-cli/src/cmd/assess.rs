use crate::output::{fmt_ftes, print_json};
use anyhow::Context;
use opsdiag_core::assess::{self, AssessmentInputs, AssessmentSettings};
use opsdiag_core::config::Config;
use opsdiag_core::io;
use std::path::Path;

pub fn run(root: &Path, input: &Path, output: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let inputs = AssessmentInputs::load(input)
        .with_context(|| format!("failed to read inputs from {}", input.display()))?;
    let document = assess::run(&inputs, &AssessmentSettings::from_config(&config));

    let Some(path) = output else {
        return print_json(&document);
    };

    let data = document.to_json_pretty()?;
    io::atomic_write(path, data.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;

    if json {
        print_json(&serde_json::json!({
            "output": path,
            "summary": document.summary,
        }))?;
    } else {
        let s = &document.summary;
        println!("Wrote {}", path.display());
        println!("  company:              {}", document.company.name);
        println!("  functions:            {}", document.functions.len());
        println!("  customer ops FTEs:    {}", fmt_ftes(s.total_customer_ops_ftes));
        println!("  AI addressable FTEs:  {}", fmt_ftes(s.total_ai_addressable_ftes));
        println!("  offshore gap FTEs:    {}", fmt_ftes(s.total_offshore_gap_ftes));
        println!("  productivity FTEs:    {}", fmt_ftes(s.total_productivity_ftes));
    }
    Ok(())
}
