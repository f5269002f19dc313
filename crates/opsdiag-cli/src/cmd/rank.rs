use crate::output::{fmt_ftes, print_json, print_table};
use opsdiag_core::ranking::rank_roadmap;
use std::path::Path;

pub fn run(root: &Path, doc: Option<&Path>, top: Option<usize>, json: bool) -> anyhow::Result<()> {
    let (config, loaded) = super::load_document(root, doc)?;
    let n = top.unwrap_or(config.ranking.top_n);
    let ranked = rank_roadmap(&loaded.document.roadmap, &config.planning_horizon, n);

    if json {
        return print_json(&ranked);
    }
    if ranked.is_empty() {
        println!("No role-level opportunities.");
        return Ok(());
    }
    let rows = ranked
        .iter()
        .map(|r| {
            vec![
                r.rank.to_string(),
                r.item.role.clone(),
                r.item.function_key.clone(),
                r.item.lever.as_str().to_string(),
                r.item.year.to_string(),
                fmt_ftes(r.item.effective_ftes()),
                r.category.to_string(),
            ]
        })
        .collect();
    print_table(
        &["#", "ROLE", "FUNCTION", "LEVER", "YEAR", "FTES", "CATEGORY"],
        rows,
    );
    Ok(())
}
