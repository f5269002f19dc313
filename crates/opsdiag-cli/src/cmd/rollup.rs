use crate::output::{fmt_ftes, print_json, print_table};
use anyhow::Context;
use opsdiag_core::roadmap::RoleLeverItem;
use opsdiag_core::rollup::{rollup_checked, rollup_for, RollupTable};
use opsdiag_core::types::RoleLever;
use std::path::Path;

pub fn run(
    root: &Path,
    doc: Option<&Path>,
    year: Option<u16>,
    lever: RoleLever,
    items: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let (table, heading) = match items {
        // Caller-supplied list: no filtering, the configured policy decides
        // whether mixed levers/years are an error.
        Some(path) => {
            let config = opsdiag_core::config::Config::load(root).context("failed to load config")?;
            let list: Vec<RoleLeverItem> = opsdiag_core::io::read_structured(path)
                .with_context(|| format!("failed to read items from {}", path.display()))?;
            let table = rollup_checked(&list, &config.catalog(), config.rollup.policy)?;
            (table, format!("{} items from {}", list.len(), path.display()))
        }
        None => {
            let (config, loaded) = super::load_document(root, doc)?;
            let year = year.unwrap_or(config.planning_horizon.first_year());
            let table = rollup_for(
                &loaded.document.roadmap.role_items(),
                lever,
                year,
                &config.catalog(),
            );
            (table, format!("{} {year}", lever.as_str()))
        }
    };

    if json {
        return print_json(&table);
    }
    print_rollup(&heading, &table);
    Ok(())
}

fn print_rollup(heading: &str, table: &RollupTable) {
    println!("Rollup: {heading}");
    if table.is_empty() {
        println!("No items.");
        return;
    }
    let rows = table
        .entries
        .iter()
        .map(|e| {
            vec![
                e.function.clone(),
                e.key.to_string(),
                fmt_ftes(e.total_ftes),
                e.count.to_string(),
            ]
        })
        .collect();
    print_table(&["FUNCTION", "KEY", "FTES", "ITEMS"], rows);
    println!("Total: {} FTEs", fmt_ftes(table.grand_total));
}
