use crate::output::{fmt_ftes, print_json};
use opsdiag_core::roadmap::{assemble, RoadmapSummary};
use opsdiag_core::types::{Lever, RoleLever};
use std::path::Path;

pub fn run(root: &Path, doc: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let (config, loaded) = super::load_document(root, doc)?;
    let horizon = config.planning_horizon;
    let roadmap = assemble(&loaded.document.roadmap.items(), &horizon);
    let summary = RoadmapSummary::from_roadmap(&roadmap, &horizon);

    if json {
        return print_json(&serde_json::json!({
            "horizon": horizon,
            "years": roadmap.years,
            "summary": summary,
        }));
    }

    for (year, plan) in &roadmap.years {
        println!("{year}");
        if plan.is_empty() {
            println!("  (no initiatives)");
            continue;
        }
        for lever in [RoleLever::Productivity, RoleLever::Offshoring] {
            for item in plan.role_items(lever) {
                println!(
                    "  [{:<12}] {:>6}  {} ({})",
                    lever.as_str(),
                    fmt_ftes(item.effective_ftes()),
                    item.role,
                    item.function_key
                );
            }
        }
        for case in &plan.ai {
            println!(
                "  [{:<12}] {:>6}  {} {}",
                Lever::Ai.as_str(),
                fmt_ftes(case.effective_ftes()),
                case.name,
                case.half
            );
        }
    }

    println!();
    println!(
        "Total {} FTEs (productivity {}, offshoring {}, AI {})",
        fmt_ftes(summary.total_ftes),
        fmt_ftes(summary.productivity_ftes),
        fmt_ftes(summary.offshoring_ftes),
        fmt_ftes(summary.ai_ftes)
    );
    if !summary.empty_years.is_empty() {
        let years: Vec<String> = summary.empty_years.iter().map(u16::to_string).collect();
        println!("Years with no initiatives: {}", years.join(", "));
    }
    Ok(())
}
