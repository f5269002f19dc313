use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use opsdiag_core::classify::{MaturityLevel, OffshoreRating, INDUSTRY_WIDE};
use opsdiag_core::config::Config;
use std::path::Path;

#[derive(Subcommand)]
pub enum ClassifySubcommand {
    /// Place a net revenue retention value in its peer quartile
    Nrr {
        /// NRR percentage, e.g. 112
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Benchmark segment (falls back to industry-wide)
        #[arg(long, default_value = INDUSTRY_WIDE)]
        segment: String,
    },

    /// Bucket an offshoring suitability rating
    Rating { label: String },

    /// Place a maturity label on the capability scale
    Maturity { label: String },
}

pub fn run(root: &Path, subcmd: ClassifySubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ClassifySubcommand::Nrr { value, segment } => nrr(root, value, &segment, json),
        ClassifySubcommand::Rating { label } => rating(&label, json),
        ClassifySubcommand::Maturity { label } => maturity(&label, json),
    }
}

fn nrr(root: &Path, value: f64, segment: &str, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let table = &config.nrr_benchmarks;
    let used = table.resolve_segment(segment);
    let thresholds = table.thresholds_for(segment);
    let quartile = table.classify(value, segment);

    if json {
        return print_json(&serde_json::json!({
            "value": value,
            "segment": used,
            "thresholds": thresholds,
            "quartile": quartile,
            "badge": quartile.badge_color(),
        }));
    }
    println!("{quartile}  (NRR {value}%, segment {used})");
    println!(
        "  thresholds: top {} / median {} / bottom {}",
        thresholds.top_quartile, thresholds.median, thresholds.bottom_quartile
    );
    Ok(())
}

fn rating(label: &str, json: bool) -> anyhow::Result<()> {
    let rating = OffshoreRating::from(label);
    let bucket = rating.bucket();
    if json {
        return print_json(&serde_json::json!({
            "rating": rating,
            "bucket": bucket,
            "badge": bucket.color(),
        }));
    }
    println!("{rating}  ({bucket:?})");
    Ok(())
}

fn maturity(label: &str, json: bool) -> anyhow::Result<()> {
    let level = MaturityLevel::from(label);
    if json {
        return print_json(&serde_json::json!({
            "level": level,
            "position": level.position(),
        }));
    }
    println!("{level}  (column {})", level.position());
    Ok(())
}
