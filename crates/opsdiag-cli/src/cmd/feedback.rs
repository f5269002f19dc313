use crate::output::{print_json, print_table};
use anyhow::Context;
use chrono::NaiveDate;
use clap::Subcommand;
use opsdiag_core::feedback::{self, FeedbackKind, FeedbackSink, FileFeedbackSink, NewFeedback};
use opsdiag_core::types::Product;
use std::path::Path;

#[derive(Subcommand)]
pub enum FeedbackSubcommand {
    /// Record feedback from a client
    Add {
        /// Client slug, e.g. acme-health
        #[arg(long)]
        client: String,
        /// basic, enhanced or agentic
        #[arg(long)]
        product: Product,
        /// bug, feature or general
        #[arg(long, default_value = "general")]
        kind: FeedbackKind,
        #[arg(long)]
        summary: String,
        #[arg(long, default_value = "")]
        details: String,
        #[arg(long)]
        submitter: Option<String>,
        /// YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List all feedback, oldest first
    List,

    /// Show one entry as markdown
    Show { id: String },
}

pub fn run(root: &Path, subcmd: FeedbackSubcommand, json: bool) -> anyhow::Result<()> {
    let sink = FileFeedbackSink::new(root);
    match subcmd {
        FeedbackSubcommand::Add {
            client,
            product,
            kind,
            summary,
            details,
            submitter,
            date,
        } => {
            let entry = sink
                .submit(NewFeedback {
                    client,
                    product,
                    kind,
                    submitter,
                    summary,
                    details,
                    date,
                })
                .context("failed to record feedback")?;
            if json {
                print_json(&entry)?;
            } else {
                println!("Recorded {}: {}", entry.id, entry.summary);
            }
        }
        FeedbackSubcommand::List => {
            let entries = sink.entries()?;
            if json {
                return print_json(&entries);
            }
            if entries.is_empty() {
                println!("No feedback.");
                return Ok(());
            }
            let rows = entries
                .iter()
                .map(|e| {
                    vec![
                        e.id.clone(),
                        e.date.to_string(),
                        e.client.clone(),
                        e.product.to_string(),
                        e.kind.to_string(),
                        e.summary.clone(),
                    ]
                })
                .collect();
            print_table(&["ID", "DATE", "CLIENT", "PRODUCT", "KIND", "SUMMARY"], rows);
        }
        FeedbackSubcommand::Show { id } => {
            let entry = feedback::get(root, &id)?;
            if json {
                print_json(&entry)?;
            } else {
                print!("{}", feedback::to_markdown(&entry));
            }
        }
    }
    Ok(())
}
