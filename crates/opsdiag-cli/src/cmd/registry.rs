use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use opsdiag_core::registry::{self, NewDiagnostic};
use opsdiag_core::types::Product;
use std::path::Path;

#[derive(Subcommand)]
pub enum RegistrySubcommand {
    /// Register a deployed diagnostic instance
    Add {
        #[arg(long)]
        client: String,
        /// basic, enhanced or agentic
        #[arg(long)]
        product: Product,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },

    /// List registered instances
    List {
        /// Only this client's instances
        #[arg(long)]
        client: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: RegistrySubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        RegistrySubcommand::Add {
            client,
            product,
            title,
            url,
        } => {
            let entry = registry::register(
                root,
                NewDiagnostic {
                    client,
                    product,
                    title,
                    url,
                },
            )
            .context("failed to register diagnostic")?;
            if json {
                print_json(&entry)?;
            } else {
                println!("Registered {} ({} / {})", entry.title, entry.client, entry.product);
            }
        }
        RegistrySubcommand::List { client } => {
            let entries = match client.as_deref() {
                Some(c) => registry::find(root, c)?,
                None => registry::list(root)?,
            };
            if json {
                return print_json(&entries);
            }
            if entries.is_empty() {
                println!("No diagnostics registered.");
                return Ok(());
            }
            let rows = entries
                .iter()
                .map(|e| {
                    vec![
                        e.client.clone(),
                        e.product.to_string(),
                        e.title.clone(),
                        e.url.clone().unwrap_or_else(|| "-".to_string()),
                        e.registered_at.format("%Y-%m-%d").to_string(),
                    ]
                })
                .collect();
            print_table(&["CLIENT", "PRODUCT", "TITLE", "URL", "REGISTERED"], rows);
        }
    }
    Ok(())
}
