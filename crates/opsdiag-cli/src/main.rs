mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    classify::ClassifySubcommand, config::ConfigSubcommand, feedback::FeedbackSubcommand,
    registry::RegistrySubcommand,
};
use opsdiag_core::types::RoleLever;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "opsdiag",
    about = "Customer operations diagnostic kit: roll up, sequence and rank workforce levers",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .opsdiag/ or .git/)
    #[arg(long, global = true, env = "OPSDIAG_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Assessment document to use instead of the configured sources
    #[arg(long, global = true, env = "OPSDIAG_DOC")]
    doc: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize .opsdiag/ in the current project
    Init,

    /// Build an assessment document from raw inputs
    Assess {
        /// Inputs file (YAML or JSON)
        #[arg(long, short)]
        input: PathBuf,
        /// Write the document here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Load the assessment document and report where it came from
    Fetch {
        /// Save a copy of the loaded document
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Show the year-by-year roadmap
    Roadmap,

    /// Per-function FTE totals for one lever and year
    Rollup {
        /// Defaults to the first planning year
        #[arg(long)]
        year: Option<u16>,
        /// productivity or offshoring
        #[arg(long, default_value = "productivity")]
        lever: RoleLever,
        /// Roll up a pre-filtered item list instead of the document roadmap
        #[arg(long)]
        items: Option<PathBuf>,
    },

    /// Top role-level opportunities by FTE impact
    Rank {
        /// Number of items (default: ranking.top_n)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Classify benchmark values and labels
    Classify {
        #[command(subcommand)]
        subcommand: ClassifySubcommand,
    },

    /// Record and list client feedback
    Feedback {
        #[command(subcommand)]
        subcommand: FeedbackSubcommand,
    },

    /// Register and list deployed diagnostics
    Registry {
        #[command(subcommand)]
        subcommand: RegistrySubcommand,
    },

    /// Show or validate the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Serve the JSON API
    Serve {
        #[arg(long, default_value = "3141")]
        port: u16,
        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let doc = cli.doc.as_deref();

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Assess { input, output } => {
            cmd::assess::run(&root, &input, output.as_deref(), cli.json)
        }
        Commands::Fetch { save } => cmd::fetch::run(&root, doc, save.as_deref(), cli.json),
        Commands::Roadmap => cmd::roadmap::run(&root, doc, cli.json),
        Commands::Rollup { year, lever, items } => {
            cmd::rollup::run(&root, doc, year, lever, items.as_deref(), cli.json)
        }
        Commands::Rank { top } => cmd::rank::run(&root, doc, top, cli.json),
        Commands::Classify { subcommand } => cmd::classify::run(&root, subcommand, cli.json),
        Commands::Feedback { subcommand } => cmd::feedback::run(&root, subcommand, cli.json),
        Commands::Registry { subcommand } => cmd::registry::run(&root, subcommand, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Serve { port, no_open } => {
            cmd::serve::run(&root, cli.doc.clone(), port, no_open)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
