pub mod assess;
pub mod classify;
pub mod config;
pub mod feedback;
pub mod fetch;
pub mod init;
pub mod rank;
pub mod registry;
pub mod roadmap;
pub mod rollup;
pub mod serve;

use anyhow::Context;
use opsdiag_core::config::Config;
use opsdiag_core::source::{self, LoadedDocument};
use std::path::Path;

/// Config plus the assessment document, resolved the same way for every
/// read command.
pub(crate) fn load_document(
    root: &Path,
    doc: Option<&Path>,
) -> anyhow::Result<(Config, LoadedDocument)> {
    let config = Config::load(root).context("failed to load config")?;
    let loaded = source::load(root, &config, doc).context("failed to load assessment document")?;
    tracing::debug!(origin = %loaded.origin, "assessment document loaded");
    Ok((config, loaded))
}
