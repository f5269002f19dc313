use opsdiag_core::config::Config;
use opsdiag_core::source::{self, LoadedDocument};
use std::path::PathBuf;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    /// Document path that overrides the configured sources.
    pub document: Option<PathBuf>,
}

impl AppState {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            document: None,
        }
    }

    pub fn with_document(mut self, path: Option<PathBuf>) -> Self {
        self.document = path;
        self
    }

    /// Blocking: may perform a remote fetch. Call from `spawn_blocking`.
    pub fn load(&self) -> opsdiag_core::Result<(Config, LoadedDocument)> {
        let config = Config::load(&self.root)?;
        let loaded = source::load(&self.root, &config, self.document.as_deref())?;
        tracing::debug!(origin = %loaded.origin, "assessment document loaded");
        Ok((config, loaded))
    }
}
