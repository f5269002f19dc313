use crate::error::{OpsdiagError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const OPSDIAG_DIR: &str = ".opsdiag";
pub const CONFIG_FILE: &str = ".opsdiag/config.yaml";
pub const FEEDBACK_FILE: &str = ".opsdiag/feedback.yaml";
pub const REGISTRY_FILE: &str = ".opsdiag/diagnostics.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn opsdiag_dir(root: &Path) -> PathBuf {
    root.join(OPSDIAG_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn feedback_path(root: &Path) -> PathBuf {
    root.join(FEEDBACK_FILE)
}

pub fn registry_path(root: &Path) -> PathBuf {
    root.join(REGISTRY_FILE)
}

// ---------------------------------------------------------------------------
// Slug validation
// ---------------------------------------------------------------------------

fn slug_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

/// Client identifiers double as deploy subdomains, so they are slugs.
pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.len() > 64 || !slug_regex().is_match(slug) {
        return Err(OpsdiagError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}
