//! Where the assessment document comes from.
//!
//! Resolution order: an explicit path, the configured URL, the configured
//! fallback file, then the sample compiled into this crate. Remote and
//! fallback failures are logged and skipped; only an explicit path failure
//! is returned to the caller.

use crate::config::Config;
use crate::document::AssessmentDocument;
use crate::error::{OpsdiagError, Result};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

const BUNDLED_DOCUMENT: &str = include_str!("../data/sample_assessment.json");

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "location", rename_all = "snake_case")]
pub enum DocumentOrigin {
    File(PathBuf),
    Remote(String),
    Fallback(PathBuf),
    Bundled,
}

impl fmt::Display for DocumentOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentOrigin::File(p) => write!(f, "file {}", p.display()),
            DocumentOrigin::Remote(url) => write!(f, "remote {url}"),
            DocumentOrigin::Fallback(p) => write!(f, "fallback {}", p.display()),
            DocumentOrigin::Bundled => f.write_str("bundled sample"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub document: AssessmentDocument,
    pub origin: DocumentOrigin,
}

/// The sample document shipped with the crate.
pub fn bundled() -> Result<AssessmentDocument> {
    AssessmentDocument::from_json(BUNDLED_DOCUMENT)
}

/// Read a document from disk; `.yaml`/`.yml` files are accepted too.
pub fn read_file(path: &Path) -> Result<AssessmentDocument> {
    crate::io::read_structured(path)
}

/// Single GET, no retry.
pub fn fetch(url: &str, timeout: Duration) -> Result<AssessmentDocument> {
    let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
    let resp = client.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(OpsdiagError::Fetch(format!("{url} returned {status}")));
    }
    Ok(resp.json::<AssessmentDocument>()?)
}

pub fn load(root: &Path, config: &Config, explicit: Option<&Path>) -> Result<LoadedDocument> {
    if let Some(path) = explicit {
        let document = read_file(path)?;
        return Ok(LoadedDocument {
            document,
            origin: DocumentOrigin::File(path.to_path_buf()),
        });
    }

    if let Some(url) = &config.source.url {
        match fetch(url, Duration::from_secs(config.source.timeout_secs)) {
            Ok(document) => {
                tracing::debug!(%url, "loaded assessment document");
                return Ok(LoadedDocument {
                    document,
                    origin: DocumentOrigin::Remote(url.clone()),
                });
            }
            Err(e) => tracing::warn!(%url, error = %e, "document fetch failed, falling back"),
        }
    }

    if let Some(path) = config.fallback_path(root) {
        match read_file(&path) {
            Ok(document) => {
                return Ok(LoadedDocument {
                    document,
                    origin: DocumentOrigin::Fallback(path),
                })
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "fallback document unreadable")
            }
        }
    }

    Ok(LoadedDocument {
        document: bundled()?,
        origin: DocumentOrigin::Bundled,
    })
}
