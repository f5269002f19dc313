//! Client feedback on a deployed diagnostic.
//!
//! Layout:
//!   .opsdiag/feedback.yaml  : list of feedback entries, oldest first
//!
//! IDs are sequential: F1, F2, F3, …

use crate::error::{OpsdiagError, Result};
use crate::types::Product;
use crate::{io, paths};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Bug,
    Feature,
    General,
}

impl FeedbackKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackKind::Bug => "bug",
            FeedbackKind::Feature => "feature",
            FeedbackKind::General => "general",
        }
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FeedbackKind {
    type Err = OpsdiagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bug" => Ok(FeedbackKind::Bug),
            "feature" => Ok(FeedbackKind::Feature),
            "general" => Ok(FeedbackKind::General),
            _ => Err(OpsdiagError::InvalidFeedbackKind(s.to_string())),
        }
    }
}

/// A submission before it has been assigned an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFeedback {
    pub client: String,
    pub product: Product,
    pub kind: FeedbackKind,
    #[serde(default)]
    pub submitter: Option<String>,
    pub summary: String,
    #[serde(default)]
    pub details: String,
    /// Defaults to today (UTC).
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl NewFeedback {
    pub fn validate(&self) -> Result<()> {
        paths::validate_slug(&self.client)?;
        if self.summary.trim().is_empty() {
            return Err(OpsdiagError::EmptyFeedback);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub id: String,
    pub date: NaiveDate,
    pub client: String,
    pub product: Product,
    pub kind: FeedbackKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter: Option<String>,
    pub summary: String,
    #[serde(default)]
    pub details: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Destination for submitted feedback.
pub trait FeedbackSink {
    fn submit(&self, feedback: NewFeedback) -> Result<FeedbackEntry>;
    fn entries(&self) -> Result<Vec<FeedbackEntry>>;
}

/// Stores feedback in `.opsdiag/feedback.yaml` under a project root.
#[derive(Debug, Clone)]
pub struct FileFeedbackSink {
    root: PathBuf,
}

impl FileFeedbackSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FeedbackSink for FileFeedbackSink {
    fn submit(&self, feedback: NewFeedback) -> Result<FeedbackEntry> {
        add(&self.root, feedback)
    }

    fn entries(&self) -> Result<Vec<FeedbackEntry>> {
        list(&self.root)
    }
}

// ---------------------------------------------------------------------------
// Internal file I/O
// ---------------------------------------------------------------------------

fn load_all(root: &Path) -> Result<Vec<FeedbackEntry>> {
    let path = paths::feedback_path(root);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(&path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_yaml::from_str(&content)?)
}

fn save_all(root: &Path, entries: &[FeedbackEntry]) -> Result<()> {
    let path = paths::feedback_path(root);
    let content = serde_yaml::to_string(entries)?;
    io::atomic_write(&path, content.as_bytes())
}

fn next_id(entries: &[FeedbackEntry]) -> String {
    let max = entries
        .iter()
        .filter_map(|e| e.id.strip_prefix('F')?.parse::<usize>().ok())
        .max()
        .unwrap_or(0);
    format!("F{}", max + 1)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Validate and append a feedback entry. Nothing is written when validation
/// fails.
pub fn add(root: &Path, feedback: NewFeedback) -> Result<FeedbackEntry> {
    feedback.validate()?;
    let _guard = crate::io::store_lock();
    let mut entries = load_all(root)?;
    let now = Utc::now();
    let entry = FeedbackEntry {
        id: next_id(&entries),
        date: feedback.date.unwrap_or_else(|| now.date_naive()),
        client: feedback.client,
        product: feedback.product,
        kind: feedback.kind,
        submitter: feedback.submitter.filter(|s| !s.trim().is_empty()),
        summary: feedback.summary.trim().to_string(),
        details: feedback.details,
        created_at: now,
    };
    entries.push(entry.clone());
    save_all(root, &entries)?;
    tracing::info!(id = %entry.id, client = %entry.client, kind = %entry.kind, "feedback recorded");
    Ok(entry)
}

/// All entries, oldest first.
pub fn list(root: &Path) -> Result<Vec<FeedbackEntry>> {
    load_all(root)
}

pub fn get(root: &Path, id: &str) -> Result<FeedbackEntry> {
    load_all(root)?
        .into_iter()
        .find(|e| e.id == id)
        .ok_or_else(|| OpsdiagError::FeedbackNotFound(id.to_string()))
}

/// Render an entry as a markdown issue body.
pub fn to_markdown(entry: &FeedbackEntry) -> String {
    let mut out = format!(
        "## [{}] {}\n\n- **Client:** {}\n- **Product:** {}\n- **Date:** {}\n",
        entry.kind, entry.summary, entry.client, entry.product, entry.date
    );
    if let Some(who) = &entry.submitter {
        out.push_str(&format!("- **Submitted by:** {who}\n"));
    }
    if !entry.details.trim().is_empty() {
        out.push_str(&format!("\n{}\n", entry.details.trim()));
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
