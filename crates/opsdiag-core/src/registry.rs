//! Append-only list of deployed diagnostic instances.
//!
//! Layout:
//!   .opsdiag/diagnostics.json  : array of entries, registration order
//!
//! `register` is the only write path; entries are never edited or removed.

use crate::error::{OpsdiagError, Result};
use crate::types::Product;
use crate::{io, paths};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticEntry {
    pub client: String,
    pub product: Product,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDiagnostic {
    pub client: String,
    pub product: Product,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

fn load_all(root: &Path) -> Result<Vec<DiagnosticEntry>> {
    let path = paths::registry_path(root);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(&path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&content)?)
}

pub fn register(root: &Path, new: NewDiagnostic) -> Result<DiagnosticEntry> {
    paths::validate_slug(&new.client)?;
    let _guard = io::store_lock();
    let mut entries = load_all(root)?;
    if entries
        .iter()
        .any(|e| e.client == new.client && e.product == new.product)
    {
        return Err(OpsdiagError::DiagnosticExists {
            client: new.client,
            product: new.product.to_string(),
        });
    }

    let title = new
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| format!("{} {} diagnostic", new.client, new.product));
    let entry = DiagnosticEntry {
        client: new.client,
        product: new.product,
        title,
        url: new.url,
        registered_at: Utc::now(),
    };
    entries.push(entry.clone());
    let data = serde_json::to_string_pretty(&entries)?;
    io::atomic_write(&paths::registry_path(root), data.as_bytes())?;
    tracing::info!(client = %entry.client, product = %entry.product, "diagnostic registered");
    Ok(entry)
}

pub fn list(root: &Path) -> Result<Vec<DiagnosticEntry>> {
    load_all(root)
}

/// Every registered product for one client.
pub fn find(root: &Path, client: &str) -> Result<Vec<DiagnosticEntry>> {
    Ok(load_all(root)?
        .into_iter()
        .filter(|e| e.client == client)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new(client: &str, product: Product) -> NewDiagnostic {
        NewDiagnostic {
            client: client.to_string(),
            product,
            title: None,
            url: None,
        }
    }

    #[test]
    fn register_appends_in_order() {
        let dir = tempfile::TempDir::new().unwrap();
        register(dir.path(), new("acme", Product::Basic)).unwrap();
        register(dir.path(), new("globex", Product::Agentic)).unwrap();
        register(dir.path(), new("acme", Product::Enhanced)).unwrap();

        let all = list(dir.path()).unwrap();
        assert_eq!(
            all.iter().map(|e| e.client.as_str()).collect::<Vec<_>>(),
            vec!["acme", "globex", "acme"]
        );
        assert_eq!(find(dir.path(), "acme").unwrap().len(), 2);
        assert_eq!(all[0].title, "acme basic diagnostic");
    }

    #[test]
    fn concurrent_registrations_keep_every_entry() {
        let dir = tempfile::TempDir::new().unwrap();
        std::thread::scope(|s| {
            for i in 0..16 {
                let root = dir.path();
                s.spawn(move || register(root, new(&format!("client-{i}"), Product::Basic)).unwrap());
            }
        });

        let all = list(dir.path()).unwrap();
        assert_eq!(all.len(), 16);
        for i in 0..16 {
            assert_eq!(find(dir.path(), &format!("client-{i}")).unwrap().len(), 1);
        }
    }

    #[test]
    fn duplicate_is_rejected_and_store_unchanged() {
        let dir = tempfile::TempDir::new().unwrap();
        register(dir.path(), new("acme", Product::Basic)).unwrap();
        let before = std::fs::read_to_string(paths::registry_path(dir.path())).unwrap();

        let err = register(dir.path(), new("acme", Product::Basic)).unwrap_err();
        assert!(matches!(err, OpsdiagError::DiagnosticExists { .. }));
        let after = std::fs::read_to_string(paths::registry_path(dir.path())).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn invalid_client_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(register(dir.path(), new("Not A Slug", Product::Basic)).is_err());
        assert!(list(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn registry_is_json_array() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut d = new("acme", Product::Agentic);
        d.url = Some("https://acme.diag.example.com".to_string());
        register(dir.path(), d).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(paths::registry_path(dir.path())).unwrap())
                .unwrap();
        assert_eq!(raw[0]["product"], "agentic");
        assert_eq!(raw[0]["url"], "https://acme.diag.example.com");
    }
}
