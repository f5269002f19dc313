//! Per-function aggregation of role-level impact for one lever and year.

use crate::error::{OpsdiagError, Result};
use crate::roadmap::RoleLeverItem;
use crate::types::RoleLever;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Function catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl FunctionDef {
    pub fn new(key: &str, label: &str, aliases: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn matches(&self, raw: &str) -> bool {
        self.key.eq_ignore_ascii_case(raw) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(raw))
    }
}

/// Known organizational functions. An empty catalog accepts every
/// non-empty key as its own bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCatalog {
    functions: Vec<FunctionDef>,
}

pub fn default_functions() -> Vec<FunctionDef> {
    vec![
        FunctionDef::new("professional_services", "Professional Services", &["ps"]),
        FunctionDef::new("customer_success", "Customer Success", &["cs"]),
        FunctionDef::new("support", "Customer Support", &["customer_support"]),
    ]
}

impl Default for FunctionCatalog {
    fn default() -> Self {
        Self::new(default_functions())
    }
}

impl FunctionCatalog {
    pub fn new(functions: Vec<FunctionDef>) -> Self {
        Self { functions }
    }

    pub fn functions(&self) -> &[FunctionDef] {
        &self.functions
    }

    pub fn get(&self, key: &str) -> Option<&FunctionDef> {
        let key = key.trim();
        self.functions.iter().find(|f| f.matches(key))
    }

    /// Bucket an item falls into. The raw key is tried first, then the
    /// display label.
    pub fn resolve(&self, function_key: &str, function_label: &str) -> RollupKey {
        let raw = function_key.trim();
        if self.functions.is_empty() {
            return if raw.is_empty() {
                RollupKey::Unmapped
            } else {
                RollupKey::Function(raw.to_string())
            };
        }
        if let Some(def) = self.get(raw) {
            return RollupKey::Function(def.key.clone());
        }
        let label = function_label.trim();
        self.functions
            .iter()
            .find(|f| !label.is_empty() && f.label.eq_ignore_ascii_case(label))
            .map(|f| RollupKey::Function(f.key.clone()))
            .unwrap_or(RollupKey::Unmapped)
    }

    fn label_for(&self, key: &RollupKey, fallback: &str) -> String {
        match key {
            RollupKey::Unmapped => UNMAPPED_LABEL.to_string(),
            RollupKey::Function(k) => self
                .get(k)
                .map(|f| f.label.clone())
                .unwrap_or_else(|| {
                    if fallback.trim().is_empty() {
                        k.clone()
                    } else {
                        fallback.trim().to_string()
                    }
                }),
        }
    }
}

// ---------------------------------------------------------------------------
// RollupKey
// ---------------------------------------------------------------------------

pub const UNMAPPED_KEY: &str = "unmapped";
pub const UNMAPPED_LABEL: &str = "Unmapped";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RollupKey {
    Function(String),
    Unmapped,
}

impl RollupKey {
    pub fn as_str(&self) -> &str {
        match self {
            RollupKey::Function(k) => k,
            RollupKey::Unmapped => UNMAPPED_KEY,
        }
    }
}

impl From<String> for RollupKey {
    fn from(s: String) -> Self {
        if s == UNMAPPED_KEY {
            RollupKey::Unmapped
        } else {
            RollupKey::Function(s)
        }
    }
}

impl From<RollupKey> for String {
    fn from(k: RollupKey) -> Self {
        k.as_str().to_string()
    }
}

impl fmt::Display for RollupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Whether `rollup_checked` trusts callers to pre-filter by lever and year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollupPolicy {
    #[default]
    Trust,
    Strict,
}

impl RollupPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            RollupPolicy::Trust => "trust",
            RollupPolicy::Strict => "strict",
        }
    }
}

impl fmt::Display for RollupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RollupPolicy {
    type Err = OpsdiagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trust" => Ok(RollupPolicy::Trust),
            "strict" => Ok(RollupPolicy::Strict),
            _ => Err(OpsdiagError::InvalidRollupPolicy(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Rollup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionRollup {
    pub key: RollupKey,
    pub function: String,
    pub total_ftes: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollupTable {
    pub entries: Vec<FunctionRollup>,
    pub grand_total: f64,
}

impl RollupTable {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&FunctionRollup> {
        self.entries.iter().find(|e| e.key.as_str() == key)
    }
}

/// Group items by function, largest total first. Ties keep first-seen order.
///
/// Callers are trusted to pass items of a single lever and year; see
/// [`rollup_checked`] for the enforcing variant.
pub fn rollup(items: &[RoleLeverItem], catalog: &FunctionCatalog) -> RollupTable {
    let mut entries: Vec<FunctionRollup> = Vec::new();
    let mut grand_total = 0.0;

    for item in items {
        let key = catalog.resolve(&item.function_key, &item.function);
        let ftes = item.effective_ftes();
        grand_total += ftes;
        match entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => {
                entry.total_ftes += ftes;
                entry.count += 1;
            }
            None => {
                if key == RollupKey::Unmapped {
                    tracing::debug!(function_key = %item.function_key, "rolling up unmapped function");
                }
                let function = catalog.label_for(&key, &item.function);
                entries.push(FunctionRollup {
                    key,
                    function,
                    total_ftes: ftes,
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, so equal totals stay in first-seen order
    entries.sort_by(|a, b| b.total_ftes.total_cmp(&a.total_ftes));

    RollupTable {
        entries,
        grand_total,
    }
}

/// [`rollup`] with the caller contract enforced under [`RollupPolicy::Strict`]:
/// every item must share the first item's lever and year.
pub fn rollup_checked(
    items: &[RoleLeverItem],
    catalog: &FunctionCatalog,
    policy: RollupPolicy,
) -> Result<RollupTable> {
    if policy == RollupPolicy::Strict {
        if let Some(first) = items.first() {
            for item in &items[1..] {
                if item.lever != first.lever {
                    return Err(OpsdiagError::MixedRollupInput {
                        expected: format!("lever {}", first.lever),
                        found: format!("lever {}", item.lever),
                    });
                }
                if item.year != first.year {
                    return Err(OpsdiagError::MixedRollupInput {
                        expected: format!("year {}", first.year),
                        found: format!("year {}", item.year),
                    });
                }
            }
        }
    }
    Ok(rollup(items, catalog))
}

/// Filter to one lever and year, then roll up.
pub fn rollup_for(
    items: &[RoleLeverItem],
    lever: RoleLever,
    year: u16,
    catalog: &FunctionCatalog,
) -> RollupTable {
    let selected: Vec<RoleLeverItem> = items
        .iter()
        .filter(|i| i.lever == lever && i.year == year)
        .cloned()
        .collect();
    rollup(&selected, catalog)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
