use crate::classify::{NrrBenchmarks, INDUSTRY_WIDE};
use crate::error::Result;
use crate::paths;
use crate::roadmap::PlanningHorizon;
use crate::rollup::{default_functions, FunctionCatalog, FunctionDef, RollupPolicy, UNMAPPED_KEY};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

impl ConfigWarning {
    fn warning(message: impl Into<String>) -> Self {
        Self {
            level: WarnLevel::Warning,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: WarnLevel::Error,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    crate::ranking::DEFAULT_TOP_N
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RollupConfig {
    #[serde(default)]
    pub policy: RollupPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Share of above-median headcount counted as a productivity opportunity.
    #[serde(default = "default_capture_rate")]
    pub productivity_capture_rate: f64,
    /// Offshore gaps at or below this many FTEs get no roadmap item.
    #[serde(default = "default_min_offshore_gap")]
    pub min_offshore_gap_ftes: f64,
}

fn default_capture_rate() -> f64 {
    0.25
}

fn default_min_offshore_gap() -> f64 {
    2.0
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            productivity_capture_rate: default_capture_rate(),
            min_offshore_gap_ftes: default_min_offshore_gap(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Relative paths resolve against the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_path: Option<PathBuf>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            fallback_path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub project: ProjectConfig,
    #[serde(default)]
    pub planning_horizon: PlanningHorizon,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub rollup: RollupConfig,
    #[serde(default)]
    pub assessment: AssessmentConfig,
    #[serde(default = "default_functions")]
    pub functions: Vec<FunctionDef>,
    #[serde(default)]
    pub nrr_benchmarks: NrrBenchmarks,
    #[serde(default)]
    pub source: SourceConfig,
}

fn default_version() -> u32 {
    1
}

impl Config {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            version: 1,
            project: ProjectConfig {
                name: project_name.into(),
                description: None,
            },
            planning_horizon: PlanningHorizon::default(),
            ranking: RankingConfig::default(),
            rollup: RollupConfig::default(),
            assessment: AssessmentConfig::default(),
            functions: default_functions(),
            nrr_benchmarks: NrrBenchmarks::default(),
            source: SourceConfig::default(),
        }
    }

    /// Load `.opsdiag/config.yaml`, or defaults named after the root
    /// directory when the file does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            let name = root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "opsdiag".to_string());
            return Ok(Self::new(name));
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn catalog(&self) -> FunctionCatalog {
        FunctionCatalog::new(self.functions.clone())
    }

    /// Fallback document path, resolved against `root`.
    pub fn fallback_path(&self, root: &Path) -> Option<PathBuf> {
        self.source.fallback_path.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                root.join(p)
            }
        })
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.planning_horizon.years == 0 {
            warnings.push(ConfigWarning::error("planning_horizon.years must be at least 1"));
        } else if self.planning_horizon.last_year().is_none() {
            warnings.push(ConfigWarning::error(format!(
                "planning_horizon.start_year={} with years={} runs past year {}",
                self.planning_horizon.start_year,
                self.planning_horizon.years,
                u16::MAX
            )));
        }

        if self.ranking.top_n == 0 {
            warnings.push(ConfigWarning::warning(
                "ranking.top_n is 0; the priority ranking will always be empty",
            ));
        }

        let rate = self.assessment.productivity_capture_rate;
        if !(rate > 0.0 && rate <= 1.0) {
            warnings.push(ConfigWarning::error(format!(
                "assessment.productivity_capture_rate={rate} must be in (0, 1]"
            )));
        }
        if !(self.assessment.min_offshore_gap_ftes >= 0.0) {
            warnings.push(ConfigWarning::error(
                "assessment.min_offshore_gap_ftes must not be negative",
            ));
        }

        if self.functions.is_empty() {
            warnings.push(ConfigWarning::warning(
                "no functions configured; every function key rolls up as-is",
            ));
        }
        let mut seen: HashSet<String> = HashSet::new();
        for def in &self.functions {
            if def.key.eq_ignore_ascii_case(UNMAPPED_KEY) {
                warnings.push(ConfigWarning::error(format!(
                    "function key '{UNMAPPED_KEY}' is reserved"
                )));
            }
            for name in std::iter::once(&def.key).chain(def.aliases.iter()) {
                if !seen.insert(name.to_ascii_lowercase()) {
                    warnings.push(ConfigWarning::error(format!(
                        "function key or alias '{name}' is defined more than once"
                    )));
                }
            }
        }

        if !self.nrr_benchmarks.0.contains_key(INDUSTRY_WIDE) {
            warnings.push(ConfigWarning::warning(format!(
                "nrr_benchmarks has no '{INDUSTRY_WIDE}' entry; built-in thresholds are used as fallback"
            )));
        }
        for (segment, t) in &self.nrr_benchmarks.0 {
            if !(t.top_quartile >= t.median && t.median >= t.bottom_quartile) {
                warnings.push(ConfigWarning::error(format!(
                    "nrr_benchmarks.{segment}: thresholds must satisfy top >= median >= bottom"
                )));
            }
        }

        if let Some(url) = &self.source.url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                warnings.push(ConfigWarning::warning(format!(
                    "source.url '{url}' is not an http(s) URL"
                )));
            }
        }
        if self.source.timeout_secs == 0 {
            warnings.push(ConfigWarning::warning(
                "source.timeout_secs is 0; remote fetches will fail immediately",
            ));
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
