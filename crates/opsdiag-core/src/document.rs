//! Assessment document: the read-only JSON payload every report is rendered
//! from. Optional numeric fields default to zero/None and collections to
//! empty so a partially populated document still loads.

use crate::classify::OffshoreRating;
use crate::roadmap::Roadmap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Company
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub ownership: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub revenue_usd: Option<f64>,
    #[serde(default)]
    pub employees: Option<u64>,
    #[serde(default)]
    pub revenue_per_employee: Option<f64>,
    #[serde(default)]
    pub india_employees: Option<u64>,
    #[serde(default)]
    pub india_locations: Vec<String>,
    #[serde(default)]
    pub us_locations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeerFinancial {
    pub name: String,
    #[serde(default)]
    pub revenue_usd: f64,
    #[serde(default)]
    pub employees: u64,
    #[serde(default)]
    pub revenue_per_employee: Option<f64>,
    #[serde(default)]
    pub note: String,
}

/// `round(revenue / employees)`, or None when either side is zero.
pub fn revenue_per_employee(revenue: f64, employees: u64) -> Option<f64> {
    if revenue > 0.0 && employees > 0 {
        Some((revenue / employees as f64).round_ties_even())
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// FteSource
// ---------------------------------------------------------------------------

/// Where a role's FTE estimate came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FteSource {
    #[default]
    RevenueBenchmark,
    JobIndicators,
    Other(String),
}

impl FteSource {
    pub fn as_str(&self) -> &str {
        match self {
            FteSource::RevenueBenchmark => "revenue_benchmark",
            FteSource::JobIndicators => "job_indicators",
            FteSource::Other(s) => s,
        }
    }

    /// True when the figure is a benchmark extrapolation, not company data.
    pub fn is_benchmark_estimate(&self) -> bool {
        matches!(self, FteSource::RevenueBenchmark)
    }
}

impl From<&str> for FteSource {
    fn from(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.starts_with("revenue") {
            FteSource::RevenueBenchmark
        } else if s.starts_with("job") {
            FteSource::JobIndicators
        } else {
            FteSource::Other(s.to_string())
        }
    }
}

impl From<String> for FteSource {
    fn from(s: String) -> Self {
        FteSource::from(s.as_str())
    }
}

impl From<FteSource> for String {
    fn from(s: FteSource) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for FteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Role-level blocks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductivityOpportunity {
    #[serde(default)]
    pub opportunity_ftes: f64,
    #[serde(default)]
    pub excess_above_median: f64,
    #[serde(default)]
    pub has_opportunity: bool,
}

/// One AI horizon bucket: the task automated and its impact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HorizonTask {
    #[serde(default, alias = "description")]
    pub task: String,
    #[serde(default)]
    pub impact_pct: f64,
}

/// AI impact for a role. Yearly efficiencies travel on the wire as flat
/// `efficiency_pct_<year>` keys and are collected into a year map here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAiImpact", into = "RawAiImpact")]
pub struct AiImpact {
    pub h1_automate: HorizonTask,
    pub h2_ai_assisted: HorizonTask,
    pub h3_agentic: HorizonTask,
    pub total_impact_pct: f64,
    pub efficiency_pct: BTreeMap<u16, f64>,
    pub ai_adjustment_factor: f64,
    pub impact_ftes: Option<f64>,
}

impl Default for AiImpact {
    fn default() -> Self {
        Self {
            h1_automate: HorizonTask::default(),
            h2_ai_assisted: HorizonTask::default(),
            h3_agentic: HorizonTask::default(),
            total_impact_pct: 0.0,
            efficiency_pct: BTreeMap::new(),
            ai_adjustment_factor: 1.0,
            impact_ftes: None,
        }
    }
}

impl AiImpact {
    pub fn efficiency_for(&self, year: u16) -> f64 {
        self.efficiency_pct.get(&year).copied().unwrap_or(0.0)
    }
}

const EFFICIENCY_PREFIX: &str = "efficiency_pct_";

fn default_factor() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawAiImpact {
    #[serde(default)]
    h1_automate: HorizonTask,
    #[serde(default)]
    h2_ai_assisted: HorizonTask,
    #[serde(default)]
    h3_agentic: HorizonTask,
    #[serde(default)]
    total_impact_pct: f64,
    #[serde(default = "default_factor")]
    ai_adjustment_factor: f64,
    #[serde(default)]
    impact_ftes: Option<f64>,
    #[serde(flatten)]
    rest: BTreeMap<String, Value>,
}

impl From<RawAiImpact> for AiImpact {
    fn from(raw: RawAiImpact) -> Self {
        let efficiency_pct = raw
            .rest
            .iter()
            .filter_map(|(k, v)| {
                let year = k.strip_prefix(EFFICIENCY_PREFIX)?.parse::<u16>().ok()?;
                Some((year, v.as_f64()?))
            })
            .collect();
        Self {
            h1_automate: raw.h1_automate,
            h2_ai_assisted: raw.h2_ai_assisted,
            h3_agentic: raw.h3_agentic,
            total_impact_pct: raw.total_impact_pct,
            efficiency_pct,
            ai_adjustment_factor: raw.ai_adjustment_factor,
            impact_ftes: raw.impact_ftes,
        }
    }
}

impl From<AiImpact> for RawAiImpact {
    fn from(ai: AiImpact) -> Self {
        let rest = ai
            .efficiency_pct
            .iter()
            .map(|(year, pct)| (format!("{EFFICIENCY_PREFIX}{year}"), Value::from(*pct)))
            .collect();
        Self {
            h1_automate: ai.h1_automate,
            h2_ai_assisted: ai.h2_ai_assisted,
            h3_agentic: ai.h3_agentic,
            total_impact_pct: ai.total_impact_pct,
            ai_adjustment_factor: ai.ai_adjustment_factor,
            impact_ftes: ai.impact_ftes,
            rest,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OffshoringAssessment {
    #[serde(default)]
    pub rating: OffshoreRating,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub current_offshore_pct: f64,
    #[serde(default)]
    pub benchmark_offshore_pct: f64,
    #[serde(default)]
    pub gap_pct: f64,
    #[serde(default)]
    pub gap_ftes: Option<f64>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleCosts {
    #[serde(default)]
    pub onshore_usd: f64,
    #[serde(default)]
    pub offshore_usd: f64,
    #[serde(default)]
    pub blended_cost: f64,
}

// ---------------------------------------------------------------------------
// RoleRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub role: String,
    #[serde(default)]
    pub short: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_ftes: Option<f64>,
    #[serde(default)]
    pub fte_source: FteSource,
    #[serde(default)]
    pub fte_source_note: String,
    #[serde(default)]
    pub current_offshore_pct: f64,
    #[serde(default)]
    pub benchmark_range: (Option<f64>, Option<f64>),
    #[serde(default)]
    pub benchmark_median: Option<f64>,
    #[serde(default)]
    pub pct_vs_benchmark: f64,
    #[serde(default)]
    pub productivity: ProductivityOpportunity,
    #[serde(default)]
    pub ai: AiImpact,
    #[serde(default)]
    pub offshoring: OffshoringAssessment,
    #[serde(default)]
    pub costs: RoleCosts,
}

/// Stored-vs-recomputed mismatch on a derived role field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkDrift {
    pub role: String,
    pub stored_pct: f64,
    pub recomputed_pct: f64,
    pub stored_has_opportunity: bool,
    pub recomputed_has_opportunity: bool,
}

/// Slack between stored and recomputed percentages: one step of
/// one-decimal rounding, plus float error.
const DRIFT_TOLERANCE_PCT: f64 = 0.15;

impl RoleRecord {
    /// `(estimated - median) / median * 100`, rounded to one decimal.
    /// Zero when either input is missing or the median is not positive.
    pub fn recompute_pct_vs_benchmark(&self) -> f64 {
        match (self.estimated_ftes, self.benchmark_median) {
            (Some(est), Some(median)) if est > 0.0 && median > 0.0 => {
                round1((est - median) / median * 100.0)
            }
            _ => 0.0,
        }
    }

    /// Compare the producer's stored derived fields against a fresh
    /// computation. The stored values are never overwritten.
    pub fn benchmark_drift(&self) -> Option<BenchmarkDrift> {
        let recomputed_pct = self.recompute_pct_vs_benchmark();
        let recomputed_has = self.productivity.opportunity_ftes > 0.0;
        let pct_drifted = (recomputed_pct - self.pct_vs_benchmark).abs() > DRIFT_TOLERANCE_PCT;
        if pct_drifted || recomputed_has != self.productivity.has_opportunity {
            Some(BenchmarkDrift {
                role: self.role.clone(),
                stored_pct: self.pct_vs_benchmark,
                recomputed_pct,
                stored_has_opportunity: self.productivity.has_opportunity,
                recomputed_has_opportunity: recomputed_has,
            })
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// FunctionRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionSummary {
    #[serde(default)]
    pub total_ai_addressable_ftes: f64,
    #[serde(default)]
    pub total_offshore_gap_ftes: f64,
    #[serde(default)]
    pub total_productivity_ftes: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sentiment {
    Positive,
    Negative,
    Mixed,
    #[default]
    Neutral,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Mixed => "mixed",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl From<String> for Sentiment {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            "mixed" => Sentiment::Mixed,
            _ => Sentiment::Neutral,
        }
    }
}

impl From<Sentiment> for String {
    fn from(s: Sentiment) -> Self {
        s.as_str().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(alias = "quote")]
    pub text: String,
    #[serde(default, alias = "speaker")]
    pub source: String,
    #[serde(default)]
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Commentary {
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub quotes: Vec<Quote>,
    #[serde(default)]
    pub insight_summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub function: String,
    pub function_key: String,
    #[serde(default, alias = "typical_pct_of_total_headcount")]
    pub typical_pct_of_headcount: (f64, f64),
    #[serde(default)]
    pub estimated_total_ftes: Option<f64>,
    #[serde(default)]
    pub estimation_note: String,
    #[serde(default)]
    pub roles: Vec<RoleRecord>,
    #[serde(default)]
    pub summary: FunctionSummary,
    #[serde(default)]
    pub commentary: Commentary,
}

impl FunctionRecord {
    /// Summary recomputed from the role list, for cross-checking `summary`.
    pub fn summarize_roles(&self) -> FunctionSummary {
        let mut s = FunctionSummary::default();
        for role in &self.roles {
            s.total_ai_addressable_ftes += role.ai.impact_ftes.unwrap_or(0.0);
            s.total_offshore_gap_ftes += role.offshoring.gap_ftes.unwrap_or(0.0);
            s.total_productivity_ftes += role.productivity.opportunity_ftes;
        }
        s.total_ai_addressable_ftes = round1(s.total_ai_addressable_ftes);
        s.total_offshore_gap_ftes = round1(s.total_offshore_gap_ftes);
        s.total_productivity_ftes = round1(s.total_productivity_ftes);
        s
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    #[serde(default)]
    pub total_customer_ops_ftes: f64,
    #[serde(default)]
    pub total_ai_addressable_ftes: f64,
    #[serde(default)]
    pub total_offshore_gap_ftes: f64,
    #[serde(default)]
    pub total_productivity_ftes: f64,
    #[serde(default)]
    pub ai_pct_of_total: Option<f64>,
    #[serde(default)]
    pub offshore_gap_pct_of_total: Option<f64>,
    #[serde(default)]
    pub productivity_pct_of_total: Option<f64>,
}

/// Run-rate currency impact for one year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LeverDollars {
    #[serde(default)]
    pub productivity: f64,
    #[serde(default)]
    pub ai: f64,
    #[serde(default)]
    pub offshoring: f64,
    #[serde(default)]
    pub total: f64,
}

/// Keyed by year string ("2026"), matching the wire format.
pub type DollarImpact = BTreeMap<String, LeverDollars>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentDocument {
    pub company: CompanyProfile,
    #[serde(default)]
    pub peer_financials: Vec<PeerFinancial>,
    #[serde(default)]
    pub functions: Vec<FunctionRecord>,
    #[serde(default)]
    pub summary: DocumentSummary,
    #[serde(default)]
    pub dollar_impact: DollarImpact,
    #[serde(default)]
    pub roadmap: Roadmap,
}

impl AssessmentDocument {
    pub fn from_json(s: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn function(&self, key: &str) -> Option<&FunctionRecord> {
        self.functions.iter().find(|f| f.function_key == key)
    }

    /// Roles whose stored derived fields disagree with a recomputation.
    pub fn benchmark_drift(&self) -> Vec<BenchmarkDrift> {
        self.functions
            .iter()
            .flat_map(|f| f.roles.iter())
            .filter_map(RoleRecord::benchmark_drift)
            .collect()
    }
}

/// Round to one decimal place, halves to even.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round_ties_even() / 10.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
