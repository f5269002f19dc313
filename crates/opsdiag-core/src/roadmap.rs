//! Roadmap items and the assembler that partitions them into year plans.

use crate::types::{Category, Horizon, Lever, RoleLever};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

// ---------------------------------------------------------------------------
// PlanningHorizon
// ---------------------------------------------------------------------------

/// Consecutive calendar years a roadmap covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningHorizon {
    #[serde(default = "default_start_year")]
    pub start_year: u16,
    #[serde(default = "default_years")]
    pub years: u8,
}

fn default_start_year() -> u16 {
    2026
}

fn default_years() -> u8 {
    3
}

impl Default for PlanningHorizon {
    fn default() -> Self {
        Self {
            start_year: default_start_year(),
            years: default_years(),
        }
    }
}

impl PlanningHorizon {
    pub fn new(start_year: u16, years: u8) -> Self {
        Self { start_year, years }
    }

    pub fn first_year(&self) -> u16 {
        self.start_year
    }

    /// Horizon years in order; years past `u16::MAX` are cut off.
    pub fn year_list(&self) -> Vec<u16> {
        (0..u16::from(self.years))
            .map_while(|i| self.start_year.checked_add(i))
            .collect()
    }

    /// Last horizon year, or None when it does not fit in a `u16`.
    pub fn last_year(&self) -> Option<u16> {
        self.start_year
            .checked_add(u16::from(self.years).saturating_sub(1))
    }

    pub fn contains(&self, year: u16) -> bool {
        year.checked_sub(self.start_year)
            .is_some_and(|d| d < u16::from(self.years))
    }

    /// Zero-based offset of `year` from the first year; years before the
    /// horizon count as the first year.
    pub fn offset(&self, year: u16) -> usize {
        year.saturating_sub(self.start_year) as usize
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Role-level FTE impact for a productivity or offshoring lever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleLeverItem {
    pub role: String,
    #[serde(default)]
    pub function: String,
    #[serde(default)]
    pub function_key: String,
    pub lever: RoleLever,
    pub year: u16,
    #[serde(default)]
    pub impact_ftes: f64,
    #[serde(default)]
    pub description: String,
    /// Upstream timing label, when the producer assigned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl RoleLeverItem {
    /// Impact used for sums and ordering: negative and non-finite values
    /// count as zero.
    pub fn effective_ftes(&self) -> f64 {
        clamp_ftes(self.impact_ftes)
    }
}

/// Use-case level AI initiative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiUseCase {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mechanism: String,
    pub year: u16,
    #[serde(default)]
    pub half: String,
    #[serde(default = "default_category")]
    pub category: Category,
    #[serde(default)]
    pub horizon: Horizon,
    #[serde(default)]
    pub impacted_roles: Vec<String>,
    #[serde(default)]
    pub impacted_functions: Vec<String>,
    #[serde(default)]
    pub estimated_ticket_deflection_pct: Option<f64>,
    #[serde(default)]
    pub estimated_fte_impact: f64,
}

fn default_category() -> Category {
    Category::Other("Uncategorized".to_string())
}

impl AiUseCase {
    pub fn effective_ftes(&self) -> f64 {
        clamp_ftes(self.estimated_fte_impact)
    }
}

fn clamp_ftes(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoadmapItem {
    RoleLever(RoleLeverItem),
    AiUseCase(AiUseCase),
}

impl RoadmapItem {
    pub fn year(&self) -> u16 {
        match self {
            RoadmapItem::RoleLever(i) => i.year,
            RoadmapItem::AiUseCase(u) => u.year,
        }
    }

    pub fn lever(&self) -> Lever {
        match self {
            RoadmapItem::RoleLever(i) => i.lever.into(),
            RoadmapItem::AiUseCase(_) => Lever::Ai,
        }
    }

    pub fn effective_ftes(&self) -> f64 {
        match self {
            RoadmapItem::RoleLever(i) => i.effective_ftes(),
            RoadmapItem::AiUseCase(u) => u.effective_ftes(),
        }
    }
}

impl From<RoleLeverItem> for RoadmapItem {
    fn from(i: RoleLeverItem) -> Self {
        RoadmapItem::RoleLever(i)
    }
}

impl From<AiUseCase> for RoadmapItem {
    fn from(u: AiUseCase) -> Self {
        RoadmapItem::AiUseCase(u)
    }
}

// ---------------------------------------------------------------------------
// YearPlan / Roadmap
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearPlan {
    #[serde(default)]
    pub productivity: Vec<RoleLeverItem>,
    #[serde(default)]
    pub offshoring: Vec<RoleLeverItem>,
    #[serde(default)]
    pub ai: Vec<AiUseCase>,
}

impl YearPlan {
    /// An empty plan is still a valid year; the report shows a
    /// "no items planned" state for it.
    pub fn is_empty(&self) -> bool {
        self.productivity.is_empty() && self.offshoring.is_empty() && self.ai.is_empty()
    }

    pub fn len(&self) -> usize {
        self.productivity.len() + self.offshoring.len() + self.ai.len()
    }

    pub fn role_items(&self, lever: RoleLever) -> &[RoleLeverItem] {
        match lever {
            RoleLever::Productivity => &self.productivity,
            RoleLever::Offshoring => &self.offshoring,
        }
    }

    pub fn lever_ftes(&self, lever: Lever) -> f64 {
        match lever {
            Lever::Productivity => self.productivity.iter().map(|i| i.effective_ftes()).sum(),
            Lever::Offshoring => self.offshoring.iter().map(|i| i.effective_ftes()).sum(),
            Lever::Ai => self.ai.iter().map(|u| u.effective_ftes()).sum(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    #[serde(default)]
    pub years: BTreeMap<u16, YearPlan>,
    #[serde(default)]
    pub ai_use_cases: Vec<AiUseCase>,
}

impl Roadmap {
    pub fn year(&self, year: u16) -> Option<&YearPlan> {
        self.years.get(&year)
    }

    /// All role-level items, year by year, productivity before offshoring.
    pub fn role_items(&self) -> Vec<RoleLeverItem> {
        self.years
            .values()
            .flat_map(|p| p.productivity.iter().chain(p.offshoring.iter()))
            .cloned()
            .collect()
    }

    /// Flatten back into roadmap items. AI use cases listed only in the flat
    /// `ai_use_cases` list (not under any year) are included once.
    pub fn items(&self) -> Vec<RoadmapItem> {
        let mut out: Vec<RoadmapItem> = Vec::new();
        let mut seen_ai: HashSet<&str> = HashSet::new();
        for plan in self.years.values() {
            out.extend(plan.productivity.iter().cloned().map(RoadmapItem::from));
            out.extend(plan.offshoring.iter().cloned().map(RoadmapItem::from));
            for uc in &plan.ai {
                seen_ai.insert(uc.id.as_str());
                out.push(uc.clone().into());
            }
        }
        for uc in &self.ai_use_cases {
            if seen_ai.insert(uc.id.as_str()) {
                out.push(uc.clone().into());
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Assembler
// ---------------------------------------------------------------------------

/// Partition items into year plans. Every horizon year is present, empty or
/// not. Items dated outside the horizon get their own year plan rather than
/// being dropped.
pub fn assemble(items: &[RoadmapItem], horizon: &PlanningHorizon) -> Roadmap {
    let mut years: BTreeMap<u16, YearPlan> = horizon
        .year_list()
        .into_iter()
        .map(|y| (y, YearPlan::default()))
        .collect();
    let mut ai_use_cases = Vec::new();

    for item in items {
        let year = item.year();
        if !horizon.contains(year) {
            tracing::warn!(year, "roadmap item outside planning horizon");
        }
        let plan = years.entry(year).or_default();
        match item {
            RoadmapItem::RoleLever(i) => match i.lever {
                RoleLever::Productivity => plan.productivity.push(i.clone()),
                RoleLever::Offshoring => plan.offshoring.push(i.clone()),
            },
            RoadmapItem::AiUseCase(u) => {
                plan.ai.push(u.clone());
                ai_use_cases.push(u.clone());
            }
        }
    }

    Roadmap {
        years,
        ai_use_cases,
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Cross-year totals. Productivity and offshoring are near-term levers and
/// are counted for the first horizon year only; AI is summed across all
/// years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapSummary {
    pub first_year: u16,
    pub productivity_ftes: f64,
    pub offshoring_ftes: f64,
    pub ai_ftes: f64,
    pub total_ftes: f64,
    pub empty_years: Vec<u16>,
}

impl RoadmapSummary {
    pub fn from_roadmap(roadmap: &Roadmap, horizon: &PlanningHorizon) -> Self {
        let first_year = horizon.first_year();
        let (productivity_ftes, offshoring_ftes) = roadmap
            .year(first_year)
            .map(|p| (p.lever_ftes(Lever::Productivity), p.lever_ftes(Lever::Offshoring)))
            .unwrap_or((0.0, 0.0));
        let ai_ftes = roadmap.years.values().map(|p| p.lever_ftes(Lever::Ai)).sum();
        let empty_years = roadmap
            .years
            .iter()
            .filter(|(_, p)| p.is_empty())
            .map(|(y, _)| *y)
            .collect();
        Self {
            first_year,
            productivity_ftes,
            offshoring_ftes,
            ai_ftes,
            total_ftes: productivity_ftes + offshoring_ftes + ai_ftes,
            empty_years,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
