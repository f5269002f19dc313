//! Badge classification helpers.
//!
//! Every lookup here is total: an unrecognized input resolves to a fixed
//! default (`industry-wide` thresholds, `Basic` maturity, gray badge) so a
//! partially filled upstream document still renders.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const INDUSTRY_WIDE: &str = "industry-wide";
/// Reported when neither the segment nor `INDUSTRY_WIDE` is in the table.
pub const BUILTIN_SEGMENT: &str = "built-in";
pub const DEFAULT_BADGE: &str = "bg-gray-100 text-gray-800";

// ---------------------------------------------------------------------------
// Quartile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NrrThresholds {
    #[serde(alias = "topQuartile")]
    pub top_quartile: f64,
    pub median: f64,
    #[serde(alias = "bottomQuartile")]
    pub bottom_quartile: f64,
}

impl Default for NrrThresholds {
    fn default() -> Self {
        Self {
            top_quartile: 120.0,
            median: 110.0,
            bottom_quartile: 95.0,
        }
    }
}

/// Peer-relative NRR bucket, Q1 best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quartile {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quartile {
    /// NaN falls through every comparison and lands in Q4.
    pub fn classify(value: f64, t: &NrrThresholds) -> Quartile {
        if value >= t.top_quartile {
            Quartile::Q1
        } else if value >= t.median {
            Quartile::Q2
        } else if value >= t.bottom_quartile {
            Quartile::Q3
        } else {
            Quartile::Q4
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Quartile::Q1 => "Q1",
            Quartile::Q2 => "Q2",
            Quartile::Q3 => "Q3",
            Quartile::Q4 => "Q4",
        }
    }

    pub fn badge_color(self) -> &'static str {
        match self {
            Quartile::Q1 => "bg-green-100 text-green-800",
            Quartile::Q2 => "bg-blue-100 text-blue-800",
            Quartile::Q3 => "bg-amber-100 text-amber-800",
            Quartile::Q4 => "bg-red-100 text-red-800",
        }
    }
}

impl fmt::Display for Quartile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Segment → thresholds table. Segment names are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NrrBenchmarks(pub BTreeMap<String, NrrThresholds>);

impl Default for NrrBenchmarks {
    fn default() -> Self {
        let mut m = BTreeMap::new();
        m.insert(INDUSTRY_WIDE.to_string(), NrrThresholds::default());
        Self(m)
    }
}

impl NrrBenchmarks {
    pub fn thresholds_for(&self, segment: &str) -> NrrThresholds {
        let wanted = segment.trim().to_ascii_lowercase();
        self.0
            .iter()
            .find(|(k, _)| k.to_ascii_lowercase() == wanted)
            .or_else(|| self.0.get_key_value(INDUSTRY_WIDE))
            .map(|(_, t)| *t)
            .unwrap_or_default()
    }

    /// Name of the segment `thresholds_for` would actually use.
    pub fn resolve_segment(&self, segment: &str) -> String {
        let wanted = segment.trim().to_ascii_lowercase();
        self.0
            .keys()
            .find(|k| k.to_ascii_lowercase() == wanted)
            .or_else(|| self.0.get_key_value(INDUSTRY_WIDE).map(|(k, _)| k))
            .map_or_else(|| BUILTIN_SEGMENT.to_string(), Clone::clone)
    }

    pub fn classify(&self, value: f64, segment: &str) -> Quartile {
        Quartile::classify(value, &self.thresholds_for(segment))
    }
}

// ---------------------------------------------------------------------------
// Offshoring rating
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OffshoreRating {
    High,
    Medium,
    Low,
    #[default]
    NotApplicable,
    Unrated(String),
}

/// Semantic tone a rating badge is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingBucket {
    Favorable,
    Moderate,
    Limited,
    Neutral,
}

impl RatingBucket {
    pub fn color(self) -> &'static str {
        match self {
            RatingBucket::Favorable => "bg-green-100 text-green-800",
            RatingBucket::Moderate => "bg-amber-100 text-amber-800",
            RatingBucket::Limited => "bg-red-100 text-red-800",
            RatingBucket::Neutral => DEFAULT_BADGE,
        }
    }
}

impl OffshoreRating {
    pub fn label(&self) -> &str {
        match self {
            OffshoreRating::High => "High",
            OffshoreRating::Medium => "Medium",
            OffshoreRating::Low => "Low",
            OffshoreRating::NotApplicable => "N/A",
            OffshoreRating::Unrated(s) => s,
        }
    }

    pub fn bucket(&self) -> RatingBucket {
        match self {
            OffshoreRating::High => RatingBucket::Favorable,
            OffshoreRating::Medium => RatingBucket::Moderate,
            OffshoreRating::Low => RatingBucket::Limited,
            OffshoreRating::NotApplicable | OffshoreRating::Unrated(_) => RatingBucket::Neutral,
        }
    }
}

impl From<&str> for OffshoreRating {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => OffshoreRating::High,
            "medium" | "moderate" => OffshoreRating::Medium,
            "low" => OffshoreRating::Low,
            "n/a" | "na" | "" => OffshoreRating::NotApplicable,
            _ => OffshoreRating::Unrated(s.trim().to_string()),
        }
    }
}

impl From<String> for OffshoreRating {
    fn from(s: String) -> Self {
        OffshoreRating::from(s.as_str())
    }
}

impl From<OffshoreRating> for String {
    fn from(r: OffshoreRating) -> Self {
        r.label().to_string()
    }
}

impl fmt::Display for OffshoreRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Maturity level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MaturityLevel {
    Basic,
    Advanced,
    NextGen,
}

impl MaturityLevel {
    /// Ordinal column used for chart placement.
    pub fn position(self) -> usize {
        match self {
            MaturityLevel::Basic => 0,
            MaturityLevel::Advanced => 1,
            MaturityLevel::NextGen => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MaturityLevel::Basic => "Basic",
            MaturityLevel::Advanced => "Advanced",
            MaturityLevel::NextGen => "Next-gen",
        }
    }
}

impl From<&str> for MaturityLevel {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "advanced" => MaturityLevel::Advanced,
            "next-gen" | "nextgen" | "next gen" => MaturityLevel::NextGen,
            _ => MaturityLevel::Basic,
        }
    }
}

impl From<String> for MaturityLevel {
    fn from(s: String) -> Self {
        MaturityLevel::from(s.as_str())
    }
}

impl From<MaturityLevel> for String {
    fn from(m: MaturityLevel) -> Self {
        m.label().to_string()
    }
}

impl fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> NrrThresholds {
        NrrThresholds {
            top_quartile: 120.0,
            median: 110.0,
            bottom_quartile: 95.0,
        }
    }

    #[test]
    fn nrr_118_is_second_quartile() {
        assert_eq!(Quartile::classify(118.0, &thresholds()), Quartile::Q2);
    }

    #[test]
    fn quartile_boundaries_are_inclusive() {
        let t = thresholds();
        assert_eq!(Quartile::classify(120.0, &t), Quartile::Q1);
        assert_eq!(Quartile::classify(110.0, &t), Quartile::Q2);
        assert_eq!(Quartile::classify(95.0, &t), Quartile::Q3);
        assert_eq!(Quartile::classify(94.9, &t), Quartile::Q4);
    }

    #[test]
    fn nan_is_bottom_quartile() {
        assert_eq!(Quartile::classify(f64::NAN, &thresholds()), Quartile::Q4);
    }

    #[test]
    fn unknown_segment_uses_industry_wide() {
        let mut table = NrrBenchmarks::default();
        table.0.insert(
            "Healthcare IT".to_string(),
            NrrThresholds {
                top_quartile: 115.0,
                median: 105.0,
                bottom_quartile: 98.0,
            },
        );
        assert_eq!(table.thresholds_for("healthcare it").median, 105.0);
        assert_eq!(table.thresholds_for("fintech"), NrrThresholds::default());
        assert_eq!(table.resolve_segment("fintech"), INDUSTRY_WIDE);
        assert_eq!(table.classify(112.0, "Healthcare IT"), Quartile::Q2);
    }

    #[test]
    fn empty_table_still_classifies() {
        let table = NrrBenchmarks(BTreeMap::new());
        assert_eq!(table.classify(118.0, "anything"), Quartile::Q2);
        assert_eq!(table.resolve_segment("anything"), BUILTIN_SEGMENT);
    }

    #[test]
    fn missing_industry_wide_resolves_to_builtin() {
        let mut m = BTreeMap::new();
        m.insert("Fintech".to_string(), NrrThresholds { top_quartile: 130.0, median: 115.0, bottom_quartile: 100.0 });
        let table = NrrBenchmarks(m);
        assert_eq!(table.resolve_segment("fintech"), "Fintech");
        assert_eq!(table.resolve_segment("retail"), BUILTIN_SEGMENT);
        assert_eq!(table.thresholds_for("retail"), NrrThresholds::default());
    }

    #[test]
    fn thresholds_accept_camel_case() {
        let t: NrrThresholds =
            serde_json::from_str(r#"{"topQuartile":120,"median":110,"bottomQuartile":95}"#)
                .unwrap();
        assert_eq!(t, thresholds());
    }

    #[test]
    fn rating_buckets() {
        assert_eq!(OffshoreRating::from("High").bucket(), RatingBucket::Favorable);
        assert_eq!(OffshoreRating::from("moderate").bucket(), RatingBucket::Moderate);
        assert_eq!(OffshoreRating::from("Low").bucket(), RatingBucket::Limited);
        assert_eq!(OffshoreRating::from("N/A"), OffshoreRating::NotApplicable);
    }

    #[test]
    fn unknown_rating_is_gray_and_keeps_label() {
        let r = OffshoreRating::from("Very High-ish");
        assert_eq!(r.bucket().color(), DEFAULT_BADGE);
        assert_eq!(r.label(), "Very High-ish");
        assert_eq!(
            serde_json::to_string(&r).unwrap(),
            "\"Very High-ish\""
        );
    }

    #[test]
    fn maturity_positions() {
        assert_eq!(MaturityLevel::from("Basic").position(), 0);
        assert_eq!(MaturityLevel::from("Advanced").position(), 1);
        assert_eq!(MaturityLevel::from("Next-gen").position(), 2);
        assert_eq!(MaturityLevel::from("legendary"), MaturityLevel::Basic);
        assert_eq!(MaturityLevel::from("").position(), 0);
    }
}
