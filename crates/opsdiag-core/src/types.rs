use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Lever
// ---------------------------------------------------------------------------

/// One of the three improvement mechanisms modeled by an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Lever {
    #[serde(alias = "productivity")]
    Productivity,
    #[serde(alias = "offshoring")]
    Offshoring,
    #[serde(rename = "AI", alias = "ai", alias = "Ai")]
    Ai,
}

impl Lever {
    pub fn all() -> &'static [Lever] {
        &[Lever::Productivity, Lever::Offshoring, Lever::Ai]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Lever::Productivity => "Productivity",
            Lever::Offshoring => "Offshoring",
            Lever::Ai => "AI",
        }
    }

    pub fn badge_color(self) -> &'static str {
        match self {
            Lever::Productivity => "bg-blue-100 text-blue-800",
            Lever::Offshoring => "bg-amber-100 text-amber-800",
            Lever::Ai => "bg-purple-100 text-purple-800",
        }
    }
}

impl fmt::Display for Lever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Lever {
    type Err = crate::error::OpsdiagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "productivity" => Ok(Lever::Productivity),
            "offshoring" => Ok(Lever::Offshoring),
            "ai" => Ok(Lever::Ai),
            _ => Err(crate::error::OpsdiagError::InvalidLever(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// RoleLever
// ---------------------------------------------------------------------------

/// The levers that produce role-level roadmap items. AI impact is tracked
/// per use case instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoleLever {
    #[serde(alias = "productivity")]
    Productivity,
    #[serde(alias = "offshoring")]
    Offshoring,
}

impl RoleLever {
    pub fn as_str(self) -> &'static str {
        Lever::from(self).as_str()
    }
}

impl From<RoleLever> for Lever {
    fn from(l: RoleLever) -> Self {
        match l {
            RoleLever::Productivity => Lever::Productivity,
            RoleLever::Offshoring => Lever::Offshoring,
        }
    }
}

impl fmt::Display for RoleLever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RoleLever {
    type Err = crate::error::OpsdiagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Lever>()? {
            Lever::Productivity => Ok(RoleLever::Productivity),
            Lever::Offshoring => Ok(RoleLever::Offshoring),
            Lever::Ai => Err(crate::error::OpsdiagError::InvalidLever(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Horizon
// ---------------------------------------------------------------------------

/// AI automation maturity tier. Upstream labels look like "H2 AI-Assisted";
/// only the tier prefix is significant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Horizon {
    H1,
    H2,
    H3,
    #[default]
    Unclassified,
}

impl Horizon {
    pub fn label(self) -> &'static str {
        match self {
            Horizon::H1 => "H1 Automate",
            Horizon::H2 => "H2 AI-Assisted",
            Horizon::H3 => "H3 Agentic",
            Horizon::Unclassified => "Unclassified",
        }
    }
}

impl From<&str> for Horizon {
    fn from(s: &str) -> Self {
        let s = s.trim().to_ascii_uppercase();
        if s.starts_with("H1") {
            Horizon::H1
        } else if s.starts_with("H2") {
            Horizon::H2
        } else if s.starts_with("H3") {
            Horizon::H3
        } else {
            Horizon::Unclassified
        }
    }
}

impl From<String> for Horizon {
    fn from(s: String) -> Self {
        Horizon::from(s.as_str())
    }
}

impl From<Horizon> for String {
    fn from(h: Horizon) -> Self {
        h.label().to_string()
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Roadmap timing bucket. Labels are supplied by upstream data; anything
/// unrecognized is carried through verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    QuickWin,
    NearTerm,
    MediumTerm,
    Transformation,
    Other(String),
}

impl Category {
    pub fn label(&self) -> &str {
        match self {
            Category::QuickWin => "Quick Win",
            Category::NearTerm => "Near-term",
            Category::MediumTerm => "Medium-term",
            Category::Transformation => "Transformation",
            Category::Other(s) => s,
        }
    }

    pub fn badge_color(&self) -> &'static str {
        match self {
            Category::QuickWin => "bg-green-100 text-green-800",
            Category::NearTerm => "bg-blue-100 text-blue-800",
            Category::MediumTerm => "bg-amber-100 text-amber-800",
            Category::Transformation => "bg-purple-100 text-purple-800",
            Category::Other(_) => "bg-gray-100 text-gray-800",
        }
    }

    /// Fixed timing table used when an item carries no upstream category.
    /// `year_index` is zero-based within the planning horizon.
    pub fn for_timing(year_index: usize, lever: RoleLever) -> Category {
        match (year_index, lever) {
            (0, RoleLever::Productivity) => Category::QuickWin,
            (0, RoleLever::Offshoring) => Category::NearTerm,
            (1, _) => Category::MediumTerm,
            _ => Category::Transformation,
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        let norm: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match norm.as_str() {
            "quickwin" => Category::QuickWin,
            "nearterm" => Category::NearTerm,
            "mediumterm" => Category::MediumTerm,
            "transformation" => Category::Transformation,
            _ => Category::Other(s.trim().to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::from(s.as_str())
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.label().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

/// Diagnostic template a client instance is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    Basic,
    Enhanced,
    Agentic,
}

impl Product {
    pub fn all() -> &'static [Product] {
        &[Product::Basic, Product::Enhanced, Product::Agentic]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Product::Basic => "basic",
            Product::Enhanced => "enhanced",
            Product::Agentic => "agentic",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Product {
    type Err = crate::error::OpsdiagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Product::Basic),
            "enhanced" => Ok(Product::Enhanced),
            "agentic" => Ok(Product::Agentic),
            _ => Err(crate::error::OpsdiagError::InvalidProduct(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
