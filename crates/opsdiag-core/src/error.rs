use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpsdiagError {
    #[error("invalid client slug '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSlug(String),

    #[error("invalid product '{0}': expected one of basic, enhanced, agentic")]
    InvalidProduct(String),

    #[error("invalid lever '{0}': expected productivity, offshoring or ai")]
    InvalidLever(String),

    #[error("invalid feedback kind '{0}': expected bug, feature or general")]
    InvalidFeedbackKind(String),

    #[error("invalid rollup policy '{0}': expected trust or strict")]
    InvalidRollupPolicy(String),

    #[error("feedback summary must not be empty")]
    EmptyFeedback,

    #[error("feedback entry not found: {0}")]
    FeedbackNotFound(String),

    #[error("diagnostic already registered: {client} ({product})")]
    DiagnosticExists { client: String, product: String },

    #[error("mixed rollup input: expected {expected}, found {found}")]
    MixedRollupInput { expected: String, found: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("document fetch failed: {0}")]
    Fetch(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for OpsdiagError {
    fn from(e: reqwest::Error) -> Self {
        OpsdiagError::Fetch(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OpsdiagError>;
