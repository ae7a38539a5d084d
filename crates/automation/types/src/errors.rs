//! Error types for the Automation Framework
//!
//! Configuration problems in a single test are diagnostics, not errors.
//! `AutomationError` covers the cases where there is nothing sensible to
//! continue with: unreadable documents and broken internal invariants.

/// Errors that can occur in automation operations
#[derive(Debug, thiserror::Error)]
pub enum AutomationError {
    /// An operator that validation should have rejected reached evaluation
    #[error("Unexpected operator reached evaluation: '{0}'")]
    UnexpectedOperator(String),

    #[error("Invalid operator: '{0}'")]
    InvalidOperator(String),

    #[error("Invalid onFail value: '{0}'")]
    InvalidOnFail(String),

    /// The plan document has the wrong shape
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for automation operations
pub type AutomationResult<T> = Result<T, AutomationError>;
