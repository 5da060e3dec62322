//! Error types for the trading plan generator

use thiserror::Error;

/// Result type alias for plan generation operations
pub type Result<T> = std::result::Result<T, PlanError>;

/// Everything that can go wrong between a submitted configuration and a
/// validated plan. Each kind stays distinguishable so logs can record the
/// cause while the UI shows a single generic message.
#[derive(Error, Debug)]
pub enum PlanError {
    /// Malformed configuration (e.g. zero or more than three strategies)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The external model call itself failed (network, auth, quota)
    #[error("Invocation error: {0}")]
    Invocation(String),

    /// The model returned no text at all
    #[error("Empty response from model")]
    EmptyResponse,

    /// The response text is not well-formed JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Well-formed JSON with a missing or mistyped required field, or a
    /// value outside a closed enum set
    #[error("Schema violation: {0}")]
    SchemaViolation(String),
}

impl PlanError {
    /// Stable label for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            PlanError::Configuration(_) => "configuration",
            PlanError::Invocation(_) => "invocation",
            PlanError::EmptyResponse => "empty_response",
            PlanError::Parse(_) => "parse",
            PlanError::SchemaViolation(_) => "schema_violation",
        }
    }

    /// The one message shown to end users regardless of kind
    pub fn user_message(&self) -> &'static str {
        "Failed to generate plan. Please verify your API key and try again."
    }
}
