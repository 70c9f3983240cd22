//! Error types.

use serde::Serialize;

use super::error_code::ErrorCode;

/// Failure of a single analysis call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// The trimmed input is shorter than the configured minimum.
    #[error("input too short: {length} characters, at least {minimum} required")]
    InvalidInput { length: usize, minimum: usize },
}

/// One problem found in an [`AnalysisSpec`](super::spec::AnalysisSpec),
/// located by a JSON pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("[{code}] {path}: {message}")]
pub struct SpecError {
    pub code: ErrorCode,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl SpecError {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// A spec rejected because validation reported at least one error.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid analysis spec: {}", summarize(.errors))]
pub struct InvalidSpecError {
    pub errors: Vec<SpecError>,
}

fn summarize(errors: &[SpecError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure to read an [`AnalysisSpec`](super::spec::AnalysisSpec) or to
/// build a service from it.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed analysis spec: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] InvalidSpecError),
}
