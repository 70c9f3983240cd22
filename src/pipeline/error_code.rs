//! Stable machine-readable codes for configuration diagnostics.

use serde::Serialize;

/// Diagnostic category, serialized as `snake_case`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The spec declares a version this crate does not understand
    UnsupportedVersion,
    /// A field holds a value outside its allowed range
    InvalidValue,
    /// A field has no effect with the current value
    IneffectiveValue,
    /// The spec contains a field the schema does not know
    UnknownField,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion => "unsupported_version",
            Self::InvalidValue => "invalid_value",
            Self::IneffectiveValue => "ineffective_value",
            Self::UnknownField => "unknown_field",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
