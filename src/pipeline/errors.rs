//! Structured errors for run-spec validation.
//!
//! Each [`SpecError`] carries a stable machine-readable [`ErrorCode`], a
//! JSON-pointer-style path to the offending field, a human message, and an
//! optional fix-it hint. These serialize cleanly so callers embedding the
//! crate (notebooks, services) can render diagnostics however they like.

use serde::Serialize;

/// Stable error codes for spec validation findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A field value is outside its valid range.
    InvalidValue,
    /// A runtime limit is set to a value that can never admit any input.
    LimitExceeded,
    /// A field is not part of the schema.
    UnknownField,
    /// Catch-all for custom rules.
    ValidationFailed,
}

/// One validation finding against a [`super::spec::RunSpec`].
#[derive(Debug, Clone, Serialize)]
pub struct SpecError {
    pub code: ErrorCode,
    /// JSON-pointer-style location, e.g. `/rank/damping`.
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl SpecError {
    pub fn new(
        code: ErrorCode,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
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

impl std::fmt::Display for SpecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({hint})")?;
        }
        Ok(())
    }
}
