//! The core diagnostic type for the parser error system.
//!
//! A [`Diagnostic`] represents a single input error with an optional error
//! code, optional labeled source spans, and help text.

use std::fmt;

use crate::{
    error::{error_code::ErrorCode, label::Label},
    span::Span,
};

/// A diagnostic message about malformed input.
///
/// JSON syntax errors carry a label pointing at the offending byte; structural
/// errors (wrong record shape, empty export) usually have no span and name the
/// record index in the message instead.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use cuegraph_parser::error::{Diagnostic, ErrorCode};
    /// let diag = Diagnostic::error("record 3 is not an object")
    ///     .with_code(ErrorCode::E004);
    /// assert_eq!(diag.to_string(), "error[E004]: record 3 is not an object");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E001]: message" or "error: message"
        write!(f, "error")?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_code() {
        let diag = Diagnostic::error("something broke");
        assert_eq!(diag.to_string(), "error: something broke");
    }

    #[test]
    fn test_builder_methods() {
        let diag = Diagnostic::error("bad json")
            .with_code(ErrorCode::E001)
            .with_label(Span::new(4..5), "unexpected character")
            .with_help("check the export");

        assert_eq!(diag.code(), Some(ErrorCode::E001));
        assert_eq!(diag.labels().len(), 1);
        assert_eq!(diag.labels()[0].span(), Span::new(4..5));
        assert_eq!(diag.labels()[0].message(), "unexpected character");
        assert_eq!(diag.help(), Some("check the export"));
    }
}
