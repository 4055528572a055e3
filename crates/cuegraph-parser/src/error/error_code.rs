//! Error codes for the parser diagnostic system.
//!
//! All codes describe input errors, the only fatal error class of a
//! conversion. Everything else (unresolved references, unknown node types,
//! missing assets) is substituted locally and never reported here.

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Invalid JSON.
    ///
    /// The input text is not syntactically valid JSON.
    E001,

    /// Record list not found.
    ///
    /// The input is neither an array of records nor an object exposing one
    /// under a recognized field (`Exports`, `Records`).
    E002,

    /// Empty record list.
    ///
    /// The export contains no records at all.
    E003,

    /// Record is not an object.
    ///
    /// Every entry of the record list must be a JSON object.
    E004,

    /// Properties are not an object.
    ///
    /// A record's `Properties` field, when present, must be a JSON object.
    E005,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E005 => "E005",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "invalid json",
            ErrorCode::E002 => "record list not found",
            ErrorCode::E003 => "empty record list",
            ErrorCode::E004 => "record is not an object",
            ErrorCode::E005 => "properties are not an object",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E005.to_string(), "E005");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "invalid json");
        assert_eq!(ErrorCode::E003.description(), "empty record list");
    }
}
