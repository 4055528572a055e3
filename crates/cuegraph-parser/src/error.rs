//! Error and diagnostic system for the SoundCue parser.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Labeled spans pointing into the JSON source
//! - [`ParseError`], one or more diagnostics returned from parsing
//!
//! # Example
//!
//! ```
//! # use cuegraph_parser::error::{Diagnostic, ErrorCode};
//! # use cuegraph_parser::Span;
//!
//! let diag = Diagnostic::error("expected `,` or `]`")
//!     .with_code(ErrorCode::E001)
//!     .with_label(Span::new(10..11), "here")
//!     .with_help("the input must be a JSON export of a SoundCue");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
