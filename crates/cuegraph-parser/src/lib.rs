//! # Cuegraph Parser
//!
//! Decoding of SoundCue JSON exports into the typed
//! [`cuegraph_core::semantic::Cue`] model. This crate covers everything that
//! happens before layout:
//!
//! 1. **Decode** - Parse the JSON text
//! 2. **Locate** - Find the flat record list (a bare array or `Exports`)
//! 3. **Validate** - Check every record is an object with an object `Properties` bag
//! 4. **Resolve** - Turn `ChildNodes` references into ordered child slots
//! 5. **Elaborate** - Select a node kind per type tag and fill its fields
//!
//! ## Usage
//!
//! ```
//! # use cuegraph_parser::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"[
//!         { "Type": "SoundNodeMixer", "Properties": { "ChildNodes": ["Cue.1"] } },
//!         { "Type": "SoundNodeWavePlayer" }
//!     ]"#;
//!
//!     let cue = parse(source)?;
//!     assert_eq!(cue.len(), 2);
//!     Ok(())
//! }
//! ```

pub mod asset;
pub mod error;

mod elaborate;
mod records;
mod references;
mod span;

pub use references::parse_ref_index;
pub use span::Span;

use log::{debug, info};
use serde_json::Value;

use cuegraph_core::semantic::Cue;

use error::{Diagnostic, ErrorCode, ParseError};

/// Parse the text of a SoundCue JSON export.
///
/// # Errors
///
/// Returns a [`ParseError`] if the text is not valid JSON or does not
/// contain a non-empty list of well-formed records. Problems inside a record
/// (unresolvable references, unknown node types, missing assets) are not
/// errors; they are logged and substituted during elaboration.
pub fn parse(source: &str) -> Result<Cue, ParseError> {
    info!(bytes = source.len(); "Parsing SoundCue export");

    let document: Value = serde_json::from_str(source).map_err(|err| {
        let span = Span::at_line_column(source, err.line(), err.column());
        Diagnostic::error(format!("invalid JSON: {err}"))
            .with_code(ErrorCode::E001)
            .with_label(span, "here")
    })?;

    parse_value(&document)
}

/// Parse an already decoded export document.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_value(document: &Value) -> Result<Cue, ParseError> {
    let items = records::locate_records(document)?;
    let records = records::decode_records(items)?;
    debug!(records = records.len(); "Records decoded");

    Ok(elaborate::elaborate(&records))
}

#[cfg(test)]
mod tests {
    use cuegraph_core::semantic::{ChildRef, NodeKind};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_invalid_json_has_span() {
        let source = "[\n  { \"Type\": \"SoundNodeMixer\" },\n  oops\n]";
        let err = parse(source).unwrap_err();

        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E001));
        let span = diag.labels()[0].span();
        assert_eq!(&source[span.start()..span.end()], "o");
    }

    #[test]
    fn test_parse_empty_array() {
        let err = parse("[]").unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E003));
    }

    #[test]
    fn test_parse_value_exports_object() {
        let doc = json!({ "Exports": [
            { "Type": "SoundNodeAttenuation", "Properties": { "ChildNodes": [{ "ObjectPath": "Cue.1" }] } },
            { "Type": "SoundNodeWavePlayer" },
            { "Type": "SoundCue" }
        ]});

        let cue = parse_value(&doc).unwrap();
        assert_eq!(cue.len(), 3);
        assert_eq!(cue.nodes()[0].children(), &[ChildRef::Resolved(1)]);
        assert_eq!(cue.nodes()[0].kind(), &NodeKind::Attenuation { settings: None });
        assert!(cue.nodes()[2].is_container());
    }
}
