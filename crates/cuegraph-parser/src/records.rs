//! Locating and decoding the flat record list of an export.
//!
//! An export is either a bare JSON array of records or an object exposing
//! that array under a recognized field. Each record is a JSON object with a
//! `Type` tag and an optional `Properties` bag; everything else about a
//! record is loosely typed and interpreted later during elaboration.

use log::{debug, trace};
use serde_json::{Map, Value};

use cuegraph_core::semantic::UNKNOWN_TYPE;

use crate::error::{Diagnostic, ErrorCode, ParseError, Result};

/// Object fields that may hold the record list, in lookup order.
const RECORD_LIST_FIELDS: [&str; 2] = ["Exports", "Records"];

/// A single record of the export, borrowed from the parsed JSON document.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SourceRecord<'a> {
    type_tag: &'a str,
    fields: &'a Map<String, Value>,
    properties: Option<&'a Map<String, Value>>,
}

impl<'a> SourceRecord<'a> {
    /// The record's `Type`, or `SoundNodeUnknown` if it declares none.
    pub(crate) fn type_tag(&self) -> &'a str {
        self.type_tag
    }

    /// Look up a field of the record itself (outside `Properties`).
    pub(crate) fn field(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key)
    }

    /// Look up a field of the record's `Properties` bag.
    pub(crate) fn property(&self, key: &str) -> Option<&'a Value> {
        self.properties.and_then(|properties| properties.get(key))
    }

    /// The `Properties` bag, if the record has one.
    pub(crate) fn properties(&self) -> Option<&'a Map<String, Value>> {
        self.properties
    }
}

/// Find the record list inside an export document.
///
/// # Errors
///
/// Returns [`ErrorCode::E002`] if no record array can be found and
/// [`ErrorCode::E003`] if the array is empty.
pub(crate) fn locate_records(document: &Value) -> Result<&[Value]> {
    let items = match document {
        Value::Array(items) => items,
        Value::Object(object) => RECORD_LIST_FIELDS
            .iter()
            .find_map(|field| object.get(*field).and_then(Value::as_array))
            .ok_or_else(|| {
                Diagnostic::error("no record list found in the export object")
                    .with_code(ErrorCode::E002)
                    .with_help("expected a top-level array or an `Exports` array")
            })?,
        other => {
            return Err(Diagnostic::error(format!(
                "expected an array of records, found {}",
                json_kind(other)
            ))
            .with_code(ErrorCode::E002));
        }
    };

    if items.is_empty() {
        return Err(Diagnostic::error("the export contains no records")
            .with_code(ErrorCode::E003)
            .with_help("export the SoundCue together with its sound nodes"));
    }

    debug!(records = items.len(); "Located record list");
    Ok(items)
}

/// Decode every record of the list.
///
/// All malformed records are reported at once rather than stopping at the
/// first one.
pub(crate) fn decode_records(
    items: &[Value],
) -> std::result::Result<Vec<SourceRecord<'_>>, ParseError> {
    let mut records = Vec::with_capacity(items.len());
    let mut diagnostics = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match decode_record(index, item) {
            Ok(record) => records.push(record),
            Err(diag) => diagnostics.push(diag),
        }
    }

    if !diagnostics.is_empty() {
        return Err(ParseError::new(diagnostics));
    }

    Ok(records)
}

fn decode_record(index: usize, item: &Value) -> Result<SourceRecord<'_>> {
    let Value::Object(fields) = item else {
        return Err(Diagnostic::error(format!(
            "record {index} is {}, expected an object",
            json_kind(item)
        ))
        .with_code(ErrorCode::E004));
    };

    let type_tag = fields
        .get("Type")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_TYPE);

    let properties = match fields.get("Properties") {
        None | Some(Value::Null) => None,
        Some(Value::Object(properties)) => Some(properties),
        Some(other) => {
            return Err(Diagnostic::error(format!(
                "`Properties` of record {index} ({type_tag}) is {}, expected an object",
                json_kind(other)
            ))
            .with_code(ErrorCode::E005));
        }
    };

    trace!(index, type_tag; "Decoded record");

    Ok(SourceRecord {
        type_tag,
        fields,
        properties,
    })
}

/// Human-readable name of a JSON value's kind, for messages.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
