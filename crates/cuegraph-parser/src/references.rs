//! Reference resolution for child slots.
//!
//! A parent declares its children in `Properties.ChildNodes`, one entry per
//! input slot. Each entry names its target record by a trailing `.<digits>`
//! suffix, either directly as a string or through the `ObjectPath` /
//! `ObjectName` field of a reference object.

use log::warn;
use serde_json::Value;

use cuegraph_core::semantic::{CONTAINER_TYPE, ChildRef};

use crate::records::SourceRecord;

/// Fields of a reference object that may carry the target path, in lookup order.
const REFERENCE_FIELDS: [&str; 2] = ["ObjectPath", "ObjectName"];

/// Extract the target record index from a child reference.
///
/// Returns `None` if the reference has no numeric suffix.
///
/// # Examples
///
/// ```
/// # use cuegraph_parser::parse_ref_index;
/// # use serde_json::json;
/// assert_eq!(parse_ref_index(&json!("SoundNodeMixer'Cue:SoundNodeMixer_0'.4")), Some(4));
/// assert_eq!(parse_ref_index(&json!({ "ObjectPath": "/Game/Cue.12" })), Some(12));
/// assert_eq!(parse_ref_index(&json!({ "ObjectName": "Foo" })), None);
/// ```
pub fn parse_ref_index(reference: &Value) -> Option<usize> {
    match reference {
        Value::String(path) => trailing_index(path),
        Value::Object(object) => REFERENCE_FIELDS
            .iter()
            .find_map(|field| object.get(*field).and_then(Value::as_str))
            .and_then(trailing_index),
        _ => None,
    }
}

/// Parse the `.<digits>` suffix at the very end of a path.
fn trailing_index(path: &str) -> Option<usize> {
    let (_, suffix) = path.rsplit_once('.')?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}

/// Resolve the ordered child slots of the record at `index`.
///
/// A slot is [`ChildRef::Unresolved`] when its reference has no numeric
/// suffix, names an index outside the record list, or names the top-level
/// container record, which never takes part in the pin graph.
pub(crate) fn resolve_children(records: &[SourceRecord<'_>], index: usize) -> Vec<ChildRef> {
    let record = &records[index];
    let Some(child_nodes) = record.property("ChildNodes") else {
        return Vec::new();
    };
    let Value::Array(references) = child_nodes else {
        warn!(index, type_tag = record.type_tag(); "`ChildNodes` is not an array, ignoring it");
        return Vec::new();
    };

    references
        .iter()
        .enumerate()
        .map(|(slot, reference)| match parse_ref_index(reference) {
            Some(target) if target >= records.len() => {
                warn!(index, slot, target; "Child reference points past the end of the record list");
                ChildRef::Unresolved
            }
            Some(target) if records[target].type_tag() == CONTAINER_TYPE => {
                warn!(index, slot, target; "Child reference points at the SoundCue container");
                ChildRef::Unresolved
            }
            Some(target) => ChildRef::Resolved(target),
            None => {
                warn!(index, slot; "Child reference has no record index");
                ChildRef::Unresolved
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::records::decode_records;

    #[test]
    fn test_trailing_index() {
        assert_eq!(trailing_index("a.b.7"), Some(7));
        assert_eq!(trailing_index("a.b"), None);
        assert_eq!(trailing_index("a."), None);
        assert_eq!(trailing_index("no_dot_12"), None);
        assert_eq!(trailing_index("a.-1"), None);
    }

    #[test]
    fn test_parse_ref_index_object_prefers_object_path() {
        let reference = json!({ "ObjectName": "X.1", "ObjectPath": "Y.2" });
        assert_eq!(parse_ref_index(&reference), Some(2));
    }

    #[test]
    fn test_parse_ref_index_object_falls_back_to_object_name() {
        let reference = json!({ "ObjectName": "SoundNodeWavePlayer'Cue:Wave_0'.3" });
        assert_eq!(parse_ref_index(&reference), Some(3));
    }

    #[test]
    fn test_parse_ref_index_other_values() {
        assert_eq!(parse_ref_index(&json!(null)), None);
        assert_eq!(parse_ref_index(&json!(5)), None);
    }

    #[test]
    fn test_resolve_children_keeps_slot_order() {
        let items = vec![
            json!({ "Type": "SoundNodeMixer", "Properties": { "ChildNodes": [
                { "ObjectPath": "Cue.2" },
                "garbage",
                { "ObjectPath": "Cue.1" },
            ]}}),
            json!({ "Type": "SoundNodeWavePlayer" }),
            json!({ "Type": "SoundNodeWavePlayer" }),
        ];
        let records = decode_records(&items).unwrap();

        assert_eq!(
            resolve_children(&records, 0),
            vec![
                ChildRef::Resolved(2),
                ChildRef::Unresolved,
                ChildRef::Resolved(1)
            ]
        );
        assert!(resolve_children(&records, 1).is_empty());
    }

    #[test]
    fn test_resolve_children_out_of_range_and_container() {
        let items = vec![
            json!({ "Type": "SoundNodeRandom", "Properties": { "ChildNodes": ["X.9", "X.1"] }}),
            json!({ "Type": "SoundCue" }),
        ];
        let records = decode_records(&items).unwrap();

        assert_eq!(
            resolve_children(&records, 0),
            vec![ChildRef::Unresolved, ChildRef::Unresolved]
        );
    }

    #[test]
    fn test_resolve_children_non_array() {
        let items = vec![json!({ "Type": "SoundNodeMixer", "Properties": { "ChildNodes": "Cue.0" }})];
        let records = decode_records(&items).unwrap();

        assert!(resolve_children(&records, 0).is_empty());
    }
}
