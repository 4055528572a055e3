//! Elaboration of decoded records into the typed semantic model.
//!
//! Each record's type tag selects a [`NodeKind`] variant; the variant's named
//! fields are filled from the loosely typed property bag with lenient
//! coercions (numbers may arrive as strings, booleans as `"True"`, enum
//! values with their `ERichCurve...::` prefix). Missing values take the
//! engine defaults.

use log::{debug, info, warn};
use serde_json::{Map, Value};

use cuegraph_core::semantic::{
    ATTENUATION_TYPE, CONTAINER_TYPE, Cue, CueNode, CurveKey, DELAY_TYPE, ENVELOPER_TYPE,
    EnvelopeSettings, MIXER_TYPE, MODULATOR_TYPE, NodeKind, RANDOM_TYPE, RichCurve,
    WAVE_PLAYER_TYPE,
};

use crate::{
    asset::{self, ATTENUATION_ASSET_KEYS, WAVE_ASSET_KEYS},
    records::SourceRecord,
    references,
};

/// Default per-slot weight of mixers and random nodes.
const DEFAULT_WEIGHT: f64 = 1.0;

/// Build the semantic cue from decoded records.
pub(crate) fn elaborate(records: &[SourceRecord<'_>]) -> Cue {
    let nodes: Vec<CueNode> = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let children = references::resolve_children(records, index);
            let kind = node_kind(index, record, children.len().max(1));
            CueNode::new(index, record.type_tag(), kind, children)
        })
        .collect();

    let base_path = base_path(records);
    let edges = nodes
        .iter()
        .flat_map(CueNode::children)
        .filter(|child| child.is_resolved())
        .count();
    info!(nodes = nodes.len(), edges; "Elaborated SoundCue records");

    Cue::new(nodes, base_path)
}

/// Select and fill the node kind for a record.
fn node_kind(index: usize, record: &SourceRecord<'_>, slot_count: usize) -> NodeKind {
    let props = Properties(record.properties());

    match record.type_tag() {
        CONTAINER_TYPE => NodeKind::Container,
        WAVE_PLAYER_TYPE => {
            let asset = record
                .properties()
                .and_then(|bag| asset::resolve_asset(bag, WAVE_ASSET_KEYS))
                .or_else(|| record.field("SoundWave").and_then(asset::asset_from_value));
            if asset.is_none() {
                warn!(index; "No sound wave asset found for wave player");
            }
            NodeKind::WavePlayer {
                asset,
                looping: props.boolean("bLooping"),
            }
        }
        ATTENUATION_TYPE => {
            let settings = record
                .properties()
                .and_then(|bag| asset::resolve_asset(bag, ATTENUATION_ASSET_KEYS));
            if settings.is_none() {
                debug!(index; "No attenuation asset found, the default settings will be used");
            }
            NodeKind::Attenuation { settings }
        }
        MIXER_TYPE => NodeKind::Mixer {
            input_volumes: props.weights("InputVolume", slot_count),
        },
        MODULATOR_TYPE => NodeKind::Modulator {
            pitch_min: props.number("PitchMin"),
            pitch_max: props.number("PitchMax"),
            volume_min: props.number("VolumeMin"),
            volume_max: props.number("VolumeMax"),
        },
        ENVELOPER_TYPE => NodeKind::Enveloper(Box::new(EnvelopeSettings {
            loop_start: props.number("LoopStart").unwrap_or_default(),
            loop_end: props.number("LoopEnd").unwrap_or_default(),
            duration_after_loop: props.number("DurationAfterLoop").unwrap_or_default(),
            loop_count: props.number("LoopCount").map_or(0, |count| count as i64),
            loop_indefinitely: props.boolean("bLoopIndefinitely"),
            looping: props.boolean("bLoop"),
            volume_curve: props.get("VolumeCurve").map(curve).unwrap_or_default(),
            pitch_curve: props.get("PitchCurve").map(curve).unwrap_or_default(),
        })),
        DELAY_TYPE => NodeKind::Delay {
            delay_min: props.number("DelayMin").unwrap_or_default(),
            delay_max: props.number("DelayMax").unwrap_or_default(),
        },
        RANDOM_TYPE => NodeKind::Random {
            weights: props.weights("Weights", slot_count),
        },
        other => {
            debug!(index, type_tag = other; "Rendering node with generic properties");
            NodeKind::Generic
        }
    }
}

/// Lenient accessors over an optional property bag.
#[derive(Clone, Copy)]
struct Properties<'a>(Option<&'a Map<String, Value>>);

impl<'a> Properties<'a> {
    fn get(self, key: &str) -> Option<&'a Value> {
        self.0.and_then(|bag| bag.get(key))
    }

    fn number(self, key: &str) -> Option<f64> {
        self.get(key).and_then(as_number)
    }

    fn boolean(self, key: &str) -> bool {
        self.get(key).is_some_and(as_boolean)
    }

    /// One weight per slot; missing or non-numeric entries take the default.
    fn weights(self, key: &str, slot_count: usize) -> Vec<f64> {
        let values = self.get(key).and_then(Value::as_array);
        (0..slot_count)
            .map(|slot| {
                values
                    .and_then(|values| values.get(slot))
                    .and_then(as_number)
                    .unwrap_or(DEFAULT_WEIGHT)
            })
            .collect()
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn as_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => text.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Read a curve stored either as `{ EditorCurveData: { Keys: [...] } }` or
/// directly as `{ Keys: [...] }`.
fn curve(value: &Value) -> RichCurve {
    let keys = value
        .get("EditorCurveData")
        .unwrap_or(value)
        .get("Keys")
        .and_then(Value::as_array);

    RichCurve::new(
        keys.map(|keys| keys.iter().map(curve_key).collect())
            .unwrap_or_default(),
    )
}

fn curve_key(value: &Value) -> CurveKey {
    let defaults = CurveKey::default();
    let number = |key: &str| value.get(key).and_then(as_number).unwrap_or_default();
    let mode = |key: &str, default: String| {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(|text| enum_name(text).to_string())
            .unwrap_or(default)
    };

    CurveKey {
        interp_mode: mode("InterpMode", defaults.interp_mode),
        tangent_mode: mode("TangentMode", defaults.tangent_mode),
        tangent_weight_mode: mode("TangentWeightMode", defaults.tangent_weight_mode),
        time: number("Time"),
        value: number("Value"),
        arrive_tangent: number("ArriveTangent"),
        arrive_tangent_weight: number("ArriveTangentWeight"),
        leave_tangent: number("LeaveTangent"),
        leave_tangent_weight: number("LeaveTangentWeight"),
    }
}

/// Strip a C++ enum scope, e.g. `ERichCurveInterpMode::RCIM_Cubic` -> `RCIM_Cubic`.
fn enum_name(text: &str) -> &str {
    text.rsplit("::").next().unwrap_or(text)
}

/// Export path of the SoundCue asset, derived from the container record.
///
/// Uses the container's `FirstNode` reference, or its `Name`, stripped of any
/// object index and rendered as `path.lastSegment`.
fn base_path(records: &[SourceRecord<'_>]) -> Option<String> {
    let container = records
        .iter()
        .find(|record| record.type_tag() == CONTAINER_TYPE)?;

    let first_node = container.property("FirstNode");
    let candidate = ["ObjectPath", "ObjectName"]
        .iter()
        .find_map(|field| first_node.and_then(|node| node.get(*field)).and_then(Value::as_str))
        .or_else(|| container.field("Name").and_then(Value::as_str))?;

    let base = match candidate.rsplit_once('.') {
        Some((head, tail)) if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) => head,
        _ => candidate,
    };
    let last = base.rsplit('/').next().unwrap_or(base);
    if last.is_empty() {
        return None;
    }

    Some(format!("{base}.{last}"))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use serde_json::json;

    use super::*;
    use crate::records::decode_records;

    fn elaborate_json(items: Vec<Value>) -> Cue {
        let records = decode_records(&items).unwrap();
        elaborate(&records)
    }

    #[test]
    fn test_wave_player() {
        let cue = elaborate_json(vec![json!({
            "Type": "SoundNodeWavePlayer",
            "Properties": { "SoundWave": { "ObjectPath": "/Game/Audio/Rain.0" }, "bLooping": "True" }
        })]);

        assert_eq!(
            cue.nodes()[0].kind(),
            &NodeKind::WavePlayer {
                asset: Some("/Game/Audio/Rain.Rain".to_string()),
                looping: true,
            }
        );
    }

    #[test]
    fn test_wave_player_record_level_sound_wave() {
        let cue = elaborate_json(vec![json!({
            "Type": "SoundNodeWavePlayer",
            "SoundWave": { "ObjectPath": "/Game/Audio/Wind.3" }
        })]);

        assert_eq!(cue.nodes()[0].kind().asset_path(), Some("/Game/Audio/Wind.Wind"));
    }

    #[test]
    fn test_mixer_weights_follow_slots() {
        let cue = elaborate_json(vec![
            json!({ "Type": "SoundNodeMixer", "Properties": {
                "ChildNodes": ["C.1", "C.2", "C.3"],
                "InputVolume": [0.5, "0.25"]
            }}),
            json!({ "Type": "SoundNodeWavePlayer" }),
            json!({ "Type": "SoundNodeWavePlayer" }),
            json!({ "Type": "SoundNodeWavePlayer" }),
        ]);

        let NodeKind::Mixer { input_volumes } = cue.nodes()[0].kind() else {
            panic!("expected a mixer");
        };
        assert_eq!(input_volumes.len(), 3);
        assert_approx_eq!(f64, input_volumes[0], 0.5);
        assert_approx_eq!(f64, input_volumes[1], 0.25);
        assert_approx_eq!(f64, input_volumes[2], 1.0);
    }

    #[test]
    fn test_random_without_children_has_one_weight() {
        let cue = elaborate_json(vec![json!({ "Type": "SoundNodeRandom" })]);

        assert_eq!(
            cue.nodes()[0].kind(),
            &NodeKind::Random {
                weights: vec![1.0]
            }
        );
    }

    #[test]
    fn test_enveloper_curves() {
        let cue = elaborate_json(vec![json!({
            "Type": "SoundNodeEnveloper",
            "Properties": {
                "LoopEnd": 2.5,
                "LoopCount": 3,
                "bLoop": true,
                "VolumeCurve": { "EditorCurveData": { "Keys": [
                    { "InterpMode": "ERichCurveInterpMode::RCIM_Cubic", "Time": 0.0, "Value": 1.0 },
                    { "Time": 1.5, "Value": 0.0, "LeaveTangent": -0.5 }
                ]}},
                "PitchCurve": { "Keys": [] }
            }
        })]);

        let NodeKind::Enveloper(settings) = cue.nodes()[0].kind() else {
            panic!("expected an enveloper");
        };
        assert_approx_eq!(f64, settings.loop_end, 2.5);
        assert_eq!(settings.loop_count, 3);
        assert!(settings.looping);
        assert!(!settings.loop_indefinitely);

        let keys = settings.volume_curve.keys();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].interp_mode, "RCIM_Cubic");
        assert_eq!(keys[1].interp_mode, "RCIM_Linear");
        assert_approx_eq!(f64, keys[1].time, 1.5);
        assert_approx_eq!(f64, keys[1].leave_tangent, -0.5);
        assert!(settings.pitch_curve.is_empty());
    }

    #[test]
    fn test_modulator_keeps_missing_values_absent() {
        let cue = elaborate_json(vec![json!({
            "Type": "SoundNodeModulator",
            "Properties": { "PitchMin": 0.9 }
        })]);

        assert_eq!(
            cue.nodes()[0].kind(),
            &NodeKind::Modulator {
                pitch_min: Some(0.9),
                pitch_max: None,
                volume_min: None,
                volume_max: None,
            }
        );
    }

    #[test]
    fn test_unknown_type_is_generic() {
        let cue = elaborate_json(vec![json!({ "Type": "SoundNodeLooping" })]);
        assert_eq!(cue.nodes()[0].kind(), &NodeKind::Generic);
        assert_eq!(cue.nodes()[0].type_tag(), "SoundNodeLooping");
    }

    #[test]
    fn test_base_path_from_first_node() {
        let cue = elaborate_json(vec![
            json!({ "Type": "SoundNodeWavePlayer" }),
            json!({ "Type": "SoundCue", "Name": "Ignored",
                    "Properties": { "FirstNode": { "ObjectPath": "/Game/Audio/Rain_Cue.0" } } }),
        ]);
        assert_eq!(cue.base_path(), Some("/Game/Audio/Rain_Cue.Rain_Cue"));
        assert!(cue.nodes()[1].is_container());
    }

    #[test]
    fn test_base_path_from_name() {
        let cue = elaborate_json(vec![json!({ "Type": "SoundCue", "Name": "Rain_Cue" })]);
        assert_eq!(cue.base_path(), Some("Rain_Cue.Rain_Cue"));
    }

    #[test]
    fn test_base_path_absent_without_container() {
        let cue = elaborate_json(vec![json!({ "Type": "SoundNodeWavePlayer" })]);
        assert_eq!(cue.base_path(), None);
    }

    #[test]
    fn test_enum_name() {
        assert_eq!(enum_name("ERichCurveTangentMode::RCTM_User"), "RCTM_User");
        assert_eq!(enum_name("RCTM_Auto"), "RCTM_Auto");
    }
}
