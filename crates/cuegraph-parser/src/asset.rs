//! Heuristics for locating external asset references in a property bag.
//!
//! Exports do not agree on where or how an asset reference is stored: it may
//! be a plain path string, a `Path.Asset` string with a trailing object
//! index, or an object carrying `ObjectPath`, `AssetPathName` or `Asset`.
//! [`resolve_asset`] probes a prioritized list of keys and normalizes the
//! first usable value to `/Path/To/Asset.Asset` form.

use serde_json::{Map, Value};

/// Property keys probed for a wave player's sound wave, in priority order.
pub const WAVE_ASSET_KEYS: &[&str] = &["SoundWaveAssetPtr", "SoundWave", "Wave", "SoundWaveAsset"];

/// Property keys probed for an attenuation node's settings asset, in priority order.
pub const ATTENUATION_ASSET_KEYS: &[&str] = &[
    "AttenuationSettings",
    "AttenuationAsset",
    "SoundAttenuation",
    "Attenuation",
    "AttenuationPreset",
    "AttenuationObject",
    "AttenuationPath",
    "AttenuationName",
];

/// Fields of a reference object that may carry the asset path.
const PATH_FIELDS: [&str; 3] = ["ObjectPath", "AssetPathName", "Asset"];

/// Return the first asset path found under one of `keys`.
///
/// Returns `None` if no candidate matches; callers provide their own fallback.
///
/// # Examples
///
/// ```
/// # use cuegraph_parser::asset::{resolve_asset, ATTENUATION_ASSET_KEYS};
/// # use serde_json::json;
/// let props = json!({ "AttenuationSettings": { "ObjectPath": "/Game/Att/Near.0" } });
/// let path = resolve_asset(props.as_object().unwrap(), ATTENUATION_ASSET_KEYS);
/// assert_eq!(path.as_deref(), Some("/Game/Att/Near.Near"));
/// ```
pub fn resolve_asset(properties: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| properties.get(*key))
        .find_map(asset_from_value)
}

/// Interpret a single value as an asset reference.
pub fn asset_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => asset_from_str(text),
        Value::Object(object) => PATH_FIELDS
            .iter()
            .filter_map(|field| object.get(*field).and_then(Value::as_str))
            .find_map(normalize_path),
        _ => None,
    }
}

/// Short display name of an asset path: the text after the last `.`, or
/// after the last `/` if the path has no dot.
///
/// ```
/// # use cuegraph_parser::asset::short_name;
/// assert_eq!(short_name("/Game/Audio/Rain.Rain"), "Rain");
/// assert_eq!(short_name("/Game/Audio/Rain"), "Rain");
/// ```
pub fn short_name(path: &str) -> &str {
    match path.rsplit_once('.') {
        Some((_, name)) => name,
        None => path.rsplit('/').next().unwrap_or(path),
    }
}

fn asset_from_str(text: &str) -> Option<String> {
    let text = text.trim();
    if text.contains('/') {
        return normalize_path(text);
    }
    if ends_with_identifier_suffix(text) {
        return Some(strip_numeric_suffix(text).to_string());
    }
    None
}

/// Normalize a path-like string to `path.lastSegment` form.
fn normalize_path(path: &str) -> Option<String> {
    let path = path.trim();
    if !path.contains('/') {
        return None;
    }
    let path = strip_numeric_suffix(path);
    let last = path.rsplit('/').next().unwrap_or(path);
    if last.is_empty() {
        return None;
    }
    if last.contains('.') {
        Some(path.to_string())
    } else {
        Some(format!("{path}.{last}"))
    }
}

/// Remove a trailing `.<digits>` object index.
fn strip_numeric_suffix(path: &str) -> &str {
    match path.rsplit_once('.') {
        Some((head, tail)) if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) => head,
        _ => path,
    }
}

/// Whether the string already ends in `.identifier`.
fn ends_with_identifier_suffix(text: &str) -> bool {
    text.rsplit_once('.').is_some_and(|(head, tail)| {
        !head.is_empty()
            && !tail.is_empty()
            && tail.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
    })
}
