//! Gear inventory rules.

use std::collections::BTreeMap;

use crate::error::CoreError;

pub const GEAR_TYPE_CAMERA: &str = "camera";
pub const GEAR_TYPE_LENS: &str = "lens";
pub const GEAR_TYPE_LIGHTING: &str = "lighting";
pub const GEAR_TYPE_ACCESSORY: &str = "accessory";
pub const GEAR_TYPE_TRIPOD: &str = "tripod";

/// All valid gear types, in display order.
pub const VALID_GEAR_TYPES: &[&str] = &[
    GEAR_TYPE_CAMERA,
    GEAR_TYPE_LENS,
    GEAR_TYPE_LIGHTING,
    GEAR_TYPE_ACCESSORY,
    GEAR_TYPE_TRIPOD,
];

/// Open-ended gear attributes (`"Sensor" -> "Full frame"`).
pub type GearSpecs = BTreeMap<String, String>;

/// Validate that a gear type is one of the known types.
pub fn validate_gear_type(gear_type: &str) -> Result<(), CoreError> {
    if VALID_GEAR_TYPES.contains(&gear_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid gear type '{gear_type}'. Must be one of: {VALID_GEAR_TYPES:?}"
        )))
    }
}

/// Parse the `specs` form field, a JSON object.
///
/// String values are kept as-is, numbers and booleans are rendered as text,
/// nulls are dropped, and nested arrays/objects are kept as compact JSON.
/// A blank input yields an empty map.
pub fn parse_specs(raw: &str) -> Result<GearSpecs, CoreError> {
    if raw.trim().is_empty() {
        return Ok(GearSpecs::new());
    }

    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| CoreError::Validation(format!("Specs must be valid JSON: {e}")))?;

    let obj = value
        .as_object()
        .ok_or_else(|| CoreError::Validation("Specs must be a JSON object".into()))?;

    let mut specs = GearSpecs::new();
    for (key, value) in obj {
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let text = match value {
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            nested => nested.to_string(),
        };
        specs.insert(key.to_string(), text);
    }
    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gear_types() {
        for t in VALID_GEAR_TYPES {
            assert!(validate_gear_type(t).is_ok());
        }
        assert!(validate_gear_type("drone").is_err());
    }

    #[test]
    fn specs_are_flattened_to_strings() {
        let specs = parse_specs(r#"{"Sensor": "Full frame", "Megapixels": 45, "IBIS": true, "Notes": null}"#)
            .unwrap();
        assert_eq!(specs.get("Sensor").map(String::as_str), Some("Full frame"));
        assert_eq!(specs.get("Megapixels").map(String::as_str), Some("45"));
        assert_eq!(specs.get("IBIS").map(String::as_str), Some("true"));
        assert!(!specs.contains_key("Notes"));
    }

    #[test]
    fn nested_values_are_kept_as_json() {
        let specs = parse_specs(r#"{"Mounts": ["RF", "EF"]}"#).unwrap();
        assert_eq!(specs.get("Mounts").map(String::as_str), Some(r#"["RF","EF"]"#));
    }

    #[test]
    fn blank_specs_are_empty() {
        assert!(parse_specs("").unwrap().is_empty());
        assert!(parse_specs("   ").unwrap().is_empty());
    }

    #[test]
    fn non_object_specs_are_rejected() {
        assert!(parse_specs("[1, 2]").is_err());
        assert!(parse_specs("not json").is_err());
    }
}
