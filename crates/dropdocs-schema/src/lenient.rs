//! Forgiving field decoders for hand-written documentation files.
//!
//! Pages are authored by hand, so a single odd field must never take the
//! surrounding node (or its siblings) down with it. Each decoder here accepts
//! any JSON shape and maps the shapes it does not understand to "absent".

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode an array field. Anything that is not an array decodes as empty and
/// items that fail to decode are skipped.
pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!("Skipping array item {}: {}", index, e);
                None
            }
        })
        .collect())
}

/// Decode a display string. Strings, numbers and booleans are accepted.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(&Value::deserialize(deserializer)?))
}

/// Decode an enumerated selector such as `variant`. Only strings count.
pub fn selector<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Decode an integer option. Whole floats and numeric strings are accepted.
pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_integer(&Value::deserialize(deserializer)?))
}

/// Decode a flag. Only a literal `true` turns it on.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

/// Render a scalar JSON value as display text.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Interpret a scalar JSON value as an integer.
pub fn scalar_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "seq")]
        items: Vec<String>,
        #[serde(default, deserialize_with = "text")]
        label: Option<String>,
        #[serde(default, deserialize_with = "selector")]
        variant: Option<String>,
        #[serde(default, deserialize_with = "integer")]
        cols: Option<i64>,
        #[serde(default, deserialize_with = "flag")]
        enabled: bool,
    }

    fn probe(value: Value) -> Probe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let p = probe(json!({}));

        assert!(p.items.is_empty());
        assert_eq!(p.label, None);
        assert_eq!(p.variant, None);
        assert_eq!(p.cols, None);
        assert!(!p.enabled);
    }

    #[test]
    fn non_array_sequence_is_empty() {
        assert!(probe(json!({ "items": null })).items.is_empty());
        assert!(probe(json!({ "items": "a" })).items.is_empty());
        assert!(probe(json!({ "items": { "a": 1 } })).items.is_empty());
    }

    #[test]
    fn sequence_skips_bad_items() {
        let p = probe(json!({ "items": ["a", 1, "b", null] }));
        assert_eq!(p.items, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn text_accepts_numbers() {
        assert_eq!(probe(json!({ "label": 3 })).label.as_deref(), Some("3"));
        assert_eq!(probe(json!({ "label": [1] })).label, None);
    }

    #[test]
    fn selector_rejects_non_strings() {
        assert_eq!(probe(json!({ "variant": 2 })).variant, None);
        assert_eq!(
            probe(json!({ "variant": "warning" })).variant.as_deref(),
            Some("warning")
        );
    }

    #[test]
    fn integer_accepts_numeric_shapes() {
        assert_eq!(probe(json!({ "cols": 3 })).cols, Some(3));
        assert_eq!(probe(json!({ "cols": 2.0 })).cols, Some(2));
        assert_eq!(probe(json!({ "cols": "4" })).cols, Some(4));
        assert_eq!(probe(json!({ "cols": 2.5 })).cols, None);
        assert_eq!(probe(json!({ "cols": "three" })).cols, None);
    }

    #[test]
    fn flag_requires_literal_true() {
        assert!(probe(json!({ "enabled": true })).enabled);
        assert!(!probe(json!({ "enabled": "true" })).enabled);
        assert!(!probe(json!({ "enabled": 1 })).enabled);
    }
}
