//! Deep merge of YAML configuration layers.
//!
//! # Merge Rules
//!
//! - Mappings are merged recursively
//! - Null values in overlay delete the corresponding key from base
//! - Everything else in overlay replaces base

use serde_yaml::Value;

/// Deep merge two YAML values; `overlay` wins at the point of conflict.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), deep_merge(base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Mapping(result)
        }

        (_, overlay) => overlay.clone(),
    }
}

/// Merge layers in order (later overrides earlier).
pub fn merge_layers(layers: &[Value]) -> Value {
    layers
        .iter()
        .fold(Value::Mapping(Default::default()), |acc, layer| {
            deep_merge(&acc, layer)
        })
}
