//! Layering of YAML config documents.
//!
//! A later document wins wherever the two disagree. Mappings combine key by
//! key; anything else (sequences included) is taken whole from the later
//! document. An explicit `null` removes the key it names, so a local file
//! can drop an alias the project file defines.

use serde_yaml::{Mapping, Value};

/// Apply `overlay` on top of `base` in place.
pub fn overlay_onto(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Mapping(target), Value::Mapping(layer)) => {
            for (key, value) in layer {
                if value.is_null() {
                    target.remove(key);
                } else if let Some(existing) = target.get_mut(key) {
                    overlay_onto(existing, value);
                } else {
                    target.insert(key.clone(), value.clone());
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}

/// `overlay` layered over a copy of `base`.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    let mut merged = base.clone();
    overlay_onto(&mut merged, overlay);
    merged
}

/// Layer `configs` first to last. Empty documents change nothing.
pub fn merge_configs(configs: &[Value]) -> Value {
    let mut merged = Value::Mapping(Mapping::new());
    for config in configs.iter().filter(|c| !c.is_null()) {
        overlay_onto(&mut merged, config);
    }
    merged
}
