//! Recursive merge of plain option maps.

use super::value::{Map, Value};

/// Merges `source` into `dest`.
///
/// - keys present only in `source` are added;
/// - nested maps on both sides merge recursively;
/// - lists on both sides are concatenated, `dest` first, skipping incoming
///   elements `dest` already holds;
/// - anything else is overwritten by the incoming value.
///
/// Callers pass the compact projection of a configuration (see
/// [`Config::deep_merge`](super::Config::deep_merge)), so options left at their
/// default never reach this function.
pub fn deep_merge(dest: &mut Map, source: &Map) {
    for (key, incoming) in source {
        match dest.get_mut(key) {
            Some(existing) => merge_value(existing, incoming),
            None => {
                dest.insert(key.clone(), incoming.clone());
            }
        }
    }
}

fn merge_value(existing: &mut Value, incoming: &Value) {
    match (existing, incoming) {
        (Value::Map(existing), Value::Map(incoming)) => deep_merge(existing, incoming),
        (Value::List(existing), Value::List(incoming)) => {
            for item in incoming {
                if !existing.contains(item) {
                    existing.push(item.clone());
                }
            }
        }
        (existing, incoming) => *existing = incoming.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: serde_json::Value) -> Map {
        match Value::from(value) {
            Value::Map(map) => map,
            _ => unreachable!("test fixtures are objects"),
        }
    }

    #[test]
    fn merges_nested_maps_and_concatenates_lists() {
        let mut dest = map(json!({
            "serialization": { "except": ["secret"], "only": [] },
            "name_method": "name",
        }));
        let source = map(json!({
            "serialization": { "except": ["token"], "methods": ["a_method"] },
            "shallow": true,
        }));
        deep_merge(&mut dest, &source);
        assert_eq!(
            Value::Map(dest).to_json(),
            json!({
                "name_method": "name",
                "serialization": { "except": ["secret", "token"], "methods": ["a_method"], "only": [] },
                "shallow": true,
            })
        );
    }

    #[test]
    fn concatenation_skips_elements_already_present() {
        let mut dest = map(json!({ "except": ["secret", "token"] }));
        deep_merge(&mut dest, &map(json!({ "except": ["token", "password"] })));
        assert_eq!(
            Value::Map(dest).to_json(),
            json!({ "except": ["secret", "token", "password"] })
        );
    }

    #[test]
    fn scalars_are_overwritten() {
        let mut dest = map(json!({ "url_for": "custom", "shallow": false }));
        deep_merge(&mut dest, &map(json!({ "shallow": true })));
        assert_eq!(Value::Map(dest).to_json(), json!({ "url_for": "custom", "shallow": true }));
    }

    #[test]
    fn nil_map_entries_are_kept() {
        let mut dest = map(json!({ "associations": { "special": "foo" } }));
        deep_merge(&mut dest, &map(json!({ "associations": { "bars": null } })));
        assert_eq!(
            Value::Map(dest).to_json(),
            json!({ "associations": { "bars": null, "special": "foo" } })
        );
    }

    #[test]
    fn mismatched_shapes_take_the_incoming_value() {
        let mut dest = map(json!({ "associations": ["bars"] }));
        deep_merge(&mut dest, &map(json!({ "associations": { "special": "foo" } })));
        assert_eq!(Value::Map(dest).to_json(), json!({ "associations": { "special": "foo" } }));
    }
}
