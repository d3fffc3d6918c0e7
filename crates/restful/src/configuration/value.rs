//! Dynamic values held by configuration options.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::Serialize;
use serde_json::{Number, Value as JsonValue};

use super::Config;

/// Plain mapping of option names (or map keys) to values.
pub type Map = BTreeMap<String, Value>;

/// The value of one configuration option.
///
/// Equality is structural all the way down, and hashing agrees with it, so two
/// option trees built independently from the same input compare equal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Number(Number),
    Str(String),
    List(Vec<Value>),
    Map(Map),
    Config(Config),
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Nil => {}
            Value::Bool(b) => b.hash(state),
            Value::Number(n) => n.to_string().hash(state),
            Value::Str(s) => s.hash(state),
            Value::List(items) => items.hash(state),
            Value::Map(map) => map.hash(state),
            Value::Config(config) => config.hash(state),
        }
    }
}

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_config(&self) -> Option<&Config> {
        match self {
            Value::Config(config) => Some(config),
            _ => None,
        }
    }

    /// True for lists and maps without elements. Scalars and nested
    /// configurations are never considered empty.
    pub fn is_empty_container(&self) -> bool {
        match self {
            Value::List(items) => items.is_empty(),
            Value::Map(map) => map.is_empty(),
            _ => false,
        }
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Value::Config(config) => format!("{} configuration", config.schema().name()),
            other => other.to_json().to_string(),
        }
    }

    /// Canonical map key for this value.
    ///
    /// Strings are used as-is; other scalars use their JSON text, so `7` and
    /// `"7"` name the same key.
    pub fn to_key(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            other => other.to_json().to_string(),
        }
    }

    /// Converts to a plain JSON value. Nested configurations become their full
    /// option maps.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Nil => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Number(n) => JsonValue::Number(n.clone()),
            Value::Str(s) => JsonValue::String(s.clone()),
            Value::List(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(map) => JsonValue::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            Value::Config(config) => Value::Map(config.to_hash(Default::default())).to_json(),
        }
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Nil,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(n),
            JsonValue::String(s) => Value::Str(s),
            JsonValue::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value.into())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Number(value.into())
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

impl From<Config> for Value {
    fn from(value: Config) -> Self {
        Value::Config(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(value: &Value) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn converts_json_trees() {
        let value = Value::from(json!({ "only": ["id", "name"], "shallow": true, "limit": 3 }));
        let map = value.as_map().unwrap();
        assert_eq!(map["only"], Value::from(vec!["id", "name"]));
        assert_eq!(map["shallow"], Value::Bool(true));
        assert_eq!(map["limit"], Value::from(3));
        assert_eq!(value.to_json(), json!({ "limit": 3, "only": ["id", "name"], "shallow": true }));
    }

    #[test]
    fn equal_values_hash_equal() {
        let a = Value::from(json!({ "a": [1, 2], "b": { "c": null } }));
        let b = Value::from(json!({ "b": { "c": null }, "a": [1, 2] }));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(hash_of(&a), hash_of(&Value::from(json!({ "a": [2, 1] }))));
    }

    #[test]
    fn keys_and_emptiness() {
        assert_eq!(Value::from("bars").to_key(), "bars");
        assert_eq!(Value::from(7).to_key(), "7");
        assert!(Value::List(vec![]).is_empty_container());
        assert!(Value::Map(Map::new()).is_empty_container());
        assert!(!Value::Nil.is_empty_container());
        assert!(!Value::from("").is_empty_container());
    }
}
