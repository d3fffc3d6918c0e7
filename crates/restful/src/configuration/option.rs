//! # Options and Schemas
//!
//! A [`Schema`] is the declarative table of one configuration shape: an ordered
//! list of [`OptionSpec`] descriptors giving each option's name, kind and
//! default. Schemas are `static` items, so nested shapes (a `Resource` owning a
//! `Serialization`, a `Serialization` including more `Serialization`s) refer to
//! each other by `&'static Schema`.
//!
//! An option's kind and its default are orthogonal. Container kinds always
//! start out as a fresh empty container (or a fresh default node); only plain
//! options use their default.

use std::fmt;

use super::value::{Map, Value};
use super::Config;
use crate::error::{Error, Result};

/// Declarative description of one configuration shape.
///
/// Schemas are built with a struct literal so the option table lives as long
/// as the `static` that owns it.
pub struct Schema {
    pub(crate) name: &'static str,
    pub(crate) options: &'static [OptionSpec],
}

impl Schema {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn options(&self) -> &'static [OptionSpec] {
        self.options
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.options.iter().position(|option| option.name == name)
    }

    pub fn find_option(&self, name: &str) -> Option<&'static OptionSpec> {
        self.options.iter().find(|option| option.name == name)
    }

    pub fn option_names(&self) -> Vec<&'static str> {
        self.options.iter().map(|option| option.name).collect()
    }
}

// Schemas may be self-referential, so they are compared and printed by identity.
impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for Schema {}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Schema({})", self.name)
    }
}

/// The shape an option's value is coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Any value, stored unchanged.
    Plain,
    List,
    Map,
    /// A nested configuration node of the given shape.
    Config(&'static Schema),
}

/// Default of a plain option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Nil,
    Bool(bool),
    Str(&'static str),
}

impl DefaultValue {
    pub fn to_value(self) -> Value {
        match self {
            DefaultValue::Nil => Value::Nil,
            DefaultValue::Bool(b) => Value::Bool(b),
            DefaultValue::Str(s) => Value::Str(s.to_string()),
        }
    }
}

/// Typed, coercing descriptor for one configuration field.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    name: &'static str,
    kind: OptionKind,
    element: Option<&'static Schema>,
    default: DefaultValue,
    /// Canonicalizes the keys of a map option as they are stored.
    keys: Option<fn(&str) -> String>,
}

impl OptionSpec {
    pub const fn plain(name: &'static str) -> Self {
        Self::with_default(name, DefaultValue::Nil)
    }

    pub const fn with_default(name: &'static str, default: DefaultValue) -> Self {
        Self {
            name,
            kind: OptionKind::Plain,
            element: None,
            default,
            keys: None,
        }
    }

    pub const fn list(name: &'static str) -> Self {
        Self {
            name,
            kind: OptionKind::List,
            element: None,
            default: DefaultValue::Nil,
            keys: None,
        }
    }

    pub const fn map(name: &'static str) -> Self {
        Self {
            name,
            kind: OptionKind::Map,
            element: None,
            default: DefaultValue::Nil,
            keys: None,
        }
    }

    /// A map whose values are nested configurations of `element`.
    pub const fn map_of(name: &'static str, element: &'static Schema) -> Self {
        Self {
            name,
            kind: OptionKind::Map,
            element: Some(element),
            default: DefaultValue::Nil,
            keys: None,
        }
    }

    /// Like [`OptionSpec::map_of`], with every key passed through `normalize`
    /// so differently spelled keys land in the same slot.
    pub const fn keyed_map_of(name: &'static str, element: &'static Schema, normalize: fn(&str) -> String) -> Self {
        Self {
            name,
            kind: OptionKind::Map,
            element: Some(element),
            default: DefaultValue::Nil,
            keys: Some(normalize),
        }
    }

    pub const fn config(name: &'static str, schema: &'static Schema) -> Self {
        Self {
            name,
            kind: OptionKind::Config(schema),
            element: None,
            default: DefaultValue::Nil,
            keys: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    pub fn element(&self) -> Option<&'static Schema> {
        self.element
    }

    pub fn default_value(&self) -> Value {
        self.default.to_value()
    }

    /// The value an option holds right after `reset()`.
    ///
    /// Containers are freshly allocated on every call, so no two nodes ever
    /// share a mutable default.
    pub fn initialized(&self) -> Value {
        match self.kind {
            OptionKind::Plain => self.default.to_value(),
            OptionKind::List => Value::List(Vec::new()),
            OptionKind::Map => Value::Map(Map::new()),
            OptionKind::Config(schema) => Value::Config(Config::new(schema)),
        }
    }

    /// Coerces a raw value into this option's shape.
    pub fn generate_from(&self, value: Value) -> Result<Value> {
        match self.kind {
            OptionKind::Plain => Ok(value),
            OptionKind::Config(schema) => match value {
                Value::Config(config) if config.schema() == schema => Ok(Value::Config(config)),
                Value::Map(map) => Config::from_options(schema, Value::Map(map)).map(Value::Config),
                other => Err(self.unexpected(schema.name(), &other)),
            },
            OptionKind::List => match value {
                Value::List(items) => items
                    .into_iter()
                    .map(|item| self.element_of_type(item))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::List),
                Value::Nil => Ok(Value::List(Vec::new())),
                other => Ok(Value::List(vec![self.element_of_type(other)?])),
            },
            OptionKind::Map => match value {
                Value::Map(map) => map
                    .into_iter()
                    .map(|(key, value)| Ok((self.key(&key), self.element_of_type(value)?)))
                    .collect::<Result<Map>>()
                    .map(Value::Map),
                Value::List(items) => Ok(Value::Map(
                    items.iter().map(|item| (self.key(&item.to_key()), Value::Nil)).collect(),
                )),
                Value::Nil => Ok(Value::Map(Map::new())),
                Value::Config(config) => Err(self.unexpected("a map", &Value::Config(config))),
                scalar => Ok(Value::Map(Map::from([(self.key(&scalar.to_key()), Value::Nil)]))),
            },
        }
    }

    fn key(&self, key: &str) -> String {
        match self.keys {
            Some(normalize) => normalize(key),
            None => key.to_string(),
        }
    }

    // Elements skip the owning shape's constructor: an empty node is built and
    // then `set()` with the partial map, so declarative maps of nodes need not
    // name every field.
    fn element_of_type(&self, value: Value) -> Result<Value> {
        let Some(schema) = self.element else {
            return Ok(value);
        };
        match value {
            Value::Config(config) if config.schema() == schema => Ok(Value::Config(config)),
            Value::Nil => Ok(Value::Config(Config::new(schema))),
            Value::Map(map) => {
                let mut config = Config::new(schema);
                config.set(Value::Map(map))?;
                Ok(Value::Config(config))
            }
            other => Err(self.unexpected(schema.name(), &other)),
        }
    }

    fn unexpected(&self, expected: &'static str, received: &Value) -> Error {
        Error::UnexpectedValue {
            option: self.name.to_string(),
            expected,
            received: received.describe(),
        }
    }
}
