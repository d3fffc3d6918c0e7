//! # Configurable Nodes
//!
//! [`Config`] is the generic, mutable configuration node behind every shape.
//! It holds one value per option of its [`Schema`] plus the set of options that
//! were explicitly assigned (as opposed to left at their default).
//!
//! ## Semantics
//!
//! - **Strict schema**: assigning an undeclared option fails with
//!   [`Error::UnknownOption`]; typos never pass silently.
//! - **Atomic `set()`**: options are applied to a fresh node that replaces the
//!   current state only when every option was accepted.
//! - **Value equality**: two nodes of the same schema are equal iff all their
//!   values are equal, defaults included. Hashing agrees.
//! - **Ownership**: a node owns its nested nodes and containers by value, so
//!   [`Config::deep_clone`] yields a fully independent tree.
//! - **Selective merge**: [`Config::deep_merge`] only lets explicitly set or
//!   non-default, non-empty fields of either side participate.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

use super::merge;
use super::option::{OptionSpec, Schema};
use super::value::{Map, Value};
use crate::error::{Error, Result};

/// Flags for [`Config::to_hash`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HashOptions {
    /// Drop container values that end up empty.
    pub ignore_empty: bool,
    /// Drop options never explicitly set whose value equals the default.
    pub skip_defaults: bool,
}

impl HashOptions {
    /// The projection used for merging: no empty containers, no passive defaults.
    pub const COMPACT: HashOptions = HashOptions {
        ignore_empty: true,
        skip_defaults: true,
    };
}

/// A configuration node built from a [`Schema`].
#[derive(Debug, Clone)]
pub struct Config {
    schema: &'static Schema,
    values: Vec<Value>,
    explicitly_set: BTreeSet<&'static str>,
}

impl Config {
    /// Creates a node with every option at its initialized value.
    pub fn new(schema: &'static Schema) -> Self {
        let mut config = Self {
            schema,
            values: Vec::new(),
            explicitly_set: BTreeSet::new(),
        };
        config.reset();
        config
    }

    /// Creates a node and applies `options` to it.
    pub fn from_options(schema: &'static Schema, options: impl Into<Value>) -> Result<Self> {
        let mut config = Self::new(schema);
        config.apply(options.into())?;
        Ok(config)
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    pub fn option_names(&self) -> Vec<&'static str> {
        self.schema.option_names()
    }

    pub fn find_option(&self, name: &str) -> Option<&'static OptionSpec> {
        self.schema.find_option(name)
    }

    /// True if the option was assigned rather than passively defaulted.
    pub fn is_explicitly_set(&self, name: &str) -> bool {
        self.explicitly_set.contains(name)
    }

    /// Reinitializes every option and forgets which were explicitly set.
    pub fn reset(&mut self) {
        self.values = self.schema.options().iter().map(OptionSpec::initialized).collect();
        self.explicitly_set.clear();
    }

    /// Resets the node, then applies `options` (a map of option name to value).
    ///
    /// On failure the node keeps the state it had before the call.
    pub fn set(&mut self, options: impl Into<Value>) -> Result<&mut Self> {
        let mut next = Self::new(self.schema);
        next.apply(options.into())?;
        *self = next;
        Ok(self)
    }

    /// Coerces and stores one option, recording it as explicitly set.
    pub fn assign(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self> {
        let index = self.position(name)?;
        let option = &self.schema.options()[index];
        self.values[index] = option.generate_from(value.into())?;
        self.explicitly_set.insert(option.name());
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema.position(name).map(|index| &self.values[index])
    }

    /// Mutable access to an option's value. In-place edits (such as adding an
    /// entry to a map option) do not mark the option as explicitly set.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.schema.position(name).map(|index| &mut self.values[index])
    }

    pub fn map_mut(&mut self, name: &str) -> Option<&mut Map> {
        match self.get_mut(name) {
            Some(Value::Map(map)) => Some(map),
            _ => None,
        }
    }

    /// Converts the node into a plain map, recursing into nested nodes and
    /// containers with the same flags.
    pub fn to_hash(&self, options: HashOptions) -> Map {
        let mut hash = Map::new();
        for (option, value) in self.schema.options().iter().zip(&self.values) {
            if options.skip_defaults
                && !self.is_explicitly_set(option.name())
                && *value == option.default_value()
            {
                continue;
            }
            let plain = to_plain(value, options);
            if options.ignore_empty && plain.is_empty_container() {
                continue;
            }
            hash.insert(option.name().to_string(), plain);
        }
        hash
    }

    /// A structurally identical, fully independent copy.
    pub fn deep_clone(&self) -> Self {
        self.clone()
    }

    /// Produces a new node: this node's compact projection deep-merged with
    /// `other`'s. Fails if `other` carries options this schema does not know.
    pub fn deep_merge(&self, other: &Config) -> Result<Config> {
        self.deep_merge_map(&other.to_hash(HashOptions::COMPACT))
    }

    /// Like [`Config::deep_merge`], with a plain option map as the operand.
    pub fn deep_merge_map(&self, other: &Map) -> Result<Config> {
        let mut merged = self.to_hash(HashOptions::COMPACT);
        merge::deep_merge(&mut merged, other);
        Config::from_options(self.schema, Value::Map(merged))
    }

    fn apply(&mut self, options: Value) -> Result<()> {
        match options {
            Value::Nil => Ok(()),
            Value::Map(options) => {
                for (name, value) in options {
                    self.assign(&name, value)?;
                }
                Ok(())
            }
            other => Err(Error::UnexpectedValue {
                option: self.schema.name().to_string(),
                expected: "a map of options",
                received: other.describe(),
            }),
        }
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.schema.position(name).ok_or_else(|| Error::UnknownOption {
            shape: self.schema.name(),
            option: name.to_string(),
            known: self.option_names().join(", "),
        })
    }
}

fn to_plain(value: &Value, options: HashOptions) -> Value {
    match value {
        Value::Config(config) => Value::Map(config.to_hash(options)),
        Value::List(items) => Value::List(items.iter().map(|item| to_plain(item, options)).collect()),
        Value::Map(map) => Value::Map(
            map.iter()
                .map(|(key, value)| (key.clone(), to_plain(value, options)))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

impl PartialEq for Config {
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema && self.values == other.values
    }
}

impl Eq for Config {}

impl Hash for Config {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.schema.name().hash(state);
        self.values.hash(state);
    }
}

impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_hash(HashOptions::default()).serialize(serializer)
    }
}
