//! Attribute serialization rules for one resource type.

use std::collections::BTreeMap;

use super::shape::{config_shape, nested, with_nested, Shape};
use super::value::Value;
use crate::error::Result;
use crate::model::SerializationOptions;

config_shape! {
    /// Options forwarded to the attribute-introspection collaborator.
    ///
    /// - `only`: attribute names to serialize. Takes precedence over `except`.
    /// - `except`: attribute names to leave out.
    /// - `include`: nested rules for related records, keyed by relation name.
    /// - `methods`: computed values to add to the attributes.
    ///
    /// All four start out as empty containers.
    pub struct Serialization => SERIALIZATION("serialization") {
        only: list,
        except: list,
        include: map_of(&SERIALIZATION),
        methods: list,
    }
}

impl Serialization {
    pub fn only(&self) -> Vec<String> {
        self.names("only")
    }

    pub fn except(&self) -> Vec<String> {
        self.names("except")
    }

    pub fn methods(&self) -> Vec<String> {
        self.names("methods")
    }

    /// Copies of the nested include rules, keyed by relation name.
    pub fn include(&self) -> BTreeMap<String, Serialization> {
        self.config
            .get("include")
            .and_then(Value::as_map)
            .map(|map| {
                map.iter()
                    .filter_map(|(name, value)| Some((name.clone(), nested(Some(value))?)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Registers nested rules for the relation `name`, replacing any present.
    pub fn includes<F>(&mut self, name: &str, options: impl Into<Value>, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Serialization) -> Result<()>,
    {
        let include = Serialization::register(options, configure)?;
        if let Some(map) = self.config.map_mut("include") {
            map.insert(name.to_string(), include.into());
        }
        Ok(self)
    }

    /// Edits the nested rules registered for `name`, if any.
    pub fn configure_include<F>(&mut self, name: &str, configure: F) -> Result<bool>
    where
        F: FnOnce(&mut Serialization) -> Result<()>,
    {
        let slot = self.config.map_mut("include").and_then(|map| map.get_mut(name));
        with_nested(slot, configure)
    }

    /// The collaborator-facing form of these rules.
    pub fn to_options(&self, with_include: bool) -> SerializationOptions {
        SerializationOptions {
            only: self.only(),
            except: self.except(),
            methods: self.methods(),
            include: if with_include {
                self.include()
                    .into_iter()
                    .map(|(name, include)| (name, include.to_options(true)))
                    .collect()
            } else {
                BTreeMap::new()
            },
        }
    }

    fn names(&self, option: &str) -> Vec<String> {
        self.config
            .get(option)
            .and_then(Value::as_list)
            .map(|items| items.iter().map(Value::to_key).collect())
            .unwrap_or_default()
    }
}
