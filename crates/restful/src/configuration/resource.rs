//! # Resource Configuration
//!
//! How one model type is presented: which method yields its display name,
//! how its href is computed, which associations get `<label>_href` fields and
//! which attributes are serialized.
//!
//! ## Associations
//!
//! The `associations` option maps an output *label* to the association name on
//! the model. A `nil` name means "same as the label", so a plain list such as
//! `["bars", "dingos"]` declares two associations named after themselves, while
//! `{"special": "foo"}` emits `special_href` for the model's `foo` association.
//! Associations are emitted in label order.

use super::serialization::{Serialization, SERIALIZATION};
use super::shape::{config_shape, nested, with_nested};
use super::value::Value;
use super::DefaultValue;
use crate::error::Result;

config_shape! {
    /// Presentation rules for one resource type.
    pub struct Resource => RESOURCE("resource") {
        /// Method used for the `name` field. Defaults to `"name"`.
        name_method: with_default(DefaultValue::Str("name")),
        /// Route helper that replaces the derived href helper.
        url_for: plain,
        /// Label to association name; see the module docs.
        associations: map,
        serialization: config(&SERIALIZATION),
        /// Resolve from this configuration alone, ignoring the base type's.
        no_inherited_options: with_default(DefaultValue::Bool(false)),
        /// Drop nested includes and association hrefs from the document.
        shallow: with_default(DefaultValue::Bool(false)),
    }
}

impl Resource {
    pub fn name_method(&self) -> Option<&str> {
        self.config.get("name_method").and_then(Value::as_str)
    }

    pub fn url_for(&self) -> Option<&str> {
        self.config.get("url_for").and_then(Value::as_str)
    }

    /// `(label, association name)` pairs, in label order.
    pub fn associations(&self) -> Vec<(String, String)> {
        self.config
            .get("associations")
            .and_then(Value::as_map)
            .map(|map| {
                map.iter()
                    .map(|(label, name)| {
                        let name = if name.is_nil() { label.clone() } else { name.to_key() };
                        (label.clone(), name)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Adds one association. `name` defaults to the label.
    pub fn add_association(&mut self, label: &str, name: Option<&str>) -> &mut Self {
        if let Some(map) = self.config.map_mut("associations") {
            map.insert(label.to_string(), name.into());
        }
        self
    }

    /// A copy of the serialization rules.
    pub fn serialization(&self) -> Serialization {
        nested(self.config.get("serialization")).unwrap_or_default()
    }

    /// Edits the serialization rules in place.
    pub fn configure_serialization<F>(&mut self, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Serialization) -> Result<()>,
    {
        with_nested(self.config.get_mut("serialization"), configure)?;
        Ok(self)
    }

    pub fn no_inherited_options(&self) -> bool {
        self.flag("no_inherited_options")
    }

    pub fn shallow(&self) -> bool {
        self.flag("shallow")
    }

    fn flag(&self, option: &str) -> bool {
        self.config
            .get(option)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::{HashOptions, Shape};
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn defaults() {
        let resource = Resource::default();
        assert_eq!(resource.name_method(), Some("name"));
        assert_eq!(resource.url_for(), None);
        assert!(resource.associations().is_empty());
        assert!(!resource.shallow());
        assert!(!resource.no_inherited_options());
        assert_eq!(resource.serialization(), Serialization::default());
    }

    #[test]
    fn normalizes_association_lists() {
        let resource = Resource::from_options(json!({ "associations": ["foo", "dingos"] })).unwrap();
        assert_eq!(
            resource.associations(),
            vec![
                ("dingos".to_string(), "dingos".to_string()),
                ("foo".to_string(), "foo".to_string()),
            ]
        );

        let resource = Resource::from_options(json!({ "associations": "bars" })).unwrap();
        assert_eq!(resource.associations(), vec![("bars".to_string(), "bars".to_string())]);
    }

    #[test]
    fn keeps_renamed_associations() {
        let mut resource = Resource::from_options(json!({ "associations": { "special": "foo" } })).unwrap();
        resource.add_association("bars", None);
        assert_eq!(
            resource.associations(),
            vec![
                ("bars".to_string(), "bars".to_string()),
                ("special".to_string(), "foo".to_string()),
            ]
        );
    }

    #[test]
    fn builds_serialization_from_a_map() {
        let resource = Resource::from_options(json!({
            "serialization": { "except": "id", "methods": "a_method" },
        }))
        .unwrap();
        let serialization = resource.serialization();
        assert_eq!(serialization.except(), vec!["id"]);
        assert_eq!(serialization.methods(), vec!["a_method"]);
        assert!(serialization.only().is_empty());
    }

    #[test]
    fn register_yields_the_instance() {
        let resource = Resource::register(json!({ "url_for": "custom_url" }), |resource| {
            resource.set_shallow(true)?;
            resource.configure_serialization(|serialization| {
                serialization.set_only(vec!["name"])?;
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();
        assert_eq!(resource.url_for(), Some("custom_url"));
        assert!(resource.shallow());
        assert_eq!(resource.serialization().only(), vec!["name"]);
    }

    #[test]
    fn failing_callback_fails_registration() {
        let result = Resource::register(json!({}), |resource| {
            resource.set(json!({ "bogus": 1 }))?;
            Ok(())
        });
        assert!(matches!(result, Err(Error::UnknownOption { shape: "resource", .. })));
    }

    #[test]
    fn merges_base_and_subtype_rules() {
        let base = Resource::from_options(json!({
            "associations": ["bars"],
            "serialization": { "except": ["secret"] },
        }))
        .unwrap();
        let subtype = Resource::from_options(json!({
            "associations": { "special": "foo" },
            "serialization": { "except": ["token"] },
        }))
        .unwrap();
        let merged = base.deep_merge(&subtype).unwrap();
        assert_eq!(
            merged.associations(),
            vec![
                ("bars".to_string(), "bars".to_string()),
                ("special".to_string(), "foo".to_string()),
            ]
        );
        assert_eq!(merged.serialization().except(), vec!["secret", "token"]);
        assert_eq!(merged.name_method(), Some("name"));
    }

    #[test]
    fn explicit_defaults_survive_merging() {
        let base = Resource::from_options(json!({ "shallow": true })).unwrap();
        let subtype = Resource::from_options(json!({ "shallow": false })).unwrap();
        assert!(!base.deep_merge(&subtype).unwrap().shallow());
        assert!(base.deep_merge(&Resource::default()).unwrap().shallow());
    }

    #[test]
    fn compact_projection() {
        let resource = Resource::from_options(json!({ "url_for": "custom" })).unwrap();
        assert_eq!(
            Value::Map(resource.to_hash(HashOptions::COMPACT)).to_json(),
            json!({ "url_for": "custom" })
        );
    }
}
