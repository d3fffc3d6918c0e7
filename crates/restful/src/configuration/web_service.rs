//! # Web Service Configuration
//!
//! A [`WebService`] groups the per-type [`Resource`] configurations of one API
//! together with API-wide settings: the route prefix and the url options
//! (`host`, `protocol`, `port`) handed to the route helpers.

use super::resource::{Resource, RESOURCE};
use super::shape::{config_shape, nested, with_nested, Shape};
use super::value::{Map, Value};
use crate::error::Result;
use crate::model::ResourceKey;
use crate::url::UrlOptions;

config_shape! {
    /// Named grouping of resource configurations.
    pub struct WebService => WEB_SERVICE("web_service") {
        name: plain,
        /// Segment prepended to every derived route helper name.
        api_prefix: plain,
        default_url_options: map,
        /// Resource key to resource configuration.
        resources: keyed_map_of(&RESOURCE, resource_key),
    }
}

fn resource_key(name: &str) -> String {
    ResourceKey::named(name).into_string()
}

impl WebService {
    /// Builds a web service from `options` with `name` merged over them, then
    /// yields it to `configure`.
    pub fn register<F>(name: &str, options: impl Into<Value>, configure: F) -> Result<Self>
    where
        F: FnOnce(&mut WebService) -> Result<()>,
    {
        let options = match options.into() {
            Value::Nil => Value::Map(Map::from([("name".to_string(), name.into())])),
            Value::Map(mut map) => {
                map.insert("name".to_string(), name.into());
                Value::Map(map)
            }
            other => other,
        };
        <Self as Shape>::register(options, configure)
    }

    /// A web service with only its name set.
    pub fn named(name: &str) -> Self {
        let mut web_service = Self::default();
        if let Some(slot) = web_service.config.get_mut("name") {
            *slot = name.into();
        }
        web_service
    }

    pub fn name(&self) -> Option<&str> {
        self.config.get("name").and_then(Value::as_str)
    }

    pub fn api_prefix(&self) -> Option<&str> {
        self.config.get("api_prefix").and_then(Value::as_str)
    }

    pub fn default_url_options(&self) -> UrlOptions {
        match self.config.get("default_url_options").map(Value::to_json) {
            Some(serde_json::Value::Object(options)) => options,
            _ => UrlOptions::new(),
        }
    }

    /// Adopts `defaults` as the url options when none are configured.
    /// Returns whether anything was written.
    pub fn inherit_default_url_options(&mut self, defaults: &UrlOptions) -> bool {
        if defaults.is_empty() || !self.default_url_options().is_empty() {
            return false;
        }
        let Some(options) = self.config.map_mut("default_url_options") else {
            return false;
        };
        options.extend(defaults.iter().map(|(key, value)| (key.clone(), Value::from(value.clone()))));
        true
    }

    /// Keys of the registered resources, in order.
    pub fn resource_keys(&self) -> Vec<String> {
        self.config
            .get("resources")
            .and_then(Value::as_map)
            .map(|resources| resources.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Registers a resource configuration under `name`, replacing any present.
    pub fn register_resource<F>(&mut self, name: &str, options: impl Into<Value>, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Resource) -> Result<()>,
    {
        let resource = Resource::register(options, configure)?;
        let key = ResourceKey::named(name);
        if let Some(resources) = self.config.map_mut("resources") {
            resources.insert(key.into_string(), resource.into());
        }
        Ok(self)
    }

    /// Edits a registered resource in place. Returns `false` if none is
    /// registered under `name`.
    pub fn configure_resource<F>(&mut self, name: &str, configure: F) -> Result<bool>
    where
        F: FnOnce(&mut Resource) -> Result<()>,
    {
        let key = ResourceKey::named(name);
        let slot = self
            .config
            .map_mut("resources")
            .and_then(|resources| resources.get_mut(key.as_str()));
        with_nested(slot, configure)
    }

    /// A deep copy of the resource configuration registered for `key`.
    ///
    /// `key` may be a resource name, a type (`ResourceKey::of::<Foo>()`) or a
    /// record (`ResourceKey::of_record(&foo)`).
    pub fn resource_configuration_for(&self, key: impl Into<ResourceKey>) -> Option<Resource> {
        let key = key.into();
        let resources = self.config.get("resources").and_then(Value::as_map)?;
        nested::<Resource>(resources.get(key.as_str())).map(|resource| resource.deep_clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::mock::Record;
    use serde_json::json;

    struct Foo;

    #[test]
    fn register_merges_the_name_over_options() {
        let web_service = WebService::register(
            "api",
            json!({ "name": "ignored", "api_prefix": "prefix" }),
            |_| Ok(()),
        )
        .unwrap();
        assert_eq!(web_service.name(), Some("api"));
        assert_eq!(web_service.api_prefix(), Some("prefix"));
        assert!(web_service.resource_keys().is_empty());
        assert!(web_service.default_url_options().is_empty());
    }

    #[test]
    fn register_yields_the_instance() {
        let web_service = WebService::register("api", Value::Nil, |web_service| {
            web_service.set_default_url_options(json!({ "host": "test.org" }))?;
            web_service.register_resource("foo", json!({ "associations": "bars" }), |_| Ok(()))?;
            Ok(())
        })
        .unwrap();
        assert_eq!(web_service.default_url_options()["host"], json!("test.org"));
        assert_eq!(web_service.resource_keys(), vec!["foo"]);
    }

    #[test]
    fn builds_resources_from_declarative_options() {
        let web_service = WebService::register(
            "api",
            json!({
                "resources": {
                    "foo": { "associations": "bars" },
                    "bar": { "associations": { "special": "foo", "dingos": null } },
                },
            }),
            |_| Ok(()),
        )
        .unwrap();
        assert_eq!(web_service.resource_keys(), vec!["bar", "foo"]);
        let bar = web_service.resource_configuration_for("bar").unwrap();
        assert_eq!(
            bar.associations(),
            vec![
                ("dingos".to_string(), "dingos".to_string()),
                ("special".to_string(), "foo".to_string()),
            ]
        );
    }

    #[test]
    fn declarative_resource_keys_are_normalized() {
        struct LineItem;

        let web_service = WebService::register(
            "api",
            json!({ "resources": { "LineItem": { "shallow": true } } }),
            |_| Ok(()),
        )
        .unwrap();
        assert_eq!(web_service.resource_keys(), vec!["line_item"]);
        for key in [
            ResourceKey::from("LineItem"),
            ResourceKey::from("line_item"),
            ResourceKey::of::<LineItem>(),
            ResourceKey::of_record(&Record::new("LineItem")),
        ] {
            assert!(web_service.resource_configuration_for(key).unwrap().shallow());
        }
    }

    #[test]
    fn looks_up_by_name_type_or_record() {
        let mut web_service = WebService::named("api");
        web_service
            .register_resource("foo", json!({ "url_for": "custom_foo" }), |_| Ok(()))
            .unwrap();
        let record = Record::new("Foo");

        let by_name = web_service.resource_configuration_for("foo").unwrap();
        let by_type = web_service.resource_configuration_for(ResourceKey::of::<Foo>()).unwrap();
        let by_record = web_service.resource_configuration_for(ResourceKey::of_record(&record)).unwrap();
        assert_eq!(by_name, by_type);
        assert_eq!(by_name, by_record);
        assert_eq!(by_name.url_for(), Some("custom_foo"));
        assert!(web_service.resource_configuration_for("bar").is_none());
    }

    #[test]
    fn lookups_return_independent_copies() {
        let mut web_service = WebService::named("api");
        web_service.register_resource("foo", Value::Nil, |_| Ok(())).unwrap();

        let mut copy = web_service.resource_configuration_for("foo").unwrap();
        copy.set_shallow(true).unwrap();
        assert!(!web_service.resource_configuration_for("foo").unwrap().shallow());
    }

    #[test]
    fn configure_resource_mutates_in_place() {
        let mut web_service = WebService::named("api");
        web_service.register_resource("foo", Value::Nil, |_| Ok(())).unwrap();
        let found = web_service
            .configure_resource("foo", |foo| {
                foo.add_association("bars", None);
                Ok(())
            })
            .unwrap();
        assert!(found);
        assert_eq!(
            web_service.resource_configuration_for("foo").unwrap().associations(),
            vec![("bars".to_string(), "bars".to_string())]
        );
        assert!(!web_service.configure_resource("missing", |_| Ok(())).unwrap());
    }

    #[test]
    fn inherits_url_options_only_when_unset() {
        let defaults = match json!({ "host": "default.org", "protocol": "https" }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let mut bare = WebService::named("api");
        assert!(bare.inherit_default_url_options(&defaults));
        assert_eq!(bare.default_url_options(), defaults);

        let mut configured = WebService::named("api");
        configured.set_default_url_options(json!({ "host": "own.org" })).unwrap();
        assert!(!configured.inherit_default_url_options(&defaults));
        assert_eq!(configured.default_url_options()["host"], json!("own.org"));
    }

    #[test]
    fn unknown_resource_options_are_rejected() {
        let mut web_service = WebService::named("api");
        let result = web_service.register_resource("foo", json!({ "bogus": 1 }), |_| Ok(()));
        assert!(matches!(result, Err(Error::UnknownOption { shape: "resource", .. })));
        assert!(web_service.resource_keys().is_empty());
    }
}
