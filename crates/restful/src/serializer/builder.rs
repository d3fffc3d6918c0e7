//! Call-site entry points: [`SerializerBuilder`] and the [`Restful`] extension
//! trait.

use std::rc::Rc;

use serde_json::Value as JsonValue;

use super::{Configure, Serializer};
use crate::configuration::{Resource, Value, WebService};
use crate::error::{Error, Result};
use crate::model::Resourceful;
use crate::registry::Registry;
use crate::subject::Subject;

enum WebServiceChoice {
    Named(String),
    Given(WebService),
}

/// Collects the per-call inputs of a serialization.
///
/// Obtained from [`Registry::serializer`] or [`Restful::restful`]:
///
/// ```rust
/// use restful::mock::Record;
/// use restful::{Registry, Restful, RouteSet};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let registry = Registry::new(Arc::new(RouteSet::new().route("foo", "/foos/:id")));
/// registry.set_default_url_options(json!({ "host": "test.org" }))?;
/// registry.register_web_service("api", json!({}))?;
///
/// let foo = Record::new("Foo").attribute("id", 7).attribute("name", "A foo");
/// let document = foo
///     .restful(&registry)
///     .web_service("api")
///     .options(json!({ "serialization": { "only": "name" } }))
///     .serialize()?;
///
/// assert_eq!(
///     document,
///     json!({ "foo": { "name": "A foo" }, "name": "A foo", "href": "http://test.org/foos/7" })
/// );
/// # Ok::<(), restful::Error>(())
/// ```
pub struct SerializerBuilder<'a> {
    registry: &'a Registry,
    subject: Subject<'a>,
    web_service: Option<WebServiceChoice>,
    options: Value,
    configure: Option<Configure<'a>>,
}

impl<'a> SerializerBuilder<'a> {
    pub(crate) fn new(registry: &'a Registry, subject: Subject<'a>) -> Self {
        Self {
            registry,
            subject,
            web_service: None,
            options: Value::Nil,
            configure: None,
        }
    }

    /// Uses the registered web service `name`.
    pub fn web_service(mut self, name: &str) -> Self {
        self.web_service = Some(WebServiceChoice::Named(name.to_string()));
        self
    }

    /// Uses `web_service` as given, bypassing the registry.
    pub fn web_service_config(mut self, web_service: WebService) -> Self {
        self.web_service = Some(WebServiceChoice::Given(web_service));
        self
    }

    /// Resource options for this call, merged over the registered ones.
    pub fn options(mut self, options: impl Into<Value>) -> Self {
        self.options = options.into();
        self
    }

    /// Edits the effective resource configuration after all merging.
    pub fn configure<F>(mut self, configure: F) -> Self
    where
        F: Fn(&mut Resource) -> Result<()> + 'a,
    {
        self.configure = Some(Rc::new(configure));
        self
    }

    /// Resolves the web service and builds the serializer.
    ///
    /// Without an explicit choice, the only registered web service is used; with
    /// none or several registered, an unconfigured one is.
    pub fn build(self) -> Result<Serializer<'a>> {
        let web_service = match self.web_service {
            Some(WebServiceChoice::Named(name)) => self
                .registry
                .web_service_configuration(&name)
                .ok_or(Error::MissingWebService(name))?,
            Some(WebServiceChoice::Given(web_service)) => web_service,
            None => self.registry.implicit_web_service(),
        };
        Serializer::new(
            self.subject,
            web_service,
            self.registry.routes(),
            self.options,
            self.configure,
        )
    }

    pub fn serialize(self) -> Result<JsonValue> {
        self.build()?.serialize()
    }
}

/// Serialization entry point on records and slices of records.
pub trait Restful {
    fn restful<'a>(&'a self, registry: &'a Registry) -> SerializerBuilder<'a>;
}

impl<T: Resourceful> Restful for T {
    fn restful<'a>(&'a self, registry: &'a Registry) -> SerializerBuilder<'a> {
        registry.serializer(self)
    }
}

impl<T: Resourceful> Restful for [T] {
    fn restful<'a>(&'a self, registry: &'a Registry) -> SerializerBuilder<'a> {
        registry.serializer(self)
    }
}
