//! # Serializer
//!
//! A [`Serializer`] turns one [`Subject`] into a document. It is built once per
//! call, resolves its effective [`Resource`] configuration up front and is then
//! immutable.
//!
//! ## Configuration resolution
//!
//! For a record whose resource key is `sub` and whose base key is `thing`:
//!
//! 1. `class` = the web service's `sub` configuration (defaults if absent).
//! 2. If `sub` has no base, or `class.no_inherited_options` is set, the
//!    effective configuration is `class` alone. Otherwise it is the `thing`
//!    configuration deep-merged with `class`.
//! 3. The call-time options are deep-merged on top.
//! 4. The configure callback, if any, edits the result directly. Assignments
//!    made there win unconditionally.
//!
//! ## Documents
//!
//! ```text
//! {
//!   "<resource key>": { ...attributes from the model... },
//!   "name": "...",              // omitted when the name method yields nothing
//!   "href": "http://...",       // null when no route matches
//!   "<label>_href": "http://..." // one per association, unless shallow
//! }
//! ```
//!
//! A shallow document drops the `include` rules and the association hrefs.
//! Lists serialize element by element, each element shallow unless the
//! call-time options say otherwise.
//!
//! ## Href resolution
//!
//! The first route found wins, in this order:
//!
//! 1. the `url_for` override helper, called with the record's id;
//! 2. the member helper of the resource key (`foo`, or `api_foo` with a prefix);
//! 3. the member helper of the base key, for subtypes.

mod association;
mod builder;

pub use association::Association;
pub use builder::{Restful, SerializerBuilder};

use std::rc::Rc;
use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::configuration::{HashOptions, Map, Resource, Shape, Value, WebService, RESOURCE};
use crate::error::Result;
use crate::model::{Document, ResourceKeys, Resourceful};
use crate::subject::Subject;
use crate::url::{UrlHelpers, UrlResolver};

/// Callback applied to the effective resource configuration of every record
/// serialized by one call.
pub type Configure<'a> = Rc<dyn Fn(&mut Resource) -> Result<()> + 'a>;

enum Target<'a> {
    Record {
        record: &'a dyn Resourceful,
        keys: ResourceKeys,
        resource: Resource,
    },
    List {
        items: Vec<Subject<'a>>,
        options: Value,
        configure: Option<Configure<'a>>,
    },
    Plain(JsonValue),
}

/// Produces the document for one subject.
pub struct Serializer<'a> {
    web_service: WebService,
    helpers: Arc<dyn UrlHelpers>,
    resolver: UrlResolver,
    target: Target<'a>,
}

impl<'a> Serializer<'a> {
    /// Builds a serializer and, for records, resolves the effective
    /// configuration. Fails if `options` (or the callback) sets an unknown
    /// resource option.
    pub fn new(
        subject: Subject<'a>,
        web_service: WebService,
        helpers: Arc<dyn UrlHelpers>,
        options: impl Into<Value>,
        configure: Option<Configure<'a>>,
    ) -> Result<Self> {
        let options = options.into();
        let target = match subject {
            Subject::Record(record) => {
                let keys = ResourceKeys::of(record);
                let resource = resolve_resource(&web_service, &keys, options, configure.as_deref())?;
                Target::Record {
                    record,
                    keys,
                    resource,
                }
            }
            Subject::List(items) => Target::List {
                items,
                options,
                configure,
            },
            Subject::Plain(value) => Target::Plain(value),
        };
        let resolver = UrlResolver::new(
            helpers.clone(),
            web_service.api_prefix(),
            web_service.default_url_options(),
        );
        Ok(Self {
            web_service,
            helpers,
            resolver,
            target,
        })
    }

    pub fn web_service(&self) -> &WebService {
        &self.web_service
    }

    pub fn resolver(&self) -> &UrlResolver {
        &self.resolver
    }

    /// Resource key of a record subject.
    pub fn resource_key(&self) -> Option<&str> {
        match &self.target {
            Target::Record { keys, .. } => Some(keys.resource.as_str()),
            _ => None,
        }
    }

    /// Base key of a record subject; equal to the resource key for types
    /// without a base.
    pub fn base_key(&self) -> Option<&str> {
        match &self.target {
            Target::Record { keys, .. } => Some(keys.base.as_str()),
            _ => None,
        }
    }

    /// Effective configuration of a record subject.
    pub fn resource(&self) -> Option<&Resource> {
        match &self.target {
            Target::Record { resource, .. } => Some(resource),
            _ => None,
        }
    }

    /// Value of the configured name method, if the record responds to it.
    pub fn name(&self) -> Option<JsonValue> {
        let Target::Record { record, resource, .. } = &self.target else {
            return None;
        };
        let method = resource.name_method()?;
        record.call(method).filter(|name| !name.is_null())
    }

    /// The record's href. `None` when no route matches.
    pub fn href(&self) -> Option<String> {
        let Target::Record {
            record,
            keys,
            resource,
        } = &self.target
        else {
            return None;
        };
        let id: Vec<JsonValue> = record.id().into_iter().collect();
        resource
            .url_for()
            .and_then(|helper| self.resolver.resolve_override(helper, &id))
            .or_else(|| self.resolver.resolve(&[keys.resource.as_str()], &id))
            .or_else(|| {
                if keys.is_base() {
                    None
                } else {
                    self.resolver.resolve(&[keys.base.as_str()], &id)
                }
            })
    }

    /// One association per configured entry, in label order.
    pub fn associations(&self) -> Vec<Association<'_>> {
        let Target::Record {
            record,
            keys,
            resource,
        } = &self.target
        else {
            return Vec::new();
        };
        resource
            .associations()
            .into_iter()
            .map(|(label, name)| Association::new(*record, keys.resource.as_str(), name, label, &self.resolver))
            .collect()
    }

    /// Produces the document: an object for records, an array for lists, the
    /// captured value for anything else.
    pub fn serialize(&self) -> Result<JsonValue> {
        match &self.target {
            Target::Record { .. } => self.serialize_record().map(JsonValue::Object),
            Target::List {
                items,
                options,
                configure,
            } => {
                let options = shallow_by_default(options.clone())?;
                let mut documents = Vec::with_capacity(items.len());
                for item in items {
                    let element = Serializer::new(
                        item.clone(),
                        self.web_service.clone(),
                        self.helpers.clone(),
                        options.clone(),
                        configure.clone(),
                    )?;
                    documents.push(element.serialize()?);
                }
                Ok(JsonValue::Array(documents))
            }
            Target::Plain(value) => Ok(value.clone()),
        }
    }

    fn serialize_record(&self) -> Result<Document> {
        let Target::Record {
            record,
            keys,
            resource,
        } = &self.target
        else {
            return Ok(Document::new());
        };
        let shallow = resource.shallow();
        let options = resource.serialization().to_options(!shallow);
        let attributes = record.serializable_record(&options)?;

        let mut document = Document::new();
        document.insert(keys.resource.to_string(), JsonValue::Object(attributes));
        if let Some(name) = self.name() {
            document.insert("name".to_string(), name);
        }
        document.insert(
            "href".to_string(),
            self.href().map_or(JsonValue::Null, JsonValue::String),
        );
        if !shallow {
            for association in self.associations() {
                let href = association.href().map_or(JsonValue::Null, JsonValue::String);
                document.insert(association.field(), href);
            }
        }
        debug!(resource_key = %keys.resource, shallow, fields = document.len(), "Serialized");
        Ok(document)
    }
}

impl std::fmt::Debug for Serializer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Serializer")
            .field("web_service", &self.web_service.name())
            .field("resource_key", &self.resource_key())
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

fn resolve_resource(
    web_service: &WebService,
    keys: &ResourceKeys,
    options: Value,
    configure: Option<&(dyn Fn(&mut Resource) -> Result<()> + '_)>,
) -> Result<Resource> {
    let class = web_service
        .resource_configuration_for(keys.resource.clone())
        .unwrap_or_default();
    let inherited = if keys.is_base() || class.no_inherited_options() {
        class
    } else {
        let base = web_service
            .resource_configuration_for(keys.base.clone())
            .unwrap_or_default();
        base.deep_merge(&class)?
    };
    let mut resource = inherited.deep_merge(&call_time_resource(options)?)?;
    if let Some(configure) = configure {
        configure(&mut resource)?;
    }
    let configuration = Value::Map(resource.to_hash(HashOptions::COMPACT)).to_json();
    debug!(
        resource_key = %keys.resource,
        base_key = %keys.base,
        configuration = %configuration,
        "Resolved configuration"
    );
    Ok(resource)
}

// Call-time options are either a plain option map or a whole resource node.
fn call_time_resource(options: Value) -> Result<Resource> {
    match options {
        Value::Config(config) if config.schema() == &RESOURCE => Ok(Resource::from_config(config)),
        other => Resource::from_options(other),
    }
}

// List elements are shallow unless the caller says otherwise.
fn shallow_by_default(options: Value) -> Result<Value> {
    match options {
        Value::Nil => Ok(Value::Map(Map::from([("shallow".to_string(), Value::Bool(true))]))),
        Value::Map(mut map) => {
            map.entry("shallow".to_string()).or_insert(Value::Bool(true));
            Ok(Value::Map(map))
        }
        Value::Config(mut config) if config.schema() == &RESOURCE => {
            if !config.is_explicitly_set("shallow") {
                config.assign("shallow", true)?;
            }
            Ok(Value::Config(config))
        }
        other => Ok(other),
    }
}
