//! # Restful
//!
//! This crate turns domain objects into resource documents for web services:
//! a nested key/value document holding the object's attributes, a display
//! name, a canonical `href`, and one `<label>_href` per exposed association.
//!
//! ```text
//! {
//!   "bar": { "id": 1, "name": "The bar1", "foo_id": 7 },
//!   "name": "The bar1",
//!   "href": "http://test.org/bars/1",
//!   "dingos_href": "http://test.org/bars/1/dingos",
//!   "special_href": "http://test.org/foos/7"
//! }
//! ```
//!
//! What goes into a document is configuration, organized per named *web
//! service* and per resource type, cascading from base types to subtypes.
//!
//! ## Architecture Overview
//!
//! 1. **Configuration** ([`configuration`]) - schema-checked option trees:
//!    [`WebService`] → [`Resource`] → [`Serialization`]
//! 2. **Collaborators** ([`model`], [`url`]) - what the host application
//!    provides: attribute introspection and relation reflection
//!    ([`Resourceful`]) plus route helpers ([`UrlHelpers`])
//! 3. **Serialization** ([`serializer`]) - resolves the effective configuration
//!    for one subject and assembles the document
//! 4. **Registry** ([`registry`]) - owns web services, default url options and
//!    routes; the entry point for every call
//!
//! ## Quick Start
//!
//! ```rust
//! use restful::mock::Record;
//! use restful::{Registry, Restful, RouteSet};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! // 1. Startup: routes, url options, web services
//! let routes = RouteSet::new()
//!     .route("foo", "/foos/:id")
//!     .route("bars", "/bars");
//! let registry = Registry::new(Arc::new(routes));
//! registry.set_default_url_options(json!({ "host": "test.org" }))?;
//! registry.register_web_service_with("api", json!({}), |api| {
//!     api.register_resource("foo", json!({ "associations": "bars" }), |_| Ok(()))?;
//!     Ok(())
//! })?;
//!
//! // 2. Per call: serialize a record
//! let foo = Record::new("Foo")
//!     .attribute("id", 7)
//!     .attribute("name", "A foo")
//!     .has_many("bars", vec![]);
//!
//! assert_eq!(
//!     foo.restful(&registry).serialize()?,
//!     json!({
//!         "foo": { "id": 7, "name": "A foo" },
//!         "name": "A foo",
//!         "href": "http://test.org/foos/7",
//!         "bars_href": "http://test.org/bars",
//!     })
//! );
//! # Ok::<(), restful::Error>(())
//! ```
//!
//! ## Configuration Cascade
//!
//! For every record the effective [`Resource`] configuration is built in four
//! steps, each one layered over the previous:
//!
//! 1. the base type's configuration (skipped with `no_inherited_options`)
//! 2. the record type's own configuration
//! 3. the options passed with the call
//! 4. the configure callback passed with the call, which edits the result
//!    directly
//!
//! Merging only lets explicitly set or non-default, non-empty fields through,
//! so an option a subtype never mentions never hides the inherited value.
//!
//! ## Arrays
//!
//! Slices serialize element by element. Elements are *shallow* unless the call
//! says otherwise: no nested `include`s and no association hrefs.
//!
//! ## Errors
//!
//! Configuration mistakes (unknown options, values of the wrong shape, unknown
//! web service names) fail immediately with [`Error`]. A route that does not
//! exist is not a mistake: the href is `null` and the document is still
//! produced.
//!
//! ## Testing
//!
//! [`mock::Record`] is an in-memory [`Resourceful`] with attributes, computed
//! methods and relations, and [`RouteSet`] an in-memory route table. Together
//! they exercise the whole pipeline without a database or a web framework.

pub mod configuration;
pub mod error;
pub mod mock;
pub mod model;
pub mod registry;
pub mod serializer;
pub mod subject;
pub mod tracing;
pub mod url;

// Re-export core types for convenience
pub use configuration::{Resource, Serialization, Shape, WebService};
pub use error::{Error, Result};
pub use model::{Document, ResourceKey, Resourceful, SerializationOptions};
pub use registry::Registry;
pub use serializer::{Restful, Serializer, SerializerBuilder};
pub use subject::Subject;
pub use url::{RouteSet, UrlHelpers};
