//! # Configuration Model
//!
//! Serialization behaviour is driven by a tree of configuration nodes:
//!
//! ```text
//! WebService
//! ├── name, api_prefix, default_url_options
//! └── resources: { resource key => Resource }
//!                                  ├── name_method, url_for, shallow, no_inherited_options
//!                                  ├── associations: { label => association name }
//!                                  └── serialization: Serialization
//!                                                     ├── only, except, methods
//!                                                     └── include: { relation => Serialization }
//! ```
//!
//! ## Layers
//!
//! 1. **Schema** ([`Schema`], [`OptionSpec`]): static, declarative option tables.
//!    Each option has a kind (plain, list, map, nested node) and a default.
//! 2. **Node** ([`Config`]): the generic, schema-checked value holder. It owns the
//!    reset / set / merge / projection semantics once for every shape.
//! 3. **Shapes** ([`WebService`], [`Resource`], [`Serialization`]): typed
//!    wrappers declared with the `config_shape!` macro, adding typed getters and
//!    `set_<option>` mutators on top of a node.
//!
//! ## Declarative and programmatic setup
//!
//! Every shape can be built from a plain option map (typically a
//! `serde_json::json!` literal) and then refined through a callback:
//!
//! ```rust
//! use restful::configuration::{Resource, Shape};
//! use serde_json::json;
//!
//! let resource = Resource::register(json!({ "associations": ["bars"] }), |resource| {
//!     resource.set_url_for("custom_foo")?;
//!     resource.configure_serialization(|serialization| {
//!         serialization.set_except("secret")?;
//!         Ok(())
//!     })?;
//!     Ok(())
//! })?;
//!
//! assert_eq!(resource.url_for(), Some("custom_foo"));
//! assert_eq!(resource.serialization().except(), vec!["secret"]);
//! # Ok::<(), restful::Error>(())
//! ```
//!
//! ## Inheritance
//!
//! A subtype's resource configuration is merged onto its base type's with
//! [`Shape::deep_merge`]: only fields that were explicitly set, or differ from
//! their default and are not empty, take part. An unset subtype field never
//! clobbers an inherited one, lists concatenate and nested maps merge.

mod shape;

mod config;
mod merge;
mod option;
mod resource;
mod serialization;
mod value;
mod web_service;

pub use config::{Config, HashOptions};
pub use merge::deep_merge;
pub use option::{DefaultValue, OptionKind, OptionSpec, Schema};
pub use resource::{Resource, RESOURCE};
pub use serialization::{Serialization, SERIALIZATION};
pub use shape::Shape;
pub use value::{Map, Value};
pub use web_service::{WebService, WEB_SERVICE};
