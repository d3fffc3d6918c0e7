//! # Domain Model Contract
//!
//! The serializer never inspects storage. Everything it needs from a domain
//! object goes through the [`Resourceful`] trait, which bundles two
//! collaborator capabilities:
//!
//! - **Attribute introspection**: [`Resourceful::serializable_record`] turns
//!   the record into an attribute map, honouring `only`, `except`, `methods`
//!   and nested `include` rules ([`SerializationOptions`]).
//! - **Relation reflection**: [`Resourceful::reflect_on_association`] reports
//!   whether a relation is singular (belongs-to / has-one) or a collection, and
//!   the related record's id for singular ones.
//!
//! ## Resource keys
//!
//! Configuration is looked up by *resource key*: the runtime type name,
//! stripped of its module path and generic arguments, then underscored.
//! `my_app::model::LineItem` becomes `line_item`. [`ResourceKey`] performs the
//! normalization for names, types and records alike.
//!
//! ```rust
//! use restful::model::ResourceKey;
//!
//! struct LineItem;
//!
//! assert_eq!(ResourceKey::of::<LineItem>().as_str(), "line_item");
//! assert_eq!(ResourceKey::named("LineItem").as_str(), "line_item");
//! assert_eq!(ResourceKey::from("line_item").as_str(), "line_item");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};

/// Attribute map produced for one record.
pub type Document = serde_json::Map<String, JsonValue>;

/// Options handed to [`Resourceful::serializable_record`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SerializationOptions {
    /// Attributes to keep. Takes precedence over `except` when non-empty.
    pub only: Vec<String>,
    pub except: Vec<String>,
    /// Computed values appended after the attributes.
    pub methods: Vec<String>,
    /// Related records to nest, each with its own options.
    pub include: BTreeMap<String, SerializationOptions>,
}

impl SerializationOptions {
    /// Whether `only`/`except` keep the attribute `name`.
    pub fn keeps(&self, name: &str) -> bool {
        let listed = |names: &[String]| names.iter().any(|listed| listed == name);
        if self.only.is_empty() {
            !listed(&self.except)
        } else {
            listed(&self.only)
        }
    }

    /// Builds the attribute map of `record` from its stored `attributes`.
    ///
    /// Attributes are filtered through [`SerializationOptions::keeps`] in the
    /// order given. Each of `methods` is then called on the record, and each
    /// `include` entry is handed to `nest` with its own options. A method the
    /// record does not answer, or a relation `nest` returns `None` for, fails
    /// with [`Error::Introspection`].
    pub fn project<R, A, N>(&self, record: &R, attributes: A, nest: N) -> Result<Document>
    where
        R: Resourceful + ?Sized,
        A: IntoIterator<Item = (String, JsonValue)>,
        N: Fn(&str, &SerializationOptions) -> Option<Result<JsonValue>>,
    {
        let mut document: Document = attributes.into_iter().filter(|(name, _)| self.keeps(name)).collect();
        for method in &self.methods {
            let value = record
                .call(method)
                .ok_or_else(|| Error::introspection(record.type_name(), format!("undefined method `{method}`")))?;
            document.insert(method.clone(), value);
        }
        for (name, options) in &self.include {
            let value = nest(name, options)
                .ok_or_else(|| Error::introspection(record.type_name(), format!("no relation named `{name}`")))??;
            document.insert(name.clone(), value);
        }
        Ok(document)
    }
}

/// Nests a collection relation: one attribute map per record.
pub fn nest_many<R: Resourceful>(records: &[R], options: &SerializationOptions) -> Result<JsonValue> {
    records
        .iter()
        .map(|record| record.serializable_record(options).map(JsonValue::Object))
        .collect::<Result<Vec<_>>>()
        .map(JsonValue::Array)
}

/// Nests a singular relation, `null` when it is empty.
pub fn nest_one<R: Resourceful + ?Sized>(record: Option<&R>, options: &SerializationOptions) -> Result<JsonValue> {
    match record {
        Some(record) => record.serializable_record(options).map(JsonValue::Object),
        None => Ok(JsonValue::Null),
    }
}

/// Cardinality of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RelationKind {
    BelongsTo,
    HasOne,
    HasMany,
}

impl RelationKind {
    /// True for belongs-to and has-one relations.
    pub fn is_singular(self) -> bool {
        matches!(self, RelationKind::BelongsTo | RelationKind::HasOne)
    }
}

/// Relation metadata for one association of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Reflection {
    pub kind: RelationKind,
    /// Id of the related record, for singular relations that have one.
    pub related_id: Option<JsonValue>,
}

/// A domain object the serializer can describe.
pub trait Resourceful {
    /// Runtime type name. Only the last path segment matters.
    fn type_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Type name of the hierarchy root, for types that inherit configuration.
    fn base_type_name(&self) -> Option<&str> {
        None
    }

    /// Value of the attribute or computed method `method`, or `None` if the
    /// record does not respond to it.
    fn call(&self, method: &str) -> Option<JsonValue>;

    /// The record's id, if it has one.
    fn id(&self) -> Option<JsonValue> {
        self.call("id").filter(|id| !id.is_null())
    }

    /// The attribute map for `options`.
    fn serializable_record(&self, options: &SerializationOptions) -> Result<Document>;

    /// Metadata for the relation `name`, or `None` if the type declares no
    /// such relation.
    fn reflect_on_association(&self, _name: &str) -> Option<Reflection> {
        None
    }
}

/// Normalized key of a resource type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceKey(String);

impl ResourceKey {
    /// Normalizes a type or resource name: `my::LineItem` → `line_item`.
    pub fn named(name: &str) -> Self {
        Self(underscore(demodulize(name)))
    }

    pub fn of<T: ?Sized>() -> Self {
        Self::named(std::any::type_name::<T>())
    }

    pub fn of_record(record: &(impl Resourceful + ?Sized)) -> Self {
        Self::named(record.type_name())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceKey {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for ResourceKey {
    fn from(name: String) -> Self {
        Self::named(&name)
    }
}

impl From<&dyn Resourceful> for ResourceKey {
    fn from(record: &dyn Resourceful) -> Self {
        Self::of_record(record)
    }
}

/// The key of `record`'s type and of its hierarchy root.
///
/// The base key equals the resource key for types without a base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceKeys {
    pub resource: ResourceKey,
    pub base: ResourceKey,
}

impl ResourceKeys {
    pub fn of(record: &(impl Resourceful + ?Sized)) -> Self {
        let resource = ResourceKey::of_record(record);
        let base = record
            .base_type_name()
            .map(ResourceKey::named)
            .unwrap_or_else(|| resource.clone());
        Self { resource, base }
    }

    pub fn is_base(&self) -> bool {
        self.resource == self.base
    }
}

// `a::b::Foo<c::Bar>` → `Foo`
fn demodulize(name: &str) -> &str {
    let name = name.split('<').next().unwrap_or(name);
    name.rsplit("::").next().unwrap_or(name)
}

// `LineItem` → `line_item`, `HTTPServer` → `http_server`
fn underscore(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                out.push('_');
            }
        }
        if c == '-' {
            out.push('_');
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}
