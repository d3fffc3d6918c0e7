//! # Bookstore Model
//!
//! Plain domain structs ([`Author`], [`Book`], [`Ebook`], [`Review`]) exposed
//! to the serializer through [`Resourceful`].
//!
//! Stored attributes come from each type's `Serialize` impl; relations are
//! `#[serde(skip)]` fields, reflected and included by hand. [`Ebook`] is a
//! subtype of [`Book`]: it reports `Book` as its base type, so it picks up the
//! `book` configuration and the `book` route unless configured otherwise.

mod author;
mod book;
mod review;

pub use author::Author;
pub use book::{Book, Ebook};
pub use review::Review;

use restful::model::{Document, Resourceful, SerializationOptions};
use restful::{Error, Result};
use serde::Serialize;
use serde_json::Value as JsonValue;

/// The stored attributes of `record`, in declaration order.
fn fields_of<R: Resourceful + Serialize>(record: &R) -> Result<Document> {
    match serde_json::to_value(record) {
        Ok(JsonValue::Object(fields)) => Ok(fields),
        Ok(other) => Err(Error::introspection(
            record.type_name(),
            format!("expected an object, serialized to {other}"),
        )),
        Err(err) => Err(Error::introspection(record.type_name(), err.to_string())),
    }
}

/// Looks up a stored attribute by name.
fn field<R: Resourceful + Serialize>(record: &R, name: &str) -> Option<JsonValue> {
    fields_of(record).ok()?.remove(name)
}

/// Projects the serde fields of `record` through `options`, nesting
/// relations with `nest`.
fn project<R, N>(record: &R, options: &SerializationOptions, nest: N) -> Result<Document>
where
    R: Resourceful + Serialize,
    N: Fn(&str, &SerializationOptions) -> Option<Result<JsonValue>>,
{
    options.project(record, fields_of(record)?, nest)
}
