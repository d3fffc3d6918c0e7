//! What a serializer describes.
//!
//! A [`Subject`] is resolved once, when the serializer is built, into one of
//! three kinds. Serialization then dispatches on the kind in a fixed order:
//! domain records first, then lists (element by element), then the plain
//! structural fallback.

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::model::Resourceful;

#[derive(Clone)]
pub enum Subject<'a> {
    /// A domain record: configuration applies.
    Record(&'a dyn Resourceful),
    /// A list; each element becomes its own subject.
    List(Vec<Subject<'a>>),
    /// Anything else, captured as its JSON representation.
    Plain(JsonValue),
}

impl<'a> Subject<'a> {
    pub fn record(record: &'a dyn Resourceful) -> Self {
        Subject::Record(record)
    }

    pub fn list<T: Resourceful>(records: &'a [T]) -> Self {
        Subject::List(
            records
                .iter()
                .map(|record| Subject::Record(record as &dyn Resourceful))
                .collect(),
        )
    }

    /// Captures a non-domain value through its `Serialize` impl.
    pub fn plain<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Subject::Plain(serde_json::to_value(value)?))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Subject::Record(_) => "record",
            Subject::List(_) => "list",
            Subject::Plain(_) => "plain",
        }
    }
}

impl<'a, T: Resourceful> From<&'a T> for Subject<'a> {
    fn from(record: &'a T) -> Self {
        Subject::Record(record)
    }
}

impl<'a, T: Resourceful> From<&'a [T]> for Subject<'a> {
    fn from(records: &'a [T]) -> Self {
        Subject::list(records)
    }
}

impl<'a> From<&'a dyn Resourceful> for Subject<'a> {
    fn from(record: &'a dyn Resourceful) -> Self {
        Subject::Record(record)
    }
}

impl<'a> From<Vec<Subject<'a>>> for Subject<'a> {
    fn from(items: Vec<Subject<'a>>) -> Self {
        Subject::List(items)
    }
}

impl From<JsonValue> for Subject<'_> {
    fn from(value: JsonValue) -> Self {
        Subject::Plain(value)
    }
}

impl std::fmt::Debug for Subject<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subject::Record(record) => f.debug_tuple("Record").field(&record.type_name()).finish(),
            Subject::List(items) => f.debug_tuple("List").field(items).finish(),
            Subject::Plain(value) => f.debug_tuple("Plain").field(value).finish(),
        }
    }
}
