use restful::model::{Document, Reflection, RelationKind, Resourceful, SerializationOptions};
use restful::Result;
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::{field, project};

/// A reader's review of a book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub id: u32,
    pub book_id: u32,
    pub rating: u8,
    pub body: String,
}

impl Review {
    pub fn new(id: u32, book_id: u32, rating: u8, body: impl Into<String>) -> Self {
        Self {
            id,
            book_id,
            rating,
            body: body.into(),
        }
    }
}

impl Resourceful for Review {
    fn call(&self, method: &str) -> Option<JsonValue> {
        match method {
            "stars" => Some("*".repeat(usize::from(self.rating)).into()),
            _ => field(self, method),
        }
    }

    // The reviewed book is only ever linked, never nested.
    fn serializable_record(&self, options: &SerializationOptions) -> Result<Document> {
        project(self, options, |_, _| None)
    }

    fn reflect_on_association(&self, name: &str) -> Option<Reflection> {
        (name == "book").then(|| Reflection {
            kind: RelationKind::BelongsTo,
            related_id: Some(self.book_id.into()),
        })
    }
}
