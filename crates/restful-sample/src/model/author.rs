use restful::model::{nest_many, Document, Reflection, RelationKind, Resourceful, SerializationOptions};
use restful::Result;
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::{field, project, Book};

/// A writer with the books they published.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    pub id: u32,
    pub name: String,
    pub born: Option<u16>,
    #[serde(skip)]
    pub books: Vec<Book>,
}

impl Author {
    pub fn new(id: u32, name: impl Into<String>, born: Option<u16>) -> Self {
        Self {
            id,
            name: name.into(),
            born,
            books: Vec::new(),
        }
    }

    pub fn with_books(mut self, books: Vec<Book>) -> Self {
        self.books = books;
        self
    }

    /// `"Ursula K. Le Guin (1929)"`, or just the name when the year is unknown.
    pub fn display_name(&self) -> String {
        match self.born {
            Some(born) => format!("{} ({born})", self.name),
            None => self.name.clone(),
        }
    }
}

impl Resourceful for Author {
    fn call(&self, method: &str) -> Option<JsonValue> {
        match method {
            "display_name" => Some(self.display_name().into()),
            "book_count" => Some(self.books.len().into()),
            _ => field(self, method),
        }
    }

    fn serializable_record(&self, options: &SerializationOptions) -> Result<Document> {
        project(self, options, |name, nested| match name {
            "books" => Some(nest_many(&self.books, nested)),
            _ => None,
        })
    }

    fn reflect_on_association(&self, name: &str) -> Option<Reflection> {
        (name == "books").then_some(Reflection {
            kind: RelationKind::HasMany,
            related_id: None,
        })
    }
}
