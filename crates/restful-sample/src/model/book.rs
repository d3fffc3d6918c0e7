use restful::model::{nest_many, nest_one, Document, Reflection, RelationKind, Resourceful, SerializationOptions};
use restful::Result;
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::{field, project, Author, Review};

/// A printed book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    pub id: u32,
    pub title: String,
    pub isbn: String,
    pub price_cents: u32,
    pub author_id: u32,
    #[serde(skip)]
    pub author: Option<Box<Author>>,
    #[serde(skip)]
    pub reviews: Vec<Review>,
}

impl Book {
    pub fn new(id: u32, title: impl Into<String>, isbn: impl Into<String>, price_cents: u32, author_id: u32) -> Self {
        Self {
            id,
            title: title.into(),
            isbn: isbn.into(),
            price_cents,
            author_id,
            author: None,
            reviews: Vec::new(),
        }
    }

    pub fn with_author(mut self, author: Author) -> Self {
        self.author = Some(Box::new(author));
        self
    }

    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.reviews = reviews;
        self
    }

    /// `"$12.50"`
    pub fn price(&self) -> String {
        format!("${}.{:02}", self.price_cents / 100, self.price_cents % 100)
    }

    /// Mean rating, `None` without reviews.
    pub fn rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: u32 = self.reviews.iter().map(|review| u32::from(review.rating)).sum();
        Some(f64::from(total) / self.reviews.len() as f64)
    }

    fn computed(&self, method: &str) -> Option<JsonValue> {
        match method {
            "price" => Some(self.price().into()),
            "rating" => Some(self.rating().into()),
            _ => None,
        }
    }

    fn nested(&self, name: &str, options: &SerializationOptions) -> Option<Result<JsonValue>> {
        match name {
            "author" => Some(nest_one(self.author.as_deref(), options)),
            "reviews" => Some(nest_many(&self.reviews, options)),
            _ => None,
        }
    }

    fn reflection(&self, name: &str) -> Option<Reflection> {
        match name {
            "author" => Some(Reflection {
                kind: RelationKind::BelongsTo,
                related_id: Some(self.author_id.into()),
            }),
            "reviews" => Some(Reflection {
                kind: RelationKind::HasMany,
                related_id: None,
            }),
            _ => None,
        }
    }
}

impl Resourceful for Book {
    fn call(&self, method: &str) -> Option<JsonValue> {
        self.computed(method).or_else(|| field(self, method))
    }

    fn serializable_record(&self, options: &SerializationOptions) -> Result<Document> {
        project(self, options, |name, nested| self.nested(name, nested))
    }

    fn reflect_on_association(&self, name: &str) -> Option<Reflection> {
        self.reflection(name)
    }
}

/// A book sold as a download. Configured and routed as a [`Book`] unless the
/// web service says otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ebook {
    #[serde(flatten)]
    pub book: Book,
    pub download_mb: f64,
}

impl Ebook {
    pub fn new(book: Book, download_mb: f64) -> Self {
        Self { book, download_mb }
    }
}

impl Resourceful for Ebook {
    fn base_type_name(&self) -> Option<&str> {
        Some("Book")
    }

    fn call(&self, method: &str) -> Option<JsonValue> {
        self.book.computed(method).or_else(|| field(self, method))
    }

    fn serializable_record(&self, options: &SerializationOptions) -> Result<Document> {
        project(self, options, |name, nested| self.book.nested(name, nested))
    }

    fn reflect_on_association(&self, name: &str) -> Option<Reflection> {
        self.book.reflection(name)
    }
}
