//! In-memory seed data standing in for a database.

use crate::model::{Author, Book, Ebook, Review};

/// Every record the demo and the tests serialize.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub authors: Vec<Author>,
    pub books: Vec<Book>,
    pub ebooks: Vec<Ebook>,
}

impl Catalog {
    pub fn seed() -> Self {
        let le_guin = Author::new(1, "Ursula K. Le Guin", Some(1929));
        let lem = Author::new(2, "Stanisław Lem", Some(1921));

        let books = vec![
            Book::new(10, "The Dispossessed", "978-0061054884", 1599, 1)
                .with_author(le_guin.clone())
                .with_reviews(vec![
                    Review::new(100, 10, 5, "An ambiguous utopia, and a great one."),
                    Review::new(101, 10, 4, "Slow start."),
                ]),
            Book::new(11, "The Left Hand of Darkness", "978-0441478125", 1299, 1).with_author(le_guin.clone()),
            Book::new(20, "Solaris", "978-0156027601", 1450, 2)
                .with_author(lem.clone())
                .with_reviews(vec![Review::new(200, 20, 5, "The ocean thinks.")]),
        ];
        let ebooks = vec![Ebook::new(
            Book::new(21, "The Cyberiad", "978-0156027595", 899, 2).with_author(lem.clone()),
            2.4,
        )];

        let books_by = |author_id: u32| -> Vec<Book> {
            books
                .iter()
                .filter(|book| book.author_id == author_id)
                .cloned()
                .collect()
        };
        let authors = vec![le_guin.with_books(books_by(1)), lem.with_books(books_by(2))];

        Self {
            authors,
            books,
            ebooks,
        }
    }

    pub fn author(&self, id: u32) -> Option<&Author> {
        self.authors.iter().find(|author| author.id == id)
    }

    pub fn book(&self, id: u32) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }
}
