//! The bookstore's route table.
//!
//! Helper names follow the `<prefix>_<resource>[_<association>]` convention the
//! serializer derives: `book` for a member, `books` for a collection,
//! `book_reviews` for a nested collection. The `v1_` routes back the catalog
//! API, `shop_book` is the storefront's override.

use restful::RouteSet;

pub fn routes() -> RouteSet {
    RouteSet::new()
        // Unprefixed
        .route("author", "/authors/:id")
        .route("authors", "/authors")
        .route("book", "/books/:id")
        .route("books", "/books")
        .route("review", "/reviews/:id")
        // Catalog API
        .route("v1_author", "/api/v1/authors/:id")
        .route("v1_author_books", "/api/v1/authors/:author_id/books")
        .route("v1_book", "/api/v1/books/:id")
        .route("v1_books", "/api/v1/books")
        .route("v1_book_reviews", "/api/v1/books/:book_id/reviews")
        .route("v1_review", "/api/v1/reviews/:id")
        // Storefront
        .route("shop_book", "/shop/:id")
}
