//! # Restful Bookstore
//!
//! A worked example of serializing one domain model for two web services.
//!
//! ## 🚀 Core Components
//!
//! - **[model]**: Plain structs ([`Author`], [`Book`], [`Ebook`], [`Review`]) that implement [`Resourceful`](restful::Resourceful).
//! - **[routes]**: The route table the hrefs are resolved against.
//! - **[lifecycle]**: Registers the `Catalog API` and `Storefront` web services.
//!
//! ## 📚 Quick Start
//!
//! The entry point demonstrates:
//! 1.  Setting up the [`Bookstore`].
//! 2.  Serializing an author, a book and an ebook through the catalog API.
//! 3.  Serializing the book list through the storefront.
//!
//! ## 🧪 Testing
//!
//! See [`restful::mock`] for runtime-assembled records that need no model structs.

use restful::tracing::setup_tracing;
use restful_sample::lifecycle::Bookstore;
use serde_json::Value as JsonValue;
use tracing::{error, info};

fn print(title: &str, document: &JsonValue) -> Result<(), String> {
    let pretty = serde_json::to_string_pretty(document).map_err(|e| e.to_string())?;
    println!("── {title}\n{pretty}\n");
    Ok(())
}

fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting bookstore demo");
    let store = Bookstore::new().map_err(|e| e.to_string())?;

    let author = store.catalog.author(1).ok_or("author 1 not seeded")?;
    let document = store.catalog_api(author).serialize().map_err(|e| e.to_string())?;
    print("Catalog API: author", &document)?;

    let book = store.catalog.book(10).ok_or("book 10 not seeded")?;
    let document = store
        .catalog_api(book)
        .options(json_options())
        .serialize()
        .map_err(|e| e.to_string())?;
    print("Catalog API: book with reviews", &document)?;

    let document = store
        .catalog_api(store.catalog.ebooks.as_slice())
        .serialize()
        .map_err(|e| e.to_string())?;
    print("Catalog API: ebooks", &document)?;

    let document = store
        .storefront(store.catalog.books.as_slice())
        .serialize()
        .map_err(|e| e.to_string())?;
    print("Storefront: books", &document)?;

    match store.catalog_api(book).web_service("Admin").serialize() {
        Ok(_) => info!("Admin service unexpectedly configured"),
        Err(e) => error!(error = %e, "Admin service is not part of this demo"),
    }

    store.shutdown();
    info!("Demo completed successfully");
    Ok(())
}

fn json_options() -> JsonValue {
    serde_json::json!({
        "serialization": { "include": { "reviews": { "only": ["rating", "body"] } } },
    })
}
