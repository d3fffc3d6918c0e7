//! # Registry Lifecycle & Wiring
//!
//! Individual resource configurations are small. **Wiring them together** (routes,
//! url options, several web services sharing one set of models) is where the
//! setup lives, and this module is where it happens.
//!
//! **Key Responsibilities:**
//! 1. **Routes** - hand the registry the application's route helpers
//! 2. **Defaults** - set the url options every service falls back to
//! 3. **Web Services** - register each service with its per-type configuration
//! 4. **Reset** - clear everything when the application shuts down
//!
//! ## The Bookstore Pattern
//!
//! [`Bookstore`] owns the configured [`Registry`](restful::Registry) and the
//! catalog it serves:
//!
//! ```rust
//! use restful_sample::lifecycle::Bookstore;
//!
//! let store = Bookstore::new()?;
//! let book = store.catalog.book(20).expect("seeded");
//!
//! let document = store.storefront(book).serialize()?;
//! assert_eq!(document["href"], "https://shop.books.example/shop/20");
//!
//! store.shutdown();
//! # Ok::<(), restful::Error>(())
//! ```
//!
//! ## Two Services, One Model
//!
//! The same [`Book`](crate::model::Book) renders differently per service:
//!
//! | | `Catalog API` | `Storefront` |
//! |---|---|---|
//! | host | registry default (`books.example`) | its own (`shop.books.example`) |
//! | href | `v1_book` | `shop_book` override |
//! | fields | everything but `price_cents`, plus `price` | `title`, `price`, `rating` |
//! | links | `author_href`, `reviews_href` | none (shallow) |
//!
//! Ebooks have a configuration of their own only in the catalog API; everywhere
//! else they are served as books.
//!
//! ## Declarative vs Programmatic
//!
//! [`configure_storefront`] registers from a single option map;
//! [`configure_catalog_api`] mixes maps with callbacks that edit the resource
//! in place. Both produce the same kind of configuration.

pub mod bookstore;

pub use bookstore::*;
