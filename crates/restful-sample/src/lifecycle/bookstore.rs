use std::sync::Arc;

use restful::{Registry, Result, SerializerBuilder, Subject};
use serde_json::json;
use tracing::info;

use crate::catalog::Catalog;
use crate::routes::routes;

pub const CATALOG_API: &str = "Catalog API";
pub const STOREFRONT: &str = "Storefront";

/// The configured registry together with the records it serves.
pub struct Bookstore {
    pub registry: Registry,
    pub catalog: Catalog,
}

impl Bookstore {
    /// Builds the registry and registers both web services.
    pub fn new() -> Result<Self> {
        let registry = Registry::new(Arc::new(routes()));
        registry.set_default_url_options(json!({ "host": "books.example" }))?;
        configure_catalog_api(&registry)?;
        configure_storefront(&registry)?;
        info!(web_services = ?registry.web_service_names(), "Bookstore ready");
        Ok(Self {
            registry,
            catalog: Catalog::seed(),
        })
    }

    /// Starts a serialization against the catalog API.
    pub fn catalog_api<'a>(&'a self, subject: impl Into<Subject<'a>>) -> SerializerBuilder<'a> {
        self.registry.serializer(subject).web_service(CATALOG_API)
    }

    /// Starts a serialization against the storefront.
    pub fn storefront<'a>(&'a self, subject: impl Into<Subject<'a>>) -> SerializerBuilder<'a> {
        self.registry.serializer(subject).web_service(STOREFRONT)
    }

    pub fn shutdown(self) {
        self.registry.clear();
        info!("Bookstore shut down");
    }
}

/// The JSON API: every relation linked, prices formatted, internals hidden.
pub fn configure_catalog_api(registry: &Registry) -> Result<()> {
    registry.register_web_service_with(CATALOG_API, json!({ "api_prefix": "v1" }), |api| {
        api.register_resource(
            "author",
            json!({
                "name_method": "display_name",
                "associations": "books",
                "serialization": { "methods": "book_count" },
            }),
            |_| Ok(()),
        )?;

        api.register_resource("book", json!({ "name_method": "title" }), |book| {
            book.add_association("author", None).add_association("reviews", None);
            book.configure_serialization(|serialization| {
                serialization.set_except("price_cents")?;
                serialization.set_methods("price")?;
                Ok(())
            })?;
            Ok(())
        })?;

        api.register_resource("ebook", json!({ "serialization": { "except": "isbn" } }), |_| Ok(()))?;

        api.register_resource(
            "review",
            json!({
                "name_method": "stars",
                "associations": { "reviewed": "book" },
                "serialization": { "except": "book_id" },
            }),
            |_| Ok(()),
        )?;
        Ok(())
    })?;
    Ok(())
}

/// The shop pages: flat listings with their own host and product urls.
pub fn configure_storefront(registry: &Registry) -> Result<()> {
    registry.register_web_service(
        STOREFRONT,
        json!({
            "default_url_options": { "protocol": "https", "host": "shop.books.example" },
            "resources": {
                "book": {
                    "name_method": "title",
                    "url_for": "shop_book",
                    "shallow": true,
                    "serialization": { "only": "title", "methods": ["price", "rating"] },
                },
            },
        }),
    )?;
    Ok(())
}
