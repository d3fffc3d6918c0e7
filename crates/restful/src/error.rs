//! # Errors
//!
//! This module defines the error type shared by the configuration model, the
//! serializer and the registry. Configuration mistakes are programmer errors:
//! they surface immediately and are never retried or silently dropped.
//!
//! A missing route is *not* an error. Href resolution that finds no matching
//! route helper yields `null` for that field and the document is still produced.

/// Errors that can occur while configuring or serializing resources.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `set()` or `deep_merge()` received a key that is not declared on the shape.
    #[error("unknown option `{option}` for {shape} (known options: {known})")]
    UnknownOption {
        shape: &'static str,
        option: String,
        known: String,
    },

    /// A value could not be coerced into the shape its option expects.
    #[error("unexpected value for option `{option}`: expected {expected}, received {received}")]
    UnexpectedValue {
        option: String,
        expected: &'static str,
        received: String,
    },

    /// A serializer was asked for a web service that is not registered.
    #[error("web service not registered: {0}")]
    MissingWebService(String),

    /// The attribute-introspection collaborator could not serialize a record.
    #[error("cannot serialize {type_name}: {message}")]
    Introspection { type_name: String, message: String },

    /// The structural fallback for non-domain subjects failed.
    #[error("fallback serialization failed: {0}")]
    Fallback(#[from] serde_json::Error),
}

impl Error {
    pub fn introspection(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Introspection {
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
