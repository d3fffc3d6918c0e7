//! # Observability & Tracing
//!
//! The library logs through the `tracing` crate with structured fields.
//! [`setup_tracing`] installs a subscriber for binaries and demos.
//!
//! ## What Gets Traced
//!
//! - **Registry**: web service registration and clearing (`info`), default url
//!   option injection (`debug`)
//! - **Configuration**: the effective resource configuration of every record,
//!   after inheritance, call-time options and callbacks (`debug`)
//! - **Routes**: each helper call with its outcome (`debug`), and templates
//!   that cannot be filled from the given arguments (`warn`)
//! - **Documents**: one line per serialized record (`debug`)
//!
//! ## Usage Examples
//!
//! ```bash
//! # Registrations only
//! RUST_LOG=info cargo run -p restful-sample
//!
//! # Configuration resolution and route lookups
//! RUST_LOG=debug cargo run -p restful-sample
//!
//! # Only this crate
//! RUST_LOG=restful=debug cargo run -p restful-sample
//! ```
//!
//! With `RUST_LOG=debug`:
//!
//! ```text
//! INFO Registered web_service="api" resources=2
//! DEBUG Resolved configuration resource_key=bar base_key=bar configuration={"associations":{"dingos":null,"special":"foo"}}
//! DEBUG Resolved helper="bar" url=http://test.org/bars/1
//! DEBUG No route helper="bar_foo"
//! DEBUG Serialized resource_key=bar shallow=false fields=5
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Call once per process.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
