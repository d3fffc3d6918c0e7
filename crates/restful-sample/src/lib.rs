//! # Restful Bookstore Library
//!
//! This library exposes the core modules of the bookstore demo for integration testing.

pub mod catalog;
pub mod lifecycle;
pub mod model;
pub mod routes;
