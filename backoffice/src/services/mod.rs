//! Service layer: permission-gated facade over the catalog state

pub mod catalog_service;

pub use catalog_service::{CatalogService, CatalogSnapshot};
