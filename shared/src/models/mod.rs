//! Data models
//!
//! Shared between the back-office services and the presentation layer.
//! Entities follow the entity + `*Create` + `*Update` payload pattern.
//! All IDs are prefixed snowflake strings (`cat-…`, `prod-…`, `var-…`).

pub mod attribute;
pub mod category;
pub mod product;
pub mod role;
pub mod stock;
pub mod variant;

// Re-exports
pub use attribute::*;
pub use category::*;
pub use product::*;
pub use role::*;
pub use stock::*;
pub use variant::*;
