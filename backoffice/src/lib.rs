//! Back-office domain services
//!
//! The catalog/inventory core behind the back-office UI: the three-level
//! category tree, products with variant-level stock tracking, the audited
//! stock ledger, and the role-gated service facade. Transport, persistence
//! and rendering live in the layers embedding this crate.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod events;
pub mod services;

pub use config::Config;
pub use services::CatalogService;
