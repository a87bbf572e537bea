//! Catalog domain structures
//!
//! Plain data structures with the tree/store/ledger semantics; the
//! permission-gated facade over them lives in `services`.

pub mod ledger;
pub mod products;
pub mod tree;

pub use ledger::StockLedger;
pub use products::{ProductStore, derive_variant_name, derive_variant_sku};
pub use tree::{CategoryPath, CategoryTree};
