//! Variant Model
//!
//! A variant is a concrete, saleable combination of one chosen value per
//! product attribute, with its own stock and price.

use crate::types::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Variant entity
///
/// `attributes` maps attribute name -> chosen value; keys are a strict
/// subset of the parent product's attribute names, and empty selections are
/// dropped rather than stored as empty strings. A BTreeMap keeps the
/// serialized form deterministic; derivation order comes from the product's
/// attribute declaration order, not from the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub stock: i64,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    pub low_stock_threshold: i64,
    pub last_updated: Timestamp,
    pub updated_by: String,
}

impl Variant {
    /// Stock at or below the configured threshold (but not out)
    pub fn is_low_stock(&self) -> bool {
        self.stock > 0 && self.stock <= self.low_stock_threshold
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }
}

/// Create variant payload
///
/// Explicit `name`/`sku` override the derived ones; absent `price` falls
/// back to the product price.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantCreate {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<Decimal>,
    /// Chosen value per attribute name; empty values are dropped
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    pub low_stock_threshold: Option<i64>,
}

/// Update variant payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantUpdate {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<Decimal>,
    pub attributes: Option<BTreeMap<String, String>>,
    pub low_stock_threshold: Option<i64>,
}
