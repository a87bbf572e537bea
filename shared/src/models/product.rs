//! Product Model

use super::attribute::Attribute;
use super::variant::Variant;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub description: String,
    pub price: Decimal,
    /// Category reference (any level of the tree)
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    /// Product-owned attribute copies, independent of the category template
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    pub stock_tracking: bool,
    pub allow_negative_stock: bool,
}

/// Create product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub description: String,
    pub price: Option<Decimal>,
    pub category_id: String,
    pub collection: Option<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category_id: Option<String>,
    pub collection: Option<String>,
    pub attributes: Option<Vec<Attribute>>,
    pub stock_tracking: Option<bool>,
    pub allow_negative_stock: Option<bool>,
}
