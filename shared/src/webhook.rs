//! Webhook boundary types
//!
//! The webhook notifier consumes a flat, case-sensitive external product
//! representation that differs from the internal [`Product`] shape. The
//! translation lives here, at the boundary; delivery is out of scope.

use crate::models::{Attribute, Product};
use crate::types::Timestamp;
use crate::util;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product change event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductEventKind {
    Created,
    Updated,
    Deleted,
}

impl fmt::Display for ProductEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

/// External (webhook) product representation.
///
/// Flat shape with field names fixed by the consumer:
/// `id, name, description, price, category, style, color, size, stock,
/// brand, image`. Fields the internal model cannot source are sent empty
/// rather than omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookProduct {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Resolved category display name, not the internal id
    pub category: String,
    pub style: String,
    pub color: String,
    pub size: Vec<String>,
    /// Total stock across all variants
    pub stock: i64,
    pub brand: String,
    pub image: String,
}

/// Envelope emitted after each successful product mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub event: ProductEventKind,
    pub timestamp: Timestamp,
    pub product: WebhookProduct,
}

impl WebhookPayload {
    pub fn new(event: ProductEventKind, product: WebhookProduct) -> Self {
        Self {
            event,
            timestamp: util::now_millis(),
            product,
        }
    }
}

/// Find a product attribute by any of the given names (case-insensitive)
fn attribute_by_names<'a>(attributes: &'a [Attribute], names: &[&str]) -> Option<&'a Attribute> {
    attributes.iter().find(|a| {
        names
            .iter()
            .any(|n| a.name.eq_ignore_ascii_case(n))
    })
}

impl WebhookProduct {
    /// Translate the internal product shape into the external one.
    ///
    /// `style`/`color`/`size` are mined from the product's attributes by
    /// their conventional names (French catalog first, English fallback);
    /// `brand` maps from the collection; `stock` sums variant stock.
    pub fn from_product(product: &Product, category_name: &str) -> Self {
        let first_value = |names: &[&str]| -> String {
            attribute_by_names(&product.attributes, names)
                .and_then(|a| a.values.first().cloned())
                .unwrap_or_default()
        };

        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category: category_name.to_string(),
            style: first_value(&["style"]),
            color: first_value(&["couleur", "color"]),
            size: attribute_by_names(&product.attributes, &["taille", "size"])
                .map(|a| a.values.clone())
                .unwrap_or_default(),
            stock: product.variants.iter().map(|v| v.stock).sum(),
            brand: product.collection.clone().unwrap_or_default(),
            // Not part of the internal model; the image service owns it
            image: String::new(),
        }
    }
}
