//! Product / Variant store
//!
//! Owns the product list (insertion order, stable across snapshots) and the
//! variant derivation rules. Category existence is the caller's concern;
//! everything else about products lives here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Attribute, Product, ProductCreate, ProductUpdate, Variant, VariantCreate, VariantUpdate,
    parse_values,
};
use shared::types::Actor;
use shared::util;
use std::collections::BTreeMap;

/// Derive a variant display name: non-empty chosen values in attribute
/// declaration order, joined with `" / "` after a `" - "` separator.
/// No chosen values yields the bare product name.
pub fn derive_variant_name(
    product_name: &str,
    attributes: &[Attribute],
    chosen: &BTreeMap<String, String>,
) -> String {
    let parts: Vec<&str> = attributes
        .iter()
        .filter_map(|attr| chosen.get(&attr.name))
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .collect();
    if parts.is_empty() {
        product_name.to_string()
    } else {
        format!("{} - {}", product_name, parts.join(" / "))
    }
}

/// Derive a variant SKU: each non-empty chosen value is uppercased,
/// whitespace-stripped and truncated to 3 chars; fragments join with `-`
/// onto the product SKU. No chosen values yields `{sku}-DEFAULT`.
pub fn derive_variant_sku(
    product_sku: &str,
    attributes: &[Attribute],
    chosen: &BTreeMap<String, String>,
) -> String {
    let fragments: Vec<String> = attributes
        .iter()
        .filter_map(|attr| chosen.get(&attr.name))
        .filter(|v| !v.is_empty())
        .map(|v| {
            let compact: String = v
                .to_uppercase()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            compact.chars().take(3).collect::<String>()
        })
        .collect();
    if fragments.is_empty() {
        format!("{}-DEFAULT", product_sku)
    } else {
        format!("{}-{}", product_sku, fragments.join("-"))
    }
}

/// Keep only selections that are non-empty and name a declared attribute
fn clean_selections(
    attributes: &[Attribute],
    chosen: BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    chosen
        .into_iter()
        .filter(|(name, value)| {
            !value.is_empty() && attributes.iter().any(|a| &a.name == name)
        })
        .collect()
}

fn product_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::ProductNotFound, format!("Product {} not found", id))
}

fn variant_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::VariantNotFound, format!("Variant {} not found", id))
}

/// Product collection with variant operations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Validate and create a product. `name`, `sku`, `price` and
    /// `category_id` are required; every missing field is reported at once.
    /// New products start with no variants, stock tracking on, and negative
    /// stock disallowed.
    pub fn create(&mut self, input: ProductCreate) -> AppResult<Product> {
        let mut missing = Vec::new();
        if input.name.trim().is_empty() {
            missing.push("name");
        }
        if input.sku.trim().is_empty() {
            missing.push("sku");
        }
        if input.price.is_none() {
            missing.push("price");
        }
        if input.category_id.trim().is_empty() {
            missing.push("category_id");
        }
        if !missing.is_empty() {
            return Err(AppError::missing_fields(&missing));
        }

        let price = input.price.expect("checked above");
        if price < Decimal::ZERO {
            return Err(AppError::with_message(
                ErrorCode::ProductInvalidPrice,
                format!("Price {} is negative", price),
            ));
        }

        let product = Product {
            id: util::prefixed_id("prod"),
            name: input.name,
            sku: input.sku,
            description: input.description,
            price,
            category_id: input.category_id,
            collection: input.collection,
            attributes: input.attributes,
            variants: Vec::new(),
            stock_tracking: true,
            allow_negative_stock: false,
        };
        tracing::info!(id = %product.id, sku = %product.sku, "product created");
        self.products.push(product.clone());
        Ok(product)
    }

    pub fn update(&mut self, id: &str, patch: ProductUpdate) -> AppResult<Product> {
        if let Some(price) = patch.price
            && price < Decimal::ZERO
        {
            return Err(AppError::with_message(
                ErrorCode::ProductInvalidPrice,
                format!("Price {} is negative", price),
            ));
        }

        let product = self.find_mut(id).ok_or_else(|| product_not_found(id))?;
        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(sku) = patch.sku {
            product.sku = sku;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(category_id) = patch.category_id {
            product.category_id = category_id;
        }
        if let Some(collection) = patch.collection {
            product.collection = Some(collection);
        }
        if let Some(attributes) = patch.attributes {
            product.attributes = attributes;
        }
        if let Some(stock_tracking) = patch.stock_tracking {
            product.stock_tracking = stock_tracking;
        }
        if let Some(allow_negative_stock) = patch.allow_negative_stock {
            product.allow_negative_stock = allow_negative_stock;
        }
        Ok(product.clone())
    }

    /// Delete a product; its variants go with it
    pub fn delete(&mut self, id: &str) -> AppResult<Product> {
        let idx = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| product_not_found(id))?;
        let removed = self.products.remove(idx);
        tracing::info!(id = %removed.id, variants = removed.variants.len(), "product deleted");
        Ok(removed)
    }

    // =========================================================================
    // Product attributes
    // =========================================================================

    /// Add an attribute from a raw delimited value string.
    ///
    /// Duplicate names are not rejected; the observed behavior is
    /// last-write-wins at display time.
    pub fn add_attribute(
        &mut self,
        product_id: &str,
        name: &str,
        raw_values: &str,
    ) -> AppResult<Product> {
        let values = parse_values(raw_values);
        let mut missing = Vec::new();
        if name.trim().is_empty() {
            missing.push("name");
        }
        if values.is_empty() {
            missing.push("values");
        }
        if !missing.is_empty() {
            return Err(AppError::missing_fields(&missing));
        }
        let product = self
            .find_mut(product_id)
            .ok_or_else(|| product_not_found(product_id))?;
        product
            .attributes
            .push(Attribute::new(util::prefixed_id("pattr"), name.trim(), values));
        Ok(product.clone())
    }

    /// Remove an attribute by id. Removing an unknown id is a no-op, same
    /// as the filter the UI applies.
    pub fn remove_attribute(&mut self, product_id: &str, attribute_id: &str) -> AppResult<Product> {
        let product = self
            .find_mut(product_id)
            .ok_or_else(|| product_not_found(product_id))?;
        product.attributes.retain(|a| a.id != attribute_id);
        Ok(product.clone())
    }

    // =========================================================================
    // Variants
    // =========================================================================

    /// Add a variant. Explicit name/SKU override the derived ones, the
    /// price falls back to the product's, stock starts at 0, and audit
    /// fields are stamped from the actor.
    pub fn add_variant(
        &mut self,
        product_id: &str,
        input: VariantCreate,
        default_threshold: i64,
        actor: &Actor,
    ) -> AppResult<Variant> {
        let product = self
            .find_mut(product_id)
            .ok_or_else(|| product_not_found(product_id))?;

        let chosen = clean_selections(&product.attributes, input.attributes);
        let name = input
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| derive_variant_name(&product.name, &product.attributes, &chosen));
        let sku = input
            .sku
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| derive_variant_sku(&product.sku, &product.attributes, &chosen));

        let variant = Variant {
            id: util::prefixed_id("var"),
            product_id: product.id.clone(),
            name,
            sku,
            price: input.price.unwrap_or(product.price),
            stock: 0,
            attributes: chosen,
            low_stock_threshold: input.low_stock_threshold.unwrap_or(default_threshold),
            last_updated: util::now_millis(),
            updated_by: actor.name.clone(),
        };
        tracing::info!(id = %variant.id, product = %product.id, "variant created");
        product.variants.push(variant.clone());
        Ok(variant)
    }

    /// Patch a variant. Audit fields are re-stamped no matter which fields
    /// changed.
    pub fn update_variant(
        &mut self,
        product_id: &str,
        variant_id: &str,
        patch: VariantUpdate,
        actor: &Actor,
    ) -> AppResult<Variant> {
        let product = self
            .find_mut(product_id)
            .ok_or_else(|| product_not_found(product_id))?;
        let attributes = product.attributes.clone();
        let variant = product
            .variants
            .iter_mut()
            .find(|v| v.id == variant_id)
            .ok_or_else(|| variant_not_found(variant_id))?;

        if let Some(name) = patch.name {
            variant.name = name;
        }
        if let Some(sku) = patch.sku {
            variant.sku = sku;
        }
        if let Some(price) = patch.price {
            variant.price = price;
        }
        if let Some(chosen) = patch.attributes {
            variant.attributes = clean_selections(&attributes, chosen);
        }
        if let Some(threshold) = patch.low_stock_threshold {
            variant.low_stock_threshold = threshold;
        }
        variant.last_updated = util::now_millis();
        variant.updated_by = actor.name.clone();
        Ok(variant.clone())
    }

    /// Remove a single variant from its product
    pub fn delete_variant(&mut self, product_id: &str, variant_id: &str) -> AppResult<Variant> {
        let product = self
            .find_mut(product_id)
            .ok_or_else(|| product_not_found(product_id))?;
        let idx = product
            .variants
            .iter()
            .position(|v| v.id == variant_id)
            .ok_or_else(|| variant_not_found(variant_id))?;
        Ok(product.variants.remove(idx))
    }

    /// Resolve a variant together with its product
    pub fn find_variant(&self, product_id: &str, variant_id: &str) -> AppResult<(&Product, &Variant)> {
        let product = self.find(product_id).ok_or_else(|| product_not_found(product_id))?;
        let variant = product
            .variants
            .iter()
            .find(|v| v.id == variant_id)
            .ok_or_else(|| variant_not_found(variant_id))?;
        Ok((product, variant))
    }

    /// Write the clamped stock value and re-stamp audit fields
    pub(crate) fn write_stock(
        &mut self,
        product_id: &str,
        variant_id: &str,
        stock: i64,
        actor: &Actor,
    ) -> AppResult<Variant> {
        let product = self
            .find_mut(product_id)
            .ok_or_else(|| product_not_found(product_id))?;
        let variant = product
            .variants
            .iter_mut()
            .find(|v| v.id == variant_id)
            .ok_or_else(|| variant_not_found(variant_id))?;
        variant.stock = stock;
        variant.last_updated = util::now_millis();
        variant.updated_by = actor.name.clone();
        Ok(variant.clone())
    }

    /// Variants at or below their low-stock threshold (includes out-of-stock)
    pub fn low_stock_variants(&self) -> Vec<Variant> {
        self.products
            .iter()
            .flat_map(|p| p.variants.iter())
            .filter(|v| v.stock <= v.low_stock_threshold)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::RoleName;

    fn chosen(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn tshirt_attributes() -> Vec<Attribute> {
        vec![
            Attribute::new("pattr-1", "Taille", parse_values("XS,S,M,L,XL")),
            Attribute::new("pattr-2", "Couleur", parse_values("Blanc,Noir,Marine")),
        ]
    }

    fn actor() -> Actor {
        Actor::new(RoleName::Manager, "Sarah Manager")
    }

    fn seeded_store() -> (ProductStore, String) {
        let mut store = ProductStore::new();
        let product = store
            .create(ProductCreate {
                name: "T-Shirt Premium".into(),
                sku: "TSH-001".into(),
                description: "Coton bio".into(),
                price: Some(Decimal::new(2999, 2)),
                category_id: "cat-1".into(),
                collection: Some("Été 2025".into()),
                attributes: tshirt_attributes(),
            })
            .unwrap();
        (store, product.id)
    }

    // ---- derivation --------------------------------------------------------

    #[test]
    fn test_derive_name_declaration_order() {
        let attrs = tshirt_attributes();
        let name = derive_variant_name(
            "T-Shirt Premium",
            &attrs,
            &chosen(&[("Taille", "S"), ("Couleur", "Blanc")]),
        );
        assert_eq!(name, "T-Shirt Premium - S / Blanc");
    }

    #[test]
    fn test_derive_name_no_values() {
        let attrs = tshirt_attributes();
        assert_eq!(
            derive_variant_name("T-Shirt Premium", &attrs, &BTreeMap::new()),
            "T-Shirt Premium"
        );
        // empty selections count as unset
        assert_eq!(
            derive_variant_name("T-Shirt Premium", &attrs, &chosen(&[("Taille", "")])),
            "T-Shirt Premium"
        );
    }

    #[test]
    fn test_derive_sku_fragments() {
        let attrs = tshirt_attributes();
        let sku = derive_variant_sku(
            "TSH-001",
            &attrs,
            &chosen(&[("Taille", "S"), ("Couleur", "Blanc")]),
        );
        assert_eq!(sku, "TSH-001-S-BLA");
    }

    #[test]
    fn test_derive_sku_strips_whitespace_before_truncating() {
        let attrs = vec![Attribute::new(
            "pattr-1",
            "Couleur",
            parse_values("b leu ciel"),
        )];
        let sku = derive_variant_sku("TSH-001", &attrs, &chosen(&[("Couleur", "b leu ciel")]));
        assert_eq!(sku, "TSH-001-BLE");
    }

    #[test]
    fn test_derive_sku_default() {
        assert_eq!(
            derive_variant_sku("TSH-001", &tshirt_attributes(), &BTreeMap::new()),
            "TSH-001-DEFAULT"
        );
    }

    // ---- products ----------------------------------------------------------

    #[test]
    fn test_create_reports_all_missing_fields() {
        let mut store = ProductStore::new();
        let err = store.create(ProductCreate::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let missing = err.details.unwrap().get("missing").cloned().unwrap();
        assert_eq!(
            missing,
            serde_json::json!(["name", "sku", "price", "category_id"])
        );
    }

    #[test]
    fn test_create_defaults() {
        let (store, id) = seeded_store();
        let product = store.find(&id).unwrap();
        assert!(product.variants.is_empty());
        assert!(product.stock_tracking);
        assert!(!product.allow_negative_stock);
    }

    #[test]
    fn test_create_rejects_negative_price() {
        let mut store = ProductStore::new();
        let err = store
            .create(ProductCreate {
                name: "X".into(),
                sku: "X-1".into(),
                price: Some(Decimal::new(-100, 2)),
                category_id: "cat-1".into(),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductInvalidPrice);
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_removes_variants_with_product() {
        let (mut store, id) = seeded_store();
        store
            .add_variant(&id, VariantCreate::default(), 5, &actor())
            .unwrap();
        let removed = store.delete(&id).unwrap();
        assert_eq!(removed.variants.len(), 1);
        assert!(store.is_empty());
    }

    // ---- attributes --------------------------------------------------------

    #[test]
    fn test_add_attribute_parses_values() {
        let (mut store, id) = seeded_store();
        let product = store.add_attribute(&id, "Matière", "Coton, Lin , ,Soie").unwrap();
        let attr = product.attributes.last().unwrap();
        assert_eq!(attr.name, "Matière");
        assert_eq!(attr.values, vec!["Coton", "Lin", "Soie"]);
        assert!(attr.id.starts_with("pattr-"));
    }

    #[test]
    fn test_add_attribute_allows_duplicate_names() {
        let (mut store, id) = seeded_store();
        store.add_attribute(&id, "Taille", "36,38").unwrap();
        let product = store.find(&id).unwrap();
        let count = product.attributes.iter().filter(|a| a.name == "Taille").count();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_remove_attribute_unknown_id_is_noop() {
        let (mut store, id) = seeded_store();
        let product = store.remove_attribute(&id, "pattr-404").unwrap();
        assert_eq!(product.attributes.len(), 2);
    }

    // ---- variants ----------------------------------------------------------

    #[test]
    fn test_add_variant_derives_and_defaults() {
        let (mut store, id) = seeded_store();
        let variant = store
            .add_variant(
                &id,
                VariantCreate {
                    attributes: chosen(&[("Taille", "S"), ("Couleur", "Blanc")]),
                    ..Default::default()
                },
                5,
                &actor(),
            )
            .unwrap();
        assert_eq!(variant.name, "T-Shirt Premium - S / Blanc");
        assert_eq!(variant.sku, "TSH-001-S-BLA");
        assert_eq!(variant.price, Decimal::new(2999, 2));
        assert_eq!(variant.stock, 0);
        assert_eq!(variant.low_stock_threshold, 5);
        assert_eq!(variant.updated_by, "Sarah Manager");
    }

    #[test]
    fn test_add_variant_explicit_overrides() {
        let (mut store, id) = seeded_store();
        let variant = store
            .add_variant(
                &id,
                VariantCreate {
                    name: Some("Édition limitée".into()),
                    sku: Some("TSH-001-LTD".into()),
                    price: Some(Decimal::new(3999, 2)),
                    attributes: chosen(&[("Taille", "M")]),
                    low_stock_threshold: Some(2),
                },
                5,
                &actor(),
            )
            .unwrap();
        assert_eq!(variant.name, "Édition limitée");
        assert_eq!(variant.sku, "TSH-001-LTD");
        assert_eq!(variant.price, Decimal::new(3999, 2));
        assert_eq!(variant.low_stock_threshold, 2);
    }

    #[test]
    fn test_add_variant_drops_empty_and_undeclared_selections() {
        let (mut store, id) = seeded_store();
        let variant = store
            .add_variant(
                &id,
                VariantCreate {
                    attributes: chosen(&[("Taille", "S"), ("Couleur", ""), ("Inconnu", "X")]),
                    ..Default::default()
                },
                5,
                &actor(),
            )
            .unwrap();
        assert_eq!(variant.attributes.len(), 1);
        assert_eq!(variant.attributes.get("Taille").map(String::as_str), Some("S"));
    }

    #[test]
    fn test_update_variant_restamps_audit_fields() {
        let (mut store, id) = seeded_store();
        let variant = store
            .add_variant(&id, VariantCreate::default(), 5, &actor())
            .unwrap();
        let editor = Actor::new(RoleName::Admin, "John Admin");
        // empty patch still counts as a touch
        let updated = store
            .update_variant(&id, &variant.id, VariantUpdate::default(), &editor)
            .unwrap();
        assert_eq!(updated.updated_by, "John Admin");
        assert!(updated.last_updated >= variant.last_updated);
    }

    #[test]
    fn test_delete_variant_only_removes_one() {
        let (mut store, id) = seeded_store();
        let keep = store
            .add_variant(
                &id,
                VariantCreate {
                    attributes: chosen(&[("Taille", "S")]),
                    ..Default::default()
                },
                5,
                &actor(),
            )
            .unwrap();
        let gone = store
            .add_variant(
                &id,
                VariantCreate {
                    attributes: chosen(&[("Taille", "M")]),
                    ..Default::default()
                },
                5,
                &actor(),
            )
            .unwrap();
        store.delete_variant(&id, &gone.id).unwrap();
        let product = store.find(&id).unwrap();
        assert_eq!(product.variants.len(), 1);
        assert_eq!(product.variants[0].id, keep.id);
    }

    #[test]
    fn test_find_variant_not_found() {
        let (store, id) = seeded_store();
        let err = store.find_variant(&id, "var-404").unwrap_err();
        assert_eq!(err.code, ErrorCode::VariantNotFound);
        let err = store.find_variant("prod-404", "var-404").unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
    }
}
