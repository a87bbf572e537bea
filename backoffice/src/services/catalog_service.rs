//! Catalog Service
//!
//! Permission-gated facade over the category tree, the product store and
//! the stock ledger. Every operation takes the acting identity, checks the
//! role matrix first, and only then touches state. Product mutations emit
//! a webhook payload on the event bus after the state change commits.
//!
//! All three stores live behind one reader-writer lock, so each mutating
//! command (read, compute, write, ledger append) runs in a single critical
//! section. Clones of the service share the same catalog; mutations are
//! serialized per catalog.

use crate::auth::{PermAction, Resource, require};
use crate::catalog::ledger::{StockLedger, apply_action};
use crate::catalog::products::ProductStore;
use crate::catalog::tree::{CategoryPath, CategoryTree};
use crate::config::Config;
use crate::events::EventBus;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Attribute, CategoryCreate, CategoryNode, CategoryUpdate, Product, ProductCreate,
    ProductUpdate, Role, StockAction, StockHistoryEntry, Variant, VariantCreate, VariantUpdate,
};
use shared::types::Actor;
use shared::webhook::{ProductEventKind, WebhookPayload, WebhookProduct};
use std::fmt;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Full catalog state in serializable form. Importing a snapshot that was
/// previously exported reproduces identical structure: ids, nesting and
/// attribute order all survive the round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub categories: Vec<CategoryNode>,
    pub products: Vec<Product>,
    pub stock_history: Vec<StockHistoryEntry>,
}

/// The three stores, locked as one unit
#[derive(Default)]
struct CatalogState {
    tree: CategoryTree,
    products: ProductStore,
    ledger: StockLedger,
}

/// Shared catalog state behind a single reader-writer lock
#[derive(Clone)]
pub struct CatalogService {
    config: Config,
    state: Arc<RwLock<CatalogState>>,
    events: EventBus,
}

impl fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("CatalogService")
            .field("categories", &state.tree.len())
            .field("products", &state.products.len())
            .field("ledger_entries", &state.ledger.len())
            .field("subscribers", &self.events.subscriber_count())
            .finish()
    }
}

impl CatalogService {
    pub fn new(config: Config) -> Self {
        let events = EventBus::new(config.event_channel_capacity);
        Self {
            config,
            state: Arc::new(RwLock::new(CatalogState::default())),
            events,
        }
    }

    /// Receive webhook payloads for product mutations
    pub fn subscribe_events(&self) -> broadcast::Receiver<WebhookPayload> {
        self.events.subscribe()
    }

    // =========================================================================
    // Categories
    // =========================================================================

    pub fn list_categories(&self, actor: &Actor) -> AppResult<Vec<CategoryNode>> {
        require(actor, Resource::Categories, PermAction::Read)?;
        Ok(self.state.read().tree.roots().to_vec())
    }

    pub fn find_category(&self, actor: &Actor, id: &str) -> AppResult<CategoryNode> {
        require(actor, Resource::Categories, PermAction::Read)?;
        self.state.read().tree.find(id).cloned().ok_or_else(|| {
            AppError::with_message(ErrorCode::CategoryNotFound, format!("Category {} not found", id))
        })
    }

    /// Attribute templates suggested by a category
    pub fn category_attributes(&self, actor: &Actor, id: &str) -> AppResult<Vec<Attribute>> {
        require(actor, Resource::Categories, PermAction::Read)?;
        Ok(self.state.read().tree.list_attributes(id))
    }

    /// Flat id + breadcrumb listing for selectors
    pub fn category_paths(&self, actor: &Actor) -> AppResult<Vec<CategoryPath>> {
        require(actor, Resource::Categories, PermAction::Read)?;
        Ok(self.state.read().tree.flatten())
    }

    pub fn create_category(&self, actor: &Actor, input: CategoryCreate) -> AppResult<CategoryNode> {
        require(actor, Resource::Categories, PermAction::Create)?;
        if input.name.trim().is_empty() {
            return Err(AppError::missing_fields(&["name"]));
        }
        self.state.write().tree.insert(input)
    }

    pub fn update_category(
        &self,
        actor: &Actor,
        id: &str,
        patch: CategoryUpdate,
    ) -> AppResult<CategoryNode> {
        require(actor, Resource::Categories, PermAction::Update)?;
        self.state.write().tree.update(id, patch)
    }

    /// Delete a category subtree. Products attached anywhere in the subtree
    /// go with it (each emitting a `deleted` event), keeping every surviving
    /// product's category reference resolvable. The subtree walk, product
    /// removal and tree rewrite all happen under one write lock, so no
    /// concurrent create can attach a product to a half-deleted category.
    pub fn delete_category(&self, actor: &Actor, id: &str) -> AppResult<usize> {
        require(actor, Resource::Categories, PermAction::Delete)?;

        let mut payloads = Vec::new();
        let removed = {
            let mut state = self.state.write();
            let state = &mut *state;

            let node = state.tree.find(id).ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::CategoryNotFound,
                    format!("Category {} not found", id),
                )
            })?;
            let subtree_ids = collect_ids(node);

            let doomed: Vec<String> = state
                .products
                .products()
                .iter()
                .filter(|p| subtree_ids.contains(&p.category_id))
                .map(|p| p.id.clone())
                .collect();
            for product_id in &doomed {
                let removed = state.products.delete(product_id)?;
                payloads.push(product_payload(&state.tree, ProductEventKind::Deleted, &removed));
            }

            let removed = state.tree.delete(id)?;
            tracing::info!(category = %id, nodes = removed, products = doomed.len(), "subtree deleted");
            removed
        };
        for payload in payloads {
            self.events.emit(payload);
        }
        Ok(removed)
    }

    // =========================================================================
    // Products
    // =========================================================================

    pub fn list_products(&self, actor: &Actor) -> AppResult<Vec<Product>> {
        require(actor, Resource::Products, PermAction::Read)?;
        Ok(self.state.read().products.products().to_vec())
    }

    pub fn find_product(&self, actor: &Actor, id: &str) -> AppResult<Product> {
        require(actor, Resource::Products, PermAction::Read)?;
        self.state.read().products.find(id).cloned().ok_or_else(|| {
            AppError::with_message(ErrorCode::ProductNotFound, format!("Product {} not found", id))
        })
    }

    pub fn create_product(&self, actor: &Actor, input: ProductCreate) -> AppResult<Product> {
        require(actor, Resource::Products, PermAction::Create)?;
        let (product, payload) = {
            let mut state = self.state.write();
            let state = &mut *state;
            if !input.category_id.trim().is_empty() && !state.tree.contains(&input.category_id) {
                return Err(AppError::with_message(
                    ErrorCode::CategoryNotFound,
                    format!("Category {} not found", input.category_id),
                ));
            }
            let product = state.products.create(input)?;
            state.tree.bump_products_count(&product.category_id, 1);
            let payload = product_payload(&state.tree, ProductEventKind::Created, &product);
            (product, payload)
        };
        self.events.emit(payload);
        Ok(product)
    }

    pub fn update_product(
        &self,
        actor: &Actor,
        id: &str,
        patch: ProductUpdate,
    ) -> AppResult<Product> {
        require(actor, Resource::Products, PermAction::Update)?;
        let (product, payload) = {
            let mut state = self.state.write();
            let state = &mut *state;

            let previous_category = state
                .products
                .find(id)
                .map(|p| p.category_id.clone())
                .ok_or_else(|| {
                    AppError::with_message(
                        ErrorCode::ProductNotFound,
                        format!("Product {} not found", id),
                    )
                })?;
            if let Some(new_category) = &patch.category_id
                && !state.tree.contains(new_category)
            {
                return Err(AppError::with_message(
                    ErrorCode::CategoryNotFound,
                    format!("Category {} not found", new_category),
                ));
            }

            let product = state.products.update(id, patch)?;
            if product.category_id != previous_category {
                state.tree.bump_products_count(&previous_category, -1);
                state.tree.bump_products_count(&product.category_id, 1);
            }
            let payload = product_payload(&state.tree, ProductEventKind::Updated, &product);
            (product, payload)
        };
        self.events.emit(payload);
        Ok(product)
    }

    pub fn delete_product(&self, actor: &Actor, id: &str) -> AppResult<Product> {
        require(actor, Resource::Products, PermAction::Delete)?;
        let (removed, payload) = {
            let mut state = self.state.write();
            let state = &mut *state;
            let removed = state.products.delete(id)?;
            state.tree.bump_products_count(&removed.category_id, -1);
            let payload = product_payload(&state.tree, ProductEventKind::Deleted, &removed);
            (removed, payload)
        };
        self.events.emit(payload);
        Ok(removed)
    }

    /// Add a product attribute from a raw delimited value string
    pub fn add_product_attribute(
        &self,
        actor: &Actor,
        product_id: &str,
        name: &str,
        raw_values: &str,
    ) -> AppResult<Product> {
        require(actor, Resource::Products, PermAction::Update)?;
        let (product, payload) = {
            let mut state = self.state.write();
            let state = &mut *state;
            let product = state.products.add_attribute(product_id, name, raw_values)?;
            let payload = product_payload(&state.tree, ProductEventKind::Updated, &product);
            (product, payload)
        };
        self.events.emit(payload);
        Ok(product)
    }

    pub fn remove_product_attribute(
        &self,
        actor: &Actor,
        product_id: &str,
        attribute_id: &str,
    ) -> AppResult<Product> {
        require(actor, Resource::Products, PermAction::Update)?;
        let (product, payload) = {
            let mut state = self.state.write();
            let state = &mut *state;
            let product = state.products.remove_attribute(product_id, attribute_id)?;
            let payload = product_payload(&state.tree, ProductEventKind::Updated, &product);
            (product, payload)
        };
        self.events.emit(payload);
        Ok(product)
    }

    // =========================================================================
    // Variants
    // =========================================================================

    pub fn add_variant(
        &self,
        actor: &Actor,
        product_id: &str,
        input: VariantCreate,
    ) -> AppResult<Variant> {
        require(actor, Resource::Variants, PermAction::Create)?;
        self.state.write().products.add_variant(
            product_id,
            input,
            self.config.default_low_stock_threshold,
            actor,
        )
    }

    pub fn update_variant(
        &self,
        actor: &Actor,
        product_id: &str,
        variant_id: &str,
        patch: VariantUpdate,
    ) -> AppResult<Variant> {
        require(actor, Resource::Variants, PermAction::Update)?;
        self.state
            .write()
            .products
            .update_variant(product_id, variant_id, patch, actor)
    }

    pub fn delete_variant(
        &self,
        actor: &Actor,
        product_id: &str,
        variant_id: &str,
    ) -> AppResult<Variant> {
        require(actor, Resource::Variants, PermAction::Delete)?;
        self.state.write().products.delete_variant(product_id, variant_id)
    }

    // =========================================================================
    // Stock
    // =========================================================================

    /// Apply a stock adjustment and append it to the ledger.
    ///
    /// The result is clamped at 0, and the ledger keeps the raw requested
    /// quantity next to the clamped before/after levels. Read, clamp,
    /// write and append run under one write lock, so `previous_stock` is
    /// exactly the level this adjustment replaced.
    pub fn adjust_stock(
        &self,
        actor: &Actor,
        product_id: &str,
        variant_id: &str,
        action: StockAction,
        quantity: i64,
        reason: &str,
    ) -> AppResult<StockHistoryEntry> {
        require(actor, Resource::Stock, PermAction::Update)?;
        if reason.trim().is_empty() {
            return Err(AppError::missing_fields(&["reason"]));
        }

        let mut state = self.state.write();
        let state = &mut *state;
        let (_, variant) = state.products.find_variant(product_id, variant_id)?;
        let previous = variant.stock;
        let new_stock = apply_action(previous, action, quantity);
        state.products.write_stock(product_id, variant_id, new_stock, actor)?;
        state
            .ledger
            .record(variant_id, action, previous, new_stock, quantity, reason, actor)
    }

    /// Whole adjustment history, newest first
    pub fn stock_history(&self, actor: &Actor) -> AppResult<Vec<StockHistoryEntry>> {
        require(actor, Resource::Stock, PermAction::Read)?;
        Ok(self.state.read().ledger.history().to_vec())
    }

    pub fn stock_history_for(
        &self,
        actor: &Actor,
        variant_id: &str,
    ) -> AppResult<Vec<StockHistoryEntry>> {
        require(actor, Resource::Stock, PermAction::Read)?;
        Ok(self.state.read().ledger.history_for(variant_id))
    }

    /// Variants at or below their threshold, out-of-stock included
    pub fn low_stock_report(&self, actor: &Actor) -> AppResult<Vec<Variant>> {
        require(actor, Resource::Stock, PermAction::Read)?;
        Ok(self.state.read().products.low_stock_variants())
    }

    // =========================================================================
    // Roles
    // =========================================================================

    /// The static role records; listing them is a management capability
    pub fn roles(&self, actor: &Actor) -> AppResult<Vec<Role>> {
        require(actor, Resource::Roles, PermAction::Manage)?;
        Ok(Role::defaults())
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    pub fn export_snapshot(&self, actor: &Actor) -> AppResult<CatalogSnapshot> {
        require(actor, Resource::Categories, PermAction::Read)?;
        require(actor, Resource::Products, PermAction::Read)?;
        require(actor, Resource::Stock, PermAction::Read)?;
        let state = self.state.read();
        Ok(CatalogSnapshot {
            categories: state.tree.roots().to_vec(),
            products: state.products.products().to_vec(),
            stock_history: state.ledger.history().to_vec(),
        })
    }

    /// Replace the whole catalog state with the snapshot's
    pub fn import_snapshot(&self, actor: &Actor, snapshot: CatalogSnapshot) -> AppResult<()> {
        require(actor, Resource::Categories, PermAction::Create)?;
        require(actor, Resource::Products, PermAction::Create)?;
        require(actor, Resource::Stock, PermAction::Update)?;
        *self.state.write() = CatalogState {
            tree: CategoryTree::from_roots(snapshot.categories),
            products: ProductStore::from_products(snapshot.products),
            ledger: StockLedger::from_entries(snapshot.stock_history),
        };
        tracing::info!("catalog snapshot imported");
        Ok(())
    }
}

fn product_payload(
    tree: &CategoryTree,
    kind: ProductEventKind,
    product: &Product,
) -> WebhookPayload {
    let category_name = tree
        .find(&product.category_id)
        .map(|n| n.name.clone())
        .unwrap_or_default();
    WebhookPayload::new(kind, WebhookProduct::from_product(product, &category_name))
}

fn collect_ids(node: &CategoryNode) -> Vec<String> {
    let mut ids = vec![node.id.clone()];
    for child in &node.children {
        ids.extend(collect_ids(child));
    }
    ids
}
