//! Stock Ledger
//!
//! Append-only history of stock adjustments, newest first. Entries record
//! the raw operator quantity alongside the before/after levels, so a
//! clamped adjustment stays visible as such.

use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use shared::models::{StockAction, StockHistoryEntry};
use shared::types::Actor;
use shared::util;

/// Apply a stock action to the current level and clamp the floor at 0.
///
/// Negative quantities are accepted as-is (an `add` of -3 behaves like a
/// remove); the clamp handles whatever falls below zero.
// TODO: thread the product's allow_negative_stock flag through so the
// clamp can be skipped for backorder-enabled products
pub fn apply_action(current: i64, action: StockAction, quantity: i64) -> i64 {
    let next = match action {
        StockAction::Add => current.saturating_add(quantity),
        StockAction::Remove => current.saturating_sub(quantity),
        StockAction::Set => quantity,
    };
    next.max(0)
}

/// In-memory adjustment history, newest entry first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockLedger {
    entries: Vec<StockHistoryEntry>,
}

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<StockHistoryEntry>) -> Self {
        Self { entries }
    }

    /// Record an adjustment. `reason` must be non-empty; `quantity` is
    /// stored untouched even when the resulting level was clamped.
    pub fn record(
        &mut self,
        variant_id: &str,
        action: StockAction,
        previous_stock: i64,
        new_stock: i64,
        quantity: i64,
        reason: &str,
        actor: &Actor,
    ) -> AppResult<StockHistoryEntry> {
        if reason.trim().is_empty() {
            return Err(AppError::missing_fields(&["reason"]));
        }
        let entry = StockHistoryEntry {
            id: util::prefixed_id("hist"),
            variant_id: variant_id.to_string(),
            action,
            previous_stock,
            new_stock,
            quantity,
            reason: reason.trim().to_string(),
            date: util::now_millis(),
            author: actor.name.clone(),
        };
        tracing::info!(
            variant = %entry.variant_id,
            action = %entry.action,
            previous = entry.previous_stock,
            new = entry.new_stock,
            "stock adjusted"
        );
        // newest first
        self.entries.insert(0, entry.clone());
        Ok(entry)
    }

    /// Full history, newest first
    pub fn history(&self) -> &[StockHistoryEntry] {
        &self.entries
    }

    /// History restricted to one variant, newest first
    pub fn history_for(&self, variant_id: &str) -> Vec<StockHistoryEntry> {
        self.entries
            .iter()
            .filter(|e| e.variant_id == variant_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::RoleName;

    fn actor() -> Actor {
        Actor::new(RoleName::Manager, "Sarah Manager")
    }

    #[test]
    fn test_apply_add_remove_set() {
        assert_eq!(apply_action(10, StockAction::Add, 5), 15);
        assert_eq!(apply_action(10, StockAction::Remove, 4), 6);
        assert_eq!(apply_action(10, StockAction::Set, 42), 42);
    }

    #[test]
    fn test_apply_clamps_at_zero() {
        assert_eq!(apply_action(8, StockAction::Remove, 10), 0);
        assert_eq!(apply_action(0, StockAction::Remove, 1), 0);
        assert_eq!(apply_action(3, StockAction::Set, -7), 0);
        assert_eq!(apply_action(2, StockAction::Add, -5), 0);
    }

    #[test]
    fn test_record_keeps_raw_quantity_when_clamped() {
        let mut ledger = StockLedger::new();
        let new_stock = apply_action(8, StockAction::Remove, 10);
        let entry = ledger
            .record("var-1", StockAction::Remove, 8, new_stock, 10, "Casse", &actor())
            .unwrap();
        assert_eq!(entry.previous_stock, 8);
        assert_eq!(entry.new_stock, 0);
        assert_eq!(entry.quantity, 10);
        // the three numbers deliberately do not reconcile
        assert_ne!(entry.previous_stock - entry.quantity, entry.new_stock);
    }

    #[test]
    fn test_record_requires_reason() {
        let mut ledger = StockLedger::new();
        let err = ledger
            .record("var-1", StockAction::Add, 0, 5, 5, "  ", &actor())
            .unwrap_err();
        assert_eq!(err.code, shared::error::ErrorCode::ValidationFailed);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_history_newest_first() {
        let mut ledger = StockLedger::new();
        ledger
            .record("var-1", StockAction::Add, 0, 5, 5, "Réception", &actor())
            .unwrap();
        ledger
            .record("var-1", StockAction::Remove, 5, 3, 2, "Vente", &actor())
            .unwrap();
        assert_eq!(ledger.history()[0].reason, "Vente");
        assert_eq!(ledger.history()[1].reason, "Réception");
    }

    #[test]
    fn test_history_for_filters_by_variant() {
        let mut ledger = StockLedger::new();
        ledger
            .record("var-1", StockAction::Add, 0, 5, 5, "Réception", &actor())
            .unwrap();
        ledger
            .record("var-2", StockAction::Add, 0, 3, 3, "Réception", &actor())
            .unwrap();
        let entries = ledger.history_for("var-2");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].variant_id, "var-2");
    }
}
