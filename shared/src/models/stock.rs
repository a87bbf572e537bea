//! Stock ledger Model

use crate::types::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stock adjustment action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockAction {
    /// Increase by quantity
    Add,
    /// Decrease by quantity
    Remove,
    /// Overwrite with quantity
    Set,
}

impl fmt::Display for StockAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Remove => write!(f, "remove"),
            Self::Set => write!(f, "set"),
        }
    }
}

/// One audited stock adjustment. Immutable once created.
///
/// `quantity` is the raw operator input, NOT the delta actually applied:
/// when the result is clamped to 0, `previous_stock + quantity` does not
/// equal `new_stock`. Downstream consumers rely on the raw value being
/// retained, so the three numbers are never reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockHistoryEntry {
    pub id: String,
    pub variant_id: String,
    pub action: StockAction,
    pub previous_stock: i64,
    pub new_stock: i64,
    pub quantity: i64,
    pub reason: String,
    pub date: Timestamp,
    pub author: String,
}
