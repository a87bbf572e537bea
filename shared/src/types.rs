//! Common types for the shared crate

use crate::models::RoleName;
use serde::{Deserialize, Serialize};

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Acting identity attached to every mutating command.
///
/// Supplied by the caller (UI or API layer); the transport is responsible
/// for resolving and attaching the role before invoking the services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub role: RoleName,
    /// Display name recorded in audit fields (`updated_by`, ledger `author`)
    pub name: String,
}

impl Actor {
    pub fn new(role: RoleName, name: impl Into<String>) -> Self {
        Self {
            role,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.role)
    }
}
