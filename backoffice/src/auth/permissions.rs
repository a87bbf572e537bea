//! Permission Definitions
//!
//! Static RBAC matrix consulted before every operation. The table lives in
//! [`Role::defaults`]; this module is the pure lookup over
//! `(role, resource, action)`. No hierarchical or per-object permissions
//! exist.

use shared::error::AppError;
use shared::models::{PermissionSet, Role, RoleName};
use shared::types::Actor;
use std::fmt;

/// Gated resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Categories,
    Products,
    Variants,
    Stock,
    Filters,
    Roles,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Categories => write!(f, "categories"),
            Self::Products => write!(f, "products"),
            Self::Variants => write!(f, "variants"),
            Self::Stock => write!(f, "stock"),
            Self::Filters => write!(f, "filters"),
            Self::Roles => write!(f, "roles"),
        }
    }
}

/// Gated actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermAction {
    Create,
    Read,
    Update,
    Delete,
    Manage,
}

impl fmt::Display for PermAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Read => write!(f, "read"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::Manage => write!(f, "manage"),
        }
    }
}

fn crud_flag(
    flags: &shared::models::CrudFlags,
    action: PermAction,
) -> bool {
    match action {
        PermAction::Create => flags.create,
        PermAction::Read => flags.read,
        PermAction::Update => flags.update,
        PermAction::Delete => flags.delete,
        PermAction::Manage => false,
    }
}

fn lookup(permissions: &PermissionSet, resource: Resource, action: PermAction) -> bool {
    match resource {
        Resource::Categories => crud_flag(&permissions.categories, action),
        Resource::Products => crud_flag(&permissions.products, action),
        Resource::Variants => crud_flag(&permissions.variants, action),
        Resource::Filters => crud_flag(&permissions.filters, action),
        // Stock exposes read/update only
        Resource::Stock => match action {
            PermAction::Read => permissions.stock.read,
            PermAction::Update => permissions.stock.update,
            _ => false,
        },
        // Roles expose a single manage capability
        Resource::Roles => matches!(action, PermAction::Manage) && permissions.roles.manage,
    }
}

/// Resolve whether `role` may perform `action` on `resource`
pub fn can_perform(role: RoleName, resource: Resource, action: PermAction) -> bool {
    lookup(&Role::resolve(role).permissions, resource, action)
}

/// Gate an operation: `PermissionDenied` unless the actor's role allows it
pub fn require(actor: &Actor, resource: Resource, action: PermAction) -> Result<(), AppError> {
    if can_perform(actor.role, resource, action) {
        Ok(())
    } else {
        tracing::debug!(
            role = %actor.role,
            resource = %resource,
            action = %action,
            "permission denied"
        );
        Err(AppError::permission_denied(format!(
            "role '{}' cannot {} {}",
            actor.role, action, resource
        )))
    }
}
