//! Role Model (RBAC)
//!
//! One record per role name; a caller's effective capability set is
//! resolved by looking up their role name. The matrix is global per role,
//! with no hierarchical or per-object permissions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three operator roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    Admin,
    Manager,
    Reader,
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Manager => write!(f, "manager"),
            Self::Reader => write!(f, "reader"),
        }
    }
}

/// Per-resource CRUD capability flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrudFlags {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
}

impl CrudFlags {
    pub const fn all() -> Self {
        Self {
            create: true,
            read: true,
            update: true,
            delete: true,
        }
    }

    pub const fn read_only() -> Self {
        Self {
            create: false,
            read: true,
            update: false,
            delete: false,
        }
    }
}

/// Stock has no create/delete; adjustments are updates over existing variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockFlags {
    pub read: bool,
    pub update: bool,
}

/// Role administration is a single manage capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFlags {
    pub manage: bool,
}

/// Full capability matrix for one role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    pub categories: CrudFlags,
    pub products: CrudFlags,
    pub variants: CrudFlags,
    pub stock: StockFlags,
    pub filters: CrudFlags,
    pub roles: RoleFlags,
}

/// Role entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: RoleName,
    pub permissions: PermissionSet,
}

impl Role {
    /// The static role table. Exactly one record per role name.
    ///
    /// Data-driven so new roles/resources stay additive.
    pub fn defaults() -> Vec<Role> {
        vec![
            Role {
                id: "r1".into(),
                name: RoleName::Admin,
                permissions: PermissionSet {
                    categories: CrudFlags::all(),
                    products: CrudFlags::all(),
                    variants: CrudFlags::all(),
                    stock: StockFlags {
                        read: true,
                        update: true,
                    },
                    filters: CrudFlags::all(),
                    roles: RoleFlags { manage: true },
                },
            },
            Role {
                id: "r2".into(),
                name: RoleName::Manager,
                permissions: PermissionSet {
                    categories: CrudFlags::all(),
                    products: CrudFlags::all(),
                    variants: CrudFlags::all(),
                    stock: StockFlags {
                        read: true,
                        update: true,
                    },
                    filters: CrudFlags::all(),
                    roles: RoleFlags { manage: false },
                },
            },
            Role {
                id: "r3".into(),
                name: RoleName::Reader,
                permissions: PermissionSet {
                    categories: CrudFlags::read_only(),
                    products: CrudFlags::read_only(),
                    variants: CrudFlags::read_only(),
                    stock: StockFlags {
                        read: true,
                        update: false,
                    },
                    filters: CrudFlags::read_only(),
                    roles: RoleFlags { manage: false },
                },
            },
        ]
    }

    /// Look up a role record by name in the static table
    pub fn resolve(name: RoleName) -> Role {
        Role::defaults()
            .into_iter()
            .find(|r| r.name == name)
            .expect("static role table covers every RoleName")
    }
}
