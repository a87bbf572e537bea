//! Authorization: the static role -> capability matrix

pub mod permissions;

pub use permissions::{PermAction, Resource, can_perform, require};
