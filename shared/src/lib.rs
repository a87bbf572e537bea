//! Shared types for the back-office catalog core
//!
//! Data models, the unified error system, and utility types used by the
//! `backoffice` services and by whatever presentation layer embeds them.

pub mod error;
pub mod models;
pub mod types;
pub mod util;
pub mod webhook;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use types::{Actor, Timestamp};
