//! Data models
//!
//! Shared between the assistant service and its clients (via API).
//! Product fields keep the upstream camelCase wire names.

pub mod chat;
pub mod product;

// Re-exports
pub use chat::*;
pub use product::*;
