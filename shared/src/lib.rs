//! Shared types for the shop assistant
//!
//! Product/catalog models, chat payloads and the unified error system used
//! by the service and its tests.

pub mod error;
pub mod models;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};
