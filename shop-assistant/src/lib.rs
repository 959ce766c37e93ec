//! shop-assistant - product question answering over a cached catalog
//!
//! A free-text question is matched against the product catalog (fetched once
//! from the product source and kept in memory), the best matches are rendered
//! into a prompt, and a hosted chat-completion model writes the answer.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

pub use api::create_router;
pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use state::AppState;
