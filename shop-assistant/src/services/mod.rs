//! Retrieval and completion services

pub mod catalog;
pub mod chat;
pub mod completion;
pub mod matcher;
pub mod prompt;

pub use catalog::{CatalogCache, CatalogError, HttpProductSource, ProductSource};
pub use chat::ChatService;
pub use completion::{CompletionClient, CompletionError, GroqClient};
