//! Chat endpoint payloads

use serde::{Deserialize, Serialize};

/// POST /api/chat request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// POST /api/chat response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}
