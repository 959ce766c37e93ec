//! Unified error system for the shop assistant
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Error response envelope
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::EmptyMessage);
//!
//! let err = AppError::with_message(ErrorCode::CatalogUnavailable, "product source returned 503")
//!     .with_detail("status", 503);
//!
//! let response = ApiResponse::error(&err);
//! assert_eq!(response.code, 6001);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError};
