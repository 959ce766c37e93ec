//! Unified error codes for the shop assistant
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 6xxx: Catalog errors (product source)
//! - 7xxx: Assistant errors (chat pipeline, completion provider)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they serialize as plain
/// JSON numbers for the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Request body failed validation
    ValidationFailed = 2,

    // ==================== 6xxx: Catalog ====================
    /// Product source unreachable or returned a non-success status
    CatalogUnavailable = 6001,
    /// Product source returned a payload that is not a catalog
    CatalogMalformed = 6002,

    // ==================== 7xxx: Assistant ====================
    /// Chat message is empty or whitespace-only
    EmptyMessage = 7001,
    /// Completion provider call failed
    CompletionFailed = 7002,
    /// Completion provider returned no usable choice
    CompletionMalformed = 7003,

    // ==================== 9xxx: System ====================
    /// Missing or invalid configuration
    ConfigError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",

            // Catalog
            ErrorCode::CatalogUnavailable => "Error fetching products",
            ErrorCode::CatalogMalformed => "Product source returned an invalid catalog",

            // Assistant
            ErrorCode::EmptyMessage => "Message cannot be empty",
            ErrorCode::CompletionFailed => "Error generating response",
            ErrorCode::CompletionMalformed => "Completion provider returned no answer",

            // System
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ErrorCode::ValidationFailed),

            // Catalog
            6001 => Ok(ErrorCode::CatalogUnavailable),
            6002 => Ok(ErrorCode::CatalogMalformed),

            // Assistant
            7001 => Ok(ErrorCode::EmptyMessage),
            7002 => Ok(ErrorCode::CompletionFailed),
            7003 => Ok(ErrorCode::CompletionMalformed),

            // System
            9002 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
