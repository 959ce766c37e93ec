//! Service-layer error type
//!
//! `ServiceError` bridges component errors (`CatalogError`, `CompletionError`)
//! and the API-layer error (`AppError`), so handlers can use `?` directly.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::services::catalog::CatalogError;
use crate::services::completion::CompletionError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Product source unreachable, failing or malformed
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// Completion provider failure
    #[error(transparent)]
    Completion(#[from] CompletionError),
    /// Request-level error (already an AppError with the correct ErrorCode)
    #[error(transparent)]
    App(#[from] AppError),
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Catalog(err) => {
                tracing::error!(error = %err, "Product source error");
                let app_err = match &err {
                    CatalogError::Decode(_) => AppError::new(ErrorCode::CatalogMalformed),
                    CatalogError::Status(status) => AppError::new(ErrorCode::CatalogUnavailable)
                        .with_detail("status", status.as_u16()),
                    CatalogError::Request(_) => AppError::new(ErrorCode::CatalogUnavailable),
                };
                app_err.with_detail("cause", err.to_string())
            }
            ServiceError::Completion(err) => {
                tracing::error!(error = %err, "Completion provider error");
                let code = match &err {
                    CompletionError::Malformed(_) | CompletionError::NoChoices => {
                        ErrorCode::CompletionMalformed
                    }
                    _ => ErrorCode::CompletionFailed,
                };
                AppError::new(code).with_detail("cause", err.to_string())
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;
