use axum::http::{Method, Uri};
use service_core::error::AppError;

pub const CONFIRMATION_MESSAGE: &str = "Node + MongoDB Running Successfully! 🚀";

/// `GET /`: fixed confirmation text, independent of store state.
pub async fn index() -> &'static str {
    CONFIRMATION_MESSAGE
}

pub async fn not_found(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("Cannot {} {}", method, uri.path()))
}
