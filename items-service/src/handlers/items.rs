use crate::models::Item;
use crate::services::record_items_listed;
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;

/// `GET /items`: the whole collection, no filter, no paging.
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, AppError> {
    let items = state.store.find_all().await?;
    tracing::debug!(count = items.len(), "Listed items");
    record_items_listed(items.len());
    Ok(Json(items))
}
