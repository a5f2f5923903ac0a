//! Item endpoints, nested under their list

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use todo_core::{ItemFields, ItemPayload, TodoItem};

use crate::db::ItemRepo;
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;

/// GET /lists/{list_id}/items - items of a list
async fn list_items(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<String>,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    let items = ItemRepo::new(&state.pool).list_for(&list_id).await?;
    Ok(Json(items))
}

/// POST /lists/{list_id}/items - create an item; 404 when the list is absent
async fn create_item(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<String>,
    JsonBody(payload): JsonBody<ItemPayload>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<TodoItem>), ApiError> {
    let fields = ItemFields::from_payload(payload, Utc::now())?;
    let item = ItemRepo::new(&state.pool).create(&list_id, fields).await?;
    let location = format!("/lists/{}/items/{}", list_id, item.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(item)))
}

/// GET /lists/{list_id}/items/{item_id}
async fn get_item(
    State(state): State<Arc<AppState>>,
    Path((list_id, item_id)): Path<(String, String)>,
) -> Result<Json<TodoItem>, ApiError> {
    let item = ItemRepo::new(&state.pool).get(&list_id, &item_id).await?;
    Ok(Json(item))
}

/// PUT /lists/{list_id}/items/{item_id} - full replace of mutable fields
async fn update_item(
    State(state): State<Arc<AppState>>,
    Path((list_id, item_id)): Path<(String, String)>,
    JsonBody(payload): JsonBody<ItemPayload>,
) -> Result<Json<TodoItem>, ApiError> {
    let fields = ItemFields::from_payload(payload, Utc::now())?;
    let item = ItemRepo::new(&state.pool)
        .update(&list_id, &item_id, fields)
        .await?;
    Ok(Json(item))
}

/// DELETE /lists/{list_id}/items/{item_id} - idempotent
async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path((list_id, item_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    ItemRepo::new(&state.pool).delete(&list_id, &item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/lists/{list_id}/items", get(list_items).post(create_item))
        .route(
            "/lists/{list_id}/items/{item_id}",
            get(get_item).put(update_item).delete(delete_item),
        )
}
