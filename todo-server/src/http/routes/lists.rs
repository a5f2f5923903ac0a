//! List endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    routing::get,
    Json, Router,
};
use todo_core::{ListFields, ListPayload, TodoList};

use crate::db::ListRepo;
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;

/// GET /lists - all lists, without items
async fn list_lists(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TodoList>>, ApiError> {
    let lists = ListRepo::new(&state.pool).list().await?;
    Ok(Json(lists))
}

/// POST /lists - create a list
async fn create_list(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<ListPayload>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<TodoList>), ApiError> {
    let fields = ListFields::try_from(payload)?;
    let list = ListRepo::new(&state.pool).create(fields).await?;
    let location = format!("/lists/{}", list.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(list)))
}

/// GET /lists/{list_id} - one list with its items
async fn get_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<String>,
) -> Result<Json<TodoList>, ApiError> {
    let list = ListRepo::new(&state.pool).get(&list_id).await?;
    Ok(Json(list))
}

/// PUT /lists/{list_id} - replace name and description
async fn update_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<String>,
    JsonBody(payload): JsonBody<ListPayload>,
) -> Result<Json<TodoList>, ApiError> {
    let fields = ListFields::try_from(payload)?;
    let list = ListRepo::new(&state.pool).update(&list_id, fields).await?;
    Ok(Json(list))
}

/// DELETE /lists/{list_id} - delete a list and its items; idempotent
async fn delete_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    ListRepo::new(&state.pool).delete(&list_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/lists", get(list_lists).post(create_list))
        .route(
            "/lists/{list_id}",
            get(get_list).put(update_list).delete(delete_list),
        )
}
