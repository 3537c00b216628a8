use crate::app_state::AppState;
use crate::domain::{Item, NewItem};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// Handler for creating an item (POST /items).
///
/// Expects `{name, description?}` in the request body and responds with
/// `201 Created` and the stored row, including its assigned id.
#[tracing::instrument(skip(state, new_item))]
pub async fn create_item(
    State(state): State<AppState>,
    Json(new_item): Json<NewItem>,
) -> Result<(StatusCode, Json<Item>), StatusCode> {
    // ---
    let item = state
        .repository()
        .create_item(new_item)
        .await
        .map_err(|err| {
            tracing::error!("failed to create item: {err:#}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for listing all items (GET /items).
#[tracing::instrument(skip(state))]
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, StatusCode> {
    // ---
    let items = state.repository().list_items().await.map_err(|err| {
        tracing::error!("failed to list items: {err:#}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(items))
}

/// Handler for fetching one item by id (GET /items/{item_id}).
///
/// Responds `404 Not Found` when no row exists for the id.
#[tracing::instrument(skip(state))]
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<i32>,
) -> Result<Json<Item>, StatusCode> {
    // ---
    let item = state
        .repository()
        .get_item(item_id)
        .await
        .map_err(|err| {
            tracing::error!("failed to fetch item {item_id}: {err:#}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(item))
}

/// Handler for deleting an item by id (DELETE /items/{item_id}).
///
/// Responds `204 No Content` on success, `404 Not Found` when no row
/// existed for the id.
#[tracing::instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<i32>,
) -> Result<StatusCode, StatusCode> {
    // ---
    let deleted = state
        .repository()
        .delete_item(item_id)
        .await
        .map_err(|err| {
            tracing::error!("failed to delete item {item_id}: {err:#}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}
