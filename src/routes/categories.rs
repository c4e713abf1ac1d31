//! Customization category routes.
//!
//! GET    /categories       - Active categories with their active options
//! POST   /categories       - Create a category
//! PUT    /categories       - Update a category by the `id` in the body
//! DELETE /categories?id=   - Delete a category and its options

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::db::SharedStore;
use crate::error::{AppError, AppResult};
use crate::models::{CustomizationCategory, NewCategory, UpdateCategory};

pub fn router() -> Router {
    Router::new().route(
        "/categories",
        get(list_categories)
            .post(create_category)
            .put(update_category)
            .delete(delete_category),
    )
}

#[derive(Debug, Deserialize)]
struct DeleteQuery {
    id: Option<Uuid>,
}

async fn list_categories(
    Extension(store): Extension<SharedStore>,
) -> AppResult<Json<Vec<CustomizationCategory>>> {
    Ok(Json(store.list_categories().await?))
}

async fn create_category(
    Extension(store): Extension<SharedStore>,
    Json(req): Json<NewCategory>,
) -> AppResult<(StatusCode, Json<CustomizationCategory>)> {
    req.validate().map_err(AppError::Validation)?;
    let category = store.create_category(req).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn update_category(
    Extension(store): Extension<SharedStore>,
    Json(req): Json<UpdateCategory>,
) -> AppResult<Json<CustomizationCategory>> {
    req.validate().map_err(AppError::Validation)?;
    store
        .update_category(req)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("category"))
}

async fn delete_category(
    Extension(store): Extension<SharedStore>,
    Query(query): Query<DeleteQuery>,
) -> AppResult<StatusCode> {
    let id = query
        .id
        .ok_or_else(|| AppError::Validation("id is required".to_string()))?;
    if !store.delete_category(id).await? {
        return Err(AppError::NotFound("category"));
    }
    info!("Customization category {} deleted", id);
    Ok(StatusCode::NO_CONTENT)
}
