//! Admin catalog management.
//!
//! GET    /admin/bouquets                       - All bouquets, inactive included
//! POST   /admin/bouquets                       - Create a bouquet
//! PUT    /admin/bouquets/{id}                  - Partial update
//! DELETE /admin/bouquets/{id}                  - Delete
//! POST   /admin/bouquets/{id}/toggle-active    - Flip visibility
//! POST   /admin/bouquets/{id}/toggle-featured  - Flip the featured flag
//! GET    /admin/options/{kind}                 - All options of one kind
//! POST   /admin/options/{kind}                 - Create an option
//! PUT    /admin/options/{kind}/{id}            - Partial update
//! DELETE /admin/options/{kind}/{id}            - Delete
//! POST   /admin/options/{kind}/{id}/toggle     - Flip availability
//!
//! `kind` is one of `flowers`, `colors`, `sizes` or `complements`.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use tracing::info;
use uuid::Uuid;

use crate::db::SharedStore;
use crate::error::{AppError, AppResult};
use crate::models::{
    Bouquet, BouquetFlag, BouquetPatch, CatalogOption, CustomizationOptions, NewBouquet,
    NewOption, OptionKind, OptionPatch,
};

pub fn router() -> Router {
    Router::new()
        .route("/admin/bouquets", get(list_bouquets).post(create_bouquet))
        .route(
            "/admin/bouquets/{id}",
            put(update_bouquet).delete(delete_bouquet),
        )
        .route("/admin/bouquets/{id}/toggle-active", post(toggle_active))
        .route("/admin/bouquets/{id}/toggle-featured", post(toggle_featured))
        .route("/admin/options/{kind}", get(list_options).post(create_option))
        .route(
            "/admin/options/{kind}/{id}",
            put(update_option).delete(delete_option),
        )
        .route("/admin/options/{kind}/{id}/toggle", post(toggle_option))
}

// ============================================================================
// Bouquets
// ============================================================================

async fn list_bouquets(Extension(store): Extension<SharedStore>) -> AppResult<Json<Vec<Bouquet>>> {
    Ok(Json(store.list_bouquets(true).await?))
}

async fn create_bouquet(
    Extension(store): Extension<SharedStore>,
    Json(req): Json<NewBouquet>,
) -> AppResult<(StatusCode, Json<Bouquet>)> {
    req.validate().map_err(AppError::Validation)?;
    let bouquet = store.create_bouquet(req).await?;
    Ok((StatusCode::CREATED, Json(bouquet)))
}

async fn update_bouquet(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<Uuid>,
    Json(patch): Json<BouquetPatch>,
) -> AppResult<Json<Bouquet>> {
    patch.validate().map_err(AppError::Validation)?;
    store
        .update_bouquet(id, patch)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("bouquet"))
}

async fn delete_bouquet(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !store.delete_bouquet(id).await? {
        return Err(AppError::NotFound("bouquet"));
    }
    info!("Bouquet {} deleted", id);
    Ok(StatusCode::NO_CONTENT)
}

async fn toggle_bouquet(store: &SharedStore, id: Uuid, flag: BouquetFlag) -> AppResult<Json<Bouquet>> {
    store
        .toggle_bouquet(id, flag)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("bouquet"))
}

async fn toggle_active(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Bouquet>> {
    toggle_bouquet(&store, id, BouquetFlag::Active).await
}

async fn toggle_featured(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Bouquet>> {
    toggle_bouquet(&store, id, BouquetFlag::Featured).await
}

// ============================================================================
// Customization options
// ============================================================================

/// One kind's list, in display order.
fn options_of_kind(options: CustomizationOptions, kind: OptionKind) -> Vec<CatalogOption> {
    match kind {
        OptionKind::Flowers => options.flowers.into_iter().map(CatalogOption::Flower).collect(),
        OptionKind::Colors => options.colors.into_iter().map(CatalogOption::Color).collect(),
        OptionKind::Sizes => options.sizes.into_iter().map(CatalogOption::Size).collect(),
        OptionKind::Complements => options
            .complements
            .into_iter()
            .map(CatalogOption::Complement)
            .collect(),
    }
}

async fn list_options(
    Extension(store): Extension<SharedStore>,
    Path(kind): Path<OptionKind>,
) -> AppResult<Json<Vec<CatalogOption>>> {
    let options = store.customization_options(true).await?;
    Ok(Json(options_of_kind(options, kind)))
}

async fn create_option(
    Extension(store): Extension<SharedStore>,
    Path(kind): Path<OptionKind>,
    Json(req): Json<NewOption>,
) -> AppResult<(StatusCode, Json<CatalogOption>)> {
    let draft = req.into_draft(kind).map_err(AppError::Validation)?;
    let option = store.create_option(draft).await?;
    Ok((StatusCode::CREATED, Json(option)))
}

async fn update_option(
    Extension(store): Extension<SharedStore>,
    Path((kind, id)): Path<(OptionKind, Uuid)>,
    Json(patch): Json<OptionPatch>,
) -> AppResult<Json<CatalogOption>> {
    patch.validate().map_err(AppError::Validation)?;
    store
        .update_option(kind, id, patch)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("option"))
}

async fn delete_option(
    Extension(store): Extension<SharedStore>,
    Path((kind, id)): Path<(OptionKind, Uuid)>,
) -> AppResult<StatusCode> {
    if !store.delete_option(kind, id).await? {
        return Err(AppError::NotFound("option"));
    }
    info!("Deleted {} option {}", kind, id);
    Ok(StatusCode::NO_CONTENT)
}

async fn toggle_option(
    Extension(store): Extension<SharedStore>,
    Path((kind, id)): Path<(OptionKind, Uuid)>,
) -> AppResult<Json<CatalogOption>> {
    store
        .toggle_option(kind, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("option"))
}
