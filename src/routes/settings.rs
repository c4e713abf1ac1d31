//! Site settings routes.
//!
//! GET /settings       - Current settings, defaults when unavailable
//! PUT /admin/settings - Partial update

use axum::routing::{get, put};
use axum::{Extension, Json, Router};

use super::settings_or_default;
use crate::db::SharedStore;
use crate::error::{AppError, AppResult};
use crate::models::{SettingsPatch, SiteSettings};

pub fn router() -> Router {
    Router::new()
        .route("/settings", get(get_settings))
        .route("/admin/settings", put(update_settings))
}

async fn get_settings(Extension(store): Extension<SharedStore>) -> Json<SiteSettings> {
    Json(settings_or_default(&store).await)
}

async fn update_settings(
    Extension(store): Extension<SharedStore>,
    Json(patch): Json<SettingsPatch>,
) -> AppResult<Json<SiteSettings>> {
    patch.validate().map_err(AppError::Validation)?;
    Ok(Json(store.update_settings(patch).await?))
}
