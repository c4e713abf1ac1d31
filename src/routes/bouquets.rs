//! Public bouquet routes.
//!
//! GET /bouquets?category=     - Active bouquets, optionally one category
//! GET /bouquets/categories    - Distinct category labels
//! GET /bouquets/featured      - Featured active bouquets
//! GET /bouquets/{id}          - One active bouquet
//! GET /bouquets/{id}/quote    - Price and order message for a bouquet and size

use axum::extract::{Path, Query};
use axum::routing::get;
use axum::{Extension, Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::settings_or_default;
use crate::catalog::{bouquet_categories, featured_bouquets, filter_bouquets, Catalog};
use crate::customization::resolve_price;
use crate::db::SharedStore;
use crate::error::{AppError, AppResult};
use crate::messaging::{format_bouquet_message, whatsapp_link};
use crate::models::Bouquet;

pub fn router() -> Router {
    Router::new()
        .route("/bouquets", get(list_bouquets))
        .route("/bouquets/categories", get(list_categories))
        .route("/bouquets/featured", get(list_featured))
        .route("/bouquets/{id}", get(get_bouquet))
        .route("/bouquets/{id}/quote", get(quote_bouquet))
}

#[derive(Debug, Deserialize)]
struct CategoryQuery {
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteQuery {
    size_id: Option<Uuid>,
}

/// Price of a ready-made bouquet plus the message to send the shop.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BouquetQuote {
    pub bouquet_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_name: Option<String>,
    pub price: Decimal,
    pub message: String,
    pub whatsapp_link: String,
}

async fn list_bouquets(
    Extension(store): Extension<SharedStore>,
    Query(query): Query<CategoryQuery>,
) -> AppResult<Json<Vec<Bouquet>>> {
    let bouquets = store.list_bouquets(false).await?;
    let category = query.category.as_deref().filter(|c| !c.is_empty());
    Ok(Json(
        filter_bouquets(&bouquets, category)
            .into_iter()
            .cloned()
            .collect(),
    ))
}

async fn list_categories(
    Extension(store): Extension<SharedStore>,
) -> AppResult<Json<Vec<String>>> {
    let bouquets = store.list_bouquets(false).await?;
    Ok(Json(bouquet_categories(&bouquets)))
}

async fn list_featured(Extension(store): Extension<SharedStore>) -> AppResult<Json<Vec<Bouquet>>> {
    let bouquets = store.list_bouquets(false).await?;
    Ok(Json(featured_bouquets(&bouquets).into_iter().cloned().collect()))
}

async fn active_bouquet(store: &SharedStore, id: Uuid) -> AppResult<Bouquet> {
    store
        .get_bouquet(id)
        .await?
        .filter(|b| b.active)
        .ok_or(AppError::NotFound("bouquet"))
}

async fn get_bouquet(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Bouquet>> {
    Ok(Json(active_bouquet(&store, id).await?))
}

/// Quote a bouquet. An unknown or inactive size id quotes the base price.
async fn quote_bouquet(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<Uuid>,
    Query(query): Query<QuoteQuery>,
) -> AppResult<Json<BouquetQuote>> {
    let bouquet = active_bouquet(&store, id).await?;
    let catalog = Catalog::from_options(store.customization_options(false).await?);
    let size = query.size_id.and_then(|size_id| catalog.size(size_id));

    let price = resolve_price(&bouquet, size);
    let message = format_bouquet_message(&bouquet, size, price);
    let settings = settings_or_default(&store).await;

    Ok(Json(BouquetQuote {
        bouquet_id: bouquet.id,
        size_id: size.map(|s| s.id),
        size_name: size.map(|s| s.name.clone()),
        price,
        whatsapp_link: whatsapp_link(&settings.whatsapp_number, &message),
        message,
    }))
}
