//! Customizer routes.
//!
//! GET  /customizations            - Active option lists in display order
//! POST /customizations/quote      - Price, summary and message for a selection
//! POST /customizations/selection  - Apply one reducer action and re-quote

use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::settings_or_default;
use crate::catalog::Catalog;
use crate::customization::{build_order_summary, compute_total, OrderSummary, Selection, SelectionAction};
use crate::db::SharedStore;
use crate::error::AppResult;
use crate::messaging::{format_message, whatsapp_link};
use crate::models::CustomizationOptions;

pub fn router() -> Router {
    Router::new()
        .route("/customizations", get(list_options))
        .route("/customizations/quote", post(quote_selection))
        .route("/customizations/selection", post(apply_action))
}

/// Everything the customizer shows for the current selection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionQuote {
    /// At least one flower is selected.
    pub valid: bool,
    pub total: Decimal,
    pub total_flowers: u64,
    pub summary: OrderSummary,
    pub summary_text: String,
    pub message: String,
    pub whatsapp_link: String,
}

impl SelectionQuote {
    pub fn build(selection: &Selection, catalog: &Catalog, contact_number: &str) -> Self {
        let total = compute_total(selection, catalog);
        let summary = build_order_summary(selection, catalog);
        let message = format_message(selection, catalog, total);
        Self {
            valid: selection.is_valid(),
            total,
            total_flowers: selection.total_flowers(),
            summary_text: summary.to_string(),
            summary,
            whatsapp_link: whatsapp_link(contact_number, &message),
            message,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ActionRequest {
    #[serde(default)]
    selection: Selection,
    action: SelectionAction,
}

#[derive(Debug, Serialize)]
struct ActionResponse {
    selection: Selection,
    quote: SelectionQuote,
}

async fn list_options(
    Extension(store): Extension<SharedStore>,
) -> AppResult<Json<CustomizationOptions>> {
    let options = store.customization_options(false).await?;
    Ok(Json(Catalog::from_options(options).to_options()))
}

async fn active_catalog(store: &SharedStore) -> AppResult<Catalog> {
    Ok(Catalog::from_options(store.customization_options(false).await?))
}

async fn quote_selection(
    Extension(store): Extension<SharedStore>,
    Json(selection): Json<Selection>,
) -> AppResult<Json<SelectionQuote>> {
    let catalog = active_catalog(&store).await?;
    let settings = settings_or_default(&store).await;
    Ok(Json(SelectionQuote::build(
        &selection,
        &catalog,
        &settings.whatsapp_number,
    )))
}

async fn apply_action(
    Extension(store): Extension<SharedStore>,
    Json(req): Json<ActionRequest>,
) -> AppResult<Json<ActionResponse>> {
    let selection = req.selection.reduce(req.action);
    let catalog = active_catalog(&store).await?;
    let settings = settings_or_default(&store).await;
    let quote = SelectionQuote::build(&selection, &catalog, &settings.whatsapp_number);
    Ok(Json(ActionResponse { selection, quote }))
}
