//! Admin reporting routes.
//!
//! GET /admin/reports?period=7|30|90 - Sales report for the trailing period
//! GET /admin/dashboard              - Catalog counters

use axum::extract::Query;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::db::SharedStore;
use crate::error::{AppError, AppResult};
use crate::reports::{DashboardStats, SalesReport};

const PERIODS: [u32; 3] = [7, 30, 90];
const DEFAULT_PERIOD: u32 = 30;

pub fn router() -> Router {
    Router::new()
        .route("/admin/reports", get(sales_report))
        .route("/admin/dashboard", get(dashboard))
}

#[derive(Debug, Deserialize)]
struct ReportQuery {
    period: Option<u32>,
}

async fn sales_report(
    Extension(store): Extension<SharedStore>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<SalesReport>> {
    let period = query.period.unwrap_or(DEFAULT_PERIOD);
    if !PERIODS.contains(&period) {
        return Err(AppError::Validation(format!(
            "period must be one of 7, 30 or 90 days, got {period}"
        )));
    }
    let orders = store.list_orders().await?;
    let now = chrono::Utc::now().naive_utc();
    Ok(Json(SalesReport::build(&orders, now, period)))
}

async fn dashboard(Extension(store): Extension<SharedStore>) -> AppResult<Json<DashboardStats>> {
    let bouquets = store.list_bouquets(true).await?;
    let catalog = Catalog::from_options(store.customization_options(false).await?);
    Ok(Json(DashboardStats::from_catalog(&bouquets, &catalog)))
}
