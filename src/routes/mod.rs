//! HTTP route modules.
//!
//! - `bouquets`: public bouquet listing, detail and quotes
//! - `customizations`: option lists, selection quotes and the reducer
//! - `categories`: generic customization categories
//! - `orders`: order submission and status tracking
//! - `settings`: storefront settings
//! - `reports`: admin sales report and dashboard
//! - `admin`: catalog management

use axum::routing::get;
use axum::Router;
use tracing::warn;

use crate::db::SharedStore;
use crate::models::SiteSettings;

pub mod admin;
pub mod bouquets;
pub mod categories;
pub mod customizations;
pub mod orders;
pub mod reports;
pub mod settings;

/// Liveness probe.
pub fn health_router() -> Router {
    Router::new().route("/health", get(|| async { "OK" }))
}

/// Stored settings, or the defaults when the store cannot be read.
pub(crate) async fn settings_or_default(store: &SharedStore) -> SiteSettings {
    match store.load_settings().await {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Failed to load site settings, using defaults: {}", e);
            SiteSettings::default()
        }
    }
}
