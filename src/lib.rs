//! # Bouquet Storefront
//!
//! Back end for a flower shop: a customer builds a bouquet or picks a
//! ready-made one, sees a live price, and sends the order to the shop over
//! a WhatsApp deep link while the order is also recorded for the back office.
//!
//! The pure pieces (selection reducer, pricing, message templates, reports)
//! live in their own modules and are usable without a server. The axum
//! router is exposed so tests can drive it in-process.

pub mod catalog;
pub mod config;
pub mod customization;
pub mod db;
pub mod error;
pub mod messaging;
pub mod models;
pub mod orders;
pub mod reports;
pub mod routes;
pub mod store;

use axum::{Extension, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db::SharedStore;

/// Build the Axum router with all route modules and middleware.
///
/// The caller provides the store. This function does NOT start a server.
pub fn create_app(store: SharedStore) -> Router {
    Router::new()
        .merge(routes::health_router())
        .merge(routes::bouquets::router())
        .merge(routes::customizations::router())
        .merge(routes::categories::router())
        .merge(routes::orders::router())
        .merge(routes::settings::router())
        .merge(routes::reports::router())
        .merge(routes::admin::router())
        .layer(Extension(store))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
