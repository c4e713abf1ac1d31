//! Persistence seams for the catalog, orders and site settings.
//!
//! Routes only see these traits. [`postgres::PgStore`] is the production
//! backend; [`memory::MemoryStore`] backs the demo mode and the tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    Bouquet, BouquetFlag, BouquetPatch, CatalogOption, CreateOrderRequest, CustomizationCategory,
    CustomizationOptions, NewBouquet, NewCategory, OptionDraft, OptionKind, OptionPatch, Order,
    OrderHeader, OrderStatus, SettingsPatch, SiteSettings, UpdateCategory,
};

pub mod memory;
pub mod postgres;
pub mod seed;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Failures raised by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The write was refused before anything was persisted.
    #[error("{0}")]
    Rejected(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Bouquets in display order; inactive ones only when asked for.
    async fn list_bouquets(&self, include_inactive: bool) -> StoreResult<Vec<Bouquet>>;
    async fn get_bouquet(&self, id: Uuid) -> StoreResult<Option<Bouquet>>;
    async fn create_bouquet(&self, new: NewBouquet) -> StoreResult<Bouquet>;
    async fn update_bouquet(&self, id: Uuid, patch: BouquetPatch) -> StoreResult<Option<Bouquet>>;
    async fn delete_bouquet(&self, id: Uuid) -> StoreResult<bool>;
    async fn toggle_bouquet(&self, id: Uuid, flag: BouquetFlag) -> StoreResult<Option<Bouquet>>;

    /// All four option lists in display order.
    async fn customization_options(&self, include_inactive: bool)
        -> StoreResult<CustomizationOptions>;
    async fn create_option(&self, draft: OptionDraft) -> StoreResult<CatalogOption>;
    async fn update_option(
        &self,
        kind: OptionKind,
        id: Uuid,
        patch: OptionPatch,
    ) -> StoreResult<Option<CatalogOption>>;
    async fn delete_option(&self, kind: OptionKind, id: Uuid) -> StoreResult<bool>;
    async fn toggle_option(&self, kind: OptionKind, id: Uuid) -> StoreResult<Option<CatalogOption>>;

    /// Active categories with their active options, both in display order.
    async fn list_categories(&self) -> StoreResult<Vec<CustomizationCategory>>;
    async fn create_category(&self, new: NewCategory) -> StoreResult<CustomizationCategory>;
    async fn update_category(
        &self,
        update: UpdateCategory,
    ) -> StoreResult<Option<CustomizationCategory>>;
    async fn delete_category(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Orders with their detail lines, newest first.
    async fn list_orders(&self) -> StoreResult<Vec<Order>>;
    async fn get_order(&self, id: Uuid) -> StoreResult<Option<Order>>;

    /// Persist the header and every detail line atomically.
    ///
    /// Returns [`StoreError::Rejected`] without writing anything when the
    /// submission fails validation or references an unknown option.
    async fn submit_order(&self, req: CreateOrderRequest) -> StoreResult<OrderHeader>;

    async fn update_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> StoreResult<Option<OrderHeader>>;
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// The stored settings, or the defaults when none were saved yet.
    async fn load_settings(&self) -> StoreResult<SiteSettings>;
    async fn update_settings(&self, patch: SettingsPatch) -> StoreResult<SiteSettings>;
}

/// Everything the HTTP layer needs from a backend.
pub trait ShopStore: CatalogStore + OrderStore + SettingsStore {}

impl<T> ShopStore for T where T: CatalogStore + OrderStore + SettingsStore {}
