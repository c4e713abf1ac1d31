//! Store construction for the configured backend.
//!
//! Handlers receive the store as `Extension<SharedStore>`:
//! ```ignore
//! async fn my_handler(
//!     Extension(store): Extension<SharedStore>,
//! ) -> impl IntoResponse {
//!     // store.list_bouquets(false).await
//! }
//! ```

use std::sync::Arc;

use tracing::info;

use crate::config::{AppConfig, StoreBackend};
use crate::store::{MemoryStore, PgStore, ShopStore, StoreResult};

/// Type alias for the store shared by every handler.
pub type SharedStore = Arc<dyn ShopStore>;

/// Connect the backend named in `config`, running migrations for Postgres.
pub async fn open_store(config: &AppConfig) -> StoreResult<SharedStore> {
    match config.backend {
        StoreBackend::Postgres => {
            let store = PgStore::connect(&config.database_url, config.max_connections).await?;
            info!("Connected to application database");
            store.migrate().await?;
            info!("Application migrations complete");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            info!("Using in-memory store with the demo catalog");
            Ok(Arc::new(MemoryStore::seeded()))
        }
    }
}
