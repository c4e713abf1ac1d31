//! Bouquet customizer: selection state, pricing and order summary.
//!
//! Everything here is pure. Callers load a [`Catalog`](crate::catalog::Catalog)
//! from the store and feed it in alongside the customer's [`Selection`].

pub mod pricing;
pub mod selection;
pub mod summary;

pub use pricing::{breakdown, compute_total, resolve_price, PriceBreakdown};
pub use selection::{Selection, SelectionAction};
pub use summary::{build_order_summary, ComplementLine, FlowerLine, OrderSummary};
