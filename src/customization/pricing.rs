//! Price computation for custom selections and single bouquets.

use rust_decimal::Decimal;

use super::selection::Selection;
use crate::catalog::Catalog;
use crate::models::{Bouquet, SizeOption};

/// Per-section subtotals of a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub flowers: Decimal,
    pub colors: Decimal,
    pub complements: Decimal,
}

impl PriceBreakdown {
    pub fn total(&self) -> Decimal {
        self.flowers + self.colors + self.complements
    }
}

/// Price each section of the selection against the catalog.
///
/// Ids missing from the catalog (an option deleted or deactivated while the
/// customer was still choosing) contribute zero.
pub fn breakdown(selection: &Selection, catalog: &Catalog) -> PriceBreakdown {
    let flowers = selection
        .flowers()
        .map(|(id, qty)| {
            catalog
                .flower(id)
                .map(|f| f.price * Decimal::from(qty))
                .unwrap_or(Decimal::ZERO)
        })
        .sum();
    let colors = selection
        .colors()
        .map(|id| catalog.color(id).map(|c| c.price).unwrap_or(Decimal::ZERO))
        .sum();
    let complements = selection
        .complements()
        .map(|id| catalog.complement(id).map(|c| c.price).unwrap_or(Decimal::ZERO))
        .sum();

    PriceBreakdown {
        flowers,
        colors,
        complements,
    }
}

/// Total price of the selection.
pub fn compute_total(selection: &Selection, catalog: &Catalog) -> Decimal {
    breakdown(selection, catalog).total()
}

/// Price charged for a bouquet: the chosen size's absolute price, or the
/// bouquet's base price when no size is chosen.
pub fn resolve_price(bouquet: &Bouquet, selected_size: Option<&SizeOption>) -> Decimal {
    match selected_size {
        Some(size) => size.price,
        None => bouquet.price,
    }
}
