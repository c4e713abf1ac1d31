//! Read-side view of the catalog: option lookups by id and bouquet filtering.

use indexmap::IndexMap;
use uuid::Uuid;

use crate::models::{
    Bouquet, ColorOption, ComplementOption, CustomizationOptions, FlowerOption, SizeOption,
};

/// Customization options indexed by id, in display order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    flowers: IndexMap<Uuid, FlowerOption>,
    colors: IndexMap<Uuid, ColorOption>,
    sizes: IndexMap<Uuid, SizeOption>,
    complements: IndexMap<Uuid, ComplementOption>,
}

impl Catalog {
    /// Build the catalog a customer may select from: active options only,
    /// sorted by display order.
    pub fn from_options(options: CustomizationOptions) -> Self {
        let CustomizationOptions {
            mut flowers,
            mut colors,
            mut sizes,
            mut complements,
        } = options;
        flowers.retain(|o| o.active);
        colors.retain(|o| o.active);
        sizes.retain(|o| o.active);
        complements.retain(|o| o.active);
        flowers.sort_by_key(|o| o.display_order);
        colors.sort_by_key(|o| o.display_order);
        sizes.sort_by_key(|o| o.display_order);
        complements.sort_by_key(|o| o.display_order);

        Self::including_inactive(CustomizationOptions {
            flowers,
            colors,
            sizes,
            complements,
        })
    }

    /// Index every option as given, active or not.
    ///
    /// Used for order snapshots, where an option deactivated after it was
    /// selected must still resolve.
    pub fn including_inactive(options: CustomizationOptions) -> Self {
        Self {
            flowers: options.flowers.into_iter().map(|o| (o.id, o)).collect(),
            colors: options.colors.into_iter().map(|o| (o.id, o)).collect(),
            sizes: options.sizes.into_iter().map(|o| (o.id, o)).collect(),
            complements: options.complements.into_iter().map(|o| (o.id, o)).collect(),
        }
    }

    pub fn flower(&self, id: Uuid) -> Option<&FlowerOption> {
        self.flowers.get(&id)
    }

    pub fn color(&self, id: Uuid) -> Option<&ColorOption> {
        self.colors.get(&id)
    }

    pub fn size(&self, id: Uuid) -> Option<&SizeOption> {
        self.sizes.get(&id)
    }

    pub fn complement(&self, id: Uuid) -> Option<&ComplementOption> {
        self.complements.get(&id)
    }

    pub fn to_options(&self) -> CustomizationOptions {
        CustomizationOptions {
            flowers: self.flowers.values().cloned().collect(),
            colors: self.colors.values().cloned().collect(),
            sizes: self.sizes.values().cloned().collect(),
            complements: self.complements.values().cloned().collect(),
        }
    }

    /// Number of options across all four kinds.
    pub fn len(&self) -> usize {
        self.flowers.len() + self.colors.len() + self.sizes.len() + self.complements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Active bouquets, optionally restricted to one category label.
pub fn filter_bouquets<'a>(bouquets: &'a [Bouquet], category: Option<&str>) -> Vec<&'a Bouquet> {
    bouquets
        .iter()
        .filter(|b| b.active)
        .filter(|b| category.map_or(true, |c| b.category == c))
        .collect()
}

/// Distinct categories of active bouquets, in first-seen order.
pub fn bouquet_categories(bouquets: &[Bouquet]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for bouquet in bouquets.iter().filter(|b| b.active) {
        if !seen.iter().any(|c| c == &bouquet.category) {
            seen.push(bouquet.category.clone());
        }
    }
    seen
}

pub fn featured_bouquets(bouquets: &[Bouquet]) -> Vec<&Bouquet> {
    bouquets.iter().filter(|b| b.active && b.featured).collect()
}
