//! The customer's in-progress bouquet selection and its reducer.
//!
//! Every mutation consumes the old state and returns the new one, so the
//! customizer can hold a `Selection` by value and tests can replay actions.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Flower quantities plus chosen colors and complements, in insertion order.
///
/// A flower present in `flowers` always has a quantity of at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SelectionWire", into = "SelectionWire")]
pub struct Selection {
    flowers: IndexMap<Uuid, u32>,
    colors: IndexSet<Uuid>,
    complements: IndexSet<Uuid>,
}

/// One step of the customizer reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SelectionAction {
    UpdateFlowerQuantity { flower_id: Uuid, delta: i64 },
    SetFlowerQuantity { flower_id: Uuid, quantity: f64 },
    ToggleColor { color_id: Uuid },
    ToggleComplement { complement_id: Uuid },
    Clear,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action and return the resulting selection.
    pub fn reduce(self, action: SelectionAction) -> Self {
        match action {
            SelectionAction::UpdateFlowerQuantity { flower_id, delta } => {
                self.update_flower_quantity(flower_id, delta)
            }
            SelectionAction::SetFlowerQuantity {
                flower_id,
                quantity,
            } => self.set_flower_quantity(flower_id, quantity),
            SelectionAction::ToggleColor { color_id } => self.toggle_color(color_id),
            SelectionAction::ToggleComplement { complement_id } => {
                self.toggle_complement(complement_id)
            }
            SelectionAction::Clear => Self::default(),
        }
    }

    /// Add `delta` to the flower's quantity, clamping at zero.
    ///
    /// Reaching zero removes the entry. A non-positive delta on an absent
    /// flower leaves the selection unchanged.
    pub fn update_flower_quantity(mut self, flower_id: Uuid, delta: i64) -> Self {
        let current = self.flower_quantity(flower_id);
        if current == 0 && delta <= 0 {
            return self;
        }
        let next = i64::from(current)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX));
        self.store_quantity(flower_id, next as u32);
        self
    }

    /// Set the flower's quantity directly.
    ///
    /// Input is floored and clamped at zero; zero (and NaN) removes the entry.
    pub fn set_flower_quantity(mut self, flower_id: Uuid, quantity: f64) -> Self {
        let floored = quantity.floor();
        let qty = if floored.is_nan() || floored <= 0.0 {
            0
        } else if floored >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            floored as u32
        };
        self.store_quantity(flower_id, qty);
        self
    }

    pub fn toggle_color(mut self, color_id: Uuid) -> Self {
        toggle(&mut self.colors, color_id);
        self
    }

    pub fn toggle_complement(mut self, complement_id: Uuid) -> Self {
        toggle(&mut self.complements, complement_id);
        self
    }

    /// At least one flower is required; colors and complements are optional.
    pub fn is_valid(&self) -> bool {
        !self.flowers.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.flowers.is_empty() && self.colors.is_empty() && self.complements.is_empty()
    }

    /// Quantity of one flower, zero when it is not selected.
    pub fn flower_quantity(&self, flower_id: Uuid) -> u32 {
        self.flowers.get(&flower_id).copied().unwrap_or(0)
    }

    /// Number of stems across all selected flowers.
    pub fn total_flowers(&self) -> u64 {
        self.flowers.values().map(|&q| u64::from(q)).sum()
    }

    pub fn flowers(&self) -> impl Iterator<Item = (Uuid, u32)> + '_ {
        self.flowers.iter().map(|(&id, &qty)| (id, qty))
    }

    pub fn colors(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.colors.iter().copied()
    }

    pub fn complements(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.complements.iter().copied()
    }

    fn store_quantity(&mut self, flower_id: Uuid, qty: u32) {
        if qty == 0 {
            self.flowers.shift_remove(&flower_id);
        } else if let Some(existing) = self.flowers.get_mut(&flower_id) {
            *existing = qty;
        } else {
            self.flowers.insert(flower_id, qty);
        }
    }
}

fn toggle(set: &mut IndexSet<Uuid>, id: Uuid) {
    if !set.shift_remove(&id) {
        set.insert(id);
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectionWire {
    #[serde(default)]
    flowers: Vec<FlowerQuantity>,
    #[serde(default)]
    colors: Vec<Uuid>,
    #[serde(default)]
    complements: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlowerQuantity {
    flower_id: Uuid,
    quantity: i64,
}

impl From<SelectionWire> for Selection {
    fn from(wire: SelectionWire) -> Self {
        let mut selection = Selection::default();
        for entry in wire.flowers {
            let qty = entry.quantity.clamp(0, i64::from(u32::MAX)) as u32;
            selection.store_quantity(entry.flower_id, qty);
        }
        selection.colors.extend(wire.colors);
        selection.complements.extend(wire.complements);
        selection
    }
}

impl From<Selection> for SelectionWire {
    fn from(selection: Selection) -> Self {
        Self {
            flowers: selection
                .flowers
                .into_iter()
                .map(|(flower_id, quantity)| FlowerQuantity {
                    flower_id,
                    quantity: i64::from(quantity),
                })
                .collect(),
            colors: selection.colors.into_iter().collect(),
            complements: selection.complements.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn update_creates_entry_for_positive_delta() {
        let s = Selection::new().update_flower_quantity(id(1), 3);
        assert_eq!(s.flower_quantity(id(1)), 3);
        assert!(s.is_valid());
    }

    #[test]
    fn update_on_absent_flower_with_non_positive_delta_is_noop() {
        let s = Selection::new()
            .update_flower_quantity(id(1), 0)
            .update_flower_quantity(id(2), -4);
        assert_eq!(s, Selection::new());
    }

    #[test]
    fn update_clamps_at_zero_and_removes_entry() {
        let s = Selection::new()
            .update_flower_quantity(id(1), 2)
            .update_flower_quantity(id(1), -5);
        assert_eq!(s.flower_quantity(id(1)), 0);
        assert_eq!(s.flowers().count(), 0);
    }

    #[test]
    fn update_then_inverse_update_restores_prior_state() {
        let before = Selection::new()
            .update_flower_quantity(id(1), 2)
            .toggle_color(id(10));
        for delta in [1, 4, 17] {
            for flower in [id(1), id(2)] {
                let after = before
                    .clone()
                    .update_flower_quantity(flower, delta)
                    .update_flower_quantity(flower, -delta);
                assert_eq!(after, before);
            }
        }
    }

    #[test]
    fn update_with_extreme_deltas_saturates() {
        let s = Selection::new()
            .update_flower_quantity(id(1), 1)
            .update_flower_quantity(id(1), i64::MAX);
        assert_eq!(s.flower_quantity(id(1)), u32::MAX);

        let s = s.update_flower_quantity(id(1), i64::MIN);
        assert_eq!(s.flowers().count(), 0);

        let s = Selection::new().update_flower_quantity(id(2), i64::MAX);
        assert_eq!(s.flower_quantity(id(2)), u32::MAX);
    }

    #[test]
    fn set_floors_and_clamps() {
        let s = Selection::new().set_flower_quantity(id(1), 2.9);
        assert_eq!(s.flower_quantity(id(1)), 2);

        let s = s.set_flower_quantity(id(1), -3.0);
        assert_eq!(s.flowers().count(), 0);

        let s = Selection::new().set_flower_quantity(id(1), 0.5);
        assert!(!s.is_valid());

        let s = Selection::new().set_flower_quantity(id(1), f64::NAN);
        assert!(s.is_empty());
    }

    #[test]
    fn set_zero_always_removes() {
        let s = Selection::new()
            .set_flower_quantity(id(1), 5.0)
            .set_flower_quantity(id(1), 0.0)
            .set_flower_quantity(id(2), 0.0);
        assert_eq!(s.flower_quantity(id(1)), 0);
        assert_eq!(s.flowers().count(), 0);
    }

    #[test]
    fn set_replaces_in_place_keeping_order() {
        let s = Selection::new()
            .set_flower_quantity(id(1), 1.0)
            .set_flower_quantity(id(2), 1.0)
            .set_flower_quantity(id(1), 7.0);
        let order: Vec<_> = s.flowers().collect();
        assert_eq!(order, vec![(id(1), 7), (id(2), 1)]);
    }

    #[test]
    fn toggles_are_symmetric() {
        let s = Selection::new().toggle_color(id(5)).toggle_complement(id(6));
        assert_eq!(s.colors().collect::<Vec<_>>(), vec![id(5)]);
        assert_eq!(s.complements().collect::<Vec<_>>(), vec![id(6)]);

        let s = s.toggle_color(id(5)).toggle_complement(id(6));
        assert!(s.is_empty());
    }

    #[test]
    fn colors_and_complements_alone_are_not_valid() {
        let s = Selection::new()
            .toggle_color(id(5))
            .toggle_color(id(7))
            .toggle_complement(id(6));
        assert!(!s.is_valid());

        let s = s.update_flower_quantity(id(1), 1);
        assert!(s.is_valid());
    }

    #[test]
    fn reduce_dispatches_actions() {
        let s = [
            SelectionAction::UpdateFlowerQuantity {
                flower_id: id(1),
                delta: 2,
            },
            SelectionAction::SetFlowerQuantity {
                flower_id: id(2),
                quantity: 3.0,
            },
            SelectionAction::ToggleColor { color_id: id(3) },
            SelectionAction::ToggleComplement {
                complement_id: id(4),
            },
        ]
        .into_iter()
        .fold(Selection::new(), Selection::reduce);

        assert_eq!(s.total_flowers(), 5);
        assert_eq!(s.colors().count(), 1);
        assert_eq!(s.complements().count(), 1);
        assert!(s.reduce(SelectionAction::Clear).is_empty());
    }

    #[test]
    fn action_json_uses_tagged_camel_case() {
        let action: SelectionAction = serde_json::from_value(serde_json::json!({
            "type": "updateFlowerQuantity",
            "flowerId": id(1),
            "delta": -1
        }))
        .unwrap();
        assert_eq!(
            action,
            SelectionAction::UpdateFlowerQuantity {
                flower_id: id(1),
                delta: -1
            }
        );
    }

    #[test]
    fn wire_form_is_normalized() {
        let s: Selection = serde_json::from_value(serde_json::json!({
            "flowers": [
                { "flowerId": id(1), "quantity": 2 },
                { "flowerId": id(2), "quantity": 0 },
                { "flowerId": id(3), "quantity": -4 },
                { "flowerId": id(1), "quantity": 5 }
            ],
            "colors": [id(9), id(9)]
        }))
        .unwrap();

        assert_eq!(s.flowers().collect::<Vec<_>>(), vec![(id(1), 5)]);
        assert_eq!(s.colors().count(), 1);
        assert_eq!(s.complements().count(), 0);
    }
}
