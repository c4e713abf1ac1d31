//! Human-readable breakdown of a selection.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::pricing::compute_total;
use super::selection::Selection;
use crate::catalog::Catalog;
use crate::messaging::format_brl;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowerLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

impl FlowerLine {
    /// `"{quantity}x {name}"`
    pub fn label(&self) -> String {
        format!("{}x {}", self.quantity, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplementLine {
    pub name: String,
    pub price: Decimal,
}

/// Ordered breakdown of a selection. Options missing from the catalog are left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub flowers: Vec<FlowerLine>,
    pub colors: Vec<String>,
    pub complements: Vec<ComplementLine>,
    pub total: Decimal,
}

impl OrderSummary {
    /// Comma-joined color names, `None` when no known color is selected.
    pub fn color_list(&self) -> Option<String> {
        if self.colors.is_empty() {
            None
        } else {
            Some(self.colors.join(", "))
        }
    }
}

pub fn build_order_summary(selection: &Selection, catalog: &Catalog) -> OrderSummary {
    let flowers = selection
        .flowers()
        .filter_map(|(id, quantity)| {
            catalog.flower(id).map(|f| FlowerLine {
                name: f.name.clone(),
                quantity,
                unit_price: f.price,
                subtotal: f.price * Decimal::from(quantity),
            })
        })
        .collect();
    let colors = selection
        .colors()
        .filter_map(|id| catalog.color(id).map(|c| c.name.clone()))
        .collect();
    let complements = selection
        .complements()
        .filter_map(|id| {
            catalog.complement(id).map(|c| ComplementLine {
                name: c.name.clone(),
                price: c.price,
            })
        })
        .collect();

    OrderSummary {
        flowers,
        colors,
        complements,
        total: compute_total(selection, catalog),
    }
}

/// One line per flower, one color line, one line per complement, then the
/// total. Empty sections produce no line at all.
impl fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.flowers {
            writeln!(f, "{} - {}", line.label(), format_brl(line.subtotal))?;
        }
        if let Some(colors) = self.color_list() {
            writeln!(f, "Cores: {colors}")?;
        }
        for line in &self.complements {
            writeln!(f, "{} - {}", line.name, format_brl(line.price))?;
        }
        write!(f, "Total: {}", format_brl(self.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;

    fn seeded_catalog() -> Catalog {
        Catalog::from_options(seed::customization_options())
    }

    fn named(catalog: &Catalog, kind: &str, name: &str) -> uuid::Uuid {
        let options = catalog.to_options();
        match kind {
            "flower" => options.flowers.iter().find(|o| o.name == name).map(|o| o.id),
            "color" => options.colors.iter().find(|o| o.name == name).map(|o| o.id),
            _ => options.complements.iter().find(|o| o.name == name).map(|o| o.id),
        }
        .unwrap()
    }

    #[test]
    fn summary_lists_sections_in_selection_order() {
        let catalog = seeded_catalog();
        let selection = Selection::new()
            .update_flower_quantity(named(&catalog, "flower", "Lírio"), 1)
            .update_flower_quantity(named(&catalog, "flower", "Rosa"), 2)
            .toggle_color(named(&catalog, "color", "Lilás"))
            .toggle_color(named(&catalog, "color", "Branco"))
            .toggle_complement(named(&catalog, "complement", "Laço de Cetim"));

        let summary = build_order_summary(&selection, &catalog);
        let labels: Vec<_> = summary.flowers.iter().map(FlowerLine::label).collect();
        assert_eq!(labels, vec!["1x Lírio", "2x Rosa"]);
        assert_eq!(summary.flowers[1].subtotal, Decimal::new(2580, 2));
        assert_eq!(summary.color_list().as_deref(), Some("Lilás, Branco"));
        assert_eq!(summary.total, Decimal::new(1590 + 2580 + 500 + 890, 2));

        assert_eq!(
            summary.to_string(),
            "1x Lírio - R$ 15,90\n\
             2x Rosa - R$ 25,80\n\
             Cores: Lilás, Branco\n\
             Laço de Cetim - R$ 8,90\n\
             Total: R$ 55,60"
        );
    }

    #[test]
    fn empty_sections_are_omitted() {
        let catalog = seeded_catalog();
        let selection =
            Selection::new().update_flower_quantity(named(&catalog, "flower", "Girassol"), 3);
        let text = build_order_summary(&selection, &catalog).to_string();
        assert_eq!(text, "3x Girassol - R$ 29,70\nTotal: R$ 29,70");
        assert!(!text.contains("Cores"));
    }

    #[test]
    fn unknown_flower_is_left_out_of_summary() {
        let catalog = seeded_catalog();
        let selection = Selection::new()
            .update_flower_quantity(uuid::Uuid::from_u128(404), 2)
            .update_flower_quantity(named(&catalog, "flower", "Margarida"), 1);
        let summary = build_order_summary(&selection, &catalog);
        assert_eq!(summary.flowers.len(), 1);
        assert_eq!(summary.total, Decimal::new(690, 2));
    }
}
