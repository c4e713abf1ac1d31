//! Order submission: boundary validation and detail snapshots.
//!
//! A submission is turned into an [`OrderPlan`] before anything is written.
//! Stores persist the plan's header and every detail line in one transaction,
//! so an order either exists with all its lines or not at all.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::models::{
    require_price, require_text, CreateOrderRequest, OrderColor, OrderComplement, OrderFlower,
    OrderStatus,
};

/// Everything needed to write one order, with snapshots already taken.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPlan {
    pub customer_name: String,
    pub customer_phone: String,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub selected_size_id: Option<Uuid>,
    pub flowers: Vec<OrderFlower>,
    pub colors: Vec<OrderColor>,
    pub complements: Vec<OrderComplement>,
}

impl OrderPlan {
    /// Header row plus one row per detail line.
    pub fn row_count(&self) -> usize {
        1 + self.flowers.len() + self.colors.len() + self.complements.len()
    }
}

/// Validate a submission and snapshot the referenced options from `catalog`.
///
/// `catalog` should include inactive options: an option switched off while
/// the customer was checking out still has a name and price to record.
pub fn plan_order(req: CreateOrderRequest, catalog: &Catalog) -> Result<OrderPlan, String> {
    require_text("customerName", &req.customer_name)?;
    require_text("customerPhone", &req.customer_phone)?;
    require_price("totalPrice", req.total_price)?;

    if let Some(size_id) = req.selected_size_id {
        catalog
            .size(size_id)
            .ok_or_else(|| format!("unknown size {size_id}"))?;
    }

    let flowers = req
        .flowers
        .iter()
        .map(|line| {
            let quantity = i32::try_from(line.quantity)
                .ok()
                .filter(|q| *q >= 1)
                .ok_or_else(|| format!("invalid quantity {} for flower {}", line.quantity, line.flower_id))?;
            let flower = catalog
                .flower(line.flower_id)
                .ok_or_else(|| format!("unknown flower {}", line.flower_id))?;
            Ok(OrderFlower {
                flower_id: Some(flower.id),
                flower_name: flower.name.clone(),
                quantity,
                unit_price: flower.price,
            })
        })
        .collect::<Result<Vec<_>, String>>()?;

    let colors = req
        .colors
        .iter()
        .map(|line| {
            catalog
                .color(line.color_id)
                .map(|color| OrderColor {
                    color_id: Some(color.id),
                    color_name: color.name.clone(),
                    hex_code: color.hex_code.clone(),
                })
                .ok_or_else(|| format!("unknown color {}", line.color_id))
        })
        .collect::<Result<Vec<_>, String>>()?;

    let complements = req
        .complements
        .iter()
        .map(|line| {
            catalog
                .complement(line.complement_id)
                .map(|complement| OrderComplement {
                    complement_id: Some(complement.id),
                    complement_name: complement.name.clone(),
                    price: complement.price,
                })
                .ok_or_else(|| format!("unknown complement {}", line.complement_id))
        })
        .collect::<Result<Vec<_>, String>>()?;

    Ok(OrderPlan {
        customer_name: req.customer_name.trim().to_string(),
        customer_phone: req.customer_phone.trim().to_string(),
        total_price: req.total_price,
        status: OrderStatus::Pending,
        notes: req.notes.filter(|n| !n.trim().is_empty()),
        selected_size_id: req.selected_size_id,
        flowers,
        colors,
        complements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderColorInput, OrderComplementInput, OrderFlowerInput};
    use crate::store::seed;

    fn request() -> CreateOrderRequest {
        CreateOrderRequest {
            customer_name: " Maria ".into(),
            customer_phone: "11 99999-0000".into(),
            total_price: Decimal::new(4370, 2),
            notes: Some("  ".into()),
            selected_size_id: None,
            flowers: vec![],
            colors: vec![],
            complements: vec![],
        }
    }

    #[test]
    fn two_flowers_one_color_no_complements() {
        let options = seed::customization_options();
        let rose = &options.flowers[0];
        let lily = &options.flowers[1];
        let pink = &options.colors[0];
        let mut req = request();
        req.flowers = vec![
            OrderFlowerInput {
                flower_id: rose.id,
                quantity: 2,
                unit_price: Some(Decimal::ONE),
            },
            OrderFlowerInput {
                flower_id: lily.id,
                quantity: 1,
                unit_price: None,
            },
        ];
        req.colors = vec![OrderColorInput { color_id: pink.id }];

        let plan = plan_order(req, &Catalog::including_inactive(options.clone())).unwrap();
        assert_eq!(plan.flowers.len(), 2);
        assert_eq!(plan.colors.len(), 1);
        assert_eq!(plan.complements.len(), 0);
        assert_eq!(plan.row_count(), 4);

        assert_eq!(plan.flowers[0].flower_name, "Rosa");
        assert_eq!(plan.flowers[0].unit_price, rose.price);
        assert_eq!(plan.colors[0].hex_code, pink.hex_code);
        assert_eq!(plan.customer_name, "Maria");
        assert_eq!(plan.notes, None);
        assert_eq!(plan.status, OrderStatus::Pending);
    }

    #[test]
    fn inactive_options_still_snapshot() {
        let options = seed::customization_options();
        let retired = options.complements.iter().find(|c| !c.active).unwrap().clone();
        let mut req = request();
        req.complements = vec![OrderComplementInput {
            complement_id: retired.id,
        }];
        let plan = plan_order(req, &Catalog::including_inactive(options)).unwrap();
        assert_eq!(plan.complements[0].complement_name, retired.name);
    }

    #[test]
    fn rejects_blank_customer_fields() {
        let catalog = Catalog::including_inactive(seed::customization_options());
        let mut req = request();
        req.customer_name = "   ".into();
        assert!(plan_order(req, &catalog).unwrap_err().contains("customerName"));

        let mut req = request();
        req.customer_phone = String::new();
        assert!(plan_order(req, &catalog).unwrap_err().contains("customerPhone"));

        let mut req = request();
        req.total_price = Decimal::new(-100, 2);
        assert!(plan_order(req, &catalog).is_err());

        let mut req = request();
        req.total_price = Decimal::new(10_000_000_000, 2);
        assert!(plan_order(req, &catalog).unwrap_err().contains("totalPrice"));
    }

    #[test]
    fn rejects_unknown_references_and_bad_quantities() {
        let options = seed::customization_options();
        let rose = options.flowers[0].id;
        let catalog = Catalog::including_inactive(options);

        let mut req = request();
        req.flowers = vec![OrderFlowerInput {
            flower_id: rose,
            quantity: 0,
            unit_price: None,
        }];
        assert!(plan_order(req, &catalog).unwrap_err().contains("invalid quantity"));

        let mut req = request();
        req.colors = vec![OrderColorInput {
            color_id: Uuid::from_u128(1),
        }];
        assert!(plan_order(req, &catalog).unwrap_err().contains("unknown color"));

        let mut req = request();
        req.selected_size_id = Some(Uuid::from_u128(2));
        assert!(plan_order(req, &catalog).unwrap_err().contains("unknown size"));
    }
}
