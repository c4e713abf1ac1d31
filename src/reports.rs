//! Back-office sales report and dashboard counters.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::models::{Bouquet, Order, OrderStatus};

const TOP_FLOWERS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    pub date: NaiveDate,
    pub total: Decimal,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowerSales {
    pub name: String,
    pub quantity: i64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub period_days: u32,
    pub total_revenue: Decimal,
    pub total_orders: u32,
    pub average_order_value: Decimal,
    pub cancelled_orders: u32,
    pub revenue_change_pct: Decimal,
    pub completion_rate_pct: Decimal,
    pub daily_sales: Vec<DailySales>,
    pub top_flowers: Vec<FlowerSales>,
    pub status_counts: IndexMap<OrderStatus, u32>,
}

impl SalesReport {
    /// Summarize the `period_days` ending at `now`, compared against the
    /// equally long window right before it. Cancelled orders never count as
    /// revenue.
    pub fn build(orders: &[Order], now: NaiveDateTime, period_days: u32) -> Self {
        let period = Duration::days(i64::from(period_days));
        let cutoff = now - period;
        let previous_cutoff = cutoff - period;

        let window: Vec<&Order> = orders
            .iter()
            .filter(|o| o.header.created_at >= cutoff)
            .collect();
        let billable: Vec<&Order> = window
            .iter()
            .copied()
            .filter(|o| o.header.status != OrderStatus::Cancelled)
            .collect();

        let total_revenue: Decimal = billable.iter().map(|o| o.header.total_price).sum();
        let total_orders = billable.len() as u32;
        let cancelled_orders = window.len() as u32 - total_orders;
        let average_order_value = if total_orders > 0 {
            (total_revenue / Decimal::from(total_orders)).round_dp(2)
        } else {
            Decimal::ZERO
        };

        let previous_revenue: Decimal = orders
            .iter()
            .filter(|o| o.header.created_at >= previous_cutoff && o.header.created_at < cutoff)
            .filter(|o| o.header.status != OrderStatus::Cancelled)
            .map(|o| o.header.total_price)
            .sum();
        let revenue_change_pct = if previous_revenue > Decimal::ZERO {
            ((total_revenue - previous_revenue) / previous_revenue * Decimal::ONE_HUNDRED)
                .round_dp(1)
        } else {
            Decimal::ZERO
        };

        let completion_rate_pct = if window.is_empty() {
            Decimal::ZERO
        } else {
            (Decimal::from(total_orders) / Decimal::from(window.len() as u32)
                * Decimal::ONE_HUNDRED)
                .round_dp(0)
        };

        let mut status_counts: IndexMap<OrderStatus, u32> =
            OrderStatus::ALL.into_iter().map(|s| (s, 0)).collect();
        for order in &window {
            *status_counts.entry(order.header.status).or_insert(0) += 1;
        }

        Self {
            period_days,
            total_revenue,
            total_orders,
            average_order_value,
            cancelled_orders,
            revenue_change_pct,
            completion_rate_pct,
            daily_sales: daily_sales(&billable),
            top_flowers: top_flowers(&billable),
            status_counts,
        }
    }
}

/// Per-day revenue and order count, newest day first.
fn daily_sales(orders: &[&Order]) -> Vec<DailySales> {
    let mut by_day: BTreeMap<NaiveDate, (Decimal, u32)> = BTreeMap::new();
    for order in orders {
        let entry = by_day
            .entry(order.header.created_at.date())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += order.header.total_price;
        entry.1 += 1;
    }
    by_day
        .into_iter()
        .rev()
        .map(|(date, (total, count))| DailySales { date, total, count })
        .collect()
}

/// Best-selling flowers by stems sold, using the snapshot prices.
fn top_flowers(orders: &[&Order]) -> Vec<FlowerSales> {
    let mut by_name: IndexMap<&str, (i64, Decimal)> = IndexMap::new();
    for line in orders.iter().flat_map(|o| &o.flowers) {
        let entry = by_name
            .entry(line.flower_name.as_str())
            .or_insert((0, Decimal::ZERO));
        entry.0 += i64::from(line.quantity);
        entry.1 += line.unit_price * Decimal::from(line.quantity);
    }
    let mut sales: Vec<FlowerSales> = by_name
        .into_iter()
        .map(|(name, (quantity, revenue))| FlowerSales {
            name: name.to_string(),
            quantity,
            revenue,
        })
        .collect();
    // stable: ties keep first-seen order
    sales.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    sales.truncate(TOP_FLOWERS);
    sales
}

/// Headline counters for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active_bouquets: usize,
    pub customization_items: usize,
    pub featured_bouquets: usize,
    pub customizable_bouquets: usize,
}

impl DashboardStats {
    /// `active_catalog` is expected to hold active options only.
    pub fn from_catalog(bouquets: &[Bouquet], active_catalog: &Catalog) -> Self {
        Self {
            active_bouquets: bouquets.iter().filter(|b| b.active).count(),
            customization_items: active_catalog.len(),
            featured_bouquets: bouquets.iter().filter(|b| b.featured).count(),
            customizable_bouquets: bouquets.iter().filter(|b| b.allows_customization).count(),
        }
    }
}
