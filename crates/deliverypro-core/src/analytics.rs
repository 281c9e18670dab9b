//! # Analytics Module
//!
//! Pure aggregation over submitted orders for the operator dashboard.
//!
//! Every function takes `&[Order]` and returns plain data; the server decides
//! which orders to feed in (today, this month, everything). Cancelled orders
//! never count toward revenue or product rankings — they only appear in the
//! status breakdown.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{NaiveDate, Timelike};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Order, OrderStatus};

// =============================================================================
// Result Types
// =============================================================================

/// Headline numbers for the dashboard stat cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SalesSummary {
    /// Revenue across all non-cancelled orders, in centavos.
    pub revenue_cents: i64,
    /// Non-cancelled order count.
    pub order_count: usize,
    /// Cancelled order count.
    pub cancelled_count: usize,
    /// Revenue / order count, zero when there are no orders.
    pub average_ticket_cents: i64,
    /// Distinct customers by email (case-insensitive).
    pub unique_customers: usize,
}

/// One status bucket on the order board header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: usize,
}

/// One row of the product performance ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductSales {
    pub name: String,
    pub quantity: i64,
    pub revenue_cents: i64,
}

/// Revenue for one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DailySales {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub revenue_cents: i64,
    pub orders: usize,
}

/// Order count for one hour of the day (0-23).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct HourlySales {
    pub hour: u32,
    pub orders: usize,
}

// =============================================================================
// Aggregations
// =============================================================================

fn counted(order: &Order) -> bool {
    order.status != OrderStatus::Cancelled
}

/// Computes the headline summary.
pub fn summary(orders: &[Order]) -> SalesSummary {
    let mut revenue_cents = 0i64;
    let mut order_count = 0usize;
    let mut cancelled_count = 0usize;
    let mut customers: HashSet<String> = HashSet::new();

    for order in orders {
        if counted(order) {
            revenue_cents += order.total_cents;
            order_count += 1;
            customers.insert(order.customer.email.to_lowercase());
        } else {
            cancelled_count += 1;
        }
    }

    let average_ticket_cents = if order_count == 0 {
        0
    } else {
        revenue_cents / order_count as i64
    };

    SalesSummary {
        revenue_cents,
        order_count,
        cancelled_count,
        average_ticket_cents,
        unique_customers: customers.len(),
    }
}

/// Counts orders per status, in board display order. Every status appears,
/// zero or not, so the board header always renders the same buckets.
pub fn status_breakdown(orders: &[Order]) -> Vec<StatusCount> {
    OrderStatus::ALL
        .iter()
        .map(|&status| StatusCount {
            status,
            count: orders.iter().filter(|o| o.status == status).count(),
        })
        .collect()
}

/// Ranks products by units sold across non-cancelled orders.
///
/// Ties break alphabetically so the ranking is stable between refreshes.
pub fn top_products(orders: &[Order], limit: usize) -> Vec<ProductSales> {
    let mut by_name: HashMap<String, (i64, i64)> = HashMap::new();

    for order in orders.iter().filter(|o| counted(o)) {
        for item in &order.items {
            let entry = by_name.entry(item.name.clone()).or_insert((0, 0));
            entry.0 += item.quantity;
            entry.1 += item.line_total_cents;
        }
    }

    let mut ranking: Vec<ProductSales> = by_name
        .into_iter()
        .map(|(name, (quantity, revenue_cents))| ProductSales {
            name,
            quantity,
            revenue_cents,
        })
        .collect();

    ranking.sort_by(|a, b| b.quantity.cmp(&a.quantity).then(a.name.cmp(&b.name)));
    ranking.truncate(limit);
    ranking
}

/// Groups revenue by calendar day (UTC), oldest first.
pub fn revenue_by_day(orders: &[Order]) -> Vec<DailySales> {
    let mut by_day: BTreeMap<NaiveDate, (i64, usize)> = BTreeMap::new();

    for order in orders.iter().filter(|o| counted(o)) {
        let entry = by_day.entry(order.created_at.date_naive()).or_insert((0, 0));
        entry.0 += order.total_cents;
        entry.1 += 1;
    }

    by_day
        .into_iter()
        .map(|(date, (revenue_cents, orders))| DailySales {
            date,
            revenue_cents,
            orders,
        })
        .collect()
}

/// Distributes non-cancelled orders over the 24 hours of the day.
pub fn orders_by_hour(orders: &[Order]) -> Vec<HourlySales> {
    let mut buckets = [0usize; 24];

    for order in orders.iter().filter(|o| counted(o)) {
        buckets[order.created_at.hour() as usize] += 1;
    }

    buckets
        .iter()
        .enumerate()
        .map(|(hour, &orders)| HourlySales {
            hour: hour as u32,
            orders,
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Customer, DeliveryOption, OrderItem, OrderPayment, PaymentMethod,
    };
    use chrono::{TimeZone, Utc};

    fn test_order(
        day: u32,
        hour: u32,
        email: &str,
        status: OrderStatus,
        items: Vec<(&str, i64, i64)>, // (name, quantity, unit_price)
    ) -> Order {
        let created_at = Utc.with_ymd_and_hms(2026, 8, day, hour, 0, 0).unwrap();
        let items: Vec<OrderItem> = items
            .into_iter()
            .map(|(name, quantity, unit_price_cents)| OrderItem {
                product_id: name.to_lowercase(),
                name: name.to_string(),
                unit_price_cents,
                quantity,
                line_total_cents: unit_price_cents * quantity,
                notes: None,
            })
            .collect();
        let subtotal_cents: i64 = items.iter().map(|i| i.line_total_cents).sum();

        Order {
            id: format!("id-{}-{}", day, hour),
            number: format!("ORD-{}-{}", day, hour),
            status,
            customer: Customer {
                name: "Cliente".to_string(),
                email: email.to_string(),
                phone: "(11) 99999-9999".to_string(),
            },
            delivery_option: DeliveryOption::Delivery,
            address: None,
            payment: OrderPayment {
                method: PaymentMethod::Pix,
                change_for_cents: None,
                card_last_digits: None,
            },
            notes: None,
            items,
            subtotal_cents,
            delivery_fee_cents: 590,
            total_cents: subtotal_cents + 590,
            created_at,
            updated_at: created_at,
        }
    }

    fn fixture() -> Vec<Order> {
        vec![
            test_order(1, 12, "a@example.com", OrderStatus::Delivered, vec![("Pizza Margherita", 1, 4590)]),
            test_order(1, 20, "b@example.com", OrderStatus::Delivered, vec![("Pizza Margherita", 2, 4590), ("Coca-Cola 2L", 1, 850)]),
            test_order(2, 20, "A@example.com", OrderStatus::Pending, vec![("Hambúrguer Artesanal", 1, 3290)]),
            test_order(2, 21, "c@example.com", OrderStatus::Cancelled, vec![("Pizza Pepperoni", 3, 5290)]),
        ]
    }

    #[test]
    fn test_summary() {
        let orders = fixture();
        let s = summary(&orders);

        // 5180 + 10620 + 3880, cancelled excluded
        assert_eq!(s.revenue_cents, 19680);
        assert_eq!(s.order_count, 3);
        assert_eq!(s.cancelled_count, 1);
        assert_eq!(s.average_ticket_cents, 6560);
        // a@example.com counted once despite case difference
        assert_eq!(s.unique_customers, 2);
    }

    #[test]
    fn test_summary_empty() {
        let s = summary(&[]);
        assert_eq!(s.revenue_cents, 0);
        assert_eq!(s.average_ticket_cents, 0);
        assert_eq!(s.unique_customers, 0);
    }

    #[test]
    fn test_status_breakdown_has_all_buckets() {
        let orders = fixture();
        let breakdown = status_breakdown(&orders);

        assert_eq!(breakdown.len(), OrderStatus::ALL.len());
        let get = |status: OrderStatus| {
            breakdown
                .iter()
                .find(|c| c.status == status)
                .map(|c| c.count)
                .unwrap()
        };
        assert_eq!(get(OrderStatus::Delivered), 2);
        assert_eq!(get(OrderStatus::Pending), 1);
        assert_eq!(get(OrderStatus::Cancelled), 1);
        assert_eq!(get(OrderStatus::Preparing), 0);
    }

    #[test]
    fn test_top_products_excludes_cancelled() {
        let orders = fixture();
        let ranking = top_products(&orders, 10);

        assert_eq!(ranking[0].name, "Pizza Margherita");
        assert_eq!(ranking[0].quantity, 3);
        assert_eq!(ranking[0].revenue_cents, 13770);
        // the cancelled Pepperoni order never shows up
        assert!(ranking.iter().all(|p| p.name != "Pizza Pepperoni"));
    }

    #[test]
    fn test_top_products_limit_and_tiebreak() {
        let orders = fixture();
        let ranking = top_products(&orders, 2);
        assert_eq!(ranking.len(), 2);

        // Coca-Cola and Hambúrguer both sold 1: alphabetical order decides
        let full = top_products(&orders, 10);
        assert_eq!(full[1].name, "Coca-Cola 2L");
        assert_eq!(full[2].name, "Hambúrguer Artesanal");
    }

    #[test]
    fn test_revenue_by_day() {
        let orders = fixture();
        let daily = revenue_by_day(&orders);

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        assert_eq!(daily[0].revenue_cents, 15800);
        assert_eq!(daily[0].orders, 2);
        assert_eq!(daily[1].orders, 1); // cancelled order on day 2 excluded
    }

    #[test]
    fn test_orders_by_hour() {
        let orders = fixture();
        let hourly = orders_by_hour(&orders);

        assert_eq!(hourly.len(), 24);
        assert_eq!(hourly[20].orders, 2);
        assert_eq!(hourly[12].orders, 1);
        assert_eq!(hourly[21].orders, 0); // only the cancelled one was at 21h
    }
}
