//! # Order Board State
//!
//! The operator-side order board: every submitted order, newest first,
//! moved through its lifecycle by the dashboard actions.
//!
//! A fresh server seeds a handful of demo orders so the dashboard has
//! something to show before the first real submission arrives.

use std::sync::Mutex;

use chrono::{Duration, Utc};
use tracing::info;

use deliverypro_core::error::{CoreError, CoreResult};
use deliverypro_core::{
    Address, Customer, DeliveryOption, Order, OrderItem, OrderPayment, OrderStatus, PaymentMethod,
};

/// Shared order board.
#[derive(Debug)]
pub struct OrdersState {
    orders: Mutex<Vec<Order>>,
}

impl OrdersState {
    /// Creates the board with an initial set of orders.
    pub fn new(initial: Vec<Order>) -> Self {
        OrdersState {
            orders: Mutex::new(initial),
        }
    }

    /// Appends a freshly submitted order.
    pub fn push(&self, order: Order) {
        let mut orders = self.orders.lock().expect("orders mutex poisoned");
        orders.push(order);
    }

    /// Every order on the board, for the analytics aggregations.
    pub fn all(&self) -> Vec<Order> {
        self.orders.lock().expect("orders mutex poisoned").clone()
    }

    /// Orders for the board view, optionally filtered by status, newest
    /// first.
    pub fn list(&self, status: Option<OrderStatus>) -> Vec<Order> {
        let orders = self.orders.lock().expect("orders mutex poisoned");
        let mut result: Vec<Order> = orders
            .iter()
            .filter(|o| status.map_or(true, |s| o.status == s))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result
    }

    /// Looks up one order by its UUID.
    pub fn get(&self, id: &str) -> Option<Order> {
        let orders = self.orders.lock().expect("orders mutex poisoned");
        orders.iter().find(|o| o.id == id).cloned()
    }

    /// Moves an order through its lifecycle.
    ///
    /// ## Errors
    /// - `OrderNotFound` for an unknown id
    /// - `InvalidStatusTransition` when the move breaks the state machine
    pub fn transition(&self, id: &str, next: OrderStatus) -> CoreResult<Order> {
        let mut orders = self.orders.lock().expect("orders mutex poisoned");
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| CoreError::OrderNotFound(id.to_string()))?;

        order.transition_to(next)?;
        info!(order = %order.number, status = next.as_str(), "order status updated");
        Ok(order.clone())
    }
}

impl Default for OrdersState {
    fn default() -> Self {
        OrdersState::new(demo_orders())
    }
}

// =============================================================================
// Demo Seed
// =============================================================================

/// The demo order board every fresh server starts with: one order in each
/// active stage of the lifecycle.
pub fn demo_orders() -> Vec<Order> {
    let now = Utc::now();

    let mk = |id: &str,
              number: &str,
              minutes_ago: i64,
              status: OrderStatus,
              name: &str,
              phone: &str,
              street: &str,
              neighborhood: &str,
              items: Vec<(&str, i64, i64)>| {
        let created_at = now - Duration::minutes(minutes_ago);
        let items: Vec<OrderItem> = items
            .into_iter()
            .map(|(name, quantity, unit_price_cents)| OrderItem {
                product_id: name.to_lowercase().replace(' ', "-"),
                name: name.to_string(),
                unit_price_cents,
                quantity,
                line_total_cents: unit_price_cents * quantity,
                notes: None,
            })
            .collect();
        let subtotal_cents: i64 = items.iter().map(|i| i.line_total_cents).sum();

        Order {
            id: id.to_string(),
            number: number.to_string(),
            status,
            customer: Customer {
                name: name.to_string(),
                email: format!(
                    "{}@example.com",
                    name.split_whitespace()
                        .next()
                        .unwrap_or("cliente")
                        .to_lowercase()
                ),
                phone: phone.to_string(),
            },
            delivery_option: DeliveryOption::Delivery,
            address: Some(Address {
                street: street.to_string(),
                number: "123".to_string(),
                complement: None,
                neighborhood: neighborhood.to_string(),
                city: "São Paulo".to_string(),
                state: "SP".to_string(),
                zip_code: "01000-000".to_string(),
            }),
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
    };

    vec![
        mk(
            "demo-1",
            "ORD-001234",
            5,
            OrderStatus::Pending,
            "João Silva",
            "(11) 99999-9999",
            "Rua das Flores",
            "Vila Madalena",
            vec![("Pizza Margherita", 1, 4590), ("Coca-Cola 2L", 1, 850)],
        ),
        mk(
            "demo-2",
            "ORD-001235",
            23,
            OrderStatus::Preparing,
            "Maria Santos",
            "(11) 88888-8888",
            "Av. Paulista",
            "Bela Vista",
            vec![("Hambúrguer Artesanal", 2, 3290), ("Batata Frita Grande", 1, 1890)],
        ),
        mk(
            "demo-3",
            "ORD-001236",
            43,
            OrderStatus::Ready,
            "Pedro Costa",
            "(11) 77777-7777",
            "Rua Augusta",
            "Consolação",
            vec![("Pizza Portuguesa", 1, 4890), ("Suco Natural de Laranja", 1, 790)],
        ),
        mk(
            "demo-4",
            "ORD-001237",
            118,
            OrderStatus::Delivered,
            "Ana Oliveira",
            "(11) 66666-6666",
            "Rua da Consolação",
            "República",
            vec![("Pizza Pepperoni", 1, 5290), ("Onion Rings", 1, 1690)],
        ),
    ]
}
