//! # Domain Types
//!
//! Core domain types used throughout DeliveryPro.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐   ┌────────────────┐      │
//! │  │    Product     │   │     Order      │   │ PaymentDetails │      │
//! │  │  ────────────  │   │  ────────────  │   │  ────────────  │      │
//! │  │  id            │   │  id (UUID)     │   │  method        │      │
//! │  │  name          │   │  number (ORD-) │   │  card fields   │      │
//! │  │  price_cents   │   │  status        │   │  change_for    │      │
//! │  │  category      │   │  total_cents   │   └────────────────┘      │
//! │  └────────────────┘   └────────────────┘                           │
//! │                                                                    │
//! │  ┌────────────────┐   ┌────────────────┐   ┌────────────────┐      │
//! │  │   Customer     │   │    Address     │   │  OrderStatus   │      │
//! │  │  name/email/   │   │  street/number │   │  Pending →     │      │
//! │  │  phone         │   │  city/zip/...  │   │  ... Delivered │      │
//! │  └────────────────┘   └────────────────┘   └────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Orders carry two identifiers:
//! - `id`: UUID v4 - immutable, used for API routing
//! - `number`: `ORD-…` - human-readable, printed on receipts and chat

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product on the restaurant menu.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Display name shown on the menu and on order lines.
    pub name: String,

    /// Menu description.
    pub description: String,

    /// Price in centavos (smallest currency unit).
    pub price_cents: i64,

    /// Menu category ("Pizzas", "Bebidas", ...). Grouping preserves the
    /// order in which categories first appear in the catalog.
    pub category: String,

    /// Image URL or path, if one has been set or generated.
    pub image_url: Option<String>,

    /// Highlighted as popular on the storefront.
    pub popular: bool,

    /// Whether the product can currently be ordered.
    pub available: bool,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Delivery Option
// =============================================================================

/// Binary fulfillment choice for a checkout session.
///
/// Delivery requires an address and adds the delivery fee; pickup requires
/// neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryOption {
    /// Home delivery: address required, delivery fee applies.
    Delivery,
    /// In-store pickup: no address, no fee.
    Pickup,
}

impl Default for DeliveryOption {
    fn default() -> Self {
        DeliveryOption::Delivery
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Instant bank transfer (Pix QR code at the door / in app).
    Pix,
    /// Credit card on delivery.
    Credit,
    /// Debit card on delivery.
    Debit,
    /// Cash on delivery, optionally with change.
    Cash,
}

impl PaymentMethod {
    /// Whether this method collects card fields.
    #[inline]
    pub const fn is_card(self) -> bool {
        matches!(self, PaymentMethod::Credit | PaymentMethod::Debit)
    }
}

// =============================================================================
// Customer / Address
// =============================================================================

/// Customer contact data collected in checkout step 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Delivery address, required only when the delivery option is `Delivery`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Address {
    pub street: String,
    pub number: String,
    /// Apartment, block, reference point. The only optional field.
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

// =============================================================================
// Payment Details
// =============================================================================

/// Payment data collected in checkout step 2.
///
/// Card fields are only meaningful for credit/debit; `change_for_cents` only
/// for cash. [`PaymentDetails::normalized`] enforces that shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentDetails {
    pub method: Option<PaymentMethod>,
    pub card_number: Option<String>,
    pub card_name: Option<String>,
    pub card_expiry: Option<String>,
    pub card_cvv: Option<String>,
    /// For cash: banknote amount the customer will pay with, in centavos.
    pub change_for_cents: Option<i64>,
}

impl PaymentDetails {
    /// Returns a copy with fields irrelevant to the selected method cleared.
    ///
    /// ## Behavior
    /// - leaving credit/debit clears all four card fields
    /// - leaving cash clears `change_for_cents`
    ///
    /// Mirrors what the payment form does when the customer switches methods,
    /// so stale data from a previous selection can never reach an order.
    pub fn normalized(mut self) -> Self {
        let is_card = self.method.is_some_and(PaymentMethod::is_card);
        if !is_card {
            self.card_number = None;
            self.card_name = None;
            self.card_expiry = None;
            self.card_cvv = None;
        }
        if self.method != Some(PaymentMethod::Cash) {
            self.change_for_cents = None;
        }
        self
    }

    /// Last four digits of the card number, for order snapshots.
    ///
    /// Full card data never leaves the checkout session.
    pub fn card_last_digits(&self) -> Option<String> {
        let digits: String = self
            .card_number
            .as_deref()?
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        if digits.len() < 4 {
            return None;
        }
        Some(digits[digits.len() - 4..].to_string())
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle of an order on the operator board.
///
/// ## Transitions
/// ```text
/// Pending ──► Confirmed ──► Preparing ──► Ready ──► Delivered
///    │             │
///    └─────────────┴──► Cancelled
/// ```
/// Pending orders are accepted (→ Confirmed) or refused (→ Cancelled);
/// confirmed orders may still be cancelled before preparation starts.
/// Delivered and Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Just submitted, awaiting operator acceptance.
    Pending,
    /// Accepted by the restaurant.
    Confirmed,
    /// In the kitchen.
    Preparing,
    /// Ready for courier pickup / customer pickup.
    Ready,
    /// Handed to the customer.
    Delivered,
    /// Refused or cancelled.
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in board display order.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Whether an order may move from `self` to `next`.
    pub fn can_transition(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Preparing)
                | (Confirmed, Cancelled)
                | (Preparing, Ready)
                | (Ready, Delivered)
        )
    }

    /// Terminal statuses accept no further transitions.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Lowercase wire name, matching the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Order
// =============================================================================

/// A line item in an order.
/// Uses snapshot pattern to freeze product data at time of submission.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderItem {
    pub product_id: String,
    /// Product name at time of submission (frozen).
    pub name: String,
    /// Unit price in centavos at time of submission (frozen).
    pub unit_price_cents: i64,
    pub quantity: i64,
    /// Line total (unit_price × quantity).
    pub line_total_cents: i64,
    /// Free-text item note ("sem cebola").
    pub notes: Option<String>,
}

impl OrderItem {
    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

/// Payment summary snapshotted into an order.
///
/// Card numbers are reduced to their last four digits; CVV, expiry and
/// holder name are never stored on the order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderPayment {
    pub method: PaymentMethod,
    pub change_for_cents: Option<i64>,
    pub card_last_digits: Option<String>,
}

/// A submitted order: the immutable snapshot of one checkout session plus
/// the cart it was submitted with.
///
/// Only `status` and `updated_at` change after construction, and only
/// through [`Order::transition_to`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human-readable order number (`ORD-…`), shown to customers.
    pub number: String,

    pub status: OrderStatus,

    pub customer: Customer,

    pub delivery_option: DeliveryOption,

    /// Present iff `delivery_option` is `Delivery`.
    pub address: Option<Address>,

    pub payment: OrderPayment,

    /// Order-level note from the customer.
    pub notes: Option<String>,

    pub items: Vec<OrderItem>,

    pub subtotal_cents: i64,
    pub delivery_fee_cents: i64,
    pub total_cents: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Moves the order to `next`, enforcing the status state machine.
    ///
    /// ## Errors
    /// `CoreError::InvalidStatusTransition` when the move is not allowed.
    pub fn transition_to(&mut self, next: OrderStatus) -> crate::error::CoreResult<()> {
        if !self.status.can_transition(next) {
            return Err(crate::error::CoreError::InvalidStatusTransition {
                from: self.status.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_option_default() {
        assert_eq!(DeliveryOption::default(), DeliveryOption::Delivery);
    }

    #[test]
    fn test_payment_method_is_card() {
        assert!(PaymentMethod::Credit.is_card());
        assert!(PaymentMethod::Debit.is_card());
        assert!(!PaymentMethod::Pix.is_card());
        assert!(!PaymentMethod::Cash.is_card());
    }

    #[test]
    fn test_normalized_clears_card_fields_when_leaving_card() {
        let payment = PaymentDetails {
            method: Some(PaymentMethod::Pix),
            card_number: Some("4111 1111 1111 1111".to_string()),
            card_name: Some("JOAO SILVA".to_string()),
            card_expiry: Some("12/27".to_string()),
            card_cvv: Some("123".to_string()),
            change_for_cents: None,
        }
        .normalized();

        assert!(payment.card_number.is_none());
        assert!(payment.card_name.is_none());
        assert!(payment.card_expiry.is_none());
        assert!(payment.card_cvv.is_none());
    }

    #[test]
    fn test_normalized_clears_change_when_leaving_cash() {
        let payment = PaymentDetails {
            method: Some(PaymentMethod::Credit),
            change_for_cents: Some(10000),
            ..PaymentDetails::default()
        }
        .normalized();

        assert!(payment.change_for_cents.is_none());
    }

    #[test]
    fn test_normalized_keeps_relevant_fields() {
        let payment = PaymentDetails {
            method: Some(PaymentMethod::Cash),
            change_for_cents: Some(10000),
            ..PaymentDetails::default()
        }
        .normalized();

        assert_eq!(payment.change_for_cents, Some(10000));
    }

    #[test]
    fn test_card_last_digits() {
        let payment = PaymentDetails {
            method: Some(PaymentMethod::Credit),
            card_number: Some("4111 1111 1111 1234".to_string()),
            ..PaymentDetails::default()
        };
        assert_eq!(payment.card_last_digits().as_deref(), Some("1234"));

        let empty = PaymentDetails::default();
        assert_eq!(empty.card_last_digits(), None);
    }

    #[test]
    fn test_status_transitions() {
        use OrderStatus::*;

        assert!(Pending.can_transition(Confirmed));
        assert!(Pending.can_transition(Cancelled));
        assert!(Confirmed.can_transition(Preparing));
        assert!(Confirmed.can_transition(Cancelled));
        assert!(Preparing.can_transition(Ready));
        assert!(Ready.can_transition(Delivered));

        assert!(!Pending.can_transition(Ready));
        assert!(!Preparing.can_transition(Cancelled));
        assert!(!Delivered.can_transition(Pending));
        assert!(!Cancelled.can_transition(Confirmed));
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Ready.is_terminal());
    }
}
