//! # Cart Module
//!
//! The authoritative in-memory shopping cart and its derived totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                  │
//! │                                                                     │
//! │  Storefront Action          Operation             State Change      │
//! │  ─────────────────          ─────────             ────────────      │
//! │  Click product ───────────► add_item() ─────────► qty += 1 / push   │
//! │  Change quantity ─────────► update_quantity() ──► qty = n (0 drops) │
//! │  Click remove ────────────► remove_item() ──────► item dropped      │
//! │  Clear / after submit ────► clear() ────────────► empty cart        │
//! │                                                                     │
//! │  Totals are never stored: subtotal and total are recomputed from    │
//! │  the item list on every read, so they cannot drift from it.         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line item per product id (adding again increments quantity)
//! - Quantity is always >= 1 (an update to 0 or below removes the line)
//! - Maximum distinct items: [`crate::MAX_CART_ITEMS`]
//! - Maximum quantity per item: [`crate::MAX_ITEM_QUANTITY`]
//! - The delivery fee contributes to the total only when the cart has items;
//!   an empty cart always totals zero

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{DeliveryOption, Product};
use crate::{DEFAULT_DELIVERY_FEE_CENTS, MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Item
// =============================================================================

/// An item in the shopping cart.
///
/// Carries a frozen copy of the product data taken at the moment it was
/// added, so a menu edit mid-session cannot change a cart line under the
/// customer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    /// Product ID this line refers to.
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Price in centavos at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Quantity in cart, always >= 1.
    pub quantity: i64,

    /// Image for the cart display, if the product had one.
    pub image_url: Option<String>,

    /// Free-text note for the kitchen ("sem cebola").
    pub notes: Option<String>,

    /// When this item was first added to the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new cart line from a product, with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        CartItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price_cents: product.price_cents,
            quantity: 1,
            image_url: product.image_url.clone(),
            notes: None,
            added_at: Utc::now(),
        }
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart for one storefront session.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    /// Items in insertion order (meaningful for display only).
    pub items: Vec<CartItem>,

    /// Delivery fee in centavos, fixed for the session. Contributes to the
    /// total only when the cart is non-empty and the customer chose delivery.
    pub delivery_fee_cents: i64,

    /// When the cart was created or last cleared.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart with the default delivery fee.
    pub fn new() -> Self {
        Cart::with_delivery_fee(DEFAULT_DELIVERY_FEE_CENTS)
    }

    /// Creates a new empty cart with a restaurant-specific delivery fee.
    pub fn with_delivery_fee(delivery_fee_cents: i64) -> Self {
        Cart {
            items: Vec::new(),
            delivery_fee_cents,
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity increases by 1
    /// - Product not in cart: appended as a new line with quantity 1
    ///
    /// ## Errors
    /// - `ProductUnavailable` if the product is flagged unavailable
    /// - `QuantityTooLarge` / `CartTooLarge` at the session guardrails
    pub fn add_item(&mut self, product: &Product) -> CoreResult<()> {
        if !product.available {
            return Err(CoreError::ProductUnavailable(product.id.clone()));
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            let new_qty = item.quantity + 1;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = new_qty;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(CartItem::from_product(product));
        Ok(())
    }

    /// Removes the line matching `product_id`.
    ///
    /// A missing id is a harmless no-op, not an error: the customer may have
    /// double-clicked remove, and there is nothing to recover from.
    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Sets the quantity of a line to an absolute value.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: behaves exactly like [`Cart::remove_item`]
    /// - Missing id: no-op
    ///
    /// ## Errors
    /// `QuantityTooLarge` above the session guardrail.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            self.remove_item(product_id);
            return Ok(());
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity;
        }
        Ok(())
    }

    /// Attaches a kitchen note to a line. Missing id is a no-op.
    pub fn set_item_notes(&mut self, product_id: &str, notes: Option<String>) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.notes = notes;
        }
    }

    /// Clears all items from the cart. The configured delivery fee is kept
    /// for the next use.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of distinct lines in the cart.
    pub fn distinct_items(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines (the badge count).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Calculates the subtotal (sum of line totals).
    pub fn subtotal_cents(&self) -> i64 {
        self.items.iter().map(|i| i.line_total_cents()).sum()
    }

    /// Delivery fee that actually applies: zero for an empty cart.
    pub fn effective_delivery_fee_cents(&self) -> i64 {
        if self.items.is_empty() {
            0
        } else {
            self.delivery_fee_cents
        }
    }

    /// Calculates the grand total assuming home delivery.
    ///
    /// An empty cart totals zero: the delivery fee never applies on its own.
    pub fn total_cents(&self) -> i64 {
        self.subtotal_cents() + self.effective_delivery_fee_cents()
    }

    /// Calculates the totals for a given fulfillment choice.
    ///
    /// Pickup drops the delivery fee entirely.
    pub fn totals_for(&self, option: DeliveryOption) -> CartTotals {
        let delivery_fee_cents = match option {
            DeliveryOption::Delivery => self.effective_delivery_fee_cents(),
            DeliveryOption::Pickup => 0,
        };
        let subtotal_cents = self.subtotal_cents();

        CartTotals {
            item_count: self.item_count(),
            distinct_items: self.distinct_items(),
            subtotal_cents,
            delivery_fee_cents,
            total_cents: subtotal_cents + delivery_fee_cents,
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary, recomputed from the item list on demand.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub item_count: i64,
    pub distinct_items: usize,
    pub subtotal_cents: i64,
    pub delivery_fee_cents: i64,
    pub total_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        cart.totals_for(DeliveryOption::Delivery)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Produto {}", id),
            description: String::new(),
            price_cents,
            category: "Pizzas".to_string(),
            image_url: None,
            popular: false,
            available: true,
        }
    }

    #[test]
    fn test_add_item_new_line() {
        let mut cart = Cart::new();
        let product = test_product("1", 4590);

        cart.add_item(&product).unwrap();

        assert_eq!(cart.distinct_items(), 1);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.subtotal_cents(), 4590);
    }

    #[test]
    fn test_repeated_add_increments_single_line() {
        let mut cart = Cart::new();
        let product = test_product("1", 4590);

        for _ in 0..3 {
            cart.add_item(&product).unwrap();
        }

        assert_eq!(cart.distinct_items(), 1);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_totals_with_delivery_fee() {
        let mut cart = Cart::new();
        let product = test_product("1", 4590);

        cart.add_item(&product).unwrap();
        assert_eq!(cart.subtotal_cents(), 4590);
        assert_eq!(cart.total_cents(), 5180); // R$ 45,90 + R$ 5,90

        cart.add_item(&product).unwrap();
        assert_eq!(cart.subtotal_cents(), 9180);
        assert_eq!(cart.total_cents(), 9770);

        cart.remove_item("1");
        assert!(cart.is_empty());
        assert_eq!(cart.total_cents(), 0); // fee never applies on its own
    }

    #[test]
    fn test_pickup_drops_delivery_fee() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 4590)).unwrap();

        let totals = cart.totals_for(DeliveryOption::Pickup);
        assert_eq!(totals.delivery_fee_cents, 0);
        assert_eq!(totals.total_cents, 4590);

        let delivery = cart.totals_for(DeliveryOption::Delivery);
        assert_eq!(delivery.delivery_fee_cents, DEFAULT_DELIVERY_FEE_CENTS);
        assert_eq!(delivery.total_cents, 5180);
    }

    #[test]
    fn test_update_quantity_absolute_set() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 4590)).unwrap();

        cart.update_quantity("1", 5).unwrap();
        assert_eq!(cart.items[0].quantity, 5);
        assert_eq!(cart.subtotal_cents(), 22950);
    }

    #[test]
    fn test_update_quantity_zero_removes_like_remove_item() {
        let mut via_update = Cart::new();
        let mut via_remove = Cart::new();
        let product = test_product("1", 4590);

        via_update.add_item(&product).unwrap();
        via_remove.add_item(&product).unwrap();

        via_update.update_quantity("1", 0).unwrap();
        via_remove.remove_item("1");

        assert!(via_update.is_empty());
        assert_eq!(via_update.total_cents(), via_remove.total_cents());
        assert_eq!(via_update.distinct_items(), via_remove.distinct_items());
    }

    #[test]
    fn test_missing_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 4590)).unwrap();

        cart.remove_item("999");
        cart.update_quantity("999", 3).unwrap();

        assert_eq!(cart.distinct_items(), 1);
        assert_eq!(cart.items[0].quantity, 1);
    }

    #[test]
    fn test_unavailable_product_rejected() {
        let mut cart = Cart::new();
        let mut product = test_product("1", 4590);
        product.available = false;

        let err = cart.add_item(&product).unwrap_err();
        assert!(matches!(err, CoreError::ProductUnavailable(id) if id == "1"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_guardrails() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 4590)).unwrap();

        let err = cart.update_quantity("1", MAX_ITEM_QUANTITY + 1).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
        // failed update leaves the line untouched
        assert_eq!(cart.items[0].quantity, 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::with_delivery_fee(790);
        cart.add_item(&test_product("1", 4590)).unwrap();

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_cents(), 0);
        // the configured fee survives the clear
        assert_eq!(cart.delivery_fee_cents, 790);
    }

    #[test]
    fn test_item_notes() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 4590)).unwrap();

        cart.set_item_notes("1", Some("sem cebola".to_string()));
        assert_eq!(cart.items[0].notes.as_deref(), Some("sem cebola"));

        cart.set_item_notes("999", Some("ignored".to_string()));
        assert_eq!(cart.distinct_items(), 1);
    }
}
