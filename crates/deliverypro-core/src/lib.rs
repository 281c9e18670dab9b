//! # deliverypro-core: Pure Business Logic for DeliveryPro
//!
//! This crate is the **heart** of DeliveryPro. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      DeliveryPro Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React/TypeScript)                  │   │
//! │  │   Storefront ──► Cart UI ──► Checkout Wizard ──► Dashboard      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/server (axum)                           │   │
//! │  │   sessions, menu, orders, analytics, chat, image proxy          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ deliverypro-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌──────┐ ┌──────────┐ ┌─────────┐ ┌───────────┐   │   │
//! │  │  │  money  │ │ cart │ │ checkout │ │ catalog │ │ analytics │   │   │
//! │  │  └─────────┘ └──────┘ └──────────┘ └─────────┘ └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, Customer, Payment, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level validation
//! - [`cart`] - The shopping cart and its derived totals
//! - [`checkout`] - The three-step checkout wizard and order submission
//! - [`catalog`] - Menu queries and menu-management edits
//! - [`analytics`] - Dashboard aggregations over submitted orders
//! - [`chat`] - The scripted WhatsApp-style responder
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic over its inputs
//! 2. **No I/O**: network, file system and database access are FORBIDDEN
//!    here; the one async seam ([`checkout::OrderGateway`]) is only a trait
//! 3. **Integer Money**: all monetary values are centavos (i64), never floats
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use deliverypro_core::money::Money;
//!
//! // Create money from centavos (never from floats!)
//! let subtotal = Money::from_cents(4590);       // R$ 45,90
//! let delivery_fee = Money::from_cents(590);    // R$  5,90
//!
//! assert_eq!((subtotal + delivery_fee).cents(), 5180);
//! assert_eq!((subtotal + delivery_fee).to_string(), "R$ 51,80");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod chat;
pub mod checkout;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use deliverypro_core::Cart` instead of
// `use deliverypro_core::cart::Cart`

pub use cart::{Cart, CartItem, CartTotals};
pub use catalog::{Catalog, MenuItemUpdate};
pub use checkout::{CheckoutData, CheckoutFlow, CheckoutStep, OrderGateway};
pub use error::{CoreError, CoreResult, SubmitError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default delivery fee in centavos (R$ 5,90).
///
/// Fixed per session; the restaurant profile can override it at startup.
/// The fee only ever applies to a non-empty delivery order.
pub const DEFAULT_DELIVERY_FEE_CENTS: i64 = 590;

/// Maximum distinct items allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts; a delivery order never legitimately carries more
/// distinct menu lines than this.
pub const MAX_CART_ITEMS: usize = 50;

/// Maximum quantity of a single item in cart.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g. typing 100 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 99;
