//! # Checkout Module
//!
//! The three-step checkout wizard and order submission.
//!
//! ## Checkout Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Flow                                    │
//! │                                                                     │
//! │  ┌────────────┐      ┌──────────┐      ┌──────────┐                 │
//! │  │ Customer   │─────►│ Payment  │─────►│  Review  │──► submit       │
//! │  │ + Address  │◄─────│          │◄─────│          │                 │
//! │  └────────────┘      └──────────┘      └──────────┘                 │
//! │                                                                     │
//! │  next_step()    validates the current step first; on failure the    │
//! │                 step does not move and the error goes to the caller │
//! │  prev_step()    always allowed, clamped at step 1                   │
//! │  jump_to_step() the progress-indicator jump: deliberately does NOT  │
//! │                 validate (an explicit capability, not an accident)  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Submission
//! `begin_submission` validates everything, raises the in-flight guard and
//! produces the immutable [`Order`] snapshot; `finish_submission` lowers the
//! guard. The async [`CheckoutFlow::submit_order`] convenience drives both
//! around an [`OrderGateway`] call so the guard covers the suspend point —
//! a second submit while one is awaiting fails instead of duplicating the
//! order.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult, SubmitError, ValidationError};
use crate::types::{
    Address, Customer, DeliveryOption, Order, OrderItem, OrderPayment, OrderStatus, PaymentDetails,
};
use crate::validation::{
    validate_address, validate_card_fields, validate_change_for, validate_customer,
};

// =============================================================================
// Checkout Step
// =============================================================================

/// The three wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    /// Step 1: customer contact data, plus address when delivering.
    CustomerInfo,
    /// Step 2: payment method and conditional fields.
    Payment,
    /// Step 3: review. Always valid; the terminal step.
    Review,
}

impl CheckoutStep {
    /// 1-based step number as shown in the progress indicator.
    pub const fn number(self) -> u8 {
        match self {
            CheckoutStep::CustomerInfo => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Review => 3,
        }
    }

    /// Parses a 1-based step number.
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(CheckoutStep::CustomerInfo),
            2 => Some(CheckoutStep::Payment),
            3 => Some(CheckoutStep::Review),
            _ => None,
        }
    }

    /// The following step, clamped at Review.
    pub const fn next(self) -> Self {
        match self {
            CheckoutStep::CustomerInfo => CheckoutStep::Payment,
            CheckoutStep::Payment | CheckoutStep::Review => CheckoutStep::Review,
        }
    }

    /// The preceding step, clamped at CustomerInfo.
    pub const fn prev(self) -> Self {
        match self {
            CheckoutStep::CustomerInfo | CheckoutStep::Payment => CheckoutStep::CustomerInfo,
            CheckoutStep::Review => CheckoutStep::Payment,
        }
    }
}

impl Default for CheckoutStep {
    fn default() -> Self {
        CheckoutStep::CustomerInfo
    }
}

// =============================================================================
// Checkout Data
// =============================================================================

/// Everything the wizard collects before an order can be built.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutData {
    pub customer: Option<Customer>,
    /// Collected alongside the customer; required only for delivery.
    pub address: Option<Address>,
    pub payment: PaymentDetails,
    pub notes: Option<String>,
    pub delivery_option: DeliveryOption,
}

// =============================================================================
// Order Gateway
// =============================================================================

/// The order submission seam.
///
/// The checkout logic never talks to a network itself; it hands the built
/// [`Order`] to whatever implementation the application wires in. The server
/// ships a mock that sleeps and resolves; a real backend slots in without
/// touching this module.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Forwards the order to the backend.
    ///
    /// ## Errors
    /// `SubmitError` when the backend is unreachable or refuses the order.
    /// The caller decides whether to resubmit; there is no retry here.
    async fn submit(&self, order: &Order) -> Result<(), SubmitError>;
}

// =============================================================================
// Checkout Flow
// =============================================================================

/// State container for one checkout session.
///
/// ## Invariants
/// - `step` only advances through a step whose validation passed
/// - at most one submission is in flight at a time
/// - the produced [`Order`] is a snapshot: later cart or wizard edits do
///   not touch it
#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    data: CheckoutData,
    submitting: bool,
}

impl CheckoutFlow {
    /// Creates a wizard at step 1 with delivery preselected.
    pub fn new() -> Self {
        CheckoutFlow::default()
    }

    /// The current step.
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// The data collected so far.
    pub fn data(&self) -> &CheckoutData {
        &self.data
    }

    /// Whether a submission is currently in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    // -------------------------------------------------------------------------
    // Data updates
    // -------------------------------------------------------------------------

    /// Replaces the customer block.
    pub fn update_customer(&mut self, customer: Customer) {
        self.data.customer = Some(customer);
    }

    /// Replaces the address block.
    pub fn update_address(&mut self, address: Address) {
        self.data.address = Some(address);
    }

    /// Replaces the payment block.
    ///
    /// The stored value is normalized: fields irrelevant to the selected
    /// method are cleared, so switching from credit to pix drops the card
    /// data and switching from cash drops the change amount.
    pub fn update_payment(&mut self, payment: PaymentDetails) {
        self.data.payment = payment.normalized();
    }

    /// Switches the fulfillment choice. Collected address data is kept; it
    /// simply stops being required while pickup is selected.
    pub fn update_delivery_option(&mut self, option: DeliveryOption) {
        self.data.delivery_option = option;
    }

    /// Sets or clears the order-level note.
    pub fn update_notes(&mut self, notes: Option<String>) {
        self.data.notes = notes.filter(|n| !n.trim().is_empty());
    }

    // -------------------------------------------------------------------------
    // Step validation & navigation
    // -------------------------------------------------------------------------

    /// Collects every validation failure for a step.
    ///
    /// ## Contract
    /// - Step 1: customer name/email/phone, plus the address fields when the
    ///   delivery option is `Delivery` (pickup skips the address entirely)
    /// - Step 2: a payment method must be chosen; credit/debit additionally
    ///   require all four card fields
    /// - Step 3: always valid
    pub fn step_errors(&self, step: CheckoutStep) -> Vec<ValidationError> {
        match step {
            CheckoutStep::CustomerInfo => {
                let mut errors =
                    validate_customer(self.data.customer.as_ref().unwrap_or(&Customer::default()));

                if self.data.delivery_option == DeliveryOption::Delivery {
                    errors.extend(validate_address(
                        self.data.address.as_ref().unwrap_or(&Address::default()),
                    ));
                }

                errors
            }
            CheckoutStep::Payment => match self.data.payment.method {
                None => vec![ValidationError::Required {
                    field: "paymentMethod".to_string(),
                }],
                Some(method) if method.is_card() => validate_card_fields(&self.data.payment),
                Some(_) => Vec::new(),
            },
            CheckoutStep::Review => Vec::new(),
        }
    }

    /// Boolean form of [`CheckoutFlow::step_errors`].
    pub fn validate_step(&self, step: CheckoutStep) -> bool {
        self.step_errors(step).is_empty()
    }

    /// Advances to the next step, gated on the current step's validation.
    ///
    /// On failure the step does not move and the first failing field comes
    /// back as the error, for the blocking notification.
    pub fn next_step(&mut self) -> CoreResult<CheckoutStep> {
        if let Some(err) = self.step_errors(self.step).into_iter().next() {
            return Err(err.into());
        }
        self.step = self.step.next();
        Ok(self.step)
    }

    /// Goes back one step, clamped at step 1. Never validates.
    pub fn prev_step(&mut self) -> CheckoutStep {
        self.step = self.step.prev();
        self.step
    }

    /// Jumps directly to a step **without validating anything**.
    ///
    /// This is the progress-indicator navigation: clicking a step circle
    /// moves there even when earlier steps are incomplete. Submission still
    /// re-validates everything, so nothing incomplete can become an order.
    ///
    /// ## Errors
    /// `InvalidStep` for numbers outside 1..=3.
    pub fn jump_to_step(&mut self, step_number: u8) -> CoreResult<CheckoutStep> {
        let step =
            CheckoutStep::from_number(step_number).ok_or(CoreError::InvalidStep(step_number))?;
        self.step = step;
        Ok(self.step)
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    /// Validates the whole wizard, raises the in-flight guard and builds the
    /// immutable order snapshot.
    ///
    /// The caller must pair this with [`CheckoutFlow::finish_submission`]
    /// once the gateway call resolves, success or not.
    ///
    /// ## Errors
    /// - `SubmissionInFlight` if a submission is already running
    /// - `EmptyCart` for a cart with no items
    /// - `Validation` for any step-1/step-2 failure, or a cash change amount
    ///   below the order total
    pub fn begin_submission(&mut self, cart: &Cart) -> CoreResult<Order> {
        if self.submitting {
            return Err(CoreError::SubmissionInFlight);
        }

        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        for step in [CheckoutStep::CustomerInfo, CheckoutStep::Payment] {
            if let Some(err) = self.step_errors(step).into_iter().next() {
                return Err(err.into());
            }
        }

        let totals = cart.totals_for(self.data.delivery_option);
        validate_change_for(self.data.payment.change_for_cents, totals.total_cents)?;

        // Both unwraps above were just validated; rebuild without panicking
        // anyway so the types stay honest.
        let customer = self
            .data
            .customer
            .clone()
            .ok_or(CoreError::Validation(ValidationError::Required {
                field: "name".to_string(),
            }))?;
        let method =
            self.data
                .payment
                .method
                .ok_or(CoreError::Validation(ValidationError::Required {
                    field: "paymentMethod".to_string(),
                }))?;

        let address = match self.data.delivery_option {
            DeliveryOption::Delivery => self.data.address.clone(),
            DeliveryOption::Pickup => None,
        };

        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4().to_string(),
            number: generate_order_number(),
            status: OrderStatus::Pending,
            customer,
            delivery_option: self.data.delivery_option,
            address,
            payment: OrderPayment {
                method,
                change_for_cents: self.data.payment.change_for_cents,
                card_last_digits: self.data.payment.card_last_digits(),
            },
            notes: self.data.notes.clone(),
            items: cart
                .items
                .iter()
                .map(|line| OrderItem {
                    product_id: line.product_id.clone(),
                    name: line.name.clone(),
                    unit_price_cents: line.unit_price_cents,
                    quantity: line.quantity,
                    line_total_cents: line.line_total_cents(),
                    notes: line.notes.clone(),
                })
                .collect(),
            subtotal_cents: totals.subtotal_cents,
            delivery_fee_cents: totals.delivery_fee_cents,
            total_cents: totals.total_cents,
            created_at: now,
            updated_at: now,
        };

        self.submitting = true;
        Ok(order)
    }

    /// Lowers the in-flight guard after the gateway call resolved.
    pub fn finish_submission(&mut self) {
        self.submitting = false;
    }

    /// Builds the order and drives it through the gateway.
    ///
    /// The in-flight guard stays raised for the entire await, so concurrent
    /// callers sharing this flow get `SubmissionInFlight` instead of a
    /// duplicate order. Gateway failures lower the guard and surface as
    /// `CoreError::Submission`; the caller may simply call again.
    pub async fn submit_order(
        &mut self,
        cart: &Cart,
        gateway: &impl OrderGateway,
    ) -> CoreResult<Order> {
        let order = self.begin_submission(cart)?;

        let result = gateway.submit(&order).await;
        self.finish_submission();
        result?;

        Ok(order)
    }
}

// =============================================================================
// Order Number Generation
// =============================================================================

/// Generates a human-readable order number.
///
/// Time-based token with a sub-second suffix: `ORD-250808-142301-0042`.
/// Unique enough for a single restaurant's order volume; the UUID `id` is
/// what the system keys on.
fn generate_order_number() -> String {
    let now = Utc::now();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    format!("ORD-{}-{:04}", now.format("%y%m%d-%H%M%S"), nanos % 10000)
}

// =============================================================================
// Unit Tests
// =============================================================================
