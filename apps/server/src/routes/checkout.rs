//! # Checkout Routes
//!
//! Wizard navigation and order submission for one storefront session.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  POST .../checkout/submit                                           │
//! │                                                                     │
//! │  1. lock session ── begin_submission(cart)                          │
//! │       • validates steps 1-2 + change amount                         │
//! │       • raises the in-flight guard                                  │
//! │       • builds the immutable Order                  ── unlock       │
//! │                                                                     │
//! │  2. gateway.submit(&order).await     ◄── simulated network delay;   │
//! │                                          no lock held here          │
//! │                                                                     │
//! │  3. lock session ── finish_submission()                             │
//! │       • on success: clear the cart                  ── unlock       │
//! │                                                                     │
//! │  4. push the order onto the operator board, return it               │
//! │                                                                     │
//! │  A concurrent submit between 1 and 3 gets 409 CONFLICT.             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use deliverypro_core::checkout::OrderGateway;
use deliverypro_core::error::CoreError;
use deliverypro_core::{
    Address, CheckoutData, CheckoutStep, Customer, DeliveryOption, Order, PaymentDetails,
};

use crate::error::ApiError;
use crate::state::{AppState, StorefrontSession};

// =============================================================================
// DTOs
// =============================================================================

/// Validity of one wizard step, for the progress indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepStatus {
    pub number: u8,
    pub valid: bool,
}

/// Snapshot of the wizard for the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutView {
    /// 1-based current step.
    pub step: u8,
    pub data: CheckoutData,
    pub submitting: bool,
    pub steps: Vec<StepStatus>,
}

impl CheckoutView {
    fn from_session(session: &StorefrontSession) -> Self {
        let flow = &session.checkout;
        CheckoutView {
            step: flow.step().number(),
            data: flow.data().clone(),
            submitting: flow.is_submitting(),
            steps: [
                CheckoutStep::CustomerInfo,
                CheckoutStep::Payment,
                CheckoutStep::Review,
            ]
            .into_iter()
            .map(|step| StepStatus {
                number: step.number(),
                valid: flow.validate_step(step),
            })
            .collect(),
        }
    }
}

/// Request body for `PUT .../checkout/options`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOptionsRequest {
    pub delivery_option: Option<DeliveryOption>,
    /// Order-level note; a blank string clears it.
    pub notes: Option<String>,
}

/// Request body for `POST .../checkout/goto`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GotoStepRequest {
    pub step: u8,
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Runs a closure against the session's wizard and answers with the updated
/// view. Every non-navigation handler below is this pattern.
fn with_flow<F>(state: &AppState, session_id: &str, f: F) -> Result<Json<CheckoutView>, ApiError>
where
    F: FnOnce(&mut StorefrontSession),
{
    state
        .sessions()
        .with_session_mut(session_id, |session| {
            f(session);
            CheckoutView::from_session(session)
        })
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Session", session_id))
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET .../checkout` - the wizard snapshot.
pub async fn get_state(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<CheckoutView>, ApiError> {
    debug!(session = %session_id, "checkout state");

    state
        .sessions()
        .with_session(&session_id, CheckoutView::from_session)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Session", &session_id))
}

/// `PUT .../checkout/customer` - replaces the customer block.
pub async fn update_customer(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(customer): Json<Customer>,
) -> Result<Json<CheckoutView>, ApiError> {
    debug!(session = %session_id, "update_customer");
    with_flow(&state, &session_id, |s| s.checkout.update_customer(customer))
}

/// `PUT .../checkout/address` - replaces the address block.
pub async fn update_address(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(address): Json<Address>,
) -> Result<Json<CheckoutView>, ApiError> {
    debug!(session = %session_id, "update_address");
    with_flow(&state, &session_id, |s| s.checkout.update_address(address))
}

/// `PUT .../checkout/payment` - replaces the payment block.
///
/// The stored value is normalized: switching methods drops the fields that
/// no longer apply.
pub async fn update_payment(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(payment): Json<PaymentDetails>,
) -> Result<Json<CheckoutView>, ApiError> {
    debug!(session = %session_id, "update_payment");
    with_flow(&state, &session_id, |s| s.checkout.update_payment(payment))
}

/// `PUT .../checkout/options` - delivery option and order note.
pub async fn update_options(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<UpdateOptionsRequest>,
) -> Result<Json<CheckoutView>, ApiError> {
    debug!(session = %session_id, ?request, "update_options");
    with_flow(&state, &session_id, |s| {
        if let Some(option) = request.delivery_option {
            s.checkout.update_delivery_option(option);
        }
        if let Some(notes) = request.notes {
            s.checkout.update_notes(Some(notes));
        }
    })
}

/// `POST .../checkout/next` - advances one step, gated on validation.
///
/// A validation failure answers 400 with the first failing field and the
/// step does not move.
pub async fn next_step(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<CheckoutView>, ApiError> {
    debug!(session = %session_id, "next_step");

    let result = state
        .sessions()
        .with_session_mut(&session_id, |session| {
            session.checkout.next_step()?;
            Ok::<CheckoutView, CoreError>(CheckoutView::from_session(session))
        })
        .ok_or_else(|| ApiError::not_found("Session", &session_id))?;

    Ok(Json(result?))
}

/// `POST .../checkout/back` - goes back one step (never validates).
pub async fn prev_step(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<CheckoutView>, ApiError> {
    debug!(session = %session_id, "prev_step");
    with_flow(&state, &session_id, |s| {
        s.checkout.prev_step();
    })
}

/// `POST .../checkout/goto` - the progress-indicator jump.
///
/// Deliberately unvalidated; see the wizard's `jump_to_step`.
pub async fn jump_to_step(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<GotoStepRequest>,
) -> Result<Json<CheckoutView>, ApiError> {
    debug!(session = %session_id, step = request.step, "jump_to_step");

    let result = state
        .sessions()
        .with_session_mut(&session_id, |session| {
            session.checkout.jump_to_step(request.step)?;
            Ok::<CheckoutView, CoreError>(CheckoutView::from_session(session))
        })
        .ok_or_else(|| ApiError::not_found("Session", &session_id))?;

    Ok(Json(result?))
}

/// `POST .../checkout/submit` - builds the order and runs it through the
/// simulated backend.
///
/// On success the cart is cleared and the order lands on the operator
/// board; the response is the immutable order snapshot.
pub async fn submit(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    debug!(session = %session_id, "submit order");

    // Phase 1: validate, raise the guard, build the snapshot (lock held).
    let order = state
        .sessions()
        .with_session_mut(&session_id, |session| {
            let cart = session.cart.clone();
            session.checkout.begin_submission(&cart)
        })
        .ok_or_else(|| ApiError::not_found("Session", &session_id))??;

    // Phase 2: the simulated network call (no lock held).
    let submit_result = state.gateway().submit(&order).await;

    // Phase 3: lower the guard; clear the cart only on success (lock held).
    let succeeded = submit_result.is_ok();
    state.sessions().with_session_mut(&session_id, |session| {
        session.checkout.finish_submission();
        if succeeded {
            session.cart.clear();
        }
    });

    if let Err(err) = submit_result {
        warn!(session = %session_id, error = %err, "order submission failed");
        return Err(CoreError::from(err).into());
    }

    info!(
        order = %order.number,
        total = %order.total(),
        items = order.items.len(),
        "order submitted"
    );

    state.orders().push(order.clone());
    Ok(Json(order))
}
