//! # Storefront Session State
//!
//! One storefront browser tab = one session = one cart + one checkout flow.
//!
//! ## Ownership Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    SessionsState                                    │
//! │                                                                     │
//! │  Mutex<HashMap<session id, StorefrontSession>>                      │
//! │                       │                                             │
//! │        ┌──────────────┼──────────────┐                              │
//! │        ▼              ▼              ▼                              │
//! │  ┌──────────┐   ┌──────────┐   ┌──────────┐                         │
//! │  │ Session A│   │ Session B│   │ Session C│   no state is shared    │
//! │  │ cart     │   │ cart     │   │ cart     │   between sessions;     │
//! │  │ checkout │   │ checkout │   │ checkout │   each is exclusively   │
//! │  └──────────┘   └──────────┘   └──────────┘   owned by its tab      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! All access goes through `with_session`/`with_session_mut` closures that
//! hold the lock only for the duration of the closure. Nothing here is ever
//! awaited while locked; the submit route splits its work around the gateway
//! await with `begin_submission`/`finish_submission`.

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use deliverypro_core::{Cart, CheckoutFlow};

/// The per-tab state: one cart and one checkout wizard.
#[derive(Debug, Default)]
pub struct StorefrontSession {
    pub cart: Cart,
    pub checkout: CheckoutFlow,
}

/// All live storefront sessions.
///
/// Sessions exist until the process exits; there is no persistence, exactly
/// like the original client-side state that vanished on reload.
#[derive(Debug, Default)]
pub struct SessionsState {
    sessions: Mutex<HashMap<String, StorefrontSession>>,
}

impl SessionsState {
    /// Creates an empty session registry.
    pub fn new() -> Self {
        SessionsState::default()
    }

    /// Opens a new session with the restaurant's delivery fee and returns
    /// its id.
    pub fn create(&self, delivery_fee_cents: i64) -> String {
        let id = Uuid::new_v4().to_string();
        let session = StorefrontSession {
            cart: Cart::with_delivery_fee(delivery_fee_cents),
            checkout: CheckoutFlow::new(),
        };

        let mut sessions = self.sessions.lock().expect("sessions mutex poisoned");
        sessions.insert(id.clone(), session);
        id
    }

    /// Executes a function with read access to one session.
    ///
    /// Returns `None` for an unknown id; the routes turn that into a 404.
    pub fn with_session<F, R>(&self, id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&StorefrontSession) -> R,
    {
        let sessions = self.sessions.lock().expect("sessions mutex poisoned");
        sessions.get(id).map(f)
    }

    /// Executes a function with write access to one session.
    pub fn with_session_mut<F, R>(&self, id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut StorefrontSession) -> R,
    {
        let mut sessions = self.sessions.lock().expect("sessions mutex poisoned");
        sessions.get_mut(id).map(f)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.lock().expect("sessions mutex poisoned").len()
    }

    /// Whether no session is live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_access() {
        let state = SessionsState::new();
        assert!(state.is_empty());

        let id = state.create(590);
        assert_eq!(state.len(), 1);

        let fee = state.with_session(&id, |s| s.cart.delivery_fee_cents);
        assert_eq!(fee, Some(590));
    }

    #[test]
    fn test_unknown_session_is_none() {
        let state = SessionsState::new();
        assert!(state.with_session("nope", |_| ()).is_none());
        assert!(state.with_session_mut("nope", |_| ()).is_none());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let state = SessionsState::new();
        let a = state.create(590);
        let b = state.create(590);

        state.with_session_mut(&a, |s| {
            s.cart.items.push(deliverypro_core::CartItem {
                product_id: "1".to_string(),
                name: "Pizza".to_string(),
                unit_price_cents: 4590,
                quantity: 1,
                image_url: None,
                notes: None,
                added_at: chrono::Utc::now(),
            });
        });

        assert_eq!(state.with_session(&a, |s| s.cart.item_count()), Some(1));
        assert_eq!(state.with_session(&b, |s| s.cart.item_count()), Some(0));
    }
}
