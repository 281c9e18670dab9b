//! # State Module
//!
//! Application state for the mocked SaaS backend.
//!
//! ## Why Multiple State Types?
//! Instead of one struct holding everything behind one lock, each concern
//! gets its own container:
//!
//! 1. **Better Separation of Concerns**: each state type has one job
//! 2. **Reduced Contention**: a menu edit never blocks a cart mutation
//! 3. **Clearer Handlers**: a route reads exactly the state it touches
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        AppState (Arc)                               │
//! │                                                                     │
//! │  ┌──────────────┐ ┌──────────────┐ ┌────────────┐ ┌────────────┐    │
//! │  │ CatalogState │ │ SessionsState│ │ OrdersState│ │ ChatState  │    │
//! │  │ menu         │ │ cart+checkout│ │ board      │ │ log        │    │
//! │  │ (Mutex)      │ │ per tab      │ │ (Mutex)    │ │ (Mutex)    │    │
//! │  └──────────────┘ └──────────────┘ └────────────┘ └────────────┘    │
//! │                                                                     │
//! │  + AppConfig (read-only)                                            │
//! │  + MockOrderGateway / ImageClient (stateless services)              │
//! │                                                                     │
//! │  THREAD SAFETY: every mutex is held only inside a with_* closure,   │
//! │  never across an await point.                                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod chat;
mod orders;
mod session;

pub use catalog::{demo_menu, CatalogState};
pub use chat::ChatState;
pub use orders::{demo_orders, OrdersState};
pub use session::{SessionsState, StorefrontSession};

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::gateway::MockOrderGateway;
use crate::services::images::ImageClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; axum clones it per request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    catalog: CatalogState,
    sessions: SessionsState,
    orders: OrdersState,
    chat: ChatState,
    gateway: MockOrderGateway,
    image_client: Option<ImageClient>,
}

impl AppState {
    /// Builds the full state for one server: demo menu, demo order board,
    /// empty session registry, greeting-only chat log.
    pub fn new(config: AppConfig) -> Self {
        let image_client = ImageClient::from_config(&config.image_gateway);
        let gateway = MockOrderGateway::new(config.submit_delay_ms);

        AppState {
            inner: Arc::new(AppStateInner {
                catalog: CatalogState::default(),
                sessions: SessionsState::new(),
                orders: OrdersState::default(),
                chat: ChatState::new(),
                gateway,
                image_client,
                config,
            }),
        }
    }

    /// The server configuration.
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// The menu.
    pub fn catalog(&self) -> &CatalogState {
        &self.inner.catalog
    }

    /// The storefront sessions.
    pub fn sessions(&self) -> &SessionsState {
        &self.inner.sessions
    }

    /// The order board.
    pub fn orders(&self) -> &OrdersState {
        &self.inner.orders
    }

    /// The chat log.
    pub fn chat(&self) -> &ChatState {
        &self.inner.chat
    }

    /// The simulated order-submission backend.
    pub fn gateway(&self) -> &MockOrderGateway {
        &self.inner.gateway
    }

    /// The image-generation client, when an API key is configured.
    pub fn image_client(&self) -> Option<&ImageClient> {
        self.inner.image_client.as_ref()
    }
}
