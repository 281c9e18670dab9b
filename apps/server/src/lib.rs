//! # DeliveryPro Server Library
//!
//! Core library for the mocked DeliveryPro SaaS backend.
//! The binary in `main.rs` is a thin shell around [`run`].
//!
//! ## Module Organization
//! ```text
//! deliverypro_server/
//! ├── lib.rs          ◄─── You are here (startup & wiring)
//! ├── config.rs       ◄─── Env-with-defaults configuration
//! ├── error.rs        ◄─── ApiError for route handlers
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState + container exports
//! │   ├── catalog.rs  ◄─── Menu state + demo seed
//! │   ├── session.rs  ◄─── Per-tab cart + checkout sessions
//! │   ├── orders.rs   ◄─── Operator order board + demo seed
//! │   └── chat.rs     ◄─── Conversation log
//! ├── services/
//! │   ├── gateway.rs  ◄─── Simulated order-submission backend
//! │   └── images.rs   ◄─── Outbound image-generation client
//! └── routes/         ◄─── One file per API concern
//! ```
//!
//! Everything is in-memory mock state: restarting the server resets the
//! menu, the board, the sessions and the chat, exactly like reloading the
//! original client-side demo.

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use state::AppState;

/// Runs the server until the process is stopped.
///
/// ## Startup Sequence
/// 1. Initialize tracing (env-filtered, `RUST_LOG` aware)
/// 2. Load configuration from the environment
/// 3. Seed the in-memory state (demo menu, demo order board)
/// 4. Bind and serve the router
pub async fn run() {
    init_tracing();

    let config = AppConfig::from_env();
    let port = config.port;
    info!(port, restaurant = %config.restaurant.name, "starting DeliveryPro server");

    let state = AppState::new(config);
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("failed to bind server port");

    info!("listening on http://0.0.0.0:{port}");
    axum::serve(listener, app)
        .await
        .expect("server error");
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - show debug messages
/// - `RUST_LOG=deliverypro=trace` - trace for our crates only
/// - Default: info, with debug for our own crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,deliverypro=debug,tower_http=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
