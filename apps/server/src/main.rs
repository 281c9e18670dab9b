//! # DeliveryPro Server Entry Point
//!
//! Thin binary shell: the actual setup lives in `lib.rs` for testability.

#[tokio::main]
async fn main() {
    deliverypro_server::run().await;
}
