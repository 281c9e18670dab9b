//! # Mock Order Gateway
//!
//! The stand-in for a real order-submission backend.
//!
//! There is no backend in this product: submission "succeeds" after a fixed
//! simulated network delay. Because the seam is the `OrderGateway` trait,
//! swapping this for a real HTTP client later touches nothing in the
//! checkout logic or the routes.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use deliverypro_core::checkout::OrderGateway;
use deliverypro_core::{Order, SubmitError};

/// Simulated order backend: sleeps, then accepts.
#[derive(Debug, Clone)]
pub struct MockOrderGateway {
    delay: Duration,
    outcome: Outcome,
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Accept,
    RefuseWithNetworkError,
}

impl MockOrderGateway {
    /// A gateway that accepts every order after `delay_ms` of simulated
    /// network latency.
    pub fn new(delay_ms: u64) -> Self {
        MockOrderGateway {
            delay: Duration::from_millis(delay_ms),
            outcome: Outcome::Accept,
        }
    }

    /// A gateway that fails every submission, for exercising the error path.
    pub fn failing(delay_ms: u64) -> Self {
        MockOrderGateway {
            delay: Duration::from_millis(delay_ms),
            outcome: Outcome::RefuseWithNetworkError,
        }
    }
}

#[async_trait]
impl OrderGateway for MockOrderGateway {
    async fn submit(&self, order: &Order) -> Result<(), SubmitError> {
        // The one simulated suspend point in the whole product.
        tokio::time::sleep(self.delay).await;

        match self.outcome {
            Outcome::Accept => {
                info!(
                    order = %order.number,
                    total = %order.total(),
                    items = order.items.len(),
                    "order accepted by mock backend"
                );
                Ok(())
            }
            Outcome::RefuseWithNetworkError => {
                Err(SubmitError::Network("mock backend unreachable".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use deliverypro_core::{
        Customer, DeliveryOption, OrderPayment, OrderStatus, PaymentMethod,
    };

    fn test_order() -> Order {
        let now = Utc::now();
        Order {
            id: "id".to_string(),
            number: "ORD-TEST".to_string(),
            status: OrderStatus::Pending,
            customer: Customer {
                name: "João".to_string(),
                email: "joao@example.com".to_string(),
                phone: "(11) 99999-9999".to_string(),
            },
            delivery_option: DeliveryOption::Pickup,
            address: None,
            payment: OrderPayment {
                method: PaymentMethod::Pix,
                change_for_cents: None,
                card_last_digits: None,
            },
            notes: None,
            items: Vec::new(),
            subtotal_cents: 0,
            delivery_fee_cents: 0,
            total_cents: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_accepting_gateway() {
        let gateway = MockOrderGateway::new(0);
        assert!(gateway.submit(&test_order()).await.is_ok());
    }

    #[tokio::test]
    async fn test_failing_gateway() {
        let gateway = MockOrderGateway::failing(0);
        let err = gateway.submit(&test_order()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Network(_)));
    }
}
