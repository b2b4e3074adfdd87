//! Integration tests for Quickbite.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p quickbite-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Restart survival and mirror failure handling
//! - `checkout_flow` - Cart-to-order submission, end to end
//!
//! Everything runs in-process: the durable mirror is a temp directory or an
//! in-memory buffer and the order gateway is a stub, so no external services
//! are needed.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use quickbite_checkout::{GatewayError, OrderGateway, OrderReceipt, OrderRequest};
use quickbite_core::{OrderId, OrderStatus, PaymentStatus};

/// Gateway stub that records every request and answers from a script.
pub struct ScriptedGateway {
    answers: Mutex<Vec<Result<OrderReceipt, GatewayError>>>,
    requests: Arc<Mutex<Vec<OrderRequest>>>,
}

impl ScriptedGateway {
    /// Answer every submission with a fresh accepted receipt.
    #[must_use]
    pub fn accepting(order_id: &str) -> Self {
        Self {
            answers: Mutex::new(vec![Ok(OrderReceipt {
                order_id: OrderId::new(order_id),
                status: OrderStatus::Pending,
                payment: PaymentStatus::Unpaid,
                placed_at: Utc::now(),
            })]),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer the first submission with the given rejection.
    #[must_use]
    pub fn rejecting(message: &str) -> Self {
        Self {
            answers: Mutex::new(vec![Err(GatewayError::Rejected(message.to_owned()))]),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The requests the gateway has seen so far.
    #[must_use]
    pub fn requests(&self) -> Vec<OrderRequest> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl OrderGateway for ScriptedGateway {
    async fn submit(&self, request: OrderRequest) -> Result<OrderReceipt, GatewayError> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(request);
        let mut answers = self
            .answers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if answers.is_empty() {
            Err(GatewayError::Transport("no scripted answer left".into()))
        } else {
            answers.remove(0)
        }
    }
}
