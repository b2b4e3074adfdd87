//! Boundary to the realtime order-creation channel.

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::order::{OrderReceipt, OrderRequest};

/// The order service's create-bill channel.
///
/// The production implementation publishes the request over the realtime
/// transport and resolves with the service's acknowledgement; tests use
/// in-process stubs. Implementations should treat `request_key` as an
/// idempotency key when they retry.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submit an order and wait for the service's answer.
    ///
    /// # Errors
    ///
    /// [`GatewayError::Transport`] when the service is unreachable,
    /// [`GatewayError::Rejected`] when it answers with a failure status.
    async fn submit(&self, request: OrderRequest) -> Result<OrderReceipt, GatewayError>;
}
