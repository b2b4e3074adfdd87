//! Checkout errors.

use quickbite_core::MoneyError;
use thiserror::Error;

/// Errors from the order-creation channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The request never reached the order service.
    #[error("order service unreachable: {0}")]
    Transport(String),

    /// The order service answered with a failure status.
    #[error("order rejected: {0}")]
    Rejected(String),
}

/// Errors from building or placing an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// Shipping address or phone number is blank.
    #[error("shipping address and phone number are required")]
    MissingShippingDetails,

    /// Pricing arithmetic failed (mixed currencies).
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// The order service declined or was unreachable.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
