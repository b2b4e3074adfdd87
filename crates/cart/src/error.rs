//! Cart engine errors.

use quickbite_core::{CurrencyCode, Money};
use thiserror::Error;

/// Errors from cart mutations.
///
/// The add-to-cart contract is validated up front instead of letting bad
/// catalog data surface later as a pricing fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// A zero quantity can neither create nor merge a line.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// The product snapshot carried an empty identifier.
    #[error("product id is missing")]
    MissingProductId,

    /// The product snapshot carried a negative price.
    #[error("unit price cannot be negative: {0}")]
    NegativePrice(Money),

    /// A line priced in a different currency than the rest of the cart.
    #[error("cart holds {cart:?} but product is priced in {product:?}")]
    CurrencyMismatch {
        /// Currency of the lines already in the cart.
        cart: CurrencyCode,
        /// Currency of the product being added.
        product: CurrencyCode,
    },
}
