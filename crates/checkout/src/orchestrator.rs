//! Order placement.

use quickbite_cart::CartEngine;

use crate::draft::CheckoutDraft;
use crate::error::CheckoutError;
use crate::gateway::OrderGateway;
use crate::order::OrderReceipt;

/// Submit a drafted order and clear the cart on success.
///
/// The cart is cleared exactly once, only after the gateway acknowledges the
/// order. A rejected or unreachable submission leaves the cart untouched so
/// the user can retry.
///
/// # Errors
///
/// [`CheckoutError::EmptyCart`] when there is nothing to order,
/// [`CheckoutError::MissingShippingDetails`] when address or phone is blank,
/// and gateway or pricing failures otherwise.
pub async fn place_order(
    cart: &mut CartEngine,
    draft: &CheckoutDraft,
    gateway: &dyn OrderGateway,
) -> Result<OrderReceipt, CheckoutError> {
    if draft.lines().is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    if !draft.shipping().is_complete() {
        return Err(CheckoutError::MissingShippingDetails);
    }

    let request = draft.to_request()?;
    tracing::debug!(
        lines = request.line_items.len(),
        total = %request.total_price,
        "submitting order"
    );

    let receipt = gateway.submit(request).await?;
    tracing::debug!(order_id = %receipt.order_id, "order accepted, clearing cart");

    cart.clear();
    Ok(receipt)
}
