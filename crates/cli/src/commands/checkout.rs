//! Checkout preview command.
//!
//! Submission goes through the app's realtime channel, so the CLI stops at a
//! priced preview of the order request.

use quickbite_cart::CartEngine;
use quickbite_checkout::{AppliedVoucher, CheckoutDraft, CheckoutError, ShippingDetails};
use quickbite_core::{Money, VoucherId};
use tracing::info;

/// Flags of the `checkout` subcommand.
pub struct PreviewArgs {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub note: Option<String>,
    pub voucher_discount: Option<i64>,
    pub points: u64,
    pub available_points: u64,
    pub ship: i64,
}

/// Price the cart as an order and print the breakdown.
pub fn preview(cart: &CartEngine, args: PreviewArgs) -> Result<(), CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let mut draft = CheckoutDraft::new(
        cart.lines().to_vec(),
        ShippingDetails {
            full_name: args.name,
            address: args.address,
            phone: args.phone,
            note: args.note,
        },
    )
    .with_shipping_fee(Money::vnd(args.ship))
    .with_points(args.points, args.available_points);

    if let Some(discount) = args.voucher_discount {
        draft = draft.with_voucher(AppliedVoucher {
            id: VoucherId::new("cli"),
            discount: Money::vnd(discount),
        });
    }

    if !draft.shipping().is_complete() {
        return Err(CheckoutError::MissingShippingDetails);
    }

    let total = draft.total()?;
    info!("Subtotal:      {}", draft.subtotal());
    info!("Shipping:      {}", draft.shipping_fee());
    info!("Voucher:      -{}", draft.voucher_discount());
    info!("Points:       -{}", Money::vnd(
        i64::try_from(draft.points_redeemed()).unwrap_or(i64::MAX)
    ));
    info!("Total:         {total}");
    Ok(())
}
