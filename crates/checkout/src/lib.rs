//! Quickbite Checkout - turns a cart into an order.
//!
//! # Architecture
//!
//! A [`CheckoutDraft`] captures a cart snapshot together with the shipping
//! details, the flat shipping fee, an optionally applied voucher, and
//! redeemed loyalty points, and prices the order. [`place_order`] submits
//! the draft through an [`OrderGateway`] (the realtime order-creation
//! channel, kept behind a trait) and clears the cart only after the gateway
//! reports success - a failed submission never costs the user their cart.
//!
//! Voucher lookup and account balances live on the backend; this crate only
//! consumes their results ([`AppliedVoucher`], an available-points figure).

#![cfg_attr(not(test), forbid(unsafe_code))]

mod draft;
mod error;
mod gateway;
mod order;
mod orchestrator;

pub use draft::{
    AppliedVoucher, CheckoutDraft, DEFAULT_SHIPPING_FEE, ShippingDetails, redeem_points,
};
pub use error::{CheckoutError, GatewayError};
pub use gateway::OrderGateway;
pub use order::{OrderLineItem, OrderLineOption, OrderReceipt, OrderRequest};
pub use orchestrator::place_order;
