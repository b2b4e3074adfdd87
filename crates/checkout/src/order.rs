//! Order wire types.
//!
//! [`OrderRequest`] is the payload of the realtime order-creation request;
//! field names follow the backend's bill contract (a mix of snake and camel
//! case, kept verbatim). Amounts serialize as decimal strings.

use chrono::{DateTime, Utc};
use quickbite_core::{
    AccountId, ChoiceId, OptionId, OrderId, OrderStatus, PaymentStatus, ProductId, VoucherId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One configuration choice on an ordered line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineOption {
    #[serde(rename = "optionId")]
    pub option_id: OptionId,
    #[serde(rename = "choiceId")]
    pub choice_id: ChoiceId,
    #[serde(rename = "addPrice")]
    pub add_price: Decimal,
}

/// One ordered line: product, quantity, and its priced subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub product: ProductId,
    pub quantity: u32,
    pub subtotal: Decimal,
    pub options: Vec<OrderLineOption>,
}

/// The order-creation request sent over the realtime channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub address_shipment: String,
    pub phone_shipment: String,
    /// Flat shipping fee.
    pub ship: Decimal,
    pub total_price: Decimal,
    /// Loyalty points redeemed against this order (1 point = 1 đồng).
    #[serde(rename = "pointDiscount")]
    pub point_discount: u64,
    #[serde(rename = "isPaid")]
    pub is_paid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher: Option<VoucherId>,
    #[serde(rename = "lineItems")]
    pub line_items: Vec<OrderLineItem>,
    pub note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountId>,
    /// Client-generated idempotency key; a retried submission reuses it so
    /// the backend can deduplicate bills.
    #[serde(rename = "requestKey")]
    pub request_key: Uuid,
}

/// The order service's acknowledgement of a created order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    /// Server-issued order identifier.
    pub order_id: OrderId,
    /// Initial lifecycle status, normally [`OrderStatus::Pending`].
    pub status: OrderStatus,
    /// Payment state at creation time.
    pub payment: PaymentStatus,
    /// When the order service accepted the order.
    pub placed_at: DateTime<Utc>,
}
