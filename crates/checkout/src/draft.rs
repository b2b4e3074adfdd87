//! Order drafting and pricing.
//!
//! The draft captures a cart snapshot and everything the checkout screen
//! collects on top of it: shipping details, the flat delivery fee, an
//! applied voucher, and redeemed loyalty points. Totals are priced here;
//! the draft is then serialized into an [`OrderRequest`].

use quickbite_cart::CartLine;
use quickbite_core::{AccountId, Money, VoucherId};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::CheckoutError;
use crate::order::{OrderLineItem, OrderLineOption, OrderRequest};

/// Flat delivery fee in đồng.
pub const DEFAULT_SHIPPING_FEE: i64 = 10000;

/// Where and to whom the order ships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingDetails {
    /// Recipient name.
    pub full_name: String,
    /// Delivery address (typed or picked from the map screen).
    pub address: String,
    /// Contact phone number.
    pub phone: String,
    /// Free-form note to the kitchen or courier.
    pub note: Option<String>,
}

impl ShippingDetails {
    /// Whether the details are complete enough to submit an order.
    ///
    /// The backend requires an address and a phone number; the name is
    /// optional for guest orders.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.address.trim().is_empty() && !self.phone.trim().is_empty()
    }
}

/// A voucher the backend has already validated as active.
///
/// Lookup happens against the voucher service; only its result travels
/// through checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedVoucher {
    /// Backend identifier of the voucher.
    pub id: VoucherId,
    /// Discount the voucher grants.
    pub discount: Money,
}

/// Clamp a requested point redemption to the account's balance.
///
/// Mirrors the checkout screen: asking for more points than you own redeems
/// exactly the balance. One point is worth one đồng.
#[must_use]
pub const fn redeem_points(requested: u64, available: u64) -> u64 {
    if requested > available {
        available
    } else {
        requested
    }
}

/// A priced, submittable order draft.
#[derive(Debug, Clone)]
pub struct CheckoutDraft {
    lines: Vec<CartLine>,
    shipping: ShippingDetails,
    shipping_fee: Money,
    voucher: Option<AppliedVoucher>,
    points_redeemed: u64,
    account: Option<AccountId>,
    request_key: Uuid,
}

impl CheckoutDraft {
    /// Draft an order from a cart snapshot with the default shipping fee.
    #[must_use]
    pub fn new(lines: Vec<CartLine>, shipping: ShippingDetails) -> Self {
        Self {
            lines,
            shipping,
            shipping_fee: Money::vnd(DEFAULT_SHIPPING_FEE),
            voucher: None,
            points_redeemed: 0,
            account: None,
            request_key: Uuid::new_v4(),
        }
    }

    /// Override the flat shipping fee.
    #[must_use]
    pub const fn with_shipping_fee(mut self, fee: Money) -> Self {
        self.shipping_fee = fee;
        self
    }

    /// Attach a validated voucher.
    #[must_use]
    pub fn with_voucher(mut self, voucher: AppliedVoucher) -> Self {
        self.voucher = Some(voucher);
        self
    }

    /// Attach the signed-in account so the order accrues to it.
    #[must_use]
    pub fn with_account(mut self, account: AccountId) -> Self {
        self.account = Some(account);
        self
    }

    /// Redeem loyalty points, clamped to the account's balance.
    #[must_use]
    pub const fn with_points(mut self, requested: u64, available: u64) -> Self {
        self.points_redeemed = redeem_points(requested, available);
        self
    }

    /// The drafted lines.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The shipping details.
    #[must_use]
    pub const fn shipping(&self) -> &ShippingDetails {
        &self.shipping
    }

    /// The flat shipping fee.
    #[must_use]
    pub const fn shipping_fee(&self) -> Money {
        self.shipping_fee
    }

    /// The voucher discount, zero in the cart's currency when none is
    /// applied.
    #[must_use]
    pub fn voucher_discount(&self) -> Money {
        self.voucher.as_ref().map_or_else(
            || Money::zero(self.subtotal().currency()),
            |voucher| voucher.discount,
        )
    }

    /// Points redeemed against this order.
    #[must_use]
    pub const fn points_redeemed(&self) -> u64 {
        self.points_redeemed
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        let currency = self
            .lines
            .first()
            .map_or_else(Default::default, |line| line.unit_price.currency());
        let amount = self.lines.iter().fold(Decimal::ZERO, |acc, line| {
            acc.saturating_add(line.line_total().amount())
        });
        Money::new(amount, currency)
    }

    /// `subtotal + shipping fee - voucher discount - points`, floored at
    /// zero so an over-generous discount never prices an order negative.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Money`] when the voucher or fee currency
    /// does not match the cart's.
    pub fn total(&self) -> Result<Money, CheckoutError> {
        let points = Money::vnd(i64::try_from(self.points_redeemed).unwrap_or(i64::MAX));
        let total = self
            .subtotal()
            .checked_add(self.shipping_fee)?
            .saturating_sub(self.voucher_discount())?
            .saturating_sub(points)?;
        Ok(total)
    }

    /// Serialize the draft into the backend's bill contract.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Money`] when totals cannot be priced.
    pub fn to_request(&self) -> Result<OrderRequest, CheckoutError> {
        let total = self.total()?;
        Ok(OrderRequest {
            full_name: self.shipping.full_name.clone(),
            address_shipment: self.shipping.address.clone(),
            phone_shipment: self.shipping.phone.clone(),
            ship: self.shipping_fee.amount(),
            total_price: total.amount(),
            point_discount: self.points_redeemed,
            is_paid: false,
            voucher: self.voucher.as_ref().map(|voucher| voucher.id.clone()),
            line_items: self
                .lines
                .iter()
                .map(|line| OrderLineItem {
                    product: line.product_id.clone(),
                    quantity: line.quantity,
                    subtotal: line.line_total().amount(),
                    options: line
                        .selected_options
                        .iter()
                        .map(|option| OrderLineOption {
                            option_id: option.option_id.clone(),
                            choice_id: option.choice_id.clone(),
                            add_price: option.additional_price.amount(),
                        })
                        .collect(),
                })
                .collect(),
            note: self.shipping.note.clone().unwrap_or_default(),
            account: self.account.clone(),
            request_key: self.request_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickbite_core::ProductId;

    fn line(id: &str, price: i64, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            name: id.to_owned(),
            picture_url: "u".into(),
            unit_price: Money::vnd(price),
            quantity,
            selected_options: Vec::new(),
        }
    }

    fn shipping() -> ShippingDetails {
        ShippingDetails {
            full_name: "Nguyen Van A".into(),
            address: "1 Tran Hung Dao, Q1".into(),
            phone: "0900000000".into(),
            note: None,
        }
    }

    #[test]
    fn total_adds_shipping_and_subtracts_discounts() {
        let draft = CheckoutDraft::new(vec![line("p1", 50000, 2), line("p2", 75000, 1)], shipping())
            .with_voucher(AppliedVoucher {
                id: VoucherId::new("v1"),
                discount: Money::vnd(20000),
            })
            .with_points(5000, 10000);

        assert_eq!(draft.subtotal(), Money::vnd(175_000));
        // 175 000 + 10 000 - 20 000 - 5 000
        assert_eq!(draft.total().unwrap(), Money::vnd(160_000));
    }

    #[test]
    fn total_floors_at_zero() {
        let draft = CheckoutDraft::new(vec![line("p1", 20000, 1)], shipping()).with_voucher(
            AppliedVoucher {
                id: VoucherId::new("v1"),
                discount: Money::vnd(1_000_000),
            },
        );

        assert_eq!(draft.total().unwrap(), Money::vnd(0));
    }

    #[test]
    fn point_redemption_clamps_to_the_balance() {
        assert_eq!(redeem_points(5000, 3000), 3000);
        assert_eq!(redeem_points(2000, 3000), 2000);
        assert_eq!(redeem_points(0, 3000), 0);

        let draft = CheckoutDraft::new(vec![line("p1", 50000, 1)], shipping()).with_points(999_999, 4000);
        assert_eq!(draft.points_redeemed(), 4000);
    }

    #[test]
    fn voucher_discount_defaults_to_zero() {
        use quickbite_core::CurrencyCode;

        let draft = CheckoutDraft::new(vec![line("p1", 50000, 1)], shipping());
        assert_eq!(draft.voucher_discount(), Money::zero(CurrencyCode::VND));
        // 50 000 + 10 000 ship, nothing deducted
        assert_eq!(draft.total().unwrap(), Money::vnd(60000));
    }

    #[test]
    fn incomplete_shipping_details_are_detected() {
        let mut details = shipping();
        assert!(details.is_complete());

        details.phone = "   ".into();
        assert!(!details.is_complete());

        details.phone = "0900000000".into();
        details.address = String::new();
        assert!(!details.is_complete());
    }

    #[test]
    fn request_carries_lines_totals_and_redemptions() {
        let draft = CheckoutDraft::new(vec![line("p1", 45000, 3)], shipping())
            .with_account(AccountId::new("acc1"))
            .with_points(1000, 1000);

        let request = draft.to_request().unwrap();
        assert_eq!(request.line_items.len(), 1);
        assert_eq!(request.line_items[0].quantity, 3);
        assert_eq!(request.line_items[0].subtotal, Decimal::from(135_000));
        assert_eq!(request.ship, Decimal::from(DEFAULT_SHIPPING_FEE));
        // 135 000 + 10 000 - 1 000
        assert_eq!(request.total_price, Decimal::from(144_000));
        assert_eq!(request.point_discount, 1000);
        assert_eq!(request.account, Some(AccountId::new("acc1")));
        assert!(!request.is_paid);
    }

    #[test]
    fn each_draft_gets_its_own_request_key() {
        let a = CheckoutDraft::new(vec![line("p1", 45000, 1)], shipping());
        let b = CheckoutDraft::new(vec![line("p1", 45000, 1)], shipping());
        assert_ne!(
            a.to_request().unwrap().request_key,
            b.to_request().unwrap().request_key
        );
    }
}
