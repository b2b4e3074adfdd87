//! Cart-to-order flow, end to end.
//!
//! Covers the one hand-off where the device-local cart acquires cross-device
//! significance: a successful submission clears the cart (durably), a failed
//! one must not cost the user a single line.

use std::sync::Arc;

use quickbite_cart::{CartEngine, MemoryStore, ProductSnapshot, SelectedOption};
use quickbite_checkout::{
    AppliedVoucher, CheckoutDraft, CheckoutError, GatewayError, ShippingDetails, place_order,
};
use quickbite_core::{AccountId, ChoiceId, Money, OptionId, OrderId, ProductId, VoucherId};
use quickbite_integration_tests::ScriptedGateway;
use rust_decimal::Decimal;

fn shipping() -> ShippingDetails {
    ShippingDetails {
        full_name: "Nguyen Van A".into(),
        address: "1 Tran Hung Dao, Quan 1".into(),
        phone: "0900000000".into(),
        note: Some("call on arrival".into()),
    }
}

async fn loaded_cart(store: MemoryStore) -> CartEngine {
    let mut cart = CartEngine::load(Arc::new(store)).await;
    cart.add(
        ProductSnapshot {
            id: ProductId::new("p1"),
            name: "Burger".into(),
            unit_price: Money::vnd(45000),
            picture_url: "u".into(),
            options: Vec::new(),
        },
        2,
    )
    .unwrap();
    cart.add(
        ProductSnapshot {
            id: ProductId::new("p2"),
            name: "Pho".into(),
            unit_price: Money::vnd(80000),
            picture_url: "u".into(),
            options: vec![SelectedOption {
                option_id: OptionId::new("topping"),
                choice_id: ChoiceId::new("extra-beef"),
                additional_price: Money::vnd(15000),
            }],
        },
        1,
    )
    .unwrap();
    cart
}

#[tokio::test]
async fn a_successful_order_clears_the_cart_durably() {
    let store = MemoryStore::new();
    let mut cart = loaded_cart(store.clone()).await;

    let draft = CheckoutDraft::new(cart.lines().to_vec(), shipping())
        .with_account(AccountId::new("acc1"))
        .with_voucher(AppliedVoucher {
            id: VoucherId::new("v1"),
            discount: Money::vnd(20000),
        })
        .with_points(5000, 8000);
    let gateway = ScriptedGateway::accepting("ord42");

    let receipt = place_order(&mut cart, &draft, &gateway).await.unwrap();
    assert_eq!(receipt.order_id, OrderId::new("ord42"));

    // In-memory cart is gone; after a flush the mirror is too.
    assert!(cart.is_empty());
    cart.flush().await;
    let reloaded = CartEngine::load(Arc::new(store)).await;
    assert!(reloaded.is_empty());

    // The request carried the full pricing breakdown.
    let requests = gateway.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.line_items.len(), 2);
    // subtotal 90 000 + 80 000 = 170 000; +10 000 ship -20 000 voucher -5 000 points
    assert_eq!(request.total_price, Decimal::from(155_000));
    assert_eq!(request.point_discount, 5000);
    assert_eq!(request.voucher, Some(VoucherId::new("v1")));
    assert_eq!(request.account, Some(AccountId::new("acc1")));
}

#[tokio::test]
async fn a_rejected_order_leaves_the_cart_intact_even_after_restart() {
    let store = MemoryStore::new();
    let mut cart = loaded_cart(store.clone()).await;
    let draft = CheckoutDraft::new(cart.lines().to_vec(), shipping());
    let gateway = ScriptedGateway::rejecting("kitchen closed");

    let result = place_order(&mut cart, &draft, &gateway).await;
    assert_eq!(
        result,
        Err(CheckoutError::Gateway(GatewayError::Rejected(
            "kitchen closed".into()
        )))
    );

    assert_eq!(cart.lines().len(), 2);
    cart.flush().await;

    let reloaded = CartEngine::load(Arc::new(store)).await;
    assert_eq!(reloaded.lines().len(), 2);
    assert_eq!(reloaded.subtotal(), Money::vnd(185_000));
}

#[tokio::test]
async fn retrying_after_a_rejection_succeeds_with_the_same_cart() {
    let store = MemoryStore::new();
    let mut cart = loaded_cart(store.clone()).await;
    let draft = CheckoutDraft::new(cart.lines().to_vec(), shipping());

    let rejecting = ScriptedGateway::rejecting("timeout");
    assert!(place_order(&mut cart, &draft, &rejecting).await.is_err());

    let accepting = ScriptedGateway::accepting("ord7");
    let receipt = place_order(&mut cart, &draft, &accepting).await.unwrap();
    assert_eq!(receipt.order_id, OrderId::new("ord7"));
    assert!(cart.is_empty());

    // Same draft, same idempotency key on both attempts.
    assert_eq!(
        rejecting.requests()[0].request_key,
        accepting.requests()[0].request_key
    );
}
