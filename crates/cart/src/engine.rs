//! The cart engine.
//!
//! Owns the authoritative in-memory line list and keeps the durable mirror
//! in sync through the latest-wins writer. One engine exists per app
//! session; screens receive it by injection rather than through a global.

use std::sync::Arc;

use quickbite_core::{CurrencyCode, Money};
use rust_decimal::Decimal;

use crate::error::CartError;
use crate::line::{CartLine, LineKey, ProductSnapshot};
use crate::mirror::Mirror;
use crate::store::CartStore;

/// Device-local shopping cart.
///
/// Mutations are synchronous against the in-memory state; every mutation
/// queues a mirror write, including no-op quantity changes (a miss still
/// republishes the current snapshot). Mirror failures never roll back a
/// mutation and never surface to the caller.
pub struct CartEngine {
    lines: Vec<CartLine>,
    mirror: Mirror,
}

impl CartEngine {
    /// Load the cart from its durable mirror and start the mirror writer.
    ///
    /// Fails open: an absent, unreadable, or unparsable mirror yields an
    /// empty cart rather than an error. Must be called within a tokio
    /// runtime.
    pub async fn load(store: Arc<dyn CartStore>) -> Self {
        let lines = match store.load().await {
            Ok(Some(payload)) => match serde_json::from_slice::<Vec<CartLine>>(&payload) {
                Ok(lines) => lines,
                Err(error) => {
                    tracing::warn!(%error, "persisted cart is unparsable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(%error, "failed to read persisted cart, starting empty");
                Vec::new()
            }
        };

        Self {
            lines,
            mirror: Mirror::spawn(store),
        }
    }

    /// Add a product to the cart.
    ///
    /// Merges into the line with the same identity (product plus selected
    /// options) when one exists, otherwise appends a new line. Quantities
    /// have no upper bound beyond saturation.
    ///
    /// # Errors
    ///
    /// Rejects zero quantities, empty product ids, negative prices, and
    /// products priced in a different currency than the cart.
    pub fn add(&mut self, snapshot: ProductSnapshot, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        if snapshot.id.is_empty() {
            return Err(CartError::MissingProductId);
        }
        if snapshot.unit_price.is_negative() {
            return Err(CartError::NegativePrice(snapshot.unit_price));
        }
        if let Some(first) = self.lines.first() {
            let cart = first.unit_price.currency();
            let product = snapshot.unit_price.currency();
            if cart != product {
                return Err(CartError::CurrencyMismatch { cart, product });
            }
        }

        let key = LineKey::new(snapshot.id.clone(), snapshot.options.clone());
        if let Some(line) = self.lines.iter_mut().find(|line| line.matches(&key)) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine::from_snapshot(snapshot, quantity));
        }

        self.publish();
        Ok(())
    }

    /// Increment the matching line's quantity by 1. No-op on a miss.
    pub fn increase_quantity(&mut self, key: &LineKey) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.matches(key)) {
            line.quantity = line.quantity.saturating_add(1);
        }
        self.publish();
    }

    /// Decrement the matching line's quantity by 1, flooring at 1.
    ///
    /// A line at quantity 1 stays in the cart; leaving the cart is always an
    /// explicit [`remove`](Self::remove).
    pub fn decrease_quantity(&mut self, key: &LineKey) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(key) && line.quantity > 1)
        {
            line.quantity -= 1;
        }
        self.publish();
    }

    /// Remove the matching line entirely, whatever its quantity.
    pub fn remove(&mut self, key: &LineKey) {
        self.lines.retain(|line| !line.matches(key));
        self.publish();
    }

    /// Empty the cart. Called after a successful order submission.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.publish();
    }

    /// The current line items.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Sum of all line totals.
    ///
    /// All lines share one currency (enforced by [`add`](Self::add)); an
    /// empty cart reports zero đồng.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        let currency = self
            .lines
            .first()
            .map_or(CurrencyCode::default(), |line| line.unit_price.currency());
        let amount = self.lines.iter().fold(Decimal::ZERO, |acc, line| {
            acc.saturating_add(line.line_total().amount())
        });
        Money::new(amount, currency)
    }

    /// Wait until the mirror writer has caught up with the newest mutation.
    ///
    /// Call before the app backgrounds or exits; tests call it before
    /// simulating a restart.
    pub async fn flush(&mut self) {
        self.mirror.flush().await;
    }

    /// Flush the mirror, then stop its writer task and wait for it to exit.
    ///
    /// Consumes the engine; call at the end of an app session.
    pub async fn shutdown(self) {
        self.mirror.shutdown().await;
    }

    fn publish(&mut self) {
        self.mirror.publish(self.lines.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::SelectedOption;
    use crate::store::{MemoryStore, StoreError};
    use async_trait::async_trait;
    use quickbite_core::{ChoiceId, OptionId, ProductId};

    fn burger() -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new("p1"),
            name: "Burger".into(),
            unit_price: Money::vnd(45000),
            picture_url: "u".into(),
            options: Vec::new(),
        }
    }

    fn sized(choice: &str, surcharge: i64) -> Vec<SelectedOption> {
        vec![SelectedOption {
            option_id: OptionId::new("size"),
            choice_id: ChoiceId::new(choice),
            additional_price: Money::vnd(surcharge),
        }]
    }

    async fn empty_engine() -> CartEngine {
        CartEngine::load(Arc::new(MemoryStore::new())).await
    }

    #[tokio::test]
    async fn adding_the_same_configuration_merges_quantities() {
        let mut cart = empty_engine().await;
        cart.add(burger(), 2).unwrap();
        cart.add(burger(), 3).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[tokio::test]
    async fn different_options_stay_distinct_lines() {
        // Identity is product + options; merging on product id alone would
        // collapse these into one line of quantity 2.
        let mut cart = empty_engine().await;

        let mut small = burger();
        small.options = sized("small", 0);
        let mut large = burger();
        large.options = sized("large", 10000);
        large.unit_price = Money::vnd(55000);

        cart.add(small, 1).unwrap();
        cart.add(large, 1).unwrap();

        assert_eq!(cart.lines().len(), 2);
        assert!(cart.lines().iter().all(|line| line.quantity == 1));
    }

    #[tokio::test]
    async fn decrease_floors_at_one_and_keeps_the_line() {
        let mut cart = empty_engine().await;
        cart.add(burger(), 1).unwrap();

        let key = cart.lines()[0].key();
        cart.decrease_quantity(&key);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[tokio::test]
    async fn removal_is_unconditional_at_any_quantity() {
        for quantity in [1_u32, 5, 100] {
            let mut cart = empty_engine().await;
            cart.add(burger(), quantity).unwrap();

            let key = cart.lines()[0].key();
            cart.remove(&key);

            assert!(cart.is_empty(), "quantity {quantity} should not matter");
        }
    }

    #[tokio::test]
    async fn subtotal_sums_line_totals() {
        let mut cart = empty_engine().await;

        let mut fries = burger();
        fries.id = ProductId::new("p2");
        fries.unit_price = Money::vnd(75000);

        let mut combo = burger();
        combo.unit_price = Money::vnd(50000);

        cart.add(combo, 2).unwrap();
        cart.add(fries, 1).unwrap();

        assert_eq!(cart.subtotal(), Money::vnd(175_000));
    }

    #[tokio::test]
    async fn quantity_walkthrough() {
        // add(p1, 1) -> 1; add(p1, 2) -> 3; increase -> 4; decrease x2 -> 2;
        // remove -> empty.
        let mut cart = empty_engine().await;

        cart.add(burger(), 1).unwrap();
        assert_eq!(cart.lines()[0].quantity, 1);

        cart.add(burger(), 2).unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);

        let key = cart.lines()[0].key();
        cart.increase_quantity(&key);
        assert_eq!(cart.lines()[0].quantity, 4);

        cart.decrease_quantity(&key);
        cart.decrease_quantity(&key);
        assert_eq!(cart.lines()[0].quantity, 2);

        cart.remove(&key);
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn quantity_miss_is_a_noop() {
        let mut cart = empty_engine().await;
        cart.add(burger(), 2).unwrap();

        let missing = LineKey::product(ProductId::new("nope"));
        cart.increase_quantity(&missing);
        cart.decrease_quantity(&missing);
        cart.remove(&missing);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[tokio::test]
    async fn add_validates_its_input() {
        let mut cart = empty_engine().await;

        assert_eq!(cart.add(burger(), 0), Err(CartError::ZeroQuantity));

        let mut nameless = burger();
        nameless.id = ProductId::new("");
        assert_eq!(cart.add(nameless, 1), Err(CartError::MissingProductId));

        let mut refund = burger();
        refund.unit_price = Money::vnd(-45000);
        assert!(matches!(
            cart.add(refund, 1),
            Err(CartError::NegativePrice(_))
        ));

        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn add_rejects_currency_mixes() {
        use quickbite_core::CurrencyCode;
        use rust_decimal::Decimal;

        let mut cart = empty_engine().await;
        cart.add(burger(), 1).unwrap();

        let mut imported = burger();
        imported.id = ProductId::new("p2");
        imported.unit_price = Money::new(Decimal::from(5), CurrencyCode::USD);

        assert!(matches!(
            cart.add(imported, 1),
            Err(CartError::CurrencyMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn clear_empties_memory_and_mirror() {
        let store = MemoryStore::new();
        let mut cart = CartEngine::load(Arc::new(store.clone())).await;
        cart.add(burger(), 3).unwrap();
        cart.clear();
        cart.flush().await;

        let reloaded = CartEngine::load(Arc::new(store)).await;
        assert!(reloaded.is_empty());
    }

    #[tokio::test]
    async fn shutdown_persists_the_latest_snapshot_and_stops_the_writer() {
        let store = MemoryStore::new();
        let mut cart = CartEngine::load(Arc::new(store.clone())).await;
        cart.add(burger(), 4).unwrap();

        // Resolves only once the writer task has exited.
        cart.shutdown().await;

        let reloaded = CartEngine::load(Arc::new(store)).await;
        assert_eq!(reloaded.lines().len(), 1);
        assert_eq!(reloaded.lines()[0].quantity, 4);
    }

    #[tokio::test]
    async fn cart_survives_a_simulated_restart() {
        let store = MemoryStore::new();
        {
            let mut cart = CartEngine::load(Arc::new(store.clone())).await;
            cart.add(burger(), 3).unwrap();
            cart.flush().await;
        }

        let reloaded = CartEngine::load(Arc::new(store)).await;
        assert_eq!(reloaded.lines().len(), 1);
        assert_eq!(reloaded.lines()[0].product_id, ProductId::new("p1"));
        assert_eq!(reloaded.lines()[0].quantity, 3);
        assert_eq!(reloaded.lines()[0].unit_price, Money::vnd(45000));
    }

    #[tokio::test]
    async fn corrupt_mirror_fails_open_to_an_empty_cart() {
        let store = MemoryStore::with_payload(&b"{not json"[..]);
        let cart = CartEngine::load(Arc::new(store)).await;
        assert!(cart.is_empty());
    }

    /// Store whose writes always fail; reads succeed.
    #[derive(Clone, Default)]
    struct ReadOnlyStore;

    #[async_trait]
    impl CartStore for ReadOnlyStore {
        async fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
            Ok(None)
        }

        async fn save(&self, _payload: &[u8]) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
    }

    #[tokio::test]
    async fn write_failures_are_swallowed_and_memory_stays_authoritative() {
        let mut cart = CartEngine::load(Arc::new(ReadOnlyStore)).await;
        cart.add(burger(), 2).unwrap();
        cart.flush().await;

        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.subtotal(), Money::vnd(90000));
    }

    #[tokio::test]
    async fn read_failures_fail_open_to_an_empty_cart() {
        #[derive(Clone, Default)]
        struct BrokenStore;

        #[async_trait]
        impl CartStore for BrokenStore {
            async fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
                Err(StoreError::Io(std::io::Error::other("denied")))
            }

            async fn save(&self, _payload: &[u8]) -> Result<(), StoreError> {
                Ok(())
            }
        }

        let cart = CartEngine::load(Arc::new(BrokenStore)).await;
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn rapid_mutations_leave_the_mirror_at_the_newest_snapshot() {
        let store = MemoryStore::new();
        let mut cart = CartEngine::load(Arc::new(store.clone())).await;

        let key = LineKey::product(ProductId::new("p1"));
        cart.add(burger(), 1).unwrap();
        for _ in 0..20 {
            cart.increase_quantity(&key);
        }
        cart.flush().await;

        let reloaded = CartEngine::load(Arc::new(store)).await;
        assert_eq!(reloaded.lines()[0].quantity, 21);
    }
}
