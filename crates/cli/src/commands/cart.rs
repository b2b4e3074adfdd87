//! Cart manipulation commands.

use std::path::Path;
use std::sync::Arc;

use quickbite_cart::{CartEngine, CartError, FileStore, LineKey, ProductSnapshot};
use quickbite_core::{Money, ProductId};
use tracing::info;

use super::options::{OptionSpec, to_selected};

/// Open the file-backed cart under the given directory.
pub async fn open(dir: &Path) -> CartEngine {
    CartEngine::load(Arc::new(FileStore::new(dir))).await
}

/// Add a product to the cart.
pub fn add(
    cart: &mut CartEngine,
    id: &str,
    name: &str,
    price: i64,
    picture: &str,
    quantity: u32,
    options: Vec<OptionSpec>,
) -> Result<(), CartError> {
    cart.add(
        ProductSnapshot {
            id: ProductId::new(id),
            name: name.to_owned(),
            unit_price: Money::vnd(price),
            picture_url: picture.to_owned(),
            options: to_selected(options),
        },
        quantity,
    )?;
    info!("Added {quantity} x {name}");
    list(cart);
    Ok(())
}

/// Print the cart with line totals and the subtotal.
pub fn list(cart: &CartEngine) {
    if cart.is_empty() {
        info!("Cart is empty");
        return;
    }
    for line in cart.lines() {
        let configuration = if line.selected_options.is_empty() {
            String::new()
        } else {
            let choices: Vec<&str> = line
                .selected_options
                .iter()
                .map(|option| option.choice_id.as_str())
                .collect();
            format!(" [{}]", choices.join(", "))
        };
        info!(
            "  {} x {}{} @ {} = {}",
            line.quantity,
            line.name,
            configuration,
            line.unit_price,
            line.line_total()
        );
    }
    info!(
        "Subtotal: {} ({} items)",
        cart.subtotal(),
        cart.total_items()
    );
}

fn key(id: &str, options: Vec<OptionSpec>) -> LineKey {
    LineKey::new(ProductId::new(id), to_selected(options))
}

/// Increment a line's quantity.
pub fn increase(cart: &mut CartEngine, id: &str, options: Vec<OptionSpec>) {
    cart.increase_quantity(&key(id, options));
    list(cart);
}

/// Decrement a line's quantity, flooring at one.
pub fn decrease(cart: &mut CartEngine, id: &str, options: Vec<OptionSpec>) {
    cart.decrease_quantity(&key(id, options));
    list(cart);
}

/// Remove a line entirely.
pub fn remove(cart: &mut CartEngine, id: &str, options: Vec<OptionSpec>) {
    cart.remove(&key(id, options));
    list(cart);
}

/// Empty the cart.
pub fn clear(cart: &mut CartEngine) {
    cart.clear();
    info!("Cart cleared");
}
