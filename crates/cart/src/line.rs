//! Cart line items and their identity.
//!
//! A line item represents one distinct purchasable configuration. Identity is
//! the pair of product and selected options: two configurations of the same
//! product stay separate lines, while re-adding an identical configuration
//! merges quantities into the existing line.

use quickbite_core::{ChoiceId, Money, OptionId, ProductId};
use serde::{Deserialize, Serialize};

/// One selected configuration choice on a line item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedOption {
    /// The option group (e.g. "size").
    pub option_id: OptionId,
    /// The chosen value within the group (e.g. "large").
    pub choice_id: ChoiceId,
    /// Surcharge for this choice.
    pub additional_price: Money,
}

/// The add-to-cart input contract from catalog and detail screens.
///
/// Display fields are snapshots taken at add time and are not re-fetched;
/// `unit_price` already includes any option surcharge the caller baked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    /// Catalog identifier of the product.
    pub id: ProductId,
    /// Display name at add time.
    pub name: String,
    /// Price per unit at add time, option surcharges included.
    pub unit_price: Money,
    /// Display image at add time.
    pub picture_url: String,
    /// The configuration distinguishing this line from other lines of the
    /// same product.
    pub options: Vec<SelectedOption>,
}

/// One entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Catalog identifier of the product.
    pub product_id: ProductId,
    /// Display name snapshot.
    pub name: String,
    /// Display image snapshot.
    pub picture_url: String,
    /// Price per unit, option surcharges included.
    pub unit_price: Money,
    /// Number of units, always at least 1.
    pub quantity: u32,
    /// The configuration this line was added with, in selection order.
    pub selected_options: Vec<SelectedOption>,
}

impl CartLine {
    /// Build a fresh line from an add-to-cart snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: ProductSnapshot, quantity: u32) -> Self {
        Self {
            product_id: snapshot.id,
            name: snapshot.name,
            picture_url: snapshot.picture_url,
            unit_price: snapshot.unit_price,
            quantity,
            selected_options: snapshot.options,
        }
    }

    /// The identity key of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            selected_options: self.selected_options.clone(),
        }
    }

    /// Whether this line matches the given identity.
    #[must_use]
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.selected_options == key.selected_options
    }

    /// `unit_price x quantity`.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

/// Identity of a cart line: product plus its selected configuration.
///
/// This is the merge key for `add` and the lookup key for quantity and
/// removal operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    product_id: ProductId,
    selected_options: Vec<SelectedOption>,
}

impl LineKey {
    /// Identity of a configured product.
    #[must_use]
    pub fn new(product_id: ProductId, selected_options: Vec<SelectedOption>) -> Self {
        Self {
            product_id,
            selected_options,
        }
    }

    /// Identity of a product with no options selected.
    #[must_use]
    pub fn product(product_id: ProductId) -> Self {
        Self::new(product_id, Vec::new())
    }
}
