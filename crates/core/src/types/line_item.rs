//! A product entry in a cart with its purchase quantity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// One line of a cart: a product plus how many units of it the session
/// intends to purchase.
///
/// Invariants (enforced by the cart store, not by this type):
/// - at most one `LineItem` per product id in a cart
/// - `amount >= 1`; a line at zero is removed, never kept
///
/// Prices use decimal arithmetic and serialize as JSON strings; on input
/// both strings and bare numbers are accepted, so catalog responses and
/// persisted snapshots share this one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog id of the product.
    pub id: ProductId,
    /// Display title, as reported by the catalog.
    pub title: String,
    /// Unit price in the store currency's standard unit.
    pub price: Decimal,
    /// URL of the product image.
    pub image: String,
    /// Units in the cart. Always at least 1.
    pub amount: u32,
}

impl LineItem {
    /// Price of this line as a whole: unit price times amount.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.amount)
    }
}
