//! Wire types for the catalog REST API.

use driftwood_core::{LineItem, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Stock
// =============================================================================

/// Stock level reported by `GET /stock/{id}`.
///
/// The remote-authoritative upper bound on how many units of a product a
/// cart may hold. Always fetched fresh; see [`super::Catalog::stock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInfo {
    /// Product this stock level belongs to.
    pub id: ProductId,
    /// Units available for purchase.
    pub amount: u32,
}

// =============================================================================
// Product
// =============================================================================

/// Product metadata reported by `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog id of the product.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price in the store currency's standard unit.
    pub price: Decimal,
    /// URL of the product image.
    pub image: String,
}

impl From<Product> for LineItem {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount: 1,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_info_deserializes_from_wire_json() {
        let stock: StockInfo = serde_json::from_str(r#"{"id":1,"amount":3}"#).unwrap();
        assert_eq!(stock.id, ProductId::new(1));
        assert_eq!(stock.amount, 3);
    }

    #[test]
    fn test_product_deserializes_numeric_price() {
        let json = r#"{"id":5,"title":"Trail Shoe","price":100,"image":"shoe.jpg"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Decimal::new(100, 0));
    }

    #[test]
    fn test_new_line_item_starts_at_one_unit() {
        let product = Product {
            id: ProductId::new(5),
            title: "Trail Shoe".to_string(),
            price: Decimal::new(10000, 2),
            image: "shoe.jpg".to_string(),
        };

        let item = LineItem::from(product);
        assert_eq!(item.id, ProductId::new(5));
        assert_eq!(item.amount, 1);
        assert_eq!(item.title, "Trail Shoe");
    }
}
