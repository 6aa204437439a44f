//! Unified error type for cart store operations.

use driftwood_core::ProductId;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::storage::StorageError;

/// Errors returned by cart store operations.
///
/// Every rejected or failed operation also emits exactly one user-facing
/// notification; the error value is the caller-facing side of the same
/// outcome and carries the machine-readable detail.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested quantity exceeds what the catalog has in stock.
    #[error("product {product_id}: requested {requested} but only {available} in stock")]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// The product has no line in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    /// A catalog lookup failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Reading or writing the persisted snapshot failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serializing the snapshot failed.
    #[error("snapshot serialization error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_stock_display() {
        let err = CartError::OutOfStock {
            product_id: ProductId::new(7),
            requested: 3,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "product 7: requested 3 but only 1 in stock"
        );
    }

    #[test]
    fn test_not_in_cart_display() {
        let err = CartError::NotInCart(ProductId::new(9));
        assert_eq!(err.to_string(), "product 9 is not in the cart");
    }

    #[test]
    fn test_catalog_error_converts() {
        let err = CartError::from(CatalogError::NotFound(ProductId::new(4)));
        assert!(matches!(err, CartError::Catalog(_)));
        assert_eq!(err.to_string(), "catalog error: product 4 not found");
    }

    #[test]
    fn test_storage_error_converts() {
        let err = CartError::from(StorageError::Io(std::io::Error::other("disk detached")));
        assert!(matches!(err, CartError::Storage(_)));
    }
}
