//! The cart store: ordered line items, stock-checked mutations, snapshot
//! persistence.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::{Mutex, RwLock};
use tracing::{instrument, warn};

use driftwood_core::{LineItem, ProductId};

use crate::catalog::{Catalog, HttpCatalog};
use crate::config::CartConfig;
use crate::error::CartError;
use crate::notify::{Notifier, TracingNotifier, messages};
use crate::storage::{FileSnapshotStore, SnapshotStore};

/// Aggregate view of the cart: how many units in total and what they cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    /// Sum of all line amounts.
    pub total_items: u32,
    /// Sum of `price * amount` over all lines.
    pub subtotal: Decimal,
}

/// Session cart state manager.
///
/// Holds the ordered line items of one session's cart, validates quantities
/// against the catalog's stock levels before committing, and persists a full
/// snapshot after every mutation. Every rejected or failed mutation emits
/// exactly one user-facing notification and returns a typed error.
///
/// This struct is cheaply cloneable via `Arc`; clones share state.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    catalog: Arc<dyn Catalog>,
    storage: Arc<dyn SnapshotStore>,
    notifier: Arc<dyn Notifier>,
    storage_key: String,
    /// Published cart state. Held briefly: reads clone, commits swap.
    items: RwLock<Vec<LineItem>>,
    /// Serializes mutations end to end (lookups, validation, commit,
    /// persist) so concurrent operations cannot lose each other's writes.
    write_gate: Mutex<()>,
}

impl CartStore {
    /// Open a cart store, loading any snapshot persisted under
    /// `storage_key`.
    ///
    /// A missing snapshot starts the cart empty. A snapshot that fails to
    /// parse is discarded with a warning and the cart starts empty; the next
    /// mutation overwrites it.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the snapshot cannot be read.
    pub async fn open(
        catalog: Arc<dyn Catalog>,
        storage: Arc<dyn SnapshotStore>,
        notifier: Arc<dyn Notifier>,
        storage_key: impl Into<String>,
    ) -> Result<Self, CartError> {
        let storage_key = storage_key.into();
        let items = match storage.get(&storage_key).await? {
            Some(snapshot) => match serde_json::from_str::<Vec<LineItem>>(&snapshot) {
                Ok(items) => items,
                Err(e) => {
                    warn!(error = %e, key = %storage_key, "discarding unreadable cart snapshot");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Ok(Self {
            inner: Arc::new(CartStoreInner {
                catalog,
                storage,
                notifier,
                storage_key,
                items: RwLock::new(items),
                write_gate: Mutex::new(()),
            }),
        })
    }

    /// Open a cart store wired to the production adapters: the HTTP catalog,
    /// file-backed snapshots, and notifications through `tracing`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the snapshot
    /// cannot be read.
    pub async fn from_config(config: &CartConfig) -> Result<Self, CartError> {
        let catalog = HttpCatalog::new(&config.catalog)?;
        let storage = FileSnapshotStore::new(config.storage_dir.clone());

        Self::open(
            Arc::new(catalog),
            Arc::new(storage),
            Arc::new(TracingNotifier),
            config.storage_key.clone(),
        )
        .await
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current cart contents, in insertion order.
    pub async fn items(&self) -> Vec<LineItem> {
        self.inner.items.read().await.clone()
    }

    /// One line by product id.
    pub async fn get(&self, id: ProductId) -> Option<LineItem> {
        self.inner
            .items
            .read()
            .await
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }

    /// Aggregate totals over the whole cart.
    pub async fn summary(&self) -> CartSummary {
        let items = self.inner.items.read().await;
        CartSummary {
            total_items: items.iter().map(|item| item.amount).sum(),
            subtotal: items.iter().map(LineItem::line_total).sum(),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of a product to the cart.
    ///
    /// A product already in the cart has its amount incremented by one; a
    /// new product is looked up in the catalog and appended with amount 1.
    /// Stock is checked fresh in both cases against the would-be total.
    ///
    /// # Errors
    ///
    /// - `CartError::OutOfStock` if stock cannot cover one more unit
    /// - `CartError::Catalog` if a catalog lookup fails
    /// - `CartError::Storage` / `CartError::Snapshot` if persisting fails
    ///   (the in-memory commit stands; only the durable snapshot is stale)
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let _gate = self.inner.write_gate.lock().await;

        let stock = match self.inner.catalog.stock(product_id).await {
            Ok(stock) => stock,
            Err(e) => {
                self.inner.notifier.error(messages::ADD_FAILED);
                return Err(e.into());
            }
        };

        let mut items = self.inner.items.read().await.clone();
        let current_amount = items
            .iter()
            .find(|item| item.id == product_id)
            .map_or(0, |item| item.amount);
        let wanted = current_amount.saturating_add(1);

        if wanted > stock.amount {
            self.inner.notifier.error(messages::OUT_OF_STOCK);
            return Err(CartError::OutOfStock {
                product_id,
                requested: wanted,
                available: stock.amount,
            });
        }

        if let Some(item) = items.iter_mut().find(|item| item.id == product_id) {
            item.amount = wanted;
        } else {
            let product = match self.inner.catalog.product(product_id).await {
                Ok(product) => product,
                Err(e) => {
                    self.inner.notifier.error(messages::ADD_FAILED);
                    return Err(e.into());
                }
            };
            items.push(product.into());
        }

        self.commit(items, messages::ADD_FAILED).await
    }

    /// Remove a product's line from the cart entirely.
    ///
    /// # Errors
    ///
    /// - `CartError::NotInCart` if the product has no line in the cart
    /// - `CartError::Storage` / `CartError::Snapshot` if persisting fails
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let _gate = self.inner.write_gate.lock().await;

        let mut items = self.inner.items.read().await.clone();
        let before = items.len();
        items.retain(|item| item.id != product_id);

        if items.len() == before {
            self.inner.notifier.error(messages::REMOVE_FAILED);
            return Err(CartError::NotInCart(product_id));
        }

        self.commit(items, messages::REMOVE_FAILED).await
    }

    /// Set a product's line to exactly `amount` units.
    ///
    /// An `amount` of zero is ignored entirely: no lookup, no notification,
    /// no state change. Callers drop lines via [`Self::remove_product`].
    /// Stock is checked before cart membership, so an unknown product with
    /// an over-stock amount reports out-of-stock rather than not-in-cart.
    ///
    /// # Errors
    ///
    /// - `CartError::OutOfStock` if stock cannot cover `amount`
    /// - `CartError::NotInCart` if the product has no line in the cart
    /// - `CartError::Catalog` if the stock lookup fails
    /// - `CartError::Storage` / `CartError::Snapshot` if persisting fails
    #[instrument(skip(self), fields(product_id = %product_id, amount))]
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: u32,
    ) -> Result<(), CartError> {
        if amount == 0 {
            return Ok(());
        }

        let _gate = self.inner.write_gate.lock().await;

        let stock = match self.inner.catalog.stock(product_id).await {
            Ok(stock) => stock,
            Err(e) => {
                self.inner.notifier.error(messages::UPDATE_FAILED);
                return Err(e.into());
            }
        };

        if amount > stock.amount {
            self.inner.notifier.error(messages::OUT_OF_STOCK);
            return Err(CartError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        let mut items = self.inner.items.read().await.clone();
        match items.iter_mut().find(|item| item.id == product_id) {
            Some(item) => item.amount = amount,
            None => {
                self.inner.notifier.error(messages::UPDATE_FAILED);
                return Err(CartError::NotInCart(product_id));
            }
        }

        self.commit(items, messages::UPDATE_FAILED).await
    }

    /// Publish a new cart state and persist it.
    ///
    /// On a persistence failure the in-memory commit stands, the operation's
    /// failure message is surfaced, and the error is returned; only the
    /// durable snapshot is stale.
    async fn commit(&self, items: Vec<LineItem>, failure_message: &str) -> Result<(), CartError> {
        let snapshot = match serde_json::to_string(&items) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.inner.notifier.error(failure_message);
                return Err(CartError::Snapshot(e));
            }
        };

        *self.inner.items.write().await = items;

        if let Err(e) = self
            .inner
            .storage
            .set(&self.inner.storage_key, &snapshot)
            .await
        {
            tracing::error!(error = %e, key = %self.inner.storage_key, "failed to persist cart snapshot");
            self.inner.notifier.error(failure_message);
            return Err(e.into());
        }

        Ok(())
    }
}
