//! User-facing error notifications.
//!
//! The cart store emits exactly one notification per rejected or failed
//! operation, using the fixed messages in [`messages`]. Rendering them is
//! the embedding application's concern.

use std::sync::{Arc, Mutex, PoisonError};

/// User-facing notification messages emitted by the cart store.
pub mod messages {
    /// Requested quantity exceeds available stock (shared by add and update).
    pub const OUT_OF_STOCK: &str = "Requested quantity is out of stock";
    /// Adding a product failed.
    pub const ADD_FAILED: &str = "Could not add the product to the cart";
    /// Removing a product failed.
    pub const REMOVE_FAILED: &str = "Could not remove the product from the cart";
    /// Updating a product's quantity failed.
    pub const UPDATE_FAILED: &str = "Could not update the product quantity";
}

/// Sink for user-facing error notifications.
///
/// Fire-and-forget: implementations must not block and must not fail.
pub trait Notifier: Send + Sync {
    /// Surface an error message to the user.
    fn error(&self, message: &str);
}

/// Notifier that emits messages through the `tracing` pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::error!(%message, "cart notification");
    }
}

/// Notifier that records messages for assertions in tests.
///
/// Cloning shares the recorded messages.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    /// Creates a notifier with no recorded messages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything notified so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_messages_in_order() {
        let notifier = RecordingNotifier::new();
        notifier.error(messages::OUT_OF_STOCK);
        notifier.error(messages::ADD_FAILED);

        assert_eq!(
            notifier.messages(),
            vec![messages::OUT_OF_STOCK, messages::ADD_FAILED]
        );
    }

    #[test]
    fn test_clones_share_messages() {
        let notifier = RecordingNotifier::new();
        let clone = notifier.clone();
        notifier.error(messages::REMOVE_FAILED);

        assert_eq!(clone.messages(), vec![messages::REMOVE_FAILED]);
    }
}
