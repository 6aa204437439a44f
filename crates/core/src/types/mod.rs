//! Core types for Driftwood.
//!
//! Type-safe wrappers for the cart domain's basic concepts.

pub mod id;
pub mod line_item;

pub use id::ProductId;
pub use line_item::LineItem;
