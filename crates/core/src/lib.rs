//! Driftwood Core - Shared types library.
//!
//! This crate provides common types used across all Driftwood components:
//! - `cart` - Session cart state manager
//! - `integration-tests` - Cross-crate behavioral tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients - so any component can depend on it without pulling in a stack.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and the cart line item

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
