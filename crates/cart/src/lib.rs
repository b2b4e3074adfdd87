//! Quickbite Cart - device-local cart engine.
//!
//! # Architecture
//!
//! The cart is authoritative in memory and mirrored to a durable store so it
//! survives app restarts. Mutations apply synchronously; the mirror is
//! written by a background task fed through a latest-wins queue, so a burst
//! of taps coalesces into one write and a slow write can never overwrite the
//! store with a stale snapshot.
//!
//! The store is a trait boundary ([`CartStore`]) - the engine does not care
//! whether the mirror is a file, OS key-value storage, or a test buffer.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use quickbite_cart::{CartEngine, FileStore, ProductSnapshot};
//! use quickbite_core::{Money, ProductId};
//!
//! let store = Arc::new(FileStore::new("/data/quickbite"));
//! let mut cart = CartEngine::load(store).await;
//!
//! cart.add(ProductSnapshot {
//!     id: ProductId::new("p1"),
//!     name: "Burger".into(),
//!     unit_price: Money::vnd(45000),
//!     picture_url: "https://cdn.example/burger.jpg".into(),
//!     options: Vec::new(),
//! }, 1)?;
//!
//! println!("{}", cart.subtotal());
//! cart.flush().await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod engine;
mod error;
mod line;
mod mirror;
mod store;

pub use engine::CartEngine;
pub use error::CartError;
pub use line::{CartLine, LineKey, ProductSnapshot, SelectedOption};
pub use store::{CartStore, FileStore, MemoryStore, StoreError};
