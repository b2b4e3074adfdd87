//! Quickbite Core - Shared types library.
//!
//! This crate provides common types used across all Quickbite components:
//! - `cart` - Device-local cart engine with durable mirroring
//! - `checkout` - Order draft building and submission orchestration
//! - `cli` - Command-line front end for driving a file-backed cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! network clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
