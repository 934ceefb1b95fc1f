//! IMEX Core - Shared types library.
//!
//! This crate provides the domain types used across all IMEX components:
//! - `storefront` - Cart engine, catalog, render projector and HTMX server
//! - `cli` - Terminal surface over the same engine
//!
//! # Architecture
//!
//! The core crate contains only types and formatting - no I/O, no stores,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids, prices, weights, locales,
//!   categories and contact emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
