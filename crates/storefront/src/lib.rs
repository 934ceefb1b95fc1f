//! IMEX storefront library.
//!
//! The inquiry-list engine (cart state, persistence, catalog lookup and
//! rendering) plus the HTMX surface that drives it. Exposed as a library so
//! the CLI and integration tests can boot the same engine.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod blueprint;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod i18n;
pub mod inquiry;
pub mod notify;
pub mod render;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;
