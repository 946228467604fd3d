//! Core types and trait definitions for Potty Pooper.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store backend and the web layer both depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod record;
pub mod sanitize;
pub mod service;
pub mod store;

pub use error::{Error, Result, parse_id};
pub use record::{PottyFields, PottyRecord};
pub use service::PottyService;
