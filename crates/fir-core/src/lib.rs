//! Core types, the record-store trait, and the record service for the FIR
//! ledger.
//!
//! This crate is free of HTTP and database dependencies. The SQLite backend,
//! the REST API, and the terminal client all depend on it.

// Native `async fn` in traits; `Send` bounds are spelled out on the trait
// methods that need them.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod filter;
pub mod fir;
pub mod id;
pub mod memory;
pub mod seed;
pub mod service;
pub mod stats;
pub mod store;

pub use error::{Error, Result};
