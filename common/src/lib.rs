//! Core of the AI ROI calculator: the benefit formulas, the shared industry
//! table, the store abstraction and the HTTP server built on top of it.

pub mod calculations;
pub mod config;
pub mod error;
pub mod industry;
pub mod memory;
pub mod models;
pub mod server;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::Config;
pub use memory::MemoryStore;
pub use store::{ CalculatorStore, StoreError, StoreResult };
