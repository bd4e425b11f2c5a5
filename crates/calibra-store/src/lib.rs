//! calibra-store — Game store backends.
//!
//! Implements the `GameStore` contract from `calibra-core`. Currently one
//! backend: an in-memory store for tests and single-process deployments.

pub mod memory;

pub use memory::MemoryStore;
