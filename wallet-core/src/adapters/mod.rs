//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - DuckDB for the WalletStore port
//! - An in-memory map standing in for the table in tests

pub mod duckdb;
pub mod memory;
