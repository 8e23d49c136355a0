//! Database migrations - embedded SQL files
//!
//! Compiled into the binary with include_str! and applied in order.

/// Creates the `sys_migrations` bookkeeping table; safe to run on every open
pub const BOOTSTRAP_SQL: &str = include_str!("000_migrations.sql");

/// Schema migrations as (name, sql), applied once each in this order.
///
/// When adding a migration, create NNN_description.sql and append it here.
pub const MIGRATIONS: &[(&str, &str)] = &[("001_wallets.sql", include_str!("001_wallets.sql"))];
