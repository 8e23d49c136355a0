//! Migration service - brings the schema up to date on open
//!
//! Each applied migration is recorded in `sys_migrations` so it runs once.

use duckdb::Connection;
use tracing::info;

use crate::domain::Result;
use crate::migrations::{BOOTSTRAP_SQL, MIGRATIONS};

const WALLETS_MIGRATION: &str = "001_wallets.sql";

/// Migrations applied by one `run_pending` call
#[derive(Debug, Default)]
pub struct MigrationResult {
    pub applied: Vec<String>,
}

impl MigrationResult {
    /// True when this run created the wallets table
    pub fn created_wallets_table(&self) -> bool {
        self.applied.iter().any(|name| name == WALLETS_MIGRATION)
    }
}

pub struct MigrationService<'a> {
    conn: &'a Connection,
}

impl<'a> MigrationService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Apply every migration not yet recorded, in declaration order
    pub fn run_pending(&self) -> Result<MigrationResult> {
        self.conn.execute_batch(BOOTSTRAP_SQL)?;
        let recorded = self.recorded()?;

        let mut result = MigrationResult::default();
        for &(name, sql) in MIGRATIONS {
            if recorded.iter().any(|r| r == name) {
                continue;
            }
            self.conn.execute_batch(sql)?;
            self.conn.execute(
                "INSERT INTO sys_migrations (migration_name) VALUES (?)",
                [name],
            )?;
            info!(migration = %name, "Applied migration");
            result.applied.push(name.to_string());
        }
        Ok(result)
    }

    fn recorded(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT migration_name FROM sys_migrations")?;
        let names = stmt.query_map([], |row| row.get::<_, String>(0))?;
        Ok(names.collect::<std::result::Result<_, _>>()?)
    }
}
