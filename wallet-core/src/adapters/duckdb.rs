//! DuckDB wallet store implementation

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use duckdb::{params, Connection};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::domain::{Error, Result, Wallet, WalletId};
use crate::ports::{UnitOfWork, WalletStore};
use crate::services::{MigrationResult, MigrationService};

/// Maximum number of retries when database file is locked
const MAX_RETRIES: u32 = 5;

/// Initial retry delay in milliseconds (doubles each retry: 50, 100, 200, 400ms)
const INITIAL_RETRY_DELAY_MS: u64 = 50;

/// Check if an error message indicates a file locking issue that should be retried
fn is_retryable_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    // Windows error messages
    lower.contains("being used by another process")
        || lower.contains("cannot access the file")
        // Unix/macOS error messages
        || lower.contains("resource temporarily unavailable")
        || lower.contains("database is locked")
        || lower.contains("file is already open")
}

/// DuckDB-backed wallet store.
///
/// Holds one base connection; every unit of work runs on its own clone of it
/// inside an explicit `BEGIN TRANSACTION`, so units are isolated from each other.
pub struct DuckDbWalletStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl DuckDbWalletStore {
    /// Open (or create) the database file.
    ///
    /// Retries with exponential backoff on file locking errors, which occur
    /// when another process holds the database open.
    pub fn new(db_path: &Path) -> Result<Self> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match Self::try_open_connection(db_path) {
                Ok(conn) => {
                    return Ok(Self {
                        conn: Mutex::new(conn),
                        db_path: Some(db_path.to_path_buf()),
                    });
                }
                Err(e) => {
                    let err_msg = e.to_string();
                    if is_retryable_error(&err_msg) && attempt < MAX_RETRIES - 1 {
                        let delay =
                            Duration::from_millis(INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt));
                        warn!(
                            delay_ms = delay.as_millis() as u64,
                            attempt = attempt + 1,
                            max = MAX_RETRIES,
                            error = %err_msg,
                            "Database busy, retrying"
                        );
                        thread::sleep(delay);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.map(Error::from).unwrap_or_else(|| {
            Error::storage(format!("Failed to open database after {} retries", MAX_RETRIES))
        }))
    }

    /// Open a private in-memory database (tests, dry runs)
    pub fn open_in_memory() -> Result<Self> {
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        let conn = Connection::open_in_memory_with_flags(config)?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path: None,
        })
    }

    fn try_open_connection(db_path: &Path) -> std::result::Result<Connection, duckdb::Error> {
        // Extension autoloading stays off; nothing here needs one.
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        Connection::open_with_flags(db_path, config)
    }

    /// Path of the backing file, `None` for in-memory stores
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| Error::storage(format!("Connection lock poisoned: {}", e)))
    }

    /// Run pending migrations, creating the wallets table if absent
    pub fn ensure_schema(&self) -> Result<MigrationResult> {
        let conn = self.lock()?;
        MigrationService::new(&conn).run_pending()
    }
}

impl WalletStore for DuckDbWalletStore {
    fn begin(&self) -> Result<Box<dyn UnitOfWork + '_>> {
        let conn = self.lock()?.try_clone()?;
        conn.execute_batch("BEGIN TRANSACTION")?;
        debug!("Opened DuckDB unit of work");
        Ok(Box::new(DuckDbUnitOfWork {
            conn,
            finished: false,
        }))
    }
}

/// One open DuckDB transaction on a dedicated connection
struct DuckDbUnitOfWork {
    conn: Connection,
    finished: bool,
}

impl DuckDbUnitOfWork {
    fn finish(&mut self, statement: &str) -> Result<()> {
        self.finished = true;
        self.conn.execute_batch(statement)?;
        Ok(())
    }
}

impl UnitOfWork for DuckDbUnitOfWork {
    fn get(&mut self, id: WalletId) -> Result<Wallet> {
        // Balance is read as VARCHAR to keep the exact DECIMAL digits
        let result = self.conn.query_row(
            "SELECT Id, Holder, CAST(Balance AS VARCHAR) FROM Wallets WHERE Id = ?",
            params![id],
            |row| {
                Ok((
                    row.get::<_, i32>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        );

        match result {
            Ok(raw) => row_to_wallet(raw),
            Err(duckdb::Error::QueryReturnedNoRows) => Err(Error::WalletNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    fn set_balance(&mut self, id: WalletId, balance: Decimal) -> Result<usize> {
        let affected = self.conn.execute(
            "UPDATE Wallets SET Balance = CAST(? AS DECIMAL(18,2)) WHERE Id = ?",
            params![balance.to_string(), id],
        )?;
        Ok(affected)
    }

    fn list(&mut self) -> Result<Vec<Wallet>> {
        let mut stmt = self.conn.prepare(
            "SELECT Id, Holder, CAST(Balance AS VARCHAR) FROM Wallets ORDER BY Id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i32>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut wallets = Vec::new();
        for row in rows {
            wallets.push(row_to_wallet(row?)?);
        }
        Ok(wallets)
    }

    fn insert(&mut self, wallet: &Wallet) -> Result<usize> {
        let affected = self.conn.execute(
            "INSERT INTO Wallets (Id, Holder, Balance) VALUES (?, ?, CAST(? AS DECIMAL(18,2)))",
            params![wallet.id, wallet.holder, wallet.balance.to_string()],
        )?;
        Ok(affected)
    }

    fn update(&mut self, wallet: &Wallet) -> Result<usize> {
        let affected = self.conn.execute(
            "UPDATE Wallets SET Holder = ?, Balance = CAST(? AS DECIMAL(18,2)) WHERE Id = ?",
            params![wallet.holder, wallet.balance.to_string(), wallet.id],
        )?;
        Ok(affected)
    }

    fn delete(&mut self, id: WalletId) -> Result<usize> {
        let affected = self
            .conn
            .execute("DELETE FROM Wallets WHERE Id = ?", params![id])?;
        Ok(affected)
    }

    fn commit(mut self: Box<Self>) -> Result<()> {
        self.finish("COMMIT")
    }

    fn rollback(mut self: Box<Self>) -> Result<()> {
        self.finish("ROLLBACK")
    }
}

impl Drop for DuckDbUnitOfWork {
    fn drop(&mut self) {
        if !self.finished {
            if let Err(e) = self.conn.execute_batch("ROLLBACK") {
                warn!(error = %e, "Rollback of abandoned unit of work failed");
            }
        }
    }
}

fn row_to_wallet((id, holder, balance): (i32, Option<String>, String)) -> Result<Wallet> {
    let balance = Decimal::from_str(balance.trim()).map_err(|e| {
        Error::storage(format!("Invalid balance '{}' for wallet {}: {}", balance, id, e))
    })?;
    Ok(Wallet::new(id, holder.unwrap_or_default(), balance))
}
