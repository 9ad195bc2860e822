//! Database access layer with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `corrections` - Correction log CRUD and statistics
//! - `history` - Append-only training event log

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::{info, warn};

use crate::error::Result;

mod corrections;
mod history;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Parse a SQLite datetime string into a DateTime<Utc>
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    // SQLite stores as "YYYY-MM-DD HH:MM:SS" format
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|e| {
            warn!(value = s, error = %e, "Unparseable datetime, substituting current time");
            Utc::now()
        })
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Create a new database connection pool, running migrations on open
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(10).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because every
    /// pooled connection to a `:memory:` database sees a different database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = format!(
            "{}/penny_test_{}_{}.db",
            std::env::temp_dir().display(),
            std::process::id(),
            id
        );

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::new(&path)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Delete every correction record
    ///
    /// Distinct from a model reset: resetting the model never touches the
    /// correction log, and clearing the log never touches the model.
    pub fn clear_corrections(&self) -> Result<usize> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM corrections", [])?;
        info!(deleted, "Correction log cleared");
        Ok(deleted)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: better concurrency, readers don't block writers
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            -- User corrections to wrong predictions. Append-mostly: only the
            -- is_applied/applied_in_version pair is ever updated, and only
            -- once, by the training cycle that consumes the record.
            CREATE TABLE IF NOT EXISTS corrections (
                id INTEGER PRIMARY KEY,
                description TEXT NOT NULL,
                predicted_category TEXT NOT NULL,
                correct_category TEXT NOT NULL,
                confidence REAL,
                is_applied BOOLEAN DEFAULT 0,
                applied_in_version INTEGER,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_corrections_applied ON corrections(is_applied);
            CREATE INDEX IF NOT EXISTS idx_corrections_category ON corrections(correct_category);

            -- Append-only log of completed training runs
            CREATE TABLE IF NOT EXISTS training_events (
                id INTEGER PRIMARY KEY,
                version INTEGER NOT NULL,
                kind TEXT NOT NULL,
                accuracy REAL NOT NULL,
                corrections_applied INTEGER NOT NULL,
                examples INTEGER NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_training_events_version ON training_events(version);
            "#,
        )?;

        Ok(())
    }
}
