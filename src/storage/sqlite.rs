//! SQLite storage backend for count records

use super::traits::{AnchoredRow, CountRow, CountStore, OpenStore, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

/// SQLite-backed count store
///
/// One database file with three tables: `counts` keyed by (token, year),
/// `anchored_counts` keyed by (token, year, anchor_count), and a `years`
/// index maintained inside every commit transaction. Thread-safe via an
/// internal mutex on the connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Initialize the database schema
    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            r#"
            -- Per-year token counts
            CREATE TABLE IF NOT EXISTS counts (
                token TEXT NOT NULL,
                year INTEGER NOT NULL,
                count INTEGER NOT NULL,
                PRIMARY KEY (token, year)
            );

            -- Anchored counts, bucketed by the anchor's per-page count
            CREATE TABLE IF NOT EXISTS anchored_counts (
                token TEXT NOT NULL,
                year INTEGER NOT NULL,
                anchor_count INTEGER NOT NULL,
                count INTEGER NOT NULL,
                PRIMARY KEY (token, year, anchor_count)
            );

            -- Explicit index of years seen by any commit
            CREATE TABLE IF NOT EXISTS years (
                year INTEGER PRIMARY KEY
            );

            CREATE INDEX IF NOT EXISTS idx_counts_year
                ON counts(year);
            CREATE INDEX IF NOT EXISTS idx_anchored_year
                ON anchored_counts(year);

            -- Enable WAL mode for concurrent reads during writes
            PRAGMA journal_mode = WAL;
            "#,
        )?;
        Ok(())
    }
}

impl OpenStore for SqliteStore {
    fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl CountStore for SqliteStore {
    fn apply_counts(&self, rows: &[CountRow]) -> StorageResult<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        {
            // Atomic additive upsert: no read-then-write window
            let mut upsert = tx.prepare(
                r#"
                INSERT INTO counts (token, year, count)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(token, year) DO UPDATE SET
                    count = count + excluded.count
                "#,
            )?;
            let mut mark_year = tx.prepare("INSERT OR IGNORE INTO years (year) VALUES (?1)")?;

            for row in rows {
                upsert.execute(params![row.token, row.year, row.count as i64])?;
                mark_year.execute(params![row.year])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn apply_anchored(&self, rows: &[AnchoredRow]) -> StorageResult<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        {
            let mut upsert = tx.prepare(
                r#"
                INSERT INTO anchored_counts (token, year, anchor_count, count)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT(token, year, anchor_count) DO UPDATE SET
                    count = count + excluded.count
                "#,
            )?;
            let mut mark_year = tx.prepare("INSERT OR IGNORE INTO years (year) VALUES (?1)")?;

            for row in rows {
                upsert.execute(params![row.token, row.year, row.level as i64, row.count as i64])?;
                mark_year.execute(params![row.year])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn token_year_count(&self, token: &str, year: i32) -> StorageResult<u64> {
        let conn = self.conn.lock().unwrap();
        let count: Option<i64> = conn
            .query_row(
                "SELECT count FROM counts WHERE token = ?1 AND year = ?2",
                params![token, year],
                |row| row.get(0),
            )
            .optional()?;
        Ok(count.unwrap_or(0) as u64)
    }

    fn token_year_level_count(&self, token: &str, year: i32, level: u64) -> StorageResult<u64> {
        let conn = self.conn.lock().unwrap();
        let count: Option<i64> = conn
            .query_row(
                r#"
                SELECT count FROM anchored_counts
                WHERE token = ?1 AND year = ?2 AND anchor_count = ?3
                "#,
                params![token, year, level as i64],
                |row| row.get(0),
            )
            .optional()?;
        Ok(count.unwrap_or(0) as u64)
    }

    fn years(&self) -> StorageResult<Vec<i32>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT year FROM years ORDER BY year")?;
        let years = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<i32>, _>>()?;
        Ok(years)
    }

    fn time_series(&self, token: &str) -> StorageResult<Vec<(i32, u64)>> {
        let years = self.years()?;
        let mut series = Vec::with_capacity(years.len());
        for year in years {
            series.push((year, self.token_year_count(token, year)?));
        }
        Ok(series)
    }
}
