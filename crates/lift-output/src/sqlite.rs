//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `events`, `trips`, and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{EventRow, OutputResult, TickSummaryRow, TripRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS events (
                 tick    INTEGER NOT NULL,
                 kind    TEXT    NOT NULL,
                 car     INTEGER,
                 request INTEGER,
                 floor   INTEGER,
                 detail  TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS trips (
                 request      INTEGER PRIMARY KEY,
                 car          INTEGER NOT NULL,
                 origin       INTEGER NOT NULL,
                 destination  INTEGER NOT NULL,
                 request_tick INTEGER NOT NULL,
                 board_tick   INTEGER NOT NULL,
                 arrival_tick INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick         INTEGER PRIMARY KEY,
                 elapsed_secs INTEGER NOT NULL,
                 events       INTEGER NOT NULL,
                 queued       INTEGER NOT NULL,
                 boarded      INTEGER NOT NULL,
                 alighted     INTEGER NOT NULL,
                 cancelled    INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO events (tick, kind, car, request, floor, detail) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick as i64,
                    row.kind,
                    row.car,
                    row.request.map(|r| r as i64),
                    row.floor,
                    row.detail,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_trips(&mut self, rows: &[TripRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO trips \
                 (request, car, origin, destination, request_tick, board_tick, arrival_tick) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.request as i64,
                    row.car,
                    row.origin,
                    row.destination,
                    row.request_tick as i64,
                    row.board_tick as i64,
                    row.arrival_tick as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, elapsed_secs, events, queued, boarded, alighted, cancelled) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                row.tick as i64,
                row.elapsed_secs as i64,
                row.events,
                row.queued,
                row.boarded,
                row.alighted,
                row.cancelled,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
