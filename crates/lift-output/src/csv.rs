//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `events.csv`
//! - `trips.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use tracing::debug;

use crate::writer::OutputWriter;
use crate::{EventRow, OutputResult, TickSummaryRow, TripRow};

/// `None` becomes an empty cell.
fn cell<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(String::new, |v| v.to_string())
}

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    events:    Writer<File>,
    trips:     Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(["tick", "kind", "car", "request", "floor", "detail"])?;

        let mut trips = Writer::from_path(dir.join("trips.csv"))?;
        trips.write_record([
            "request",
            "car",
            "origin",
            "destination",
            "request_tick",
            "board_tick",
            "arrival_tick",
            "wait_ticks",
            "travel_ticks",
        ])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick",
            "elapsed_secs",
            "events",
            "queued",
            "boarded",
            "alighted",
            "cancelled",
        ])?;

        debug!(dir = %dir.display(), "csv output opened");
        Ok(Self { events, trips, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.tick.to_string(),
                row.kind.to_owned(),
                cell(row.car),
                cell(row.request),
                cell(row.floor),
                row.detail.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_trips(&mut self, rows: &[TripRow]) -> OutputResult<()> {
        for row in rows {
            self.trips.write_record(&[
                row.request.to_string(),
                row.car.to_string(),
                row.origin.to_string(),
                row.destination.to_string(),
                row.request_tick.to_string(),
                row.board_tick.to_string(),
                row.arrival_tick.to_string(),
                row.wait_ticks().to_string(),
                row.travel_ticks().to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.elapsed_secs.to_string(),
            row.events.to_string(),
            row.queued.to_string(),
            row.boarded.to_string(),
            row.alighted.to_string(),
            row.cancelled.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.trips.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
