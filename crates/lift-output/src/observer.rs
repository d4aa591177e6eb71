//! `SimOutputObserver<W>` — persists each tick's events, finished trips and
//! summary through an `OutputWriter`.

use lift_core::{EngineConfig, Tick};
use lift_sim::{SimObserver, TickReport};
use tracing::warn;

use crate::row::{EventRow, TickSummaryRow, TripRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, TripTracker};

/// A [`SimObserver`] that writes every event, every completed trip, and a
/// per-tick summary to any [`OutputWriter`] backend (CSV, SQLite, …).
///
/// Observer hooks cannot fail, so the first write error is parked and the
/// rest are dropped; read it with [`take_error`][Self::take_error] once the
/// engine has shut down (which also finishes the writer).
pub struct SimOutputObserver<W: OutputWriter> {
    writer:             W,
    tick_duration_secs: u32,
    trips:              TripTracker,
    last_error:         Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for the
    /// elapsed-seconds column.
    pub fn new(writer: W, config: &EngineConfig) -> Self {
        Self {
            writer,
            tick_duration_secs: config.tick_duration_secs,
            trips:              TripTracker::new(),
            last_error:         None,
        }
    }

    /// The first write error of the run, if there was one.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Hand back the writer, e.g. to reopen its files after the run.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, report: &TickReport) {
        if !report.is_empty() {
            let rows: Vec<EventRow> = report.events.iter().map(EventRow::from_event).collect();
            let result = self.writer.write_events(&rows);
            self.store_err(result);

            let trips: Vec<TripRow> = report.events.iter().filter_map(|e| self.trips.observe(e)).collect();
            if !trips.is_empty() {
                let result = self.writer.write_trips(&trips);
                self.store_err(result);
            }
        }

        let row = TickSummaryRow::from_report(report, self.tick_duration_secs);
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_shutdown(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
