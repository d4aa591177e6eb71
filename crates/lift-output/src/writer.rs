//! The `OutputWriter` trait implemented by all backend writers.

use crate::{EventRow, OutputResult, TickSummaryRow, TripRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Callers going through [`SimOutputObserver`][crate::SimOutputObserver]
/// never see these errors directly; the observer keeps the first one for
/// [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one tick's events, in emission order.
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Write completed trips.
    fn write_trips(&mut self, rows: &[TripRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
