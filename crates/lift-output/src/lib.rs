//! `lift-output` — metrics and output writers for the lift elevator simulator.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                                     |
//! |-----------|---------|---------------------------------------------------|
//! | *(none)*  | CSV     | `events.csv`, `trips.csv`, `tick_summaries.csv`   |
//! | `sqlite`  | SQLite  | `output.db`                                       |
//!
//! Both backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `lift_sim::SimObserver`.
//! [`MetricsCollector`] is a second observer that keeps wait, travel and
//! throughput figures in memory and reports them as a [`MetricsSummary`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use lift_output::{CsvWriter, MetricsCollector, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &config);
//! engine.run_until_idle(10_000, &mut obs)?;
//! engine.shutdown_with(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod row;
pub mod trips;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use metrics::{CarMetrics, MetricsCollector, MetricsSummary};
pub use observer::SimOutputObserver;
pub use row::{EventRow, TickSummaryRow, TripRow};
pub use trips::TripTracker;
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
