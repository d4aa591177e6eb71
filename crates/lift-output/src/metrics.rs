//! `MetricsCollector` — aggregates timing and throughput from the event
//! stream.
//!
//! Wait is `board - request`, travel is `arrival - board`, total is their
//! sum, all in ticks.  Seconds are ticks times the configured tick length.

use std::collections::BTreeMap;

use lift_car::CarEvent;
use lift_core::{ElevatorId, EngineConfig, Tick};
use lift_sim::{EventKind, SimEvent, SimObserver, TickReport};
use serde::{Deserialize, Serialize};

use crate::{TripRow, TripTracker};

/// Running count / sum / max of one duration.
#[derive(Copy, Clone, Debug, Default)]
struct Stat {
    count: u64,
    sum:   u64,
    max:   u64,
}

impl Stat {
    fn record(&mut self, ticks: u64) {
        self.count += 1;
        self.sum += ticks;
        self.max = self.max.max(ticks);
    }

    fn mean(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.sum as f64 / self.count as f64 }
    }
}

/// Per-car totals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarMetrics {
    pub car:              u32,
    pub floors_travelled: u64,
    pub stops:            u64,
    pub passengers:       u64,
}

/// Everything [`MetricsCollector`] knows, in one serialisable value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub ticks:                    u64,
    pub tick_duration_secs:       u32,
    /// Queued requests plus those cancelled before reaching the landing.
    pub requests:                 u64,
    pub delivered:                u64,
    pub cancelled:                u64,
    pub in_progress:              u64,
    pub mean_wait_ticks:          f64,
    pub max_wait_ticks:           u64,
    pub mean_travel_ticks:        f64,
    pub max_travel_ticks:         u64,
    pub mean_total_ticks:         f64,
    pub max_total_ticks:          u64,
    pub mean_wait_secs:           f64,
    pub mean_travel_secs:         f64,
    pub delivered_per_1000_ticks: f64,
    pub cars:                     Vec<CarMetrics>,
}

/// A [`SimObserver`] that turns events into [`MetricsSummary`] figures.
pub struct MetricsCollector {
    tick_duration_secs: u32,
    trips:              TripTracker,
    last_tick:          Option<Tick>,
    requests:           u64,
    cancelled:          u64,
    wait:               Stat,
    travel:             Stat,
    total:              Stat,
    cars:               BTreeMap<ElevatorId, CarMetrics>,
}

impl MetricsCollector {
    pub fn new(config: &EngineConfig) -> Self {
        let cars = (0..config.elevators)
            .map(|i| (ElevatorId(i), CarMetrics { car: i, ..Default::default() }))
            .collect();
        Self {
            tick_duration_secs: config.tick_duration_secs,
            trips:              TripTracker::new(),
            last_tick:          None,
            requests:           0,
            cancelled:          0,
            wait:               Stat::default(),
            travel:             Stat::default(),
            total:              Stat::default(),
            cars,
        }
    }

    /// Feed one event directly, for callers not driving through an engine
    /// run helper.
    pub fn record(&mut self, event: &SimEvent) {
        match event.kind {
            EventKind::RequestQueued { .. } => self.requests += 1,
            EventKind::RequestCancelled { request } => {
                self.cancelled += 1;
                // Withdrawn before its tick came: never queued, still a request.
                if !self.trips.is_open(request) {
                    self.requests += 1;
                }
            }
            EventKind::Boarded { car, .. } => self.car(car).passengers += 1,
            EventKind::Car { car, event: CarEvent::Moved { .. } } => self.car(car).floors_travelled += 1,
            EventKind::Car { car, event: CarEvent::Arrived { .. } } => self.car(car).stops += 1,
            _ => {}
        }
        if let Some(trip) = self.trips.observe(event) {
            self.finish_trip(&trip);
        }
    }

    fn finish_trip(&mut self, trip: &TripRow) {
        self.wait.record(trip.wait_ticks());
        self.travel.record(trip.travel_ticks());
        self.total.record(trip.total_ticks());
    }

    fn car(&mut self, id: ElevatorId) -> &mut CarMetrics {
        self.cars
            .entry(id)
            .or_insert_with(|| CarMetrics { car: id.0, ..Default::default() })
    }

    /// Trips delivered so far.
    pub fn delivered(&self) -> u64 {
        self.total.count
    }

    pub fn summary(&self) -> MetricsSummary {
        let ticks = self.last_tick.map_or(0, |t| t.0 + 1);
        let secs = |ticks: f64| ticks * self.tick_duration_secs as f64;
        let delivered = self.total.count;
        MetricsSummary {
            ticks,
            tick_duration_secs:       self.tick_duration_secs,
            requests:                 self.requests,
            delivered,
            cancelled:                self.cancelled,
            in_progress:              self.trips.in_progress() as u64,
            mean_wait_ticks:          self.wait.mean(),
            max_wait_ticks:           self.wait.max,
            mean_travel_ticks:        self.travel.mean(),
            max_travel_ticks:         self.travel.max,
            mean_total_ticks:         self.total.mean(),
            max_total_ticks:          self.total.max,
            mean_wait_secs:           secs(self.wait.mean()),
            mean_travel_secs:         secs(self.travel.mean()),
            delivered_per_1000_ticks: if ticks == 0 {
                0.0
            } else {
                delivered as f64 * 1000.0 / ticks as f64
            },
            cars:                     self.cars.values().cloned().collect(),
        }
    }
}

impl SimObserver for MetricsCollector {
    fn on_event(&mut self, event: &SimEvent) {
        self.record(event);
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        self.last_tick = Some(report.tick);
    }
}
