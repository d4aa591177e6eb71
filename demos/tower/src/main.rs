//! tower — a morning rush through a 20-floor office tower.
//!
//! Two producer threads perturb one shared engine while the main thread
//! drives the clock: the lobby submits generated passengers (mostly leaving
//! the ground floor), and a maintenance script presses a few hall buttons
//! with nobody behind them.  Events go to CSV under `output/tower`; a JSON
//! metrics summary is printed at the end.
//!
//! ```text
//! cargo run -p tower --release -- [nearest_car|scan|first_come]
//! RUST_LOG=lift_sim=debug cargo run -p tower
//! ```

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow, bail};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lift_core::{Direction, DispatchPolicyKind, EngineConfig, Floor, Tick};
use lift_demand::{LoadGenerator, LoadProfile};
use lift_output::{CsvWriter, MetricsCollector, SimOutputObserver};
use lift_sim::{EngineBuilder, SimEvent, SimObserver, TickReport};

// ── Constants ─────────────────────────────────────────────────────────────────

const FLOORS:               u32 = 20;
const ELEVATORS:            u32 = 4;
const CAPACITY:             u32 = 8;
const DWELL_TICKS:          u32 = 2;
const TICK_DURATION_SECS:   u32 = 2;
const RUSH_TICKS:           u64 = 900;    // 30 simulated minutes
const ARRIVAL_RATE_PER_SEC: f64 = 0.12;
const GROUND_BIAS:          f64 = 0.7;
const SEED:                 u64 = 42;
const DRAIN_LIMIT_TICKS:    u64 = 20_000;

// ── Observer fan-out ──────────────────────────────────────────────────────────

struct TowerObserver {
    metrics:      MetricsCollector,
    output:       SimOutputObserver<CsvWriter>,
    event_rows:   usize,
    summary_rows: usize,
}

impl SimObserver for TowerObserver {
    fn on_event(&mut self, event: &SimEvent) {
        self.event_rows += 1;
        self.metrics.on_event(event);
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        self.summary_rows += 1;
        self.metrics.on_tick_end(report);
        self.output.on_tick_end(report);
    }

    fn on_shutdown(&mut self, final_tick: Tick) {
        self.output.on_shutdown(final_tick);
    }
}

fn policy_from_args() -> Result<DispatchPolicyKind> {
    match std::env::args().nth(1) {
        Some(arg) => arg.parse().map_err(|e| anyhow!("{e}")),
        None      => Ok(DispatchPolicyKind::NearestCar),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let policy = policy_from_args()?;
    println!("=== tower — lift elevator simulator ===");
    println!("Floors: {FLOORS}  |  Cars: {ELEVATORS} × {CAPACITY}  |  Policy: {policy}  |  Seed: {SEED}");
    println!();

    // 1. Engine.
    let config = EngineConfig {
        floors:                FLOORS,
        elevators:             ELEVATORS,
        capacity_per_elevator: CAPACITY,
        door_dwell_ticks:      DWELL_TICKS,
        dispatch_policy:       policy,
        tick_duration_secs:    TICK_DURATION_SECS,
        ..Default::default()
    };
    let shared = EngineBuilder::new(config.clone()).build_shared()?;

    // 2. Producers.
    let lobby = {
        let shared = shared.clone();
        let profile = LoadProfile {
            floors:               FLOORS,
            arrival_rate_per_sec: ARRIVAL_RATE_PER_SEC,
            ground_bias:          GROUND_BIAS,
            tick_duration_secs:   TICK_DURATION_SECS,
        };
        thread::spawn(move || -> Result<usize> {
            let mut load = LoadGenerator::new(profile, SEED)?;
            let trips = load.generate_span(Tick(0), Tick(RUSH_TICKS));
            for trip in &trips {
                shared.submit_request(trip.origin, trip.destination, trip.at)?;
            }
            Ok(trips.len())
        })
    };
    let maintenance = {
        let shared = shared.clone();
        thread::spawn(move || -> Result<()> {
            for floor in (5..FLOORS).step_by(5) {
                shared.press_hall_call(Floor(floor), Direction::Down)?;
            }
            Ok(())
        })
    };

    // 3. Output.
    let out_dir = Path::new("output/tower");
    std::fs::create_dir_all(out_dir)?;
    let mut obs = TowerObserver {
        metrics:      MetricsCollector::new(&config),
        output:       SimOutputObserver::new(CsvWriter::new(out_dir)?, &config),
        event_rows:   0,
        summary_rows: 0,
    };

    // 4. Run the rush, then let the cars empty out.
    let t0 = Instant::now();
    shared.run_paced(RUSH_TICKS, Duration::ZERO, &mut obs)?;

    let submitted = lobby.join().map_err(|_| anyhow!("lobby thread panicked"))??;
    maintenance.join().map_err(|_| anyhow!("maintenance thread panicked"))??;
    info!(submitted, "producers finished");

    // Tick before checking: the inbox may still hold late submissions.
    let mut drained = 0;
    loop {
        shared.run_paced(1, Duration::ZERO, &mut obs)?;
        drained += 1;
        if shared.with_engine(|e| e.is_quiescent()) {
            break;
        }
        if drained == DRAIN_LIMIT_TICKS {
            warn!(drained, "engine still busy, stopping");
            break;
        }
    }

    let final_tick = shared.snapshot().tick;
    if shared.shutdown() {
        obs.on_shutdown(final_tick);
    }
    let elapsed = t0.elapsed();
    if let Some(e) = obs.output.take_error() {
        bail!("output error: {e}");
    }

    // 5. Report.
    let snapshot = shared.snapshot();
    println!("Simulation complete in {:.3} s ({} ticks)", elapsed.as_secs_f64(), final_tick.0);
    println!("  submitted          : {submitted}");
    println!("  events.csv         : {} rows", obs.event_rows);
    println!("  tick_summaries.csv : {} rows", obs.summary_rows);
    println!();

    println!("{:<6} {:<7} {:<14} {:>6} {:>10} {:>7}", "Car", "Floor", "State", "Load", "Floors", "Stops");
    println!("{}", "-".repeat(55));
    for car in &snapshot.elevators {
        println!(
            "{:<6} {:<7} {:<14} {:>6} {:>10} {:>7}",
            car.id.0, car.floor.0, car.state.as_str(), car.load, car.floors_travelled, car.stops_made,
        );
    }
    println!();

    println!("{}", serde_json::to_string_pretty(&obs.metrics.summary())?);
    Ok(())
}
