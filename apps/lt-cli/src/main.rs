use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::TryRecvError;

use lt_command::{
    CommandWorker, SimulatedCommandInterface, SpeedCommandGate, WorkerMessage,
};
use lt_core::PumpId;
use lt_telemetry::{PumpSnapshot, SimulatedFeed, TelemetrySource, TelemetryStore};
use lt_twin::{CurveConstants, derive_state};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "lt-cli")]
#[command(about = "Lifttwin CLI - Pump station digital-twin tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive hydraulic state from one telemetry snapshot
    Derive {
        /// Snapshot JSON file as published by the transport
        #[arg(long)]
        from: Option<PathBuf>,
        /// Flow rate (m³/h)
        #[arg(long)]
        flow: Option<f64>,
        /// Discharge pressure (bar)
        #[arg(long)]
        pressure: Option<f64>,
        /// Shaft speed (rev/min)
        #[arg(long)]
        rpm: Option<f64>,
        /// Power draw (kW)
        #[arg(long)]
        power: Option<f64>,
        /// Wet-well level (m)
        #[arg(long)]
        level: Option<f64>,
        /// Pump contactor state
        #[arg(long)]
        running: bool,
        /// Emit the derived state as JSON instead of readouts
        #[arg(long)]
        json: bool,
    },
    /// Export the 25-point performance/system curve set as CSV
    Curve {
        /// Shaft speed to scale the curves to (rev/min)
        #[arg(long)]
        rpm: f64,
        /// Wet-well level (m), sets the static lift
        #[arg(long)]
        level: f64,
        /// Design-spec catalog YAML; defaults to the nominal reference curve
        #[arg(long)]
        design: Option<PathBuf>,
        /// Asset tag inside the catalog (required with --design)
        #[arg(long)]
        pump: Option<String>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the simulated station and print twin readouts per tick
    Simulate {
        /// Number of telemetry ticks to run
        #[arg(long, default_value_t = 10)]
        ticks: u64,
        /// Number of pumps in the station
        #[arg(long, default_value_t = 3)]
        pumps: u32,
        /// Issue a speed setpoint (rev/min) mid-run
        #[arg(long)]
        set_speed: Option<f64>,
        /// Tick at which the setpoint is issued
        #[arg(long, default_value_t = 2)]
        at_tick: u64,
        /// 0-based index of the pump to command
        #[arg(long, default_value_t = 0)]
        pump_index: u32,
    },
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Derive {
            from,
            flow,
            pressure,
            rpm,
            power,
            level,
            running,
            json,
        } => cmd_derive(from.as_deref(), flow, pressure, rpm, power, level, running, json),
        Commands::Curve {
            rpm,
            level,
            design,
            pump,
            output,
        } => cmd_curve(rpm, level, design.as_deref(), pump.as_deref(), output.as_deref()),
        Commands::Simulate {
            ticks,
            pumps,
            set_speed,
            at_tick,
            pump_index,
        } => cmd_simulate(ticks, pumps, set_speed, at_tick, pump_index),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_derive(
    from: Option<&Path>,
    flow: Option<f64>,
    pressure: Option<f64>,
    rpm: Option<f64>,
    power: Option<f64>,
    level: Option<f64>,
    running: bool,
    json: bool,
) -> CliResult<()> {
    let snapshot: PumpSnapshot = if let Some(path) = from {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)?
    } else {
        PumpSnapshot {
            flow_m3_h: flow.ok_or("missing --flow (or use --from)")?,
            discharge_pressure_bar: pressure.ok_or("missing --pressure (or use --from)")?,
            rpm: rpm.ok_or("missing --rpm (or use --from)")?,
            power_kw: power.ok_or("missing --power (or use --from)")?,
            wet_well_level_m: level.ok_or("missing --level (or use --from)")?,
            is_running: running,
        }
    };

    let state = derive_state(&snapshot);

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        println!("Hydraulic state:");
        println!("  Head:        {:.3} m", state.head_m);
        println!("  Static lift: {:.3} m", state.static_lift_m);
        println!("  Efficiency:  {:.2} %", state.efficiency_pct);
    }
    Ok(())
}

fn cmd_curve(
    rpm: f64,
    level: f64,
    design: Option<&Path>,
    pump: Option<&str>,
    output: Option<&Path>,
) -> CliResult<()> {
    let constants = match (design, pump) {
        (Some(path), Some(tag)) => {
            let catalog = lt_twin::load_yaml(path)?;
            CurveConstants::from_design(catalog.get(tag)?)
        }
        (Some(_), None) => return Err("--design requires --pump <TAG>".into()),
        (None, Some(_)) => return Err("--pump requires --design <FILE>".into()),
        (None, None) => CurveConstants::default(),
    };

    let static_lift_m = lt_twin::DISCHARGE_ELEVATION_M - level;
    let curve = lt_twin::generate(rpm, static_lift_m, &constants);

    // Build CSV
    let mut csv = String::from("flow_m3_h,head_m,efficiency_pct,power_kw,system_head_m\n");
    for point in &curve {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            point.flow_m3_h,
            point.head_m,
            point.efficiency_pct,
            point.power_kw,
            point.system_head_m
        ));
    }

    // Write to file or stdout
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} points to {}", curve.len(), path.display());
    } else {
        print!("{}", csv);
    }

    Ok(())
}

fn cmd_simulate(
    ticks: u64,
    pumps: u32,
    set_speed: Option<f64>,
    at_tick: u64,
    pump_index: u32,
) -> CliResult<()> {
    let feed = SimulatedFeed::new(pumps)?;
    let mut store = TelemetryStore::new();
    let constants = CurveConstants::default();

    let backend = Arc::new(SimulatedCommandInterface::new(feed.pump_ids()));
    let target = PumpId::from_index(pump_index);
    let mut gate = SpeedCommandGate::new(target);
    let mut worker: Option<CommandWorker> = None;

    for t in 0..ticks {
        for (pump, snapshot) in feed.tick(t) {
            store.ingest(pump, snapshot)?;
        }

        if let Some(rpm) = set_speed {
            if t == at_tick {
                let snapshot = store
                    .latest(target)
                    .ok_or("no telemetry for the commanded pump")?;
                match gate.begin(&snapshot, rpm) {
                    Ok(command) => {
                        println!("→ {} set_speed {:.0} rpm dispatched", command.pump, rpm);
                        worker = Some(CommandWorker::dispatch(backend.clone(), command));
                    }
                    Err(e) => println!("✗ {target} set_speed refused: {e}"),
                }
            }
        }

        if let Some(w) = worker.take() {
            match w.outcome_rx.try_recv() {
                Ok(message) => {
                    report_outcome(&message);
                    gate.complete();
                }
                Err(TryRecvError::Empty) => worker = Some(w),
                Err(TryRecvError::Disconnected) => gate.complete(),
            }
        }

        for pump in store.pump_ids() {
            if let Some(snapshot) = store.latest(pump) {
                let frame = lt_twin::tick(&snapshot, &constants);
                println!(
                    "t={t:>3} {pump} flow={:7.1} m³/h  head={:6.2} m  lift={:5.2} m  eff={:6.2} %",
                    frame.operating_point.flow_m3_h,
                    frame.state.head_m,
                    frame.state.static_lift_m,
                    frame.state.efficiency_pct,
                );
            }
        }
    }

    // A still-outstanding command is drained before exit so the run always
    // reports its fate.
    if let Some(w) = worker {
        if let Ok(message) = w.outcome_rx.recv() {
            report_outcome(&message);
        }
        gate.complete();
    }

    println!("✓ Simulated {ticks} ticks for {pumps} pumps");
    Ok(())
}

fn report_outcome(message: &WorkerMessage) {
    match message {
        WorkerMessage::Resolved { command } => {
            println!(
                "✓ {} accepted setpoint {:.0} rpm",
                command.pump, command.target_rpm
            );
        }
        WorkerMessage::Failed { command, error } => {
            println!(
                "✗ {} refused setpoint {:.0} rpm: {error}",
                command.pump, command.target_rpm
            );
        }
    }
}
