//! Parikrama - panel coverage robot controller
//!
//! ## Modes
//!
//! - **coverage**: perimeter trace then inward spiral, no sensors needed
//! - **reactive**: cliff-sensor driven edge avoidance
//! - **teleop**: apply `F <f> T <f>` UDP commands (port 5005 by default)
//!
//! ## Backends
//!
//! - **sim**: simulated surface, identical control code, no hardware
//! - **rpi**: Raspberry Pi GPIO (build with `--features raspberry-pi`)

use clap::{Parser, Subcommand, ValueEnum};
use parikrama::actuation::Actuator;
use parikrama::config::AppConfig;
use parikrama::control::{Controller, CoverageBehavior, ReactiveBehavior, RunSummary};
use parikrama::error::{Error, Result};
use parikrama::sensors::{DistanceSensor, DistanceSensorArray};
use parikrama::sim::SimulatedSurface;
use parikrama::teleop::TeleopReceiver;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Parser)]
#[command(name = "parikrama")]
#[command(about = "Perimeter, spiral and cliff-avoiding control for a panel robot")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults apply if it does not exist)
    #[arg(short = 'c', long = "config", default_value = "parikrama.toml")]
    config: PathBuf,

    /// Sensor and drive backend
    #[arg(short = 'b', long = "backend", value_enum, default_value_t = Backend::Sim)]
    backend: Backend,

    /// Stop after this many ticks (overrides the config, 0 = unlimited)
    #[arg(short = 'n', long = "max-ticks", value_name = "TICKS")]
    max_ticks: Option<u64>,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Simulated surface
    Sim,
    /// Raspberry Pi GPIO
    Rpi,
}

#[derive(Clone, Copy, Debug, Subcommand)]
enum Mode {
    /// Trace the perimeter, then spiral inward
    Coverage,
    /// Avoid edges using the cliff sensors
    Reactive,
    /// Drive from UDP teleoperation commands
    Teleop,
}

fn load_config(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        AppConfig::load(path)
    } else {
        Ok(AppConfig::default())
    }
}

/// Run `mode` against one sensor source and one actuator
fn run_mode<S, A>(
    mode: Mode,
    config: &AppConfig,
    sensor: S,
    mut actuator: A,
    running: Arc<AtomicBool>,
) -> Result<Option<RunSummary>>
where
    S: DistanceSensor,
    A: Actuator,
{
    match mode {
        Mode::Coverage => {
            let mut behavior = CoverageBehavior::new(config.grid.width, config.grid.height);
            let mut controller = Controller::from_config(config, actuator)
                .with_running_flag(running)
                .with_frame_sink(Box::new(std::io::stdout()));
            Ok(Some(controller.run(&mut behavior)))
        }
        Mode::Reactive => {
            let sensors = DistanceSensorArray::from_config(sensor, &config.sensors);
            let mut behavior = ReactiveBehavior::new(sensors);
            let mut controller = Controller::from_config(config, actuator)
                .with_running_flag(running)
                .with_frame_sink(Box::new(std::io::stdout()));
            Ok(Some(controller.run(&mut behavior)))
        }
        Mode::Teleop => {
            let receiver = TeleopReceiver::bind(&config.teleop, running)?;
            receiver.run(&mut actuator);
            Ok(None)
        }
    }
}

fn run_sim(mode: Mode, config: &AppConfig, running: Arc<AtomicBool>) -> Result<Option<RunSummary>> {
    let (width, height) = config.surface_size();
    let surface = SimulatedSurface::new(
        width,
        height,
        config.start_pose(),
        &config.simulation,
        config.motion.cell_size_mm,
    );
    log::info!(
        "Simulated {}x{} surface, {} cm drop past the edge",
        width,
        height,
        config.simulation.drop_distance_cm
    );

    let summary = run_mode(mode, config, surface.clone(), surface.clone(), running)?;

    let pose = surface.pose();
    log::info!(
        "Simulated robot finished at ({}, {}) facing {} after {} requests",
        pose.x,
        pose.y,
        pose.direction,
        surface.executed().len()
    );
    Ok(summary)
}

#[cfg(feature = "raspberry-pi")]
fn run_rpi(mode: Mode, config: &AppConfig, running: Arc<AtomicBool>) -> Result<Option<RunSummary>> {
    use parikrama::actuation::StepperDrive;
    use parikrama::core::SensorDirection;
    use parikrama::hardware::RpiHardware;
    use parikrama::sensors::EchoSensorArray;

    let triggers: Vec<u8> = SensorDirection::ALL
        .iter()
        .map(|&d| config.sensors.pins(d).trigger)
        .collect();
    let echoes: Vec<u8> = SensorDirection::ALL
        .iter()
        .map(|&d| config.sensors.pins(d).echo)
        .collect();

    let sensor_hw = RpiHardware::new(&triggers, &echoes)?;
    let drive_hw = RpiHardware::new(&StepperDrive::<RpiHardware>::output_pins(&config.motion), &[])?;

    let sensors = EchoSensorArray::new(sensor_hw, &config.sensors);
    let drive = StepperDrive::new(drive_hw, &config.motion);

    run_mode(mode, config, sensors, drive, running)
}

#[cfg(not(feature = "raspberry-pi"))]
fn run_rpi(_mode: Mode, _config: &AppConfig, _running: Arc<AtomicBool>) -> Result<Option<RunSummary>> {
    Err(Error::BackendUnavailable(
        "rpi backend requires building with --features raspberry-pi",
    ))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if let Some(max_ticks) = cli.max_ticks {
        config.controller.max_ticks = max_ticks;
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    log::info!("Parikrama v{} starting...", env!("CARGO_PKG_VERSION"));
    if cli.config.exists() {
        log::info!("Using config: {}", cli.config.display());
    } else {
        log::warn!("{} not found, using defaults", cli.config.display());
    }
    log::info!(
        "Grid {}x{}, start ({}, {}) facing {}",
        config.grid.width,
        config.grid.height,
        config.robot.start_x,
        config.robot.start_y,
        config.robot.start_direction
    );

    // Set up shutdown signal handler
    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    let summary = match cli.backend {
        Backend::Sim => run_sim(cli.mode, &config, running)?,
        Backend::Rpi => run_rpi(cli.mode, &config, running)?,
    };

    if let Some(summary) = summary {
        log::info!(
            "Done: {} ticks, {} requests, {} edge cells, {} path cells ({:?})",
            summary.ticks,
            summary.requests,
            summary.edge_cells,
            summary.path_cells,
            summary.outcome
        );
    }
    Ok(())
}
