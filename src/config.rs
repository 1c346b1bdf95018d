//! Configuration for Parikrama
//!
//! Loads configuration from a TOML file. Every field has a default, so a
//! partial file (or no file at all) yields a runnable setup for the
//! reference robot: two DRV8825-driven steppers on a Raspberry Pi and four
//! HC-SR04 style ultrasonic sensors looking down at the panel.
//!
//! ```toml
//! [grid]
//! width = 30
//! height = 12
//!
//! [sensors]
//! cliff_threshold_cm = 8.0
//! timeout_ms = 30
//!
//! [motion]
//! cell_size_mm = 100.0
//! ```

use crate::core::{Direction, RobotPose, SensorDirection};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub robot: RobotConfig,
    #[serde(default)]
    pub sensors: SensorsConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub controller: ControllerConfig,
    #[serde(default)]
    pub teleop: TeleopConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Coverage grid dimensions (cells)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GridConfig {
    #[serde(default = "default_grid_width")]
    pub width: usize,
    #[serde(default = "default_grid_height")]
    pub height: usize,
}

/// Starting pose of the robot
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RobotConfig {
    #[serde(default)]
    pub start_x: i32,
    #[serde(default)]
    pub start_y: i32,
    #[serde(default)]
    pub start_direction: Direction,
}

/// Trigger/echo pin pair for one ultrasonic sensor (BCM numbering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct EchoPins {
    pub trigger: u8,
    pub echo: u8,
}

/// Downward distance sensors
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SensorsConfig {
    /// Readings farther than this are a drop-off (centimetres)
    #[serde(default = "default_cliff_threshold_cm")]
    pub cliff_threshold_cm: f32,

    /// Maximum wait for each echo edge (milliseconds)
    ///
    /// A sensor that stays silent this long is reported as a cliff.
    #[serde(default = "default_sensor_timeout_ms")]
    pub timeout_ms: u64,

    /// Echo pin polling interval (microseconds)
    #[serde(default = "default_poll_interval_us")]
    pub poll_interval_us: u64,

    #[serde(default = "default_front_pins")]
    pub front: EchoPins,
    #[serde(default = "default_back_pins")]
    pub back: EchoPins,
    #[serde(default = "default_left_pins")]
    pub left: EchoPins,
    #[serde(default = "default_right_pins")]
    pub right: EchoPins,
}

/// Stepper drive train
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MotionConfig {
    #[serde(default = "default_left_step_pin")]
    pub left_step_pin: u8,
    #[serde(default = "default_left_dir_pin")]
    pub left_dir_pin: u8,
    #[serde(default = "default_right_step_pin")]
    pub right_step_pin: u8,
    #[serde(default = "default_right_dir_pin")]
    pub right_dir_pin: u8,

    /// Full steps per motor revolution
    #[serde(default = "default_steps_per_rev")]
    pub steps_per_rev: f32,

    /// Driver microstepping factor (DRV8825: 16)
    #[serde(default = "default_microstepping")]
    pub microstepping: f32,

    #[serde(default = "default_wheel_diameter_mm")]
    pub wheel_diameter_mm: f32,

    /// Distance between left and right wheels
    #[serde(default = "default_wheel_base_mm")]
    pub wheel_base_mm: f32,

    /// Edge length of one grid cell on the surface
    #[serde(default = "default_cell_size_mm")]
    pub cell_size_mm: f32,

    /// Delay between step pulse edges (microseconds)
    #[serde(default = "default_step_delay_us")]
    pub step_delay_us: u64,
}

/// Control loop pacing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControllerConfig {
    /// Pause between ticks (milliseconds)
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Render a frame every N ticks (0 = never)
    #[serde(default = "default_render_every")]
    pub render_every: u64,

    /// Stop after this many ticks (0 = unlimited)
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
}

/// UDP teleoperation receiver
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeleopConfig {
    #[serde(default = "default_teleop_bind_address")]
    pub bind_address: String,

    /// Commands with magnitude at or below this are ignored
    #[serde(default = "default_deadband")]
    pub deadband: f32,

    /// Millimetres of travel per unit of forward command
    #[serde(default = "default_forward_scale_mm")]
    pub forward_scale_mm: f32,

    /// Degrees of rotation per unit of turn command
    #[serde(default = "default_turn_scale_deg")]
    pub turn_scale_deg: f32,

    /// Socket read timeout, bounds the shutdown latency (milliseconds)
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

/// Simulated surface used by the `sim` backend
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Surface width in cells (0 = same as grid)
    #[serde(default)]
    pub surface_width: usize,

    /// Surface height in cells (0 = same as grid)
    #[serde(default)]
    pub surface_height: usize,

    /// Sensor-to-panel distance while on the surface (centimetres)
    #[serde(default = "default_floor_distance_cm")]
    pub floor_distance_cm: f32,

    /// Sensor-to-ground distance past the edge (centimetres, 0 = no echo)
    #[serde(default = "default_drop_distance_cm")]
    pub drop_distance_cm: f32,

    /// Range noise standard deviation (centimetres)
    #[serde(default = "default_range_stddev_cm")]
    pub range_stddev_cm: f32,

    /// Probability of a reading timing out (0.0-1.0)
    #[serde(default)]
    pub miss_rate: f32,

    /// Noise seed (0 = random each run)
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_grid_width() -> usize {
    30
}
fn default_grid_height() -> usize {
    12
}
fn default_cliff_threshold_cm() -> f32 {
    8.0
}
fn default_sensor_timeout_ms() -> u64 {
    30
}
fn default_poll_interval_us() -> u64 {
    10
}
fn default_front_pins() -> EchoPins {
    EchoPins {
        trigger: 5,
        echo: 6,
    }
}
fn default_back_pins() -> EchoPins {
    EchoPins {
        trigger: 12,
        echo: 13,
    }
}
fn default_left_pins() -> EchoPins {
    EchoPins {
        trigger: 16,
        echo: 26,
    }
}
fn default_right_pins() -> EchoPins {
    EchoPins {
        trigger: 24,
        echo: 25,
    }
}
fn default_left_step_pin() -> u8 {
    17
}
fn default_left_dir_pin() -> u8 {
    27
}
fn default_right_step_pin() -> u8 {
    22
}
fn default_right_dir_pin() -> u8 {
    23
}
fn default_steps_per_rev() -> f32 {
    200.0
}
fn default_microstepping() -> f32 {
    16.0
}
fn default_wheel_diameter_mm() -> f32 {
    65.0
}
fn default_wheel_base_mm() -> f32 {
    150.0
}
fn default_cell_size_mm() -> f32 {
    100.0
}
fn default_step_delay_us() -> u64 {
    500
}
fn default_tick_interval_ms() -> u64 {
    120
}
fn default_render_every() -> u64 {
    1
}
fn default_max_ticks() -> u64 {
    0
}
fn default_teleop_bind_address() -> String {
    "0.0.0.0:5005".to_string()
}
fn default_deadband() -> f32 {
    0.01
}
fn default_forward_scale_mm() -> f32 {
    5.0
}
fn default_turn_scale_deg() -> f32 {
    3.0
}
fn default_read_timeout_ms() -> u64 {
    200
}
fn default_floor_distance_cm() -> f32 {
    2.5
}
fn default_drop_distance_cm() -> f32 {
    45.0
}
fn default_range_stddev_cm() -> f32 {
    0.2
}
fn default_random_seed() -> u64 {
    42
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_grid_width(),
            height: default_grid_height(),
        }
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            start_x: 0,
            start_y: 0,
            start_direction: Direction::Up,
        }
    }
}

impl Default for SensorsConfig {
    fn default() -> Self {
        Self {
            cliff_threshold_cm: default_cliff_threshold_cm(),
            timeout_ms: default_sensor_timeout_ms(),
            poll_interval_us: default_poll_interval_us(),
            front: default_front_pins(),
            back: default_back_pins(),
            left: default_left_pins(),
            right: default_right_pins(),
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            left_step_pin: default_left_step_pin(),
            left_dir_pin: default_left_dir_pin(),
            right_step_pin: default_right_step_pin(),
            right_dir_pin: default_right_dir_pin(),
            steps_per_rev: default_steps_per_rev(),
            microstepping: default_microstepping(),
            wheel_diameter_mm: default_wheel_diameter_mm(),
            wheel_base_mm: default_wheel_base_mm(),
            cell_size_mm: default_cell_size_mm(),
            step_delay_us: default_step_delay_us(),
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            render_every: default_render_every(),
            max_ticks: default_max_ticks(),
        }
    }
}

impl Default for TeleopConfig {
    fn default() -> Self {
        Self {
            bind_address: default_teleop_bind_address(),
            deadband: default_deadband(),
            forward_scale_mm: default_forward_scale_mm(),
            turn_scale_deg: default_turn_scale_deg(),
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            surface_width: 0,
            surface_height: 0,
            floor_distance_cm: default_floor_distance_cm(),
            drop_distance_cm: default_drop_distance_cm(),
            range_stddev_cm: default_range_stddev_cm(),
            miss_rate: 0.0,
            random_seed: default_random_seed(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl SensorsConfig {
    /// Pins for one mounted sensor
    pub fn pins(&self, sensor: SensorDirection) -> EchoPins {
        match sensor {
            SensorDirection::Front => self.front,
            SensorDirection::Back => self.back,
            SensorDirection::Left => self.left,
            SensorDirection::Right => self.right,
        }
    }

    /// Per-edge echo timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Echo polling interval
    pub fn poll_interval(&self) -> Duration {
        Duration::from_micros(self.poll_interval_us)
    }
}

impl MotionConfig {
    /// Microsteps per millimetre of wheel travel
    pub fn steps_per_mm(&self) -> f32 {
        let wheel_circumference = std::f32::consts::PI * self.wheel_diameter_mm;
        (self.steps_per_rev * self.microstepping) / wheel_circumference
    }

    /// Microsteps per degree of in-place rotation
    pub fn steps_per_degree(&self) -> f32 {
        let turn_circumference = std::f32::consts::PI * self.wheel_base_mm;
        self.steps_per_mm() * (turn_circumference / 360.0)
    }
}

impl ControllerConfig {
    /// Pause between ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Finite and above zero
fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl AppConfig {
    /// Load configuration from TOML file
    ///
    /// # Example
    /// ```no_run
    /// use parikrama::config::AppConfig;
    ///
    /// let config = AppConfig::load("parikrama.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Reject values the drive or sensors cannot work with
    ///
    /// NaN and infinite lengths are rejected along with non-positive ones.
    pub fn validate(&self) -> Result<()> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(Error::InvalidParameter(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid.width, self.grid.height
            )));
        }
        if !positive(self.sensors.cliff_threshold_cm) {
            return Err(Error::InvalidParameter(
                "sensors.cliff_threshold_cm must be positive".to_string(),
            ));
        }
        if self.sensors.timeout_ms == 0 {
            return Err(Error::InvalidParameter(
                "sensors.timeout_ms must be positive".to_string(),
            ));
        }
        if !positive(self.motion.wheel_diameter_mm) || !positive(self.motion.wheel_base_mm) {
            return Err(Error::InvalidParameter(
                "wheel diameter and wheel base must be positive".to_string(),
            ));
        }
        if !positive(self.motion.cell_size_mm) {
            return Err(Error::InvalidParameter(
                "motion.cell_size_mm must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.simulation.miss_rate) {
            return Err(Error::InvalidParameter(
                "simulation.miss_rate must be within 0.0-1.0".to_string(),
            ));
        }
        Ok(())
    }

    /// Starting pose from the `[robot]` section
    pub fn start_pose(&self) -> RobotPose {
        RobotPose::new(
            self.robot.start_x,
            self.robot.start_y,
            self.robot.start_direction,
        )
    }

    /// Simulated surface size, falling back to the grid size
    pub fn surface_size(&self) -> (usize, usize) {
        let width = match self.simulation.surface_width {
            0 => self.grid.width,
            w => w,
        };
        let height = match self.simulation.surface_height {
            0 => self.grid.height,
            h => h,
        };
        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.grid.width, 30);
        assert_eq!(config.grid.height, 12);
        assert_eq!(config.motion.left_step_pin, 17);
        assert_eq!(config.motion.right_dir_pin, 23);
        assert_eq!(config.teleop.bind_address, "0.0.0.0:5005");
        assert_eq!(config.controller.tick_interval_ms, 120);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_stepper_calibration() {
        let motion = MotionConfig::default();
        // 3200 microsteps over a 65mm wheel
        assert_relative_eq!(motion.steps_per_mm(), 15.670, epsilon = 1e-3);
        // 150mm wheel base: 1.309mm of travel per degree
        assert_relative_eq!(motion.steps_per_degree(), 20.513, epsilon = 1e-3);
    }

    #[test]
    fn test_toml_serialization() {
        let config = AppConfig::default();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        assert!(toml_string.contains("[grid]"));
        assert!(toml_string.contains("[sensors.front]"));
        assert!(toml_string.contains("[motion]"));
        assert!(toml_string.contains("[teleop]"));
        assert!(toml_string.contains("start_direction = \"up\""));
    }

    #[test]
    fn test_partial_toml() {
        let toml_content = r#"
[grid]
width = 6
height = 4

[robot]
start_x = 2
start_y = 1
start_direction = "right"

[sensors]
cliff_threshold_cm = 12.5

[sensors.front]
trigger = 4
echo = 14
"#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.grid.width, 6);
        assert_eq!(config.start_pose(), RobotPose::new(2, 1, Direction::Right));
        assert_eq!(config.sensors.cliff_threshold_cm, 12.5);
        assert_eq!(config.sensors.pins(SensorDirection::Front).echo, 14);
        assert_eq!(config.sensors.pins(SensorDirection::Back).trigger, 12);
        assert_eq!(config.sensors.timeout(), Duration::from_millis(30));
        assert_eq!(config.surface_size(), (6, 4));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.grid.width = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.sensors.cliff_threshold_cm = 0.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.simulation.miss_rate = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan_and_infinite_lengths() {
        let mut config = AppConfig::default();
        config.sensors.cliff_threshold_cm = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.motion.cell_size_mm = f32::INFINITY;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.motion.wheel_diameter_mm = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.motion.wheel_base_mm = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.simulation.miss_rate = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_threshold_in_toml_rejected() {
        let config: AppConfig = toml::from_str("[sensors]\ncliff_threshold_cm = nan\n").unwrap();
        assert!(config.sensors.cliff_threshold_cm.is_nan());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_round_trip_through_file() {
        let mut config = AppConfig::default();
        config.grid.width = 9;
        config.simulation.miss_rate = 0.25;

        let path = std::env::temp_dir().join(format!("parikrama-{}.toml", std::process::id()));
        config.to_file(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.grid.width, 9);
        assert_eq!(loaded.simulation.miss_rate, 0.25);
    }
}
