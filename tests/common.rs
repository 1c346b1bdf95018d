//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use parikrama::config::{SensorsConfig, SimulationConfig};
use parikrama::core::{GridCoord, RobotPose, SensorDirection};
use parikrama::hardware::MockHardware;
use parikrama::sim::SimulatedSurface;

/// Sensor-to-panel distance on the surface
pub const FLOOR_CM: f32 = 2.5;

/// Sensor-to-ground distance past the edge
pub const DROP_CM: f32 = 45.0;

/// Simulation settings with the given noise
pub fn sim_config(range_stddev_cm: f32, miss_rate: f32, seed: u64) -> SimulationConfig {
    SimulationConfig {
        floor_distance_cm: FLOOR_CM,
        drop_distance_cm: DROP_CM,
        range_stddev_cm,
        miss_rate,
        random_seed: seed,
        ..SimulationConfig::default()
    }
}

/// Noisy surface with 100mm cells
pub fn noisy_surface(
    width: usize,
    height: usize,
    start: RobotPose,
    range_stddev_cm: f32,
    miss_rate: f32,
) -> SimulatedSurface {
    SimulatedSurface::new(
        width,
        height,
        start,
        &sim_config(range_stddev_cm, miss_rate, 7),
        100.0,
    )
}

/// Check if a cell lies on the outer ring of a `width × height` grid
pub fn on_ring(coord: GridCoord, width: usize, height: usize) -> bool {
    coord.x == 0 || coord.y == 0 || coord.x == width as i32 - 1 || coord.y == height as i32 - 1
}

/// Script one echo per sensor on a mock board (`None` = silent)
pub fn echo_board(readings: [(SensorDirection, Option<f32>); 4]) -> MockHardware {
    let hw = MockHardware::new();
    let config = SensorsConfig::default();
    for (sensor, distance_cm) in readings {
        let pins = config.pins(sensor);
        hw.attach_echo_distance(pins.trigger, pins.echo, distance_cm);
    }
    hw
}
