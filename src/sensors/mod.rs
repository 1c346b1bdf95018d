//! Downward distance sensing and cliff fusion.
//!
//! ## Sensor Layout
//!
//! ```text
//!            Front
//!        ┌───────────┐
//!        │     F     │
//!        │ L   ●   R │   four ultrasonic rangers looking down
//!        │     B     │   at the panel, one per side
//!        └───────────┘
//!            Back
//! ```
//!
//! A sensor that sees the panel returns a short range. Past the edge the
//! ground is far away (long range) or out of reach entirely (no echo).
//! Both count as a cliff: a missing reading is never taken as safe.

use crate::config::SensorsConfig;
use crate::core::{CliffReport, SensorDirection};
use crate::error::Result;
use std::time::Duration;

mod echo;

pub use echo::EchoSensorArray;

/// Range source for the four mounted sensors
pub trait DistanceSensor {
    /// Distance in centimetres, or `None` if no echo arrived within `timeout`
    ///
    /// Blocks for at most `timeout` after the trigger, whether or not the
    /// echo has started.
    fn read_distance(&mut self, sensor: SensorDirection, timeout: Duration)
    -> Result<Option<f32>>;
}

impl<S: DistanceSensor + ?Sized> DistanceSensor for Box<S> {
    fn read_distance(
        &mut self,
        sensor: SensorDirection,
        timeout: Duration,
    ) -> Result<Option<f32>> {
        (**self).read_distance(sensor, timeout)
    }
}

/// Interpret one reading: anything but a finite range within the
/// threshold is a cliff
#[inline]
pub fn is_cliff(reading: Option<f32>, threshold_cm: f32) -> bool {
    match reading {
        Some(distance) => distance.is_nan() || distance > threshold_cm,
        None => true,
    }
}

/// Four sensors fused into a [`CliffReport`]
pub struct DistanceSensorArray<S> {
    sensor: S,
    threshold_cm: f32,
    timeout: Duration,
}

impl<S: DistanceSensor> DistanceSensorArray<S> {
    /// Wrap a range source with an explicit threshold and timeout
    pub fn new(sensor: S, threshold_cm: f32, timeout: Duration) -> Self {
        Self {
            sensor,
            threshold_cm,
            timeout,
        }
    }

    /// Wrap a range source using the `[sensors]` configuration
    pub fn from_config(sensor: S, config: &SensorsConfig) -> Self {
        Self::new(sensor, config.cliff_threshold_cm, config.timeout())
    }

    /// Drop-off threshold in centimetres
    pub fn threshold_cm(&self) -> f32 {
        self.threshold_cm
    }

    /// Read one sensor and fuse it
    ///
    /// Timeouts and read errors both report a cliff.
    pub fn read_cliff(&mut self, direction: SensorDirection) -> bool {
        match self.sensor.read_distance(direction, self.timeout) {
            Ok(Some(distance)) => {
                log::trace!("{} sensor: {:.1}cm", direction, distance);
                is_cliff(Some(distance), self.threshold_cm)
            }
            Ok(None) => {
                log::debug!("{} sensor: no echo, assuming cliff", direction);
                true
            }
            Err(e) => {
                log::warn!("{} sensor read failed, assuming cliff: {}", direction, e);
                true
            }
        }
    }

    /// Sample all four sensors
    pub fn read_cliff_report(&mut self) -> CliffReport {
        let mut report = CliffReport::CLEAR;
        for direction in SensorDirection::ALL {
            report.set(direction, self.read_cliff(direction));
        }
        report
    }

    /// Access the underlying range source
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Mutable access to the underlying range source
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;

    /// Fixed readings per direction
    struct FixedRanges(HashMap<SensorDirection, Result<Option<f32>>>);

    impl DistanceSensor for FixedRanges {
        fn read_distance(
            &mut self,
            sensor: SensorDirection,
            _timeout: Duration,
        ) -> Result<Option<f32>> {
            match self.0.get(&sensor) {
                Some(Ok(reading)) => Ok(*reading),
                Some(Err(_)) => Err(Error::Gpio("echo pin unreadable".to_string())),
                None => Ok(Some(2.0)),
            }
        }
    }

    fn array(readings: Vec<(SensorDirection, Result<Option<f32>>)>) -> DistanceSensorArray<FixedRanges> {
        DistanceSensorArray::new(
            FixedRanges(readings.into_iter().collect()),
            8.0,
            Duration::from_millis(30),
        )
    }

    #[test]
    fn test_is_cliff_threshold() {
        assert!(!is_cliff(Some(2.0), 8.0));
        assert!(!is_cliff(Some(8.0), 8.0));
        assert!(is_cliff(Some(8.1), 8.0));
        assert!(is_cliff(None, 8.0));
        assert!(is_cliff(Some(f32::NAN), 8.0));
    }

    #[test]
    fn test_all_clear() {
        let mut sensors = array(vec![]);
        assert_eq!(sensors.read_cliff_report(), CliffReport::CLEAR);
    }

    #[test]
    fn test_directions_fused_independently() {
        let mut sensors = array(vec![
            (SensorDirection::Front, Ok(Some(40.0))),
            (SensorDirection::Left, Ok(None)),
        ]);
        let report = sensors.read_cliff_report();
        assert!(report.front);
        assert!(!report.back);
        assert!(report.left);
        assert!(!report.right);
    }

    #[test]
    fn test_read_error_is_cliff() {
        let mut sensors = array(vec![(
            SensorDirection::Back,
            Err(Error::Other(String::new())),
        )]);
        let report = sensors.read_cliff_report();
        assert!(report.back);
        assert!(!report.front);
    }
}
