//! Ultrasonic echo ranging over the [`Hardware`] pin interface.
//!
//! Each reading follows the HC-SR04 sequence:
//!
//! ```text
//! trigger  ──┐ 2µs ┌──10µs──┐
//!            └─────┘        └────────────────────────────
//! echo     ─────────────────────┐          ┌─────────────
//!                               └──pulse───┘
//!                    ├──────── timeout ────────┤
//! ```
//!
//! `distance_cm = pulse_µs × 0.0343 / 2`. One deadline covers both edge
//! waits; reaching it before the echo falls ends the reading with no echo.

use super::DistanceSensor;
use crate::config::{EchoPins, SensorsConfig};
use crate::core::SensorDirection;
use crate::error::Result;
use crate::hardware::Hardware;
use std::time::Duration;

const SETTLE: Duration = Duration::from_micros(2);
const TRIGGER_PULSE: Duration = Duration::from_micros(10);

/// Speed of sound in centimetres per microsecond
const SOUND_CM_PER_US: f32 = 0.0343;

/// Four trigger/echo rangers sharing one hardware backend
pub struct EchoSensorArray<H: Hardware> {
    hardware: H,
    front: EchoPins,
    back: EchoPins,
    left: EchoPins,
    right: EchoPins,
    poll_interval: Duration,
}

impl<H: Hardware> EchoSensorArray<H> {
    /// Create from the `[sensors]` pin assignment
    pub fn new(hardware: H, config: &SensorsConfig) -> Self {
        Self {
            hardware,
            front: config.front,
            back: config.back,
            left: config.left,
            right: config.right,
            poll_interval: config.poll_interval(),
        }
    }

    fn pins(&self, sensor: SensorDirection) -> EchoPins {
        match sensor {
            SensorDirection::Front => self.front,
            SensorDirection::Back => self.back,
            SensorDirection::Left => self.left,
            SensorDirection::Right => self.right,
        }
    }

    /// Poll `pin` until it reads `level`; `false` once `deadline` passes
    fn wait_until(&mut self, pin: u8, level: bool, deadline: Duration) -> Result<bool> {
        while self.hardware.read_input(pin)? != level {
            let now = self.hardware.now();
            if now >= deadline {
                return Ok(false);
            }
            self.hardware.sleep_for(self.poll_interval.min(deadline - now));
        }
        Ok(true)
    }

    /// Access the hardware backend
    pub fn hardware(&self) -> &H {
        &self.hardware
    }
}

impl<H: Hardware> DistanceSensor for EchoSensorArray<H> {
    fn read_distance(
        &mut self,
        sensor: SensorDirection,
        timeout: Duration,
    ) -> Result<Option<f32>> {
        let pins = self.pins(sensor);

        self.hardware.set_output(pins.trigger, false)?;
        self.hardware.sleep_for(SETTLE);
        self.hardware.set_output(pins.trigger, true)?;
        self.hardware.sleep_for(TRIGGER_PULSE);
        self.hardware.set_output(pins.trigger, false)?;
        let deadline = self.hardware.now() + timeout;

        if !self.wait_until(pins.echo, true, deadline)? {
            return Ok(None);
        }
        let rise = self.hardware.now();

        if !self.wait_until(pins.echo, false, deadline)? {
            return Ok(None);
        }
        let pulse_us = (self.hardware.now() - rise).as_secs_f32() * 1e6;

        Ok(Some(pulse_us * SOUND_CM_PER_US / 2.0))
    }
}
