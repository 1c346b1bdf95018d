//! Differential stepper drive (two DRV8825 step/dir channels).
//!
//! Straight travel drives both wheels the same way; a tank turn drives them
//! in opposite directions about the centre of the wheel base. Positive
//! turns are clockwise (left wheel forward, right wheel backward).

use super::Actuator;
use crate::config::MotionConfig;
use crate::core::MotionRequest;
use crate::error::Result;
use crate::hardware::Hardware;
use std::time::Duration;

/// Degrees in one grid quarter turn
const QUARTER_TURN_DEG: f32 = 90.0;

/// Step/dir drive over the [`Hardware`] pin interface
pub struct StepperDrive<H: Hardware> {
    hardware: H,
    left_step_pin: u8,
    left_dir_pin: u8,
    right_step_pin: u8,
    right_dir_pin: u8,
    steps_per_mm: f32,
    steps_per_degree: f32,
    cell_size_mm: f32,
    step_delay: Duration,
}

impl<H: Hardware> StepperDrive<H> {
    /// Create from the `[motion]` configuration
    pub fn new(hardware: H, config: &MotionConfig) -> Self {
        Self {
            hardware,
            left_step_pin: config.left_step_pin,
            left_dir_pin: config.left_dir_pin,
            right_step_pin: config.right_step_pin,
            right_dir_pin: config.right_dir_pin,
            steps_per_mm: config.steps_per_mm(),
            steps_per_degree: config.steps_per_degree(),
            cell_size_mm: config.cell_size_mm,
            step_delay: Duration::from_micros(config.step_delay_us),
        }
    }

    /// Output pins the drive needs claimed
    pub fn output_pins(config: &MotionConfig) -> [u8; 4] {
        [
            config.left_step_pin,
            config.left_dir_pin,
            config.right_step_pin,
            config.right_dir_pin,
        ]
    }

    /// Drive straight; negative distances reverse. Returns steps issued.
    pub fn move_straight(&mut self, millimeters: f32) -> Result<u32> {
        let steps = (millimeters * self.steps_per_mm).abs() as u32;
        let forward = millimeters > 0.0;
        self.hardware.set_output(self.left_dir_pin, forward)?;
        self.hardware.set_output(self.right_dir_pin, forward)?;
        self.pulse(steps)?;
        Ok(steps)
    }

    /// Rotate in place; positive is clockwise. Returns steps issued.
    pub fn tank_turn(&mut self, degrees: f32) -> Result<u32> {
        let steps = (degrees * self.steps_per_degree).abs() as u32;
        let clockwise = degrees > 0.0;
        self.hardware.set_output(self.left_dir_pin, clockwise)?;
        self.hardware.set_output(self.right_dir_pin, !clockwise)?;
        self.pulse(steps)?;
        Ok(steps)
    }

    fn pulse(&mut self, steps: u32) -> Result<()> {
        for _ in 0..steps {
            self.hardware.set_output(self.left_step_pin, true)?;
            self.hardware.set_output(self.right_step_pin, true)?;
            self.hardware.sleep_for(self.step_delay);
            self.hardware.set_output(self.left_step_pin, false)?;
            self.hardware.set_output(self.right_step_pin, false)?;
            self.hardware.sleep_for(self.step_delay);
        }
        Ok(())
    }

    fn perform(&mut self, request: MotionRequest) -> Result<u32> {
        match request {
            MotionRequest::MoveForward { cells } => {
                self.move_straight(cells as f32 * self.cell_size_mm)
            }
            MotionRequest::TurnRight => self.tank_turn(QUARTER_TURN_DEG),
            MotionRequest::TurnLeft => self.tank_turn(-QUARTER_TURN_DEG),
            MotionRequest::Straight { millimeters } => self.move_straight(millimeters),
            MotionRequest::Rotate { degrees } => self.tank_turn(degrees),
        }
    }
}

impl<H: Hardware> Actuator for StepperDrive<H> {
    fn execute(&mut self, request: MotionRequest) {
        match self.perform(request) {
            Ok(steps) => log::debug!("{}: {} steps", request.request_type(), steps),
            Err(e) => log::error!("{} failed: {}", request.request_type(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::MockHardware;

    fn rig() -> (MockHardware, StepperDrive<MockHardware>) {
        let hw = MockHardware::new();
        let drive = StepperDrive::new(hw.clone(), &MotionConfig::default());
        (hw, drive)
    }

    #[test]
    fn test_move_one_cell() {
        let (hw, mut drive) = rig();
        drive.execute(MotionRequest::MoveForward { cells: 1 });

        // 100mm at 15.67 steps/mm
        assert_eq!(hw.rising_edges(17), 1567);
        assert_eq!(hw.rising_edges(22), 1567);
        assert_eq!(hw.output(27), Some(true));
        assert_eq!(hw.output(23), Some(true));
        assert_eq!(hw.output(17), Some(false));

        // Every step holds high and low for the step delay
        assert_eq!(hw.now(), Duration::from_micros(1567 * 2 * 500));
    }

    #[test]
    fn test_backward_sets_direction_low() {
        let (hw, mut drive) = rig();
        let steps = drive.move_straight(-10.0).unwrap();
        assert_eq!(steps, 156);
        assert_eq!(hw.output(27), Some(false));
        assert_eq!(hw.output(23), Some(false));
    }

    #[test]
    fn test_quarter_turns_drive_wheels_opposite() {
        let (hw, mut drive) = rig();

        drive.execute(MotionRequest::TurnRight);
        assert_eq!(hw.output(27), Some(true));
        assert_eq!(hw.output(23), Some(false));
        assert_eq!(hw.rising_edges(17), 1846);

        hw.clear_writes();
        drive.execute(MotionRequest::TurnLeft);
        assert_eq!(hw.output(27), Some(false));
        assert_eq!(hw.output(23), Some(true));
        assert_eq!(hw.rising_edges(22), 1846);
    }

    #[test]
    fn test_zero_motion_emits_no_steps() {
        let (hw, mut drive) = rig();
        drive.execute(MotionRequest::Straight { millimeters: 0.0 });
        drive.execute(MotionRequest::Rotate { degrees: 0.0 });
        assert_eq!(hw.rising_edges(17), 0);
        assert_eq!(hw.now(), Duration::ZERO);
    }
}
