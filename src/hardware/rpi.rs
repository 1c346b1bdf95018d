//! Raspberry Pi GPIO backend (BCM pin numbering)

use super::Hardware;
use crate::error::{Error, Result};
use rppal::gpio::{Gpio, InputPin, Level, OutputPin};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Below this, `sleep_for` spins instead of yielding to the scheduler
const SPIN_THRESHOLD: Duration = Duration::from_micros(100);

/// GPIO backend owning a fixed set of claimed pins
pub struct RpiHardware {
    outputs: HashMap<u8, OutputPin>,
    inputs: HashMap<u8, InputPin>,
    started: Instant,
}

impl RpiHardware {
    /// Claim the given pins; outputs start low
    pub fn new(output_pins: &[u8], input_pins: &[u8]) -> Result<Self> {
        let gpio = Gpio::new()?;

        let mut outputs = HashMap::new();
        for &pin in output_pins {
            let mut output = gpio.get(pin)?.into_output();
            output.set_low();
            outputs.insert(pin, output);
        }

        let mut inputs = HashMap::new();
        for &pin in input_pins {
            inputs.insert(pin, gpio.get(pin)?.into_input());
        }

        log::debug!(
            "GPIO claimed: outputs {:?}, inputs {:?}",
            output_pins,
            input_pins
        );

        Ok(Self {
            outputs,
            inputs,
            started: Instant::now(),
        })
    }
}

impl Hardware for RpiHardware {
    fn set_output(&mut self, pin: u8, high: bool) -> Result<()> {
        let output = self
            .outputs
            .get_mut(&pin)
            .ok_or_else(|| Error::Gpio(format!("pin {} is not claimed as output", pin)))?;
        output.write(if high { Level::High } else { Level::Low });
        Ok(())
    }

    fn read_input(&mut self, pin: u8) -> Result<bool> {
        let input = self
            .inputs
            .get(&pin)
            .ok_or_else(|| Error::Gpio(format!("pin {} is not claimed as input", pin)))?;
        Ok(input.is_high())
    }

    fn sleep_for(&mut self, duration: Duration) {
        if duration < SPIN_THRESHOLD {
            let until = Instant::now() + duration;
            while Instant::now() < until {
                std::hint::spin_loop();
            }
        } else {
            std::thread::sleep(duration);
        }
    }

    fn now(&self) -> Duration {
        self.started.elapsed()
    }
}
