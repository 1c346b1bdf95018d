//! Hardware capability layer for pin-level I/O.
//!
//! Everything that touches pins goes through [`Hardware`], so the echo
//! ranging and stepper pulse code is written once and runs unchanged on
//! both backends:
//!
//! - [`MockHardware`]: in-memory pins with a virtual clock, scriptable echo
//!   responses and a write log
//! - `RpiHardware`: Raspberry Pi GPIO via `rppal` (feature `raspberry-pi`)

use crate::error::Result;
use std::time::Duration;

mod mock;
#[cfg(feature = "raspberry-pi")]
mod rpi;

pub use mock::{MockHardware, PinWrite};
#[cfg(feature = "raspberry-pi")]
pub use rpi::RpiHardware;

/// Pin-level capability interface
pub trait Hardware: Send {
    /// Drive an output pin high (`true`) or low
    fn set_output(&mut self, pin: u8, high: bool) -> Result<()>;

    /// Sample an input pin
    fn read_input(&mut self, pin: u8) -> Result<bool>;

    /// Block for the given duration
    fn sleep_for(&mut self, duration: Duration);

    /// Monotonic time since the backend was created
    fn now(&self) -> Duration;
}
