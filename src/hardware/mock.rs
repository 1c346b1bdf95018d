//! Mock hardware for hardware-free runs and tests
//!
//! Time is virtual: it only advances through [`Hardware::sleep_for`], so
//! pulse trains and echo timing are fully deterministic.

use super::Hardware;
use crate::error::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Delay between the trigger falling edge and the echo rising edge
const ECHO_LATENCY: Duration = Duration::from_micros(20);

/// Speed of sound round trip: microseconds of echo per centimetre of range
const ECHO_US_PER_CM: f32 = 2.0 / 0.0343;

/// One recorded output write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinWrite {
    /// Virtual time of the write
    pub at: Duration,
    /// BCM pin number
    pub pin: u8,
    /// Level written
    pub high: bool,
}

/// Scripted ultrasonic response bound to a trigger pin
struct EchoScript {
    echo_pin: u8,
    /// Trigger falling edge to echo rising edge
    latency: Duration,
    /// Echo pulse width, `None` for a sensor that never answers
    pulse: Option<Duration>,
    /// Active echo window `[start, end)` after the last trigger
    window: Option<(Duration, Duration)>,
}

struct MockHardwareInner {
    clock: Duration,
    outputs: HashMap<u8, bool>,
    inputs: HashMap<u8, bool>,
    echoes: HashMap<u8, EchoScript>,
    writes: Vec<PinWrite>,
}

/// Mock pin backend
///
/// Clones share state, so a test can keep a handle while the sensor array
/// or drive owns another.
#[derive(Clone)]
pub struct MockHardware {
    inner: Arc<Mutex<MockHardwareInner>>,
}

impl MockHardware {
    /// Create a mock backend with every pin low
    pub fn new() -> Self {
        MockHardware {
            inner: Arc::new(Mutex::new(MockHardwareInner {
                clock: Duration::ZERO,
                outputs: HashMap::new(),
                inputs: HashMap::new(),
                echoes: HashMap::new(),
                writes: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockHardwareInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Set the level seen on a plain input pin
    pub fn set_input(&self, pin: u8, high: bool) {
        self.lock().inputs.insert(pin, high);
    }

    /// Answer triggers on `trigger` with an echo pulse on `echo`
    ///
    /// `pulse = None` models a sensor that never sees its echo.
    pub fn attach_echo(&self, trigger: u8, echo: u8, pulse: Option<Duration>) {
        self.attach_echo_after(trigger, echo, ECHO_LATENCY, pulse);
    }

    /// Like [`attach_echo`](Self::attach_echo), with the echo rising
    /// `latency` after the trigger
    pub fn attach_echo_after(
        &self,
        trigger: u8,
        echo: u8,
        latency: Duration,
        pulse: Option<Duration>,
    ) {
        self.lock().echoes.insert(
            trigger,
            EchoScript {
                echo_pin: echo,
                latency,
                pulse,
                window: None,
            },
        );
    }

    /// Answer triggers with the echo an object `distance_cm` away would give
    pub fn attach_echo_distance(&self, trigger: u8, echo: u8, distance_cm: Option<f32>) {
        let pulse = distance_cm.map(|d| Duration::from_secs_f32(d * ECHO_US_PER_CM / 1e6));
        self.attach_echo(trigger, echo, pulse);
    }

    /// All output writes so far
    pub fn writes(&self) -> Vec<PinWrite> {
        self.lock().writes.clone()
    }

    /// Number of rising edges written to a pin
    pub fn rising_edges(&self, pin: u8) -> usize {
        self.lock()
            .writes
            .iter()
            .filter(|w| w.pin == pin && w.high)
            .count()
    }

    /// Clear the write log
    pub fn clear_writes(&self) {
        self.lock().writes.clear();
    }

    /// Last level written to an output pin
    pub fn output(&self, pin: u8) -> Option<bool> {
        self.lock().outputs.get(&pin).copied()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl Hardware for MockHardware {
    fn set_output(&mut self, pin: u8, high: bool) -> Result<()> {
        let mut inner = self.lock();
        let clock = inner.clock;
        let was_high = inner.outputs.insert(pin, high).unwrap_or(false);
        inner.writes.push(PinWrite {
            at: clock,
            pin,
            high,
        });

        // Falling edge on a trigger pin fires the ranging burst
        if was_high
            && !high
            && let Some(script) = inner.echoes.get_mut(&pin)
        {
            let start = clock + script.latency;
            script.window = script.pulse.map(|pulse| (start, start + pulse));
        }
        Ok(())
    }

    fn read_input(&mut self, pin: u8) -> Result<bool> {
        let inner = self.lock();
        let clock = inner.clock;
        if let Some(script) = inner.echoes.values().find(|s| s.echo_pin == pin) {
            let high = script
                .window
                .is_some_and(|(start, end)| clock >= start && clock < end);
            return Ok(high);
        }
        Ok(inner.inputs.get(&pin).copied().unwrap_or(false))
    }

    fn sleep_for(&mut self, duration: Duration) {
        self.lock().clock += duration;
    }

    fn now(&self) -> Duration {
        self.lock().clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_clock() {
        let mut hw = MockHardware::new();
        assert_eq!(hw.now(), Duration::ZERO);
        hw.sleep_for(Duration::from_micros(500));
        hw.sleep_for(Duration::from_micros(500));
        assert_eq!(hw.now(), Duration::from_millis(1));
    }

    #[test]
    fn test_write_log_shared_between_clones() {
        let hw = MockHardware::new();
        let mut handle = hw.clone();
        handle.set_output(17, true).unwrap();
        handle.set_output(17, false).unwrap();

        assert_eq!(hw.writes().len(), 2);
        assert_eq!(hw.rising_edges(17), 1);
        assert_eq!(hw.output(17), Some(false));

        hw.clear_writes();
        assert!(hw.writes().is_empty());
    }

    #[test]
    fn test_static_inputs() {
        let mut hw = MockHardware::new();
        assert!(!hw.read_input(4).unwrap());
        hw.set_input(4, true);
        assert!(hw.read_input(4).unwrap());
    }

    #[test]
    fn test_echo_window_follows_trigger() {
        let mut hw = MockHardware::new();
        hw.attach_echo(5, 6, Some(Duration::from_micros(100)));

        // No echo before triggering
        assert!(!hw.read_input(6).unwrap());

        hw.set_output(5, true).unwrap();
        hw.sleep_for(Duration::from_micros(10));
        hw.set_output(5, false).unwrap();

        assert!(!hw.read_input(6).unwrap());
        hw.sleep_for(ECHO_LATENCY);
        assert!(hw.read_input(6).unwrap());
        hw.sleep_for(Duration::from_micros(99));
        assert!(hw.read_input(6).unwrap());
        hw.sleep_for(Duration::from_micros(1));
        assert!(!hw.read_input(6).unwrap());
    }

    #[test]
    fn test_silent_echo() {
        let mut hw = MockHardware::new();
        hw.attach_echo(5, 6, None);
        hw.set_output(5, true).unwrap();
        hw.set_output(5, false).unwrap();
        for _ in 0..100 {
            hw.sleep_for(Duration::from_micros(50));
            assert!(!hw.read_input(6).unwrap());
        }
    }
}
