//! Actuation boundary.
//!
//! Requests are fire-and-forget: an [`Actuator`] performs (or simulates)
//! the motion and reports nothing back to the control core. Position is
//! tracked by the core from the requests it issued.

use crate::core::MotionRequest;

mod stepper;

pub use stepper::StepperDrive;

/// Executes motion requests, blocking until the motion completes
pub trait Actuator {
    /// Perform one request
    fn execute(&mut self, request: MotionRequest);
}

impl<A: Actuator + ?Sized> Actuator for Box<A> {
    fn execute(&mut self, request: MotionRequest) {
        (**self).execute(request)
    }
}

impl<A: Actuator + ?Sized> Actuator for &mut A {
    fn execute(&mut self, request: MotionRequest) {
        (**self).execute(request)
    }
}

/// Records requests without moving anything
#[derive(Debug, Default)]
pub struct RecordingActuator {
    requests: Vec<MotionRequest>,
}

impl RecordingActuator {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far
    pub fn requests(&self) -> &[MotionRequest] {
        &self.requests
    }
}

impl Actuator for RecordingActuator {
    fn execute(&mut self, request: MotionRequest) {
        log::trace!("Recorded {:?}", request);
        self.requests.push(request);
    }
}
