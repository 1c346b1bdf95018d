//! UDP teleoperation receiver.
//!
//! # Wire Protocol
//!
//! One text datagram per command:
//!
//! ```text
//! F <forward> T <turn>        e.g. "F 0.50 T -0.25"
//! ```
//!
//! Both values are fractions in `[-1, 1]` (stick deflection). Fields that
//! fail to parse are zero, so malformed text commands no motion. Values at
//! or below the deadband are dropped; the rest are scaled into a straight
//! move (millimetres) followed by an in-place rotation (degrees).

use crate::actuation::Actuator;
use crate::config::TeleopConfig;
use crate::core::MotionRequest;
use crate::error::Result;
use std::net::{SocketAddr, UdpSocket};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Largest datagram accepted
const MAX_DATAGRAM_SIZE: usize = 256;

/// One decoded stick command
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TeleopCommand {
    /// Forward speed fraction, negative reverses
    pub forward: f32,
    /// Turn rate fraction, positive is clockwise
    pub turn: f32,
}

/// Split a leading float off `text`, skipping leading whitespace
fn leading_float(text: &str) -> Option<(f32, &str)> {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(text.len());

    // Longest prefix that parses, so "1.5e" reads as 1.5
    (1..=end).rev().find_map(|len| {
        text[..len]
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| (v, &text[len..]))
    })
}

impl TeleopCommand {
    pub fn new(forward: f32, turn: f32) -> Self {
        Self { forward, turn }
    }

    /// Decode `F <f> T <f>`; parsing stops at the first mismatch and
    /// missing fields stay zero
    pub fn parse(text: &str) -> Self {
        let mut command = Self::default();

        let Some(rest) = text.trim_start().strip_prefix('F') else {
            return command;
        };
        let Some((forward, rest)) = leading_float(rest) else {
            return command;
        };
        command.forward = forward;

        let Some(rest) = rest.trim_start().strip_prefix('T') else {
            return command;
        };
        if let Some((turn, _)) = leading_float(rest) {
            command.turn = turn;
        }
        command
    }

    /// Wire text, two decimals per field
    pub fn encode(&self) -> String {
        format!("F {:.2} T {:.2}", self.forward, self.turn)
    }

    /// Motion for this command after the deadband
    pub fn to_requests(&self, config: &TeleopConfig) -> Vec<MotionRequest> {
        let mut requests = Vec::with_capacity(2);
        if self.forward.abs() > config.deadband {
            requests.push(MotionRequest::Straight {
                millimeters: self.forward * config.forward_scale_mm,
            });
        }
        if self.turn.abs() > config.deadband {
            requests.push(MotionRequest::Rotate {
                degrees: self.turn * config.turn_scale_deg,
            });
        }
        requests
    }
}

/// Blocking receiver applying commands to an [`Actuator`]
pub struct TeleopReceiver {
    socket: UdpSocket,
    config: TeleopConfig,
    running: Arc<AtomicBool>,
}

impl TeleopReceiver {
    /// Bind the configured address
    ///
    /// The socket read timeout bounds how long a clear of `running` takes
    /// to be noticed.
    pub fn bind(config: &TeleopConfig, running: Arc<AtomicBool>) -> Result<Self> {
        let socket = UdpSocket::bind(&config.bind_address)?;
        socket.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms.max(1))))?;

        log::info!("Teleop receiver bound to {}", socket.local_addr()?);

        Ok(Self {
            socket,
            config: config.clone(),
            running,
        })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Wait for one datagram; `None` if the read timed out
    pub fn recv_once(&self) -> Result<Option<TeleopCommand>> {
        let mut buffer = [0u8; MAX_DATAGRAM_SIZE];
        match self.socket.recv_from(&mut buffer) {
            Ok((len, src)) => {
                let text = String::from_utf8_lossy(&buffer[..len]);
                let command = TeleopCommand::parse(&text);
                log::trace!("{} from {}: {:?}", text.trim_end(), src, command);
                Ok(Some(command))
            }
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                ) =>
            {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Apply commands until `running` is cleared. Returns datagrams handled.
    pub fn run<A: Actuator>(&self, actuator: &mut A) -> u64 {
        log::info!("Teleop receiver started");
        let mut handled = 0;

        while self.running.load(Ordering::Relaxed) {
            let command = match self.recv_once() {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    log::error!("Teleop recv error: {}", e);
                    continue;
                }
            };
            handled += 1;

            for request in command.to_requests(&self.config) {
                actuator.execute(request);
            }
        }

        log::info!("Teleop receiver stopped after {} commands", handled);
        handled
    }
}
