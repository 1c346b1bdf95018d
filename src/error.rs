//! Error types for Parikrama
//!
//! The control core never fails: sensor timeouts, out-of-range marks and
//! malformed teleoperation text all degrade to safe defaults. Errors only
//! surface at the edges (configuration, GPIO setup, sockets).

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Parikrama error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Configuration serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// GPIO backend failure
    #[error("GPIO error: {0}")]
    Gpio(String),

    /// Requested backend is not compiled in
    #[error("Backend not available: {0}")]
    BackendUnavailable(&'static str),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "raspberry-pi")]
impl From<rppal::gpio::Error> for Error {
    fn from(e: rppal::gpio::Error) -> Self {
        Error::Gpio(e.to_string())
    }
}
