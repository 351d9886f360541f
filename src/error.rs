//! Error types for TarangIO

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// TarangIO error types
///
/// Startup errors (mapping, socket, destination, configuration) are fatal:
/// the process reports them and exits non-zero. `ShortSend` and I/O errors
/// raised during streaming are transient and never stop the acquisition loop.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Physical memory mapping failed
    #[error("Physical memory mapping failed: {0}")]
    Map(String),

    /// Register offset outside the mapped window
    #[error("Register offset {offset} out of range (window holds {span} words)")]
    OutOfRange {
        /// Requested word offset
        offset: usize,
        /// Window size in words
        span: usize,
    },

    /// Destination address could not be resolved
    #[error("Invalid destination: {0}")]
    BadDestination(String),

    /// Datagram was not fully accepted by the transport
    #[error("Short send: wrote {written} of {expected} bytes")]
    ShortSend {
        /// Bytes accepted by the transport
        written: usize,
        /// Frame length
        expected: usize,
    },

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration file parse error
    #[error("Configuration error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
