use thiserror::Error;

/// Error taxonomy for the detection service adapters
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (permanent failures)
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    // Network errors (connect failures, DNS, timeouts)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Non-2xx response from the detection service
    #[error("Detection service error: {code} from {endpoint}")]
    Status { code: u16, endpoint: String },

    // Response body that is not valid JSON
    #[error("Decode error from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    // Client errors (local input validation)
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    // MCP protocol errors
    #[error("MCP protocol error: {0}")]
    Mcp(String),

    // General service error
    #[error("Service error: {0}")]
    Service(String),
}

/// Classification of remote-call failures.
///
/// Every failed call to the detection service collapses to the same
/// flattened fallback payload at the adapter boundary; the kind is kept
/// on the error itself so logs and tests can distinguish a refused
/// connection from a bad status or an unparsable body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Connection, DNS, or timeout failure before a response arrived
    Network,
    /// The service answered with a non-success HTTP status
    Status,
    /// The service answered, but the body was not valid JSON
    Decode,
    /// Everything else (config, input, protocol plumbing)
    Other,
}

impl Error {
    /// Classify this error for logging and tests
    pub fn transport_kind(&self) -> TransportKind {
        match self {
            Error::Http(_) => TransportKind::Network,
            Error::Status { .. } => TransportKind::Status,
            Error::Decode { .. } | Error::Serde(_) => TransportKind::Decode,
            _ => TransportKind::Other,
        }
    }

    /// Whether this error came out of a remote call rather than local setup
    pub fn is_remote_failure(&self) -> bool {
        !matches!(self.transport_kind(), TransportKind::Other)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
