use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Network error: {0}")]
    Network(#[from] std::io::Error),

    #[error("Timeout occurred during {operation}")]
    Timeout { operation: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("RTSP protocol error: {0}")]
    Protocol(String),

    #[error("bad status code: {code} ({reason})")]
    Status { code: u16, reason: String },

    #[error("decode error: {0}")]
    Decode(String),

    #[error("Reporting error: {0}")]
    Reporting(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ScanError {
    /// RTSP status carried by the error, if the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ScanError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }

    /// Errors that must abort the run before any scanning starts.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, ScanError::InvalidInput(_))
    }
}
