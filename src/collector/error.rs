//! Error type for host collection.

use crate::collector::procfs::parser::ParseError;

/// Error type for collection failures.
#[derive(Debug)]
pub enum CollectError {
    /// The host runs neither Linux nor Windows.
    UnsupportedOperatingSystem(String),
    /// A field of the device record could not be determined.
    MissingData { field: &'static str, reason: String },
    /// The bandwidth probe failed.
    SpeedTest(String),
    /// I/O error reading host files.
    Io(std::io::Error),
    /// Parse error in host files or command output.
    Parse(String),
}

impl CollectError {
    pub fn missing(field: &'static str, reason: impl std::fmt::Display) -> Self {
        CollectError::MissingData {
            field,
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::UnsupportedOperatingSystem(os) => write!(
                f,
                "unsupported operating system '{}': only Linux and Windows are supported",
                os
            ),
            CollectError::MissingData { field, reason } => {
                write!(f, "could not determine {}: {}", field, reason)
            }
            CollectError::SpeedTest(msg) => write!(f, "speed test failed: {}", msg),
            CollectError::Io(e) => write!(f, "I/O error: {}", e),
            CollectError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for CollectError {}

impl From<std::io::Error> for CollectError {
    fn from(e: std::io::Error) -> Self {
        CollectError::Io(e)
    }
}

impl From<ParseError> for CollectError {
    fn from(e: ParseError) -> Self {
        CollectError::Parse(e.message)
    }
}
