//! Top-level error for one catalog run.

use crate::collector::CollectError;
use crate::storage::CatalogError;

/// Anything that can stop a run.
#[derive(Debug)]
pub enum Error {
    Collect(CollectError),
    Catalog(CatalogError),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// 2 unsupported OS, 3 duplicate MAC, 4 permission denied, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Collect(CollectError::UnsupportedOperatingSystem(_)) => 2,
            Error::Catalog(CatalogError::Duplicate { .. }) => 3,
            Error::Catalog(CatalogError::PermissionDenied { .. }) => 4,
            _ => 1,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Collect(e) => write!(f, "data collection failed: {}", e),
            Error::Catalog(e) => write!(f, "writing to catalog failed: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Collect(e) => Some(e),
            Error::Catalog(e) => Some(e),
        }
    }
}

impl From<CollectError> for Error {
    fn from(e: CollectError) -> Self {
        Error::Collect(e)
    }
}

impl From<CatalogError> for Error {
    fn from(e: CatalogError) -> Self {
        Error::Catalog(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        let unsupported: Error = CollectError::UnsupportedOperatingSystem("macos".into()).into();
        let duplicate: Error = CatalogError::Duplicate {
            mac: "34:5a:60:22:18:b2".into(),
        }
        .into();
        let denied: Error = CatalogError::PermissionDenied {
            path: PathBuf::from("/root/devices.csv"),
        }
        .into();
        let missing: Error = CollectError::missing("processor", "lscpu not found").into();

        assert_eq!(unsupported.exit_code(), 2);
        assert_eq!(duplicate.exit_code(), 3);
        assert_eq!(denied.exit_code(), 4);
        assert_eq!(missing.exit_code(), 1);
    }

    #[test]
    fn test_display_names_cause() {
        let duplicate: Error = CatalogError::Duplicate {
            mac: "34:5a:60:22:18:b2".into(),
        }
        .into();
        let text = duplicate.to_string();
        assert!(text.contains("already been catalogued"));
        assert!(text.contains("34:5a:60:22:18:b2"));
    }
}
