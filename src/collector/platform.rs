//! Operating system detection.

use crate::collector::error::CollectError;

/// Operating systems the collector knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsKind {
    Linux,
    Windows,
}

impl OsKind {
    /// Maps an OS name (`std::env::consts::OS` style) to a supported kind.
    ///
    /// Matching ignores case and surrounding whitespace.
    pub fn from_name(name: &str) -> Result<Self, CollectError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "linux" => Ok(OsKind::Linux),
            "windows" => Ok(OsKind::Windows),
            _ => Err(CollectError::UnsupportedOperatingSystem(
                name.trim().to_string(),
            )),
        }
    }

    /// Name written to the catalog.
    pub fn name(&self) -> &'static str {
        match self {
            OsKind::Linux => "Linux",
            OsKind::Windows => "Windows",
        }
    }
}

impl std::fmt::Display for OsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Host name as reported by the OS (`gethostname`/`GetComputerNameExW`).
pub fn local_hostname() -> Result<String, CollectError> {
    let name = hostname::get().map_err(|e| CollectError::missing("computer_name", e))?;
    let name = name.to_string_lossy().trim().to_string();
    if name.is_empty() {
        return Err(CollectError::missing("computer_name", "empty host name"));
    }
    Ok(name)
}
