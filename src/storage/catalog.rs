//! CSV device catalog keyed on MAC address.
//!
//! The catalog is an append-only CSV file. A header row is written when the
//! file is created (or found empty); every later run appends one row unless
//! the MAC address is already present.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::storage::model::{DeviceRecord, HEADER, MAC_COLUMN};

/// Error type for catalog reads and writes.
#[derive(Debug)]
pub enum CatalogError {
    /// The MAC address is already catalogued.
    Duplicate { mac: String },
    /// The catalog path cannot be read or written by this user.
    PermissionDenied { path: PathBuf },
    /// A non-empty catalog whose header has no `MAC` column.
    MissingMacColumn { path: PathBuf },
    /// A catalog header with the `MAC` column but a different column layout.
    HeaderMismatch { path: PathBuf },
    /// Any other I/O failure.
    Io { path: PathBuf, source: io::Error },
    /// Malformed CSV content.
    Csv(csv::Error),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Duplicate { mac } => {
                write!(f, "this machine has already been catalogued (MAC {})", mac)
            }
            CatalogError::PermissionDenied { path } => write!(
                f,
                "you do not have the permission to read or write this file: {}",
                path.display()
            ),
            CatalogError::MissingMacColumn { path } => write!(
                f,
                "{} is not a device catalog: header has no {} column",
                path.display(),
                MAC_COLUMN
            ),
            CatalogError::HeaderMismatch { path } => write!(
                f,
                "{} has a different column layout, expected {}",
                path.display(),
                HEADER.join(",")
            ),
            CatalogError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            CatalogError::Csv(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io { source, .. } => Some(source),
            CatalogError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

/// Maps an I/O error on `path`, singling out permission failures.
fn classify_io(path: &Path, e: io::Error) -> CatalogError {
    if e.kind() == io::ErrorKind::PermissionDenied {
        CatalogError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        CatalogError::Io {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

fn classify_csv(path: &Path, e: csv::Error) -> CatalogError {
    if let csv::ErrorKind::Io(source) = e.kind() {
        if source.kind() == io::ErrorKind::PermissionDenied {
            return CatalogError::PermissionDenied {
                path: path.to_path_buf(),
            };
        }
    }
    CatalogError::Csv(e)
}

/// Device catalog stored at a single CSV path.
#[derive(Debug, Clone)]
pub struct Catalog {
    path: PathBuf,
}

impl Catalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if a row with this MAC address exists.
    ///
    /// A missing or empty file contains nothing. Comparison ignores ASCII case.
    pub fn contains_mac(&self, mac: &str) -> Result<bool, CatalogError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(classify_io(&self.path, e)),
        };
        Ok(self.scan_for_mac(&file, mac)?.unwrap_or(false))
    }

    /// Appends `record`, writing the header first if the file is new or holds
    /// no header (empty or blank lines only).
    ///
    /// Fails with [`CatalogError::Duplicate`] if the MAC address is already
    /// present; the file is left untouched in that case.
    pub fn append(&self, record: &DeviceRecord) -> Result<(), CatalogError> {
        debug!("Preparing to write to {}", self.path.display());

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| classify_io(&self.path, e))?;

        let len = file
            .metadata()
            .map_err(|e| classify_io(&self.path, e))?
            .len();

        let mut write_header = true;
        if len > 0 {
            match self.scan_for_mac(&file, &record.mac_address)? {
                Some(true) => {
                    return Err(CatalogError::Duplicate {
                        mac: record.mac_address.clone(),
                    });
                }
                Some(false) => write_header = false,
                None => {}
            }
            self.terminate_last_line(&mut file)
                .map_err(|e| classify_io(&self.path, e))?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(&file);
        writer
            .serialize(record)
            .map_err(|e| classify_csv(&self.path, e))?;
        writer.flush().map_err(|e| classify_io(&self.path, e))?;

        debug!(
            mac = %record.mac_address,
            header = write_header,
            "Appended catalog row"
        );
        Ok(())
    }

    /// Scans the catalog read from `reader` for `mac`.
    ///
    /// Returns `None` when the catalog has no header row yet. A header must
    /// match [`HEADER`] exactly, since rows are always written in that order.
    fn scan_for_mac<R: Read>(&self, reader: R, mac: &str) -> Result<Option<bool>, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| classify_csv(&self.path, e))?
            .clone();
        if headers.is_empty() {
            return Ok(None);
        }

        let column = headers
            .iter()
            .position(|h| h.trim() == MAC_COLUMN)
            .ok_or_else(|| CatalogError::MissingMacColumn {
                path: self.path.clone(),
            })?;
        if !headers.iter().map(str::trim).eq(HEADER) {
            return Err(CatalogError::HeaderMismatch {
                path: self.path.clone(),
            });
        }

        let mac = mac.trim();
        for row in csv_reader.records() {
            let row = row.map_err(|e| classify_csv(&self.path, e))?;
            if row
                .get(column)
                .is_some_and(|existing| existing.trim().eq_ignore_ascii_case(mac))
            {
                return Ok(Some(true));
            }
        }
        Ok(Some(false))
    }

    /// Writes a newline if the file does not already end with one.
    fn terminate_last_line(&self, file: &mut File) -> io::Result<()> {
        file.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            file.write_all(b"\n")?;
        }
        Ok(())
    }
}
