//! devcat — device catalog.
//!
//! Provides:
//! - `collector` — host facts (OS, processor, MAC/IP, ports, time) and bandwidth
//! - `storage` — the device record and the MAC-deduplicated CSV catalog
//! - `error` — top-level error joining collector and catalog failures
//! - `fmt` — shared formatting helpers (speeds, sizes, MAC addresses)

pub mod collector;
pub mod error;
pub mod fmt;
pub mod storage;

use tracing::info;

use crate::collector::Collector;
use crate::collector::traits::FileSystem;
use crate::storage::{Catalog, CatalogError, DeviceRecord};

pub use crate::error::Error;

/// Collects this device and appends it to `catalog`.
///
/// Duplicates are checked before the bandwidth probe runs and again on the
/// write handle inside [`Catalog::append`].
pub fn catalog_device<F: FileSystem + Clone>(
    collector: &Collector<F>,
    catalog: &Catalog,
) -> Result<DeviceRecord, Error> {
    let host = collector.collect_host()?;

    if catalog.contains_mac(&host.mac_address)? {
        return Err(CatalogError::Duplicate {
            mac: host.mac_address,
        }
        .into());
    }

    let bandwidth = collector.measure_bandwidth()?;
    let record = DeviceRecord::new(host, bandwidth);
    catalog.append(&record)?;

    info!("Data successfully written to {}", catalog.path().display());
    Ok(record)
}
