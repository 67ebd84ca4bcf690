//! Data model for one catalogued device.
//!
//! A [`DeviceRecord`] is built once per run from [`HostFacts`] and a
//! [`Bandwidth`] measurement, written as one catalog row, then dropped.

use serde::{Serialize, Serializer};

use crate::fmt::format_ports;

/// Everything about the host except its bandwidth.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct HostFacts {
    /// Host name.
    /// Source: `/proc/sys/kernel/hostname` (Linux), `gethostname` otherwise.
    pub computer_name: String,

    /// Operating system name: `Linux` or `Windows`.
    pub os: String,

    /// Processor model string.
    /// Source: `/proc/cpuinfo` or `lscpu` (Linux), `Win32_Processor` (Windows).
    pub processor: String,

    /// Hardware address of the primary interface, `aa:bb:cc:dd:ee:ff`.
    pub mac_address: String,

    /// Address this host is reachable on.
    pub ip_address: String,

    /// Local wall-clock time of collection (`HH:MM:SS`).
    pub timestamp: String,

    /// TCP ports in LISTEN state, sorted and deduplicated.
    pub active_ports: Vec<u16>,
}

/// Measured throughput in megabits per second.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Bandwidth {
    pub download_mbps: f64,
    pub upload_mbps: f64,
}

/// One row of the device catalog.
///
/// Field order is the column order of the catalog header:
/// `ComputerName,OS,Processor,MAC,IP,Time,Ports,DownloadSpeed,UploadSpeed`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeviceRecord {
    #[serde(rename = "ComputerName")]
    pub computer_name: String,

    #[serde(rename = "OS")]
    pub os: String,

    #[serde(rename = "Processor")]
    pub processor: String,

    /// Unique within a catalog file.
    #[serde(rename = "MAC")]
    pub mac_address: String,

    #[serde(rename = "IP")]
    pub ip_address: String,

    #[serde(rename = "Time")]
    pub timestamp: String,

    /// Written as one `", "`-joined field.
    #[serde(rename = "Ports", serialize_with = "serialize_ports")]
    pub active_ports: Vec<u16>,

    /// Megabits per second, written with two decimals.
    #[serde(rename = "DownloadSpeed", serialize_with = "serialize_speed")]
    pub download_speed: f64,

    /// Megabits per second, written with two decimals.
    #[serde(rename = "UploadSpeed", serialize_with = "serialize_speed")]
    pub upload_speed: f64,
}

/// Column holding the deduplication key.
pub const MAC_COLUMN: &str = "MAC";

/// Catalog header, in column order.
pub const HEADER: [&str; 9] = [
    "ComputerName",
    "OS",
    "Processor",
    MAC_COLUMN,
    "IP",
    "Time",
    "Ports",
    "DownloadSpeed",
    "UploadSpeed",
];

impl DeviceRecord {
    pub fn new(host: HostFacts, bandwidth: Bandwidth) -> Self {
        Self {
            computer_name: host.computer_name,
            os: host.os,
            processor: host.processor,
            mac_address: host.mac_address,
            ip_address: host.ip_address,
            timestamp: host.timestamp,
            active_ports: host.active_ports,
            download_speed: bandwidth.download_mbps,
            upload_speed: bandwidth.upload_mbps,
        }
    }
}

fn serialize_ports<S: Serializer>(ports: &[u16], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_ports(ports))
}

fn serialize_speed<S: Serializer>(mbps: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.2}", mbps))
}
