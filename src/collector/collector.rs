//! Main collector that combines the platform collectors.
//!
//! The `Collector` struct provides a unified interface for gathering the
//! facts of one [`DeviceRecord`].

use std::sync::Arc;

use chrono::Local;
use tracing::{debug, info};

use crate::collector::error::CollectError;
use crate::collector::platform::OsKind;
use crate::collector::procfs::LinuxCollector;
use crate::collector::speed::{NoSpeedProbe, SpeedProbe};
use crate::collector::traits::{
    AddressResolver, CommandRunner, FileSystem, SocketResolver, SystemCommands,
};
use crate::collector::windows::WindowsCollector;
use crate::fmt::{format_ports, format_speed};
use crate::storage::model::{Bandwidth, DeviceRecord, HostFacts};

/// Format of the `Time` column.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Gathers everything needed for a device record.
///
/// The OS name is checked before anything is read, so an unsupported host
/// fails without touching the filesystem, helper commands or the network.
pub struct Collector<F: FileSystem + Clone> {
    fs: F,
    os_name: String,
    proc_path: String,
    sys_path: String,
    commands: Arc<dyn CommandRunner>,
    resolver: Box<dyn AddressResolver>,
    speed_probe: Box<dyn SpeedProbe>,
}

impl<F: FileSystem + Clone> Collector<F> {
    /// Creates a new collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `os_name` - OS to collect for, usually `std::env::consts::OS`
    ///
    /// Bandwidth reads as zero until a probe is attached with
    /// [`with_speed_probe`](Self::with_speed_probe).
    pub fn new(fs: F, os_name: impl Into<String>) -> Self {
        Self {
            fs,
            os_name: os_name.into(),
            proc_path: "/proc".to_string(),
            sys_path: "/sys".to_string(),
            commands: Arc::new(SystemCommands),
            resolver: Box::new(SocketResolver::new()),
            speed_probe: Box::new(NoSpeedProbe),
        }
    }

    /// Sets the path to the proc filesystem (Linux).
    pub fn with_proc_path(mut self, path: impl Into<String>) -> Self {
        self.proc_path = path.into();
        self
    }

    /// Sets the path to sysfs (Linux).
    pub fn with_sys_path(mut self, path: impl Into<String>) -> Self {
        self.sys_path = path.into();
        self
    }

    pub fn with_commands(mut self, commands: impl CommandRunner + 'static) -> Self {
        self.commands = Arc::new(commands);
        self
    }

    pub fn with_resolver(mut self, resolver: impl AddressResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn with_speed_probe(mut self, probe: impl SpeedProbe + 'static) -> Self {
        self.speed_probe = Box::new(probe);
        self
    }

    /// Collects every field except bandwidth.
    pub fn collect_host(&self) -> Result<HostFacts, CollectError> {
        info!("Device data collection starting");

        let os = OsKind::from_name(&self.os_name)?;
        info!("Operating system: {}", os);

        let host = match os {
            OsKind::Linux => {
                let linux = LinuxCollector::new(
                    self.fs.clone(),
                    &self.proc_path,
                    &self.sys_path,
                    Arc::clone(&self.commands),
                );
                self.assemble(
                    os,
                    || linux.collect_hostname(),
                    || linux.collect_processor(),
                    || linux.collect_mac_address(),
                    || linux.collect_listening_ports(),
                )?
            }
            OsKind::Windows => {
                let windows = WindowsCollector::new(Arc::clone(&self.commands));
                self.assemble(
                    os,
                    || windows.collect_hostname(),
                    || windows.collect_processor(),
                    || windows.collect_mac_address(),
                    || windows.collect_listening_ports(),
                )?
            }
        };

        info!(
            computer_name = %host.computer_name,
            mac = %host.mac_address,
            ip = %host.ip_address,
            "Collected host facts"
        );
        Ok(host)
    }

    /// Runs the speed probe.
    pub fn measure_bandwidth(&self) -> Result<Bandwidth, CollectError> {
        info!("Getting internet download and upload speed...");
        let bandwidth = Bandwidth {
            download_mbps: self.speed_probe.download_mbps()?,
            upload_mbps: self.speed_probe.upload_mbps()?,
        };
        info!(
            "download: {}, upload: {}",
            format_speed(bandwidth.download_mbps),
            format_speed(bandwidth.upload_mbps)
        );
        Ok(bandwidth)
    }

    /// Collects a complete device record.
    pub fn collect(&self) -> Result<DeviceRecord, CollectError> {
        let host = self.collect_host()?;
        let bandwidth = self.measure_bandwidth()?;
        info!("Data collection successful");
        Ok(DeviceRecord::new(host, bandwidth))
    }

    fn assemble(
        &self,
        os: OsKind,
        hostname: impl FnOnce() -> Result<String, CollectError>,
        processor: impl FnOnce() -> Result<String, CollectError>,
        mac_address: impl FnOnce() -> Result<String, CollectError>,
        ports: impl FnOnce() -> Result<Vec<u16>, CollectError>,
    ) -> Result<HostFacts, CollectError> {
        info!("Getting processor model...");
        let processor = processor()?;
        debug!(%processor);

        info!("Getting mac address...");
        let mac_address = mac_address()?;

        info!("Getting computer name...");
        let computer_name = hostname()?;

        info!("Getting ip address...");
        let ip_address = self
            .resolver
            .primary_ip(&computer_name)
            .map_err(|e| CollectError::missing("ip_address", e))?
            .to_string();

        info!("Getting system time...");
        let timestamp = Local::now().format(TIME_FORMAT).to_string();

        info!("Getting all active ports...");
        let active_ports = ports()?;
        debug!(ports = %format_ports(&active_ports));

        Ok(HostFacts {
            computer_name,
            os: os.name().to_string(),
            processor,
            mac_address,
            ip_address,
            timestamp,
            active_ports,
        })
    }
}
