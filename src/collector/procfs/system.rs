//! Linux host collector reading `/proc` and `/sys`.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::collector::error::CollectError;
use crate::collector::platform::local_hostname;
use crate::collector::procfs::parser::{
    parse_cpu_model, parse_default_route, parse_listening_ports, parse_lscpu_model,
};
use crate::collector::traits::{CommandRunner, FileSystem};
use crate::fmt::{is_null_mac, normalize_mac};

/// Interface name prefixes considered when there is no default route.
const INTERFACE_PREFIXES: [&str; 4] = ["eth", "en", "wlan", "wl"];

/// Collects host identity from `/proc/` and `/sys/`.
pub struct LinuxCollector<F: FileSystem> {
    fs: F,
    proc_path: String,
    sys_path: String,
    commands: Arc<dyn CommandRunner>,
}

impl<F: FileSystem> LinuxCollector<F> {
    /// Creates a new Linux collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    /// * `sys_path` - Base path to sysfs (usually "/sys")
    /// * `commands` - Runner for `lscpu` when `/proc/cpuinfo` has no model
    pub fn new(
        fs: F,
        proc_path: impl Into<String>,
        sys_path: impl Into<String>,
        commands: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
            sys_path: sys_path.into(),
            commands,
        }
    }

    /// Reads the host name from `/proc/sys/kernel/hostname`.
    pub fn collect_hostname(&self) -> Result<String, CollectError> {
        let path = format!("{}/sys/kernel/hostname", self.proc_path);
        match self.fs.read_to_string(Path::new(&path)) {
            Ok(content) if !content.trim().is_empty() => Ok(content.trim().to_string()),
            _ => {
                debug!("{} unavailable, asking the OS", path);
                local_hostname()
            }
        }
    }

    /// Reads the processor model from `/proc/cpuinfo`, falling back to `lscpu`.
    pub fn collect_processor(&self) -> Result<String, CollectError> {
        let path = format!("{}/cpuinfo", self.proc_path);
        match self.fs.read_to_string(Path::new(&path)) {
            Ok(content) => {
                if let Some(model) = parse_cpu_model(&content) {
                    return Ok(model);
                }
                debug!("no model name in {}, trying lscpu", path);
            }
            Err(e) => debug!("cannot read {}: {}, trying lscpu", path, e),
        }

        let output = self
            .commands
            .run("lscpu", &[])
            .map_err(|e| CollectError::missing("processor", e))?;
        parse_lscpu_model(&output)
            .ok_or_else(|| CollectError::missing("processor", "lscpu reported no model name"))
    }

    /// Finds the hardware address of the primary interface.
    ///
    /// The default-route interface from `/proc/net/route` is tried first,
    /// then interfaces under `/sys/class/net` whose names look physical.
    pub fn collect_mac_address(&self) -> Result<String, CollectError> {
        let route_path = format!("{}/net/route", self.proc_path);
        if let Ok(content) = self.fs.read_to_string(Path::new(&route_path)) {
            if let Some(iface) = parse_default_route(&content) {
                if let Some(mac) = self.interface_mac(&iface) {
                    debug!(interface = %iface, "Using default-route interface");
                    return Ok(mac);
                }
            }
        }

        let net_dir = format!("{}/class/net", self.sys_path);
        let mut names: Vec<String> = self
            .fs
            .read_dir(Path::new(&net_dir))
            .map_err(|e| CollectError::missing("mac_address", e))?
            .iter()
            .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
            .filter(|name| INTERFACE_PREFIXES.iter().any(|p| name.starts_with(p)))
            .collect();
        names.sort();

        for name in &names {
            if let Some(mac) = self.interface_mac(name) {
                debug!(interface = %name, "Using first physical-looking interface");
                return Ok(mac);
            }
        }

        Err(CollectError::missing(
            "mac_address",
            "no network interface with a hardware address",
        ))
    }

    /// Lists TCP ports in LISTEN state from `/proc/net/tcp` and `/proc/net/tcp6`.
    pub fn collect_listening_ports(&self) -> Result<Vec<u16>, CollectError> {
        let mut ports = BTreeSet::new();
        let mut any_read = false;

        for table in ["tcp", "tcp6"] {
            let path = format!("{}/net/{}", self.proc_path, table);
            match self.fs.read_to_string(Path::new(&path)) {
                Ok(content) => {
                    ports.extend(parse_listening_ports(&content)?);
                    any_read = true;
                }
                Err(e) => debug!("cannot read {}: {}", path, e),
            }
        }

        if !any_read {
            return Err(CollectError::missing(
                "active_ports",
                "no readable socket table under /proc/net",
            ));
        }
        Ok(ports.into_iter().collect())
    }

    fn interface_mac(&self, iface: &str) -> Option<String> {
        let path = format!("{}/class/net/{}/address", self.sys_path, iface);
        let content = self.fs.read_to_string(Path::new(&path)).ok()?;
        normalize_mac(&content).filter(|mac| !is_null_mac(mac))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::{MockCommands, MockFs};

    fn collector(fs: MockFs, commands: MockCommands) -> LinuxCollector<MockFs> {
        LinuxCollector::new(fs, "/proc", "/sys", Arc::new(commands))
    }

    #[test]
    fn test_typical_host() {
        let c = collector(MockFs::linux_host(), MockCommands::new());

        assert_eq!(c.collect_hostname().unwrap(), "build-01");
        assert_eq!(
            c.collect_processor().unwrap(),
            "AMD Ryzen 7 5800X 8-Core Processor"
        );
        assert_eq!(c.collect_mac_address().unwrap(), "52:54:00:12:34:56");
        assert_eq!(c.collect_listening_ports().unwrap(), vec![22, 631, 5432, 8080]);
    }

    #[test]
    fn test_processor_falls_back_to_lscpu() {
        let mut fs = MockFs::linux_host();
        fs.add_file("/proc/cpuinfo", "processor\t: 0\nBogoMIPS\t: 108.00\n");
        let mut commands = MockCommands::new();
        commands.add_output("lscpu", &[], "Model name:          Cortex-A72\n");

        let c = collector(fs, commands);
        assert_eq!(c.collect_processor().unwrap(), "Cortex-A72");
    }

    #[test]
    fn test_processor_missing_everywhere() {
        let mut fs = MockFs::linux_host();
        fs.add_file("/proc/cpuinfo", "processor\t: 0\n");

        let c = collector(fs, MockCommands::new());
        assert!(matches!(
            c.collect_processor(),
            Err(CollectError::MissingData { field: "processor", .. })
        ));
    }

    #[test]
    fn test_mac_without_default_route() {
        let mut fs = MockFs::linux_host();
        fs.add_file(
            "/proc/net/route",
            "Iface\tDestination\tGateway \tFlags\tRefCnt\tUse\tMetric\tMask\t\tMTU\tWindow\tIRTT\n",
        );

        // eth0 sorts before wlan0; lo and docker0 are never picked
        let c = collector(fs, MockCommands::new());
        assert_eq!(c.collect_mac_address().unwrap(), "52:54:00:12:34:56");
    }

    #[test]
    fn test_mac_skips_null_address() {
        let mut fs = MockFs::new();
        fs.add_interface("lo", "00:00:00:00:00:00");
        fs.add_interface("eth0", "00:00:00:00:00:00");
        fs.add_interface("wlp2s0", "A4:C3:F0:11:22:33");

        let c = collector(fs, MockCommands::new());
        assert_eq!(c.collect_mac_address().unwrap(), "a4:c3:f0:11:22:33");
    }

    #[test]
    fn test_mac_only_loopback() {
        let mut fs = MockFs::new();
        fs.add_interface("lo", "00:00:00:00:00:00");

        let c = collector(fs, MockCommands::new());
        assert!(matches!(
            c.collect_mac_address(),
            Err(CollectError::MissingData { field: "mac_address", .. })
        ));
    }

    #[test]
    fn test_ports_without_ipv6() {
        let mut fs = MockFs::new();
        fs.add_file(
            "/proc/net/tcp",
            "  sl  local_address rem_address   st\n   0: 00000000:0050 00000000:0000 0A\n",
        );

        let c = collector(fs, MockCommands::new());
        assert_eq!(c.collect_listening_ports().unwrap(), vec![80]);
    }

    #[test]
    fn test_ports_no_tables() {
        let c = collector(MockFs::new(), MockCommands::new());
        assert!(matches!(
            c.collect_listening_ports(),
            Err(CollectError::MissingData { field: "active_ports", .. })
        ));
    }
}
