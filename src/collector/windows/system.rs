//! Windows host collector driven by stock command-line tools.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::collector::error::CollectError;
use crate::collector::platform::local_hostname;
use crate::collector::traits::CommandRunner;
use crate::collector::windows::parser::{
    parse_first_line, parse_getmac_csv, parse_netstat_listening,
};

/// PowerShell invocation printing the processor name.
pub const PROCESSOR_QUERY: [&str; 4] = [
    "-NoProfile",
    "-NonInteractive",
    "-Command",
    "(Get-CimInstance Win32_Processor | Select-Object -First 1).Name",
];

/// `getmac` arguments: CSV output, no header.
pub const GETMAC_ARGS: [&str; 3] = ["/fo", "csv", "/nh"];

/// `netstat` arguments for the IPv4 TCP table.
pub const NETSTAT_TCP_ARGS: [&str; 3] = ["-an", "-p", "TCP"];

/// `netstat` arguments for the IPv6 TCP table.
pub const NETSTAT_TCP6_ARGS: [&str; 3] = ["-an", "-p", "TCPv6"];

/// Collects host identity on Windows.
pub struct WindowsCollector {
    commands: Arc<dyn CommandRunner>,
}

impl WindowsCollector {
    pub fn new(commands: Arc<dyn CommandRunner>) -> Self {
        Self { commands }
    }

    pub fn collect_hostname(&self) -> Result<String, CollectError> {
        local_hostname()
    }

    /// Reads the processor name from `Win32_Processor`.
    pub fn collect_processor(&self) -> Result<String, CollectError> {
        let output = self
            .commands
            .run("powershell", &PROCESSOR_QUERY)
            .map_err(|e| CollectError::missing("processor", e))?;
        parse_first_line(&output)
            .ok_or_else(|| CollectError::missing("processor", "Win32_Processor has no name"))
    }

    /// Returns the first connected adapter listed by `getmac`.
    pub fn collect_mac_address(&self) -> Result<String, CollectError> {
        let output = self
            .commands
            .run("getmac", &GETMAC_ARGS)
            .map_err(|e| CollectError::missing("mac_address", e))?;
        parse_getmac_csv(&output).ok_or_else(|| {
            CollectError::missing("mac_address", "getmac listed no connected adapter")
        })
    }

    /// Lists TCP ports in LISTENING state for IPv4 and IPv6.
    pub fn collect_listening_ports(&self) -> Result<Vec<u16>, CollectError> {
        let mut ports = BTreeSet::new();
        let mut any_read = false;

        for args in [&NETSTAT_TCP_ARGS, &NETSTAT_TCP6_ARGS] {
            match self.commands.run("netstat", args) {
                Ok(output) => {
                    ports.extend(parse_netstat_listening(&output));
                    any_read = true;
                }
                Err(e) => debug!("netstat {} failed: {}", args.join(" "), e),
            }
        }

        if !any_read {
            return Err(CollectError::missing("active_ports", "netstat failed"));
        }
        Ok(ports.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockCommands;

    #[test]
    fn test_typical_workstation() {
        let c = WindowsCollector::new(Arc::new(MockCommands::windows_host()));

        assert_eq!(c.collect_processor().unwrap(), "Intel(R) Core(TM) i7-14650HX");
        assert_eq!(c.collect_mac_address().unwrap(), "34:5a:60:22:18:b2");
        assert_eq!(c.collect_listening_ports().unwrap(), vec![135, 445, 5939, 7680]);
    }

    #[test]
    fn test_missing_tools() {
        let c = WindowsCollector::new(Arc::new(MockCommands::new()));

        assert!(matches!(
            c.collect_processor(),
            Err(CollectError::MissingData { field: "processor", .. })
        ));
        assert!(matches!(
            c.collect_mac_address(),
            Err(CollectError::MissingData { field: "mac_address", .. })
        ));
        assert!(matches!(
            c.collect_listening_ports(),
            Err(CollectError::MissingData { field: "active_ports", .. })
        ));
    }
}
