//! Abstractions over the host so collection can be tested without one.
//!
//! - `FileSystem` reads `/proc` and `/sys` on Linux (or an in-memory tree).
//! - `CommandRunner` runs helper programs (`lscpu`, `getmac`, `netstat`).
//! - `AddressResolver` finds the address this host is reachable on.

use std::io;
use std::net::{IpAddr, ToSocketAddrs, UdpSocket};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Abstraction for filesystem operations.
///
/// This trait allows collectors to read from the real filesystem or from
/// a mock implementation for testing purposes.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Lists entries in a directory.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Real filesystem implementation that delegates to `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(path)?;
        let mut paths = Vec::new();
        for entry in entries {
            paths.push(entry?.path());
        }
        Ok(paths)
    }
}

/// Runs an external program and returns its standard output.
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args`.
    ///
    /// A non-zero exit status is reported as an error.
    fn run(&self, program: &str, args: &[&str]) -> io::Result<String>;
}

/// Runs commands with `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommands;

impl CommandRunner for SystemCommands {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<String> {
        let output = Command::new(program).args(args).output()?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "{} exited with {}",
                program, output.status
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Finds the IP address of this host.
pub trait AddressResolver: Send + Sync {
    /// Returns a non-loopback address for `hostname`.
    fn primary_ip(&self, hostname: &str) -> io::Result<IpAddr>;
}

/// Resolves the address with real sockets.
///
/// First asks the kernel which local address would route to a public
/// address (a UDP "connect" sends nothing), then falls back to resolving
/// the host name.
#[derive(Debug, Clone)]
pub struct SocketResolver {
    route_probe: String,
}

impl SocketResolver {
    /// Public address used only to select a route.
    pub const DEFAULT_ROUTE_PROBE: &'static str = "8.8.8.8:80";

    pub fn new() -> Self {
        Self {
            route_probe: Self::DEFAULT_ROUTE_PROBE.to_string(),
        }
    }

    fn outbound_ip(&self) -> io::Result<IpAddr> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(&self.route_probe)?;
        Ok(socket.local_addr()?.ip())
    }

    fn resolved_ip(hostname: &str) -> io::Result<IpAddr> {
        let addrs: Vec<IpAddr> = (hostname, 0)
            .to_socket_addrs()?
            .map(|a| a.ip())
            .filter(|ip| !ip.is_loopback() && !ip.is_unspecified())
            .collect();

        addrs
            .iter()
            .find(|ip| ip.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no non-loopback address for {}", hostname),
                )
            })
    }
}

impl Default for SocketResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressResolver for SocketResolver {
    fn primary_ip(&self, hostname: &str) -> io::Result<IpAddr> {
        match self.outbound_ip() {
            Ok(ip) if !ip.is_loopback() && !ip.is_unspecified() => Ok(ip),
            _ => Self::resolved_ip(hostname),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_real_fs_read_to_string() {
        let fs = RealFs::new();
        let cargo_toml = env::current_dir().unwrap().join("Cargo.toml");
        let content = fs.read_to_string(&cargo_toml).unwrap();
        assert!(content.contains("[package]"));
    }

    #[test]
    fn test_real_fs_missing_file() {
        let fs = RealFs::new();
        let err = fs
            .read_to_string(Path::new("/nonexistent/path/12345"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_real_fs_read_dir() {
        let fs = RealFs::new();
        let src_dir = env::current_dir().unwrap().join("src");
        let entries = fs.read_dir(&src_dir).unwrap();
        assert!(entries.iter().any(|p| p.ends_with("lib.rs")));
    }

    #[test]
    fn test_system_commands_missing_program() {
        let runner = SystemCommands;
        assert!(runner.run("/nonexistent/program-12345", &[]).is_err());
    }

    #[test]
    fn test_resolved_ip_unknown_host() {
        assert!(SocketResolver::resolved_ip("host.invalid").is_err());
    }
}
