//! Host facts collector for Linux and Windows.
//!
//! This module gathers the identity of the machine (name, OS, processor,
//! primary MAC and IP address, listening ports, local time) and measures its
//! bandwidth, with every host access behind a trait so the whole pipeline
//! can be exercised against mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Collector                           │
//! │   OsKind::from_name ── fails before any read if unsupported  │
//! │  ┌──────────────────────┐   ┌─────────────────────────────┐  │
//! │  │   LinuxCollector     │   │     WindowsCollector        │  │
//! │  │  - /proc/cpuinfo     │   │  - powershell (CPU name)    │  │
//! │  │  - /proc/net/route   │   │  - getmac                   │  │
//! │  │  - /proc/net/tcp{,6} │   │  - netstat                  │  │
//! │  │  - /sys/class/net    │   └──────────────┬──────────────┘  │
//! │  └──────────┬───────────┘                  │                 │
//! │      ┌──────▼──────┐              ┌────────▼──────┐          │
//! │      │  FileSystem │              │ CommandRunner │          │
//! │      └─────────────┘              └───────────────┘          │
//! │   AddressResolver (IP)          SpeedProbe (bandwidth)       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ## Production
//!
//! ```ignore
//! use devcat::collector::{Collector, RealFs};
//!
//! let collector = Collector::new(RealFs::new(), std::env::consts::OS);
//! let record = collector.collect()?;
//! ```
//!
//! ## Testing (with mocks)
//!
//! ```
//! use devcat::collector::Collector;
//! use devcat::collector::mock::{FixedResolver, MockCommands, MockFs};
//!
//! let collector = Collector::new(MockFs::linux_host(), "linux")
//!     .with_commands(MockCommands::new())
//!     .with_resolver(FixedResolver("10.0.0.5".parse().unwrap()));
//! let host = collector.collect_host().unwrap();
//! assert_eq!(host.computer_name, "build-01");
//! ```

#[allow(clippy::module_inception)]
mod collector;
pub mod error;
pub mod mock;
pub mod platform;
pub mod procfs;
pub mod speed;
pub mod traits;
pub mod windows;

pub use collector::{Collector, TIME_FORMAT};
pub use error::CollectError;
pub use platform::OsKind;
pub use speed::{FixedSpeedProbe, HttpSpeedProbe, NoSpeedProbe, SpeedProbe, SpeedTestConfig};
pub use traits::{AddressResolver, CommandRunner, FileSystem, RealFs, SocketResolver, SystemCommands};
