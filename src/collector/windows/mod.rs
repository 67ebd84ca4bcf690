//! Collectors for Windows hosts.
//!
//! Windows exposes no `/proc`, so host identity comes from the output of
//! stock tools (`powershell`, `getmac`, `netstat`) run through a
//! [`CommandRunner`](crate::collector::traits::CommandRunner).

pub mod parser;
pub mod system;

pub use system::{
    GETMAC_ARGS, NETSTAT_TCP_ARGS, NETSTAT_TCP6_ARGS, PROCESSOR_QUERY, WindowsCollector,
};
