//! Collectors for the Linux `/proc` and `/sys` filesystems.
//!
//! This module provides parsers and a collector for reading host identity
//! (name, processor, primary interface, listening sockets) from the
//! virtual filesystems.

pub mod parser;
pub mod system;

pub use system::LinuxCollector;
