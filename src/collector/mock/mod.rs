//! Mock host implementations for testing.
//!
//! This module provides `MockFs`, `MockCommands`, `FixedResolver` and
//! pre-built host scenarios for testing collectors without a real host.

mod commands;
mod filesystem;
mod scenarios;

pub use commands::{FixedResolver, MockCommands};
pub use filesystem::MockFs;
