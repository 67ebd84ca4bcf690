//! Canned command output and addresses for tests.

use std::collections::HashMap;
use std::io;
use std::net::IpAddr;

use crate::collector::traits::{AddressResolver, CommandRunner};

/// Command runner that answers from a table of canned outputs.
///
/// Unknown commands fail with `NotFound`, like a missing binary would.
#[derive(Debug, Clone, Default)]
pub struct MockCommands {
    outputs: HashMap<String, String>,
}

impl MockCommands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the output of `program args...`.
    pub fn add_output(&mut self, program: &str, args: &[&str], output: impl Into<String>) {
        self.outputs.insert(command_key(program, args), output.into());
    }
}

fn command_key(program: &str, args: &[&str]) -> String {
    let mut key = program.to_string();
    for arg in args {
        key.push(' ');
        key.push_str(arg);
    }
    key
}

impl CommandRunner for MockCommands {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<String> {
        let key = command_key(program, args);
        self.outputs.get(&key).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("command not found: {}", key),
            )
        })
    }
}

/// Resolver that always answers with the same address.
#[derive(Debug, Clone, Copy)]
pub struct FixedResolver(pub IpAddr);

impl AddressResolver for FixedResolver {
    fn primary_ip(&self, _hostname: &str) -> io::Result<IpAddr> {
        Ok(self.0)
    }
}
