//! Parsers for `/proc` files and Linux helper output.
//!
//! These are pure functions that parse the content of various files into
//! structured data. They are designed to be easily testable with string inputs.

use std::collections::BTreeSet;

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

// ============ /proc/cpuinfo ============

/// Keys naming the processor model, in order of preference.
///
/// x86 uses `model name`; older ARM kernels use `Processor` or `Hardware`,
/// MIPS uses `cpu model`, PowerPC uses `cpu`.
const CPU_MODEL_KEYS: [&str; 5] = ["model name", "Processor", "Hardware", "cpu model", "cpu"];

/// Parses the processor model from `/proc/cpuinfo` content.
///
/// Format is `key\t: value` lines, one block per logical CPU. The first
/// non-empty value of the most preferred key wins.
pub fn parse_cpu_model(content: &str) -> Option<String> {
    let mut best: Option<(usize, &str)> = None;

    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let Some(rank) = CPU_MODEL_KEYS.iter().position(|k| *k == key.trim()) else {
            continue;
        };
        if best.is_none_or(|(r, _)| rank < r) {
            best = Some((rank, value));
        }
    }

    best.map(|(_, value)| value.to_string())
}

/// Parses the `Model name:` line of `lscpu` output.
pub fn parse_lscpu_model(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        if key.trim() != "Model name" {
            return None;
        }
        let value = value.split_whitespace().collect::<Vec<_>>().join(" ");
        (!value.is_empty()).then_some(value)
    })
}

// ============ /proc/net/route ============

/// Parses `/proc/net/route` and returns the default-route interface.
///
/// Format:
/// Iface   Destination  Gateway   Flags  RefCnt  Use  Metric  Mask      MTU  Window  IRTT
/// eth0    00000000     0101A8C0  0003   0       0    100     00000000  0    0       0
///
/// Only routes that are up (flag 0x1) with destination and mask 0 count.
/// When several default routes exist the lowest metric wins.
pub fn parse_default_route(content: &str) -> Option<String> {
    const RTF_UP: u32 = 0x1;

    let mut best: Option<(u32, &str)> = None;

    for line in content.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 8 {
            continue;
        }
        let flags = u32::from_str_radix(fields[3], 16).unwrap_or(0);
        if fields[1] != "00000000" || fields[7] != "00000000" || flags & RTF_UP == 0 {
            continue;
        }
        let metric: u32 = fields[6].parse().unwrap_or(u32::MAX);
        if best.is_none_or(|(m, _)| metric < m) {
            best = Some((metric, fields[0]));
        }
    }

    best.map(|(_, iface)| iface.to_string())
}

// ============ /proc/net/tcp, /proc/net/tcp6 ============

/// Socket state code for LISTEN in `/proc/net/tcp*`.
const TCP_LISTEN: &str = "0A";

/// Parses `/proc/net/tcp` or `/proc/net/tcp6` and returns listening ports.
///
/// Format:
///   sl  local_address rem_address   st tx_queue rx_queue ...
///    0: 0100007F:0277 00000000:0000 0A 00000000:00000000 ...
///
/// Ports are hexadecimal after the last `:` of `local_address`.
pub fn parse_listening_ports(content: &str) -> Result<BTreeSet<u16>, ParseError> {
    let mut ports = BTreeSet::new();

    for line in content.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            continue;
        }
        if fields[3] != TCP_LISTEN {
            continue;
        }
        let (_, port_hex) = fields[1]
            .rsplit_once(':')
            .ok_or_else(|| ParseError::new(format!("invalid local address {}", fields[1])))?;
        let port = u16::from_str_radix(port_hex, 16)
            .map_err(|_| ParseError::new(format!("invalid port {}", port_hex)))?;
        ports.insert(port);
    }

    Ok(ports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cpu_model_x86() {
        let content = "\
processor\t: 0
vendor_id\t: GenuineIntel
cpu family\t: 6
model\t\t: 186
model name\t: 13th Gen Intel(R) Core(TM) i7-1360P
stepping\t: 2

processor\t: 1
model name\t: 13th Gen Intel(R) Core(TM) i7-1360P
";
        assert_eq!(
            parse_cpu_model(content).as_deref(),
            Some("13th Gen Intel(R) Core(TM) i7-1360P")
        );
    }

    #[test]
    fn test_parse_cpu_model_arm_hardware() {
        let content = "\
processor\t: 0
BogoMIPS\t: 108.00
CPU implementer\t: 0x41
CPU part\t: 0xd08

Hardware\t: BCM2835
Revision\t: c03111
";
        assert_eq!(parse_cpu_model(content).as_deref(), Some("BCM2835"));
    }

    #[test]
    fn test_parse_cpu_model_prefers_model_name() {
        let content = "Hardware\t: BCM2835\nmodel name\t: ARMv7 Processor rev 4 (v7l)\n";
        assert_eq!(
            parse_cpu_model(content).as_deref(),
            Some("ARMv7 Processor rev 4 (v7l)")
        );
    }

    #[test]
    fn test_parse_cpu_model_missing() {
        assert_eq!(parse_cpu_model("processor\t: 0\nBogoMIPS\t: 108.00\n"), None);
        // "processor" is the CPU index, not the "Processor" model key
        assert_eq!(parse_cpu_model("processor\t: 0\n"), None);
    }

    #[test]
    fn test_parse_lscpu_model() {
        let output = "\
Architecture:            x86_64
  CPU op-mode(s):        32-bit, 64-bit
Vendor ID:               AuthenticAMD
  Model name:            AMD Ryzen 7   5800X 8-Core Processor
    CPU family:          25
";
        assert_eq!(
            parse_lscpu_model(output).as_deref(),
            Some("AMD Ryzen 7 5800X 8-Core Processor")
        );
        assert_eq!(parse_lscpu_model("Architecture: x86_64\n"), None);
    }

    #[test]
    fn test_parse_default_route() {
        let content = "\
Iface\tDestination\tGateway \tFlags\tRefCnt\tUse\tMetric\tMask\t\tMTU\tWindow\tIRTT
wlan0\t00000000\t0101A8C0\t0003\t0\t0\t600\t00000000\t0\t0\t0
eth0\t00000000\t0101A8C0\t0003\t0\t0\t100\t00000000\t0\t0\t0
eth0\t0001A8C0\t00000000\t0001\t0\t0\t100\t00FFFFFF\t0\t0\t0
";
        assert_eq!(parse_default_route(content).as_deref(), Some("eth0"));
    }

    #[test]
    fn test_parse_default_route_none() {
        let content = "\
Iface\tDestination\tGateway \tFlags\tRefCnt\tUse\tMetric\tMask\t\tMTU\tWindow\tIRTT
eth0\t0001A8C0\t00000000\t0001\t0\t0\t100\t00FFFFFF\t0\t0\t0
eth1\t00000000\t0101A8C0\t0002\t0\t0\t100\t00000000\t0\t0\t0
";
        // eth1 default route is not up
        assert_eq!(parse_default_route(content), None);
        assert_eq!(parse_default_route(""), None);
    }

    #[test]
    fn test_parse_listening_ports_tcp() {
        let content = "\
  sl  local_address rem_address   st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode
   0: 00000000:0016 00000000:0000 0A 00000000:00000000 00:00000000 00000000     0        0 21345 1 0000000000000000 100 0 0 10 0
   1: 0100007F:0277 00000000:0000 0A 00000000:00000000 00:00000000 00000000     0        0 23456 1 0000000000000000 100 0 0 10 0
   2: 0F02000A:0016 0202000A:C8F4 01 00000000:00000000 02:0009C7A1 00000000     0        0 34567 2 0000000000000000 20 4 30 10 -1
   3: 00000000:0016 00000000:0000 0A 00000000:00000000 00:00000000 00000000     0        0 21346 1 0000000000000000 100 0 0 10 0
";
        let ports = parse_listening_ports(content).unwrap();
        assert_eq!(ports.into_iter().collect::<Vec<_>>(), vec![22, 631]);
    }

    #[test]
    fn test_parse_listening_ports_tcp6() {
        let content = "\
  sl  local_address                         remote_address                        st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode
   0: 00000000000000000000000000000000:1F90 00000000000000000000000000000000:0000 0A 00000000:00000000 00:00000000 00000000  1000        0 45678 1 0000000000000000 100 0 0 10 0
";
        let ports = parse_listening_ports(content).unwrap();
        assert!(ports.contains(&8080));
        assert_eq!(ports.len(), 1);
    }

    #[test]
    fn test_parse_listening_ports_invalid_port() {
        let content = "header\n   0: 00000000:ZZZZ 00000000:0000 0A 00000000:00000000\n";
        assert!(parse_listening_ports(content).is_err());
    }

    #[test]
    fn test_parse_listening_ports_empty() {
        let ports = parse_listening_ports("  sl  local_address rem_address   st\n").unwrap();
        assert!(ports.is_empty());
    }
}
