//! Parsers for Windows tool output.

use std::collections::BTreeSet;

use crate::fmt::{is_null_mac, normalize_mac};

/// Returns the first non-empty line of PowerShell output, trimmed.
pub fn parse_first_line(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Parses `getmac /fo csv /nh` output and returns the first real address.
///
/// Format (one adapter per row, no header):
/// "34-5A-60-22-18-B2","\Device\Tcpip_{...}"
/// "N/A","Media disconnected"
pub fn parse_getmac_csv(output: &str) -> Option<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(output.as_bytes());

    reader
        .records()
        .filter_map(Result::ok)
        .filter_map(|row| row.get(0).and_then(normalize_mac))
        .find(|mac| !is_null_mac(mac))
}

/// Parses `netstat -an -p TCP|TCPv6` output and returns listening ports.
///
/// Format:
///   Proto  Local Address          Foreign Address        State
///   TCP    0.0.0.0:135            0.0.0.0:0              LISTENING
///   TCP    [::]:135               [::]:0                 LISTENING
pub fn parse_netstat_listening(output: &str) -> BTreeSet<u16> {
    let mut ports = BTreeSet::new();

    for line in output.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 || fields[0] != "TCP" || fields[3] != "LISTENING" {
            continue;
        }
        if let Some(port) = fields[1]
            .rsplit_once(':')
            .and_then(|(_, port)| port.parse::<u16>().ok())
        {
            ports.insert(port);
        }
    }

    ports
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_line() {
        assert_eq!(
            parse_first_line("\r\n  Intel(R) Core(TM) i7-14650HX  \r\n").as_deref(),
            Some("Intel(R) Core(TM) i7-14650HX")
        );
        assert_eq!(parse_first_line("\r\n\r\n"), None);
    }

    #[test]
    fn test_parse_getmac_skips_disconnected() {
        let output = "\
\"N/A\",\"Media disconnected\"\r
\"Disabled\",\"Disconnected\"\r
\"34-5A-60-22-18-B2\",\"\\Device\\Tcpip_{4D36E972-E325-11CE-BFC1-08002BE10318}\"\r
";
        assert_eq!(
            parse_getmac_csv(output).as_deref(),
            Some("34:5a:60:22:18:b2")
        );
    }

    #[test]
    fn test_parse_getmac_none() {
        assert_eq!(parse_getmac_csv(""), None);
        assert_eq!(parse_getmac_csv("\"N/A\",\"Media disconnected\"\r\n"), None);
    }

    #[test]
    fn test_parse_netstat_listening() {
        let output = "\
\r
Active Connections\r
\r
  Proto  Local Address          Foreign Address        State\r
  TCP    0.0.0.0:135            0.0.0.0:0              LISTENING\r
  TCP    0.0.0.0:445            0.0.0.0:0              LISTENING\r
  TCP    192.168.1.102:49832    140.82.112.25:443      ESTABLISHED\r
  TCP    [::]:135               [::]:0                 LISTENING\r
  TCP    [fe80::1%12]:7680      [::]:0                 LISTENING\r
  UDP    0.0.0.0:5353           *:*\r
";
        let ports: Vec<u16> = parse_netstat_listening(output).into_iter().collect();
        assert_eq!(ports, vec![135, 445, 7680]);
    }
}
