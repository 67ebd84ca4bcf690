//! Shared formatting helpers.
//!
//! Pure functions used both for catalog fields and for log lines.

/// Format byte count as human-readable size: `"1.5G"`, `"25.0M"`, `"50.0K"`, `"512B"`.
pub fn format_bytes(bytes: u64) -> String {
    let f = bytes as f64;
    if bytes >= 1024 * 1024 * 1024 {
        format!("{:.1}G", f / (1024.0 * 1024.0 * 1024.0))
    } else if bytes >= 1024 * 1024 {
        format!("{:.1}M", f / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1}K", f / 1024.0)
    } else {
        format!("{}B", bytes)
    }
}

/// Format throughput in megabits per second: `"82.44 Mb/s"`.
pub fn format_speed(mbps: f64) -> String {
    format!("{:.2} Mb/s", mbps)
}

/// Format a port list the way the catalog stores it: `"22, 80, 443"`.
pub fn format_ports(ports: &[u16]) -> String {
    ports
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Normalizes a hardware address to lowercase, colon-separated form.
///
/// Accepts colon or dash separators (`aa:bb:..`, `AA-BB-..`) or 12 bare hex
/// digits. Returns `None` for anything that is not a 6-octet address.
pub fn normalize_mac(raw: &str) -> Option<String> {
    let hex: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ':' && *c != '-')
        .collect();

    if hex.len() != 12 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let hex = hex.to_ascii_lowercase();
    let octets: Vec<&str> = (0..6).map(|i| &hex[i * 2..i * 2 + 2]).collect();
    Some(octets.join(":"))
}

/// Returns `true` for `00:00:00:00:00:00` (loopback and some virtual devices).
pub fn is_null_mac(mac: &str) -> bool {
    mac.chars().all(|c| c == '0' || c == ':' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512B");
        assert_eq!(format_bytes(50 * 1024), "50.0K");
        assert_eq!(format_bytes(25 * 1024 * 1024), "25.0M");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024 / 2), "1.5G");
    }

    #[test]
    fn test_format_speed() {
        assert_eq!(format_speed(82.4412), "82.44 Mb/s");
        assert_eq!(format_speed(0.0), "0.00 Mb/s");
    }

    #[test]
    fn test_format_ports() {
        assert_eq!(format_ports(&[]), "");
        assert_eq!(format_ports(&[22]), "22");
        assert_eq!(format_ports(&[22, 80, 443]), "22, 80, 443");
    }

    #[test]
    fn test_normalize_mac_separators() {
        assert_eq!(
            normalize_mac("34-5A-60-22-18-B2").as_deref(),
            Some("34:5a:60:22:18:b2")
        );
        assert_eq!(
            normalize_mac("34:5a:60:22:18:b2\n").as_deref(),
            Some("34:5a:60:22:18:b2")
        );
        assert_eq!(
            normalize_mac("345A602218B2").as_deref(),
            Some("34:5a:60:22:18:b2")
        );
    }

    #[test]
    fn test_normalize_mac_rejects_garbage() {
        assert_eq!(normalize_mac("N/A"), None);
        assert_eq!(normalize_mac("Disabled"), None);
        assert_eq!(normalize_mac("34:5a:60:22:18"), None);
        assert_eq!(normalize_mac("zz:5a:60:22:18:b2"), None);
        // InfiniBand addresses are 20 octets
        assert_eq!(
            normalize_mac("80:00:02:08:fe:80:00:00:00:00:00:00:00:02:c9:03:00:0a:bc:de"),
            None
        );
    }

    #[test]
    fn test_is_null_mac() {
        assert!(is_null_mac("00:00:00:00:00:00"));
        assert!(!is_null_mac("00:00:00:00:00:01"));
    }
}
