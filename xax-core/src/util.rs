/// Decode a packed BCD byte (`0x59` → 59).
///
/// Nibbles above 9 are not rejected; the result is simply the weighted sum,
/// which is what sector listings of damaged images show.
pub fn bcd_to_int(byte: u8) -> u8 {
    (byte & 0x0F) + (byte >> 4) * 10
}

/// Format a byte count with fractional KB/MB (e.g., "1.5 KB", "2.3 MB").
pub fn format_bytes_approx(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcd_to_int() {
        assert_eq!(bcd_to_int(0x00), 0);
        assert_eq!(bcd_to_int(0x09), 9);
        assert_eq!(bcd_to_int(0x10), 10);
        assert_eq!(bcd_to_int(0x59), 59);
        assert_eq!(bcd_to_int(0x74), 74);
    }

    #[test]
    fn test_format_bytes_approx() {
        assert_eq!(format_bytes_approx(0), "0 B");
        assert_eq!(format_bytes_approx(2048), "2.0 KB");
        assert_eq!(format_bytes_approx(2336), "2.3 KB");
        assert_eq!(format_bytes_approx(1048576), "1.0 MB");
    }
}
