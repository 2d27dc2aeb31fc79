//! Common utilities for growable-cmd

use growable_common::{Result, error::Error, verify_arg};

/// Parses a byte size such as `4096`, `64K`, `1M` or `2G` (binary multiples).
pub fn parse_size(text: &str) -> Result<u64> {
    let text = text.trim();
    let split = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let (digits, suffix) = text.split_at(split);
    verify_arg!(size, !digits.is_empty());

    let shift = match suffix.to_ascii_uppercase().as_str() {
        "" | "B" => 0,
        "K" | "KB" => 10,
        "M" | "MB" => 20,
        "G" | "GB" => 30,
        _ => {
            return Err(Error::invalid_arg(
                "size",
                format!("unknown suffix '{suffix}'"),
            ));
        }
    };

    let value: u64 = digits
        .parse()
        .map_err(|e| Error::invalid_arg("size", format!("'{digits}': {e}")))?;
    value
        .checked_mul(1u64 << shift)
        .ok_or_else(|| Error::invalid_arg("size", format!("'{text}' does not fit in 64 bits")))
}

/// Formats file size in human-readable format
pub fn format_size(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = size as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size as u64, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}
