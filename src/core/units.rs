//! Unit conversion helpers shared by the metric families.

const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Scale a byte count to the largest 1024-based unit in which it is at least 1.
pub fn convert_bytes(bytes: u64) -> (f64, &'static str) {
    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    (value, UNITS[unit])
}

/// Format a byte count with one decimal place (e.g. "1.5 KB")
pub fn format_bytes(bytes: u64) -> String {
    let (value, unit) = convert_bytes(bytes);
    format!("{:.1} {}", value, unit)
}

pub fn celsius_to_fahrenheit(celsius: i32) -> i32 {
    celsius * 9 / 5 + 32
}
