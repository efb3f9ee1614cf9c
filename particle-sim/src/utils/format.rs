//! Formatting utilities

use std::time::Duration;

use humansize::{DECIMAL, format_size};

/// Format a byte count in human-readable form
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// Format a ratio as a percentage
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Format how full a buffer is
pub fn format_occupancy(live: usize, capacity: usize) -> String {
    if capacity == 0 {
        "N/A".to_string()
    } else {
        format_percentage(live as f64 / capacity as f64 * 100.0)
    }
}

/// Format a throughput in frames per second
pub fn format_rate(frames: u64, elapsed: Duration) -> String {
    let seconds = elapsed.as_secs_f64();
    if seconds <= 0.0 {
        "N/A".to_string()
    } else {
        format!("{:.0} frames/s", frames as f64 / seconds)
    }
}
