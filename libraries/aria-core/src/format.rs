//! Display formatting for durations

/// Format whole seconds as `m:ss`
///
/// ```rust
/// assert_eq!(aria_core::format::format_duration(185), "3:05");
/// ```
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Format milliseconds as `m:ss`, truncating partial seconds
pub fn format_millis(ms: u64) -> String {
    format_duration(ms / 1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_seconds() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(9), "0:09");
        assert_eq!(format_duration(3600), "60:00");
    }

    #[test]
    fn millis_truncate() {
        assert_eq!(format_millis(59_999), "0:59");
        assert_eq!(format_millis(61_000), "1:01");
    }
}
