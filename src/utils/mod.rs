//! Common utilities and helpers

pub mod logging;

/// Format fractional seconds as `HH:MM:SS.mmm` (or `MM:SS.mmm` under an hour)
pub fn format_secs(secs: f64) -> String {
    let total_ms = if secs > 0.0 {
        (secs * 1000.0).round() as u64
    } else {
        0
    };
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    } else {
        format!("{:02}:{:02}.{:03}", minutes, seconds, millis)
    }
}

/// Format file size for display
pub fn format_file_size(size: u64) -> String {
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

/// Run id from the local clock, e.g. `20260314-093005`
pub fn generate_run_id() -> String {
    chrono::Local::now().format("%Y%m%d-%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_secs() {
        assert_eq!(format_secs(61.5), "01:01.500");
        assert_eq!(format_secs(3723.456), "01:02:03.456");
        assert_eq!(format_secs(-3.0), "00:00.000");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.50 KB");
    }

    #[test]
    fn test_run_id_shape() {
        let id = generate_run_id();
        assert_eq!(id.len(), 15);
        assert_eq!(id.as_bytes()[8], b'-');
        assert!(id.chars().filter(|c| *c != '-').all(|c| c.is_ascii_digit()));
    }
}
