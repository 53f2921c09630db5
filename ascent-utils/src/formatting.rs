/// Format seconds into a compact human-readable duration (e.g. 59s, 1m, 1h 30m, 1d 2h).
pub fn format_compact_duration(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    // Past a day the smaller units are noise.
    let parts: Vec<(u64, char)> = if days > 0 {
        vec![(days, 'd'), (hours, 'h')]
    } else {
        vec![(hours, 'h'), (minutes, 'm'), (seconds, 's')]
    };

    let rendered = parts
        .into_iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect::<Vec<_>>()
        .join(" ");

    if rendered.is_empty() {
        "0s".to_owned()
    } else {
        rendered
    }
}

/// Render exp progress toward the next level as a fixed-width bar.
pub fn exp_progress_bar(exp: i64, threshold: i64, width: usize) -> String {
    let threshold = threshold.max(1);
    let clamped = exp.clamp(0, threshold);
    let filled = usize::try_from(clamped * width as i64 / threshold).unwrap_or(0);

    format!(
        "{}{} {}/{}",
        "\u{25B0}".repeat(filled),
        "\u{25B1}".repeat(width.saturating_sub(filled)),
        exp.max(0),
        threshold
    )
}

/// Group digits with thin separators (1234567 -> "1,234,567").
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if value < 0 {
        format!("-{out}")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{exp_progress_bar, format_compact_duration, format_count};

    #[test]
    fn compact_duration_formatting() {
        assert_eq!(format_compact_duration(0), "0s");
        assert_eq!(format_compact_duration(59), "59s");
        assert_eq!(format_compact_duration(60), "1m");
        assert_eq!(format_compact_duration(61), "1m 1s");
        assert_eq!(format_compact_duration(3600), "1h");
        assert_eq!(format_compact_duration(3670), "1h 1m 10s");
        assert_eq!(format_compact_duration(3605), "1h 5s");
        assert_eq!(format_compact_duration(86400), "1d");
        assert_eq!(format_compact_duration(90061), "1d 1h");
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(exp_progress_bar(0, 100, 4), "\u{25B1}\u{25B1}\u{25B1}\u{25B1} 0/100");
        assert_eq!(exp_progress_bar(50, 100, 4), "\u{25B0}\u{25B0}\u{25B1}\u{25B1} 50/100");
        assert_eq!(
            exp_progress_bar(250, 100, 4),
            "\u{25B0}\u{25B0}\u{25B0}\u{25B0} 250/100"
        );
    }

    #[test]
    fn counts_are_grouped() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(100_010), "100,010");
        assert_eq!(format_count(-1_234_567), "-1,234,567");
    }
}
