/// Parse a compact duration like `45s`, `1m`, `24h`, `1h30m`, `2d`, or plain seconds.
///
/// Plain seconds are only accepted on their own; mixing a bare number with
/// unit segments (`1h30`) is rejected. Zero-length durations are rejected.
pub fn parse_duration_seconds(raw: &str) -> Option<u64> {
    let compact: String = raw.chars().filter(|ch| !ch.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    if compact.bytes().all(|byte| byte.is_ascii_digit()) {
        return compact.parse::<u64>().ok().filter(|secs| *secs > 0);
    }

    let mut total = 0_u64;
    let mut digits = String::new();

    for ch in compact.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }

        let unit = unit_seconds(ch)?;
        let amount = digits.parse::<u64>().ok()?;
        digits.clear();

        total = total.checked_add(amount.checked_mul(unit)?)?;
    }

    if !digits.is_empty() || total == 0 {
        return None;
    }

    Some(total)
}

fn unit_seconds(unit: char) -> Option<u64> {
    match unit.to_ascii_lowercase() {
        's' => Some(1),
        'm' => Some(60),
        'h' => Some(3_600),
        'd' => Some(86_400),
        _ => None,
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn parse_code_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}
