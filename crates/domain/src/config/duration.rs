use std::time::Duration;

/// Parses `2500ms`, `2.5s`, `1m` or a bare millisecond count.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let s = input.trim();
    let (number, scale_ms) = if let Some(n) = s.strip_suffix("ms") {
        (n, 1.0)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1_000.0)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60_000.0)
    } else {
        (s, 1.0)
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| format!("Invalid duration '{}'", input))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("Invalid duration '{}'", input));
    }

    Ok(Duration::from_micros((value * scale_ms * 1_000.0).round() as u64))
}
