//! Formatting utilities used for CLI and export outputs.

/// Render a quantity without trailing zeros: 5 → "5", 2.50 → "2.5".
/// Six decimals at most, so float noise never reaches the CSV.
pub fn format_quantity(q: f64) -> String {
    let s = format!("{:.6}", q);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Shorten `s` to `max` characters, ending with "…" when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Remove ANSI color sequences (for width computations).
pub fn strip_ansi(s: &str) -> String {
    match regex::Regex::new(r"\x1B\[[0-9;]*[mK]") {
        Ok(re) => re.replace_all(s, "").into_owned(),
        Err(_) => s.to_string(),
    }
}
