//! Small helpers shared by the domain and the outer layers.

/// Cut `s` to at most `max_bytes`, backing off to the previous UTF-8
/// character boundary.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    match s.char_indices().find(|(i, c)| i + c.len_utf8() > max_bytes) {
        Some((cut, _)) => &s[..cut],
        None => s,
    }
}

/// Like [`truncate_str`], but marks a cut with a trailing `~` so that the
/// result still fits in `max_bytes`.
pub fn ellipsize(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }
    let head = truncate_str(s, max_bytes.saturating_sub(1));
    format!("{head}~")
}

/// Round to two decimal places (scores, money shown to users)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
