//! Vote parsing for AI proposals.
//!
//! These functions extract a structured vote from free-form AI proposal
//! text. They are pure domain logic: no I/O, just text pattern matching.
//!
//! | Function | Recognises |
//! |----------|------------|
//! | [`parse_vote_keyword`] | JSON `{"vote": "..."}`, APPROVE / SUPPORT / REJECT / OPPOSE / ABSTAIN |
//! | [`parse_confidence`] | JSON `{"confidence": 0.8}`, `confidence: 0.8`, `80%` |

use super::vote::VoteChoice;

/// Parse an explicit vote from proposal text.
///
/// Negated forms ("NOT APPROVE", "CANNOT SUPPORT") count against. When the
/// text contains both approving and rejecting keywords the result is
/// ambiguous and `None` is returned.
///
/// # Examples
///
/// ```
/// use boardroom_domain::quorum::{VoteChoice, parse_vote_keyword};
///
/// assert_eq!(parse_vote_keyword(r#"{"vote": "against"}"#), Some(VoteChoice::Against));
/// assert_eq!(parse_vote_keyword("I APPROVE this hire."), Some(VoteChoice::For));
/// assert_eq!(parse_vote_keyword("We cannot support this."), Some(VoteChoice::Against));
/// assert_eq!(parse_vote_keyword("Let's discuss next quarter."), None);
/// ```
pub fn parse_vote_keyword(response: &str) -> Option<VoteChoice> {
    if let Some(vote) = json_field(response, "vote").and_then(|v| v.as_str().map(str::to_string))
    {
        match vote.to_lowercase().as_str() {
            "for" | "approve" | "yes" => return Some(VoteChoice::For),
            "against" | "reject" | "no" => return Some(VoteChoice::Against),
            "abstain" => return Some(VoteChoice::Abstain),
            _ => {}
        }
    }

    let upper = response.to_uppercase();

    let negated = ["NOT APPROVE", "CANNOT APPROVE", "DON'T APPROVE", "NOT SUPPORT", "CANNOT SUPPORT"]
        .iter()
        .any(|k| upper.contains(k));
    let approving = !negated && (upper.contains("APPROVE") || upper.contains("SUPPORT"));
    let rejecting = negated || upper.contains("REJECT") || upper.contains("OPPOSE");

    match (approving, rejecting) {
        (true, false) => Some(VoteChoice::For),
        (false, true) => Some(VoteChoice::Against),
        (false, false) if upper.contains("ABSTAIN") => Some(VoteChoice::Abstain),
        _ => None,
    }
}

/// Parse a confidence value (0.0 to 1.0) from proposal text.
///
/// # Examples
///
/// ```
/// use boardroom_domain::quorum::parse_confidence;
///
/// assert_eq!(parse_confidence(r#"{"confidence": 0.75}"#), Some(0.75));
/// assert_eq!(parse_confidence("Confidence: 0.4"), Some(0.4));
/// assert_eq!(parse_confidence("I'm about 90% sure"), Some(0.9));
/// assert_eq!(parse_confidence("no idea"), None);
/// ```
pub fn parse_confidence(response: &str) -> Option<f64> {
    if let Some(value) = json_field(response, "confidence").and_then(|v| v.as_f64()) {
        return Some(normalize(value));
    }

    let lower = response.to_lowercase();
    if let Some(pos) = lower.find("confidence") {
        let rest = &lower[pos + "confidence".len()..];
        let number: String = rest
            .trim_start_matches(|c: char| c == ':' || c == '=' || c.is_whitespace())
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        if let Ok(value) = number.parse::<f64>() {
            return Some(normalize(value));
        }
    }

    for word in response.split_whitespace() {
        if let Some(num) = word
            .trim_end_matches(|c: char| !c.is_ascii_digit() && c != '%')
            .strip_suffix('%')
            && let Ok(value) = num.parse::<f64>()
        {
            return Some(normalize(value / 100.0));
        }
    }

    None
}

fn normalize(value: f64) -> f64 {
    // Accept both 0..1 and 0..100 scales
    let value = if value > 1.0 { value / 100.0 } else { value };
    value.clamp(0.0, 1.0)
}

fn json_field(response: &str, field: &str) -> Option<serde_json::Value> {
    let start = response.find('{')?;
    let end = response[start..].rfind('}')?;
    let parsed: serde_json::Value = serde_json::from_str(&response[start..start + end + 1]).ok()?;
    parsed.get(field).cloned()
}
