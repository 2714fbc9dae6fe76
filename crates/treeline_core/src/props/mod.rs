//! Task property extraction from free-form block text.
//!
//! # Responsibility
//! - Recognize due-date, priority, and tag tokens inside task text and
//!   strip them from the display text.
//! - Report an explicit "nothing matched" signal so callers can skip
//!   redundant saves and re-renders.
//!
//! # Invariants
//! - Pure: the reference date is an explicit input; no hidden clock reads.
//! - Unrecognized tokens pass through into the rebuilt text in order.
//! - First match wins per token; later due-date/priority tokens overwrite
//!   earlier ones, tags accumulate without deduplication.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Block;

static DUE_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid due date regex"));
static PRIORITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^!p[1-5]$").expect("valid priority regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#\w+").expect("valid tag regex"));

const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Result of scanning block text for task property tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Text rebuilt from the unmatched tokens, space-joined in order.
    /// Equals the input when nothing matched.
    pub text: String,
    /// Last due-date token seen, formatted `YYYY-MM-DD`.
    pub due_date: Option<String>,
    /// Last priority token seen, 1..=5.
    pub priority: Option<u8>,
    /// Every tag token seen, in order, duplicates preserved.
    pub tags: Vec<String>,
    /// Whether any token matched. `false` means the caller can skip the
    /// save and the re-render.
    pub changed: bool,
}

/// Scans `text` for recognized task tokens, relative to `today`.
///
/// Token grammar, first match wins per whitespace-separated token:
/// - literal `today` / `tomorrow`: due date relative to `today`
/// - `NNNN-NN-NN` digit shape: due date taken literally, no calendar check
/// - `!p1`..`!p5`: priority
/// - `#` followed by a word character: tag, with the leading `#` stripped
pub fn extract_properties(text: &str, today: NaiveDate) -> Extraction {
    let mut due_date = None;
    let mut priority = None;
    let mut tags = Vec::new();
    let mut remaining = Vec::new();
    let mut changed = false;

    for token in text.split_whitespace() {
        if let Some(date) = parse_due_date(token, today) {
            due_date = Some(date);
            changed = true;
        } else if let Some(level) = parse_priority(token) {
            priority = Some(level);
            changed = true;
        } else if let Some(tag) = parse_tag(token) {
            tags.push(tag.to_string());
            changed = true;
        } else {
            remaining.push(token);
        }
    }

    let text = if changed {
        remaining.join(" ")
    } else {
        text.to_string()
    };

    Extraction {
        text,
        due_date,
        priority,
        tags,
        changed,
    }
}

/// Applies an extraction to a block.
///
/// The rebuilt text replaces the block text only when something matched;
/// due date and priority overwrite only when the scan produced them; tags
/// append to the block's existing tags. Returns whether the block changed.
pub fn apply_to_block(block: &mut Block, extraction: Extraction) -> bool {
    if !extraction.changed {
        return false;
    }
    block.text = extraction.text;
    if extraction.due_date.is_some() {
        block.due_date = extraction.due_date;
    }
    if extraction.priority.is_some() {
        block.priority = extraction.priority;
    }
    block.tags.extend(extraction.tags);
    true
}

fn parse_due_date(token: &str, today: NaiveDate) -> Option<String> {
    match token {
        "today" => Some(today.format(DUE_DATE_FORMAT).to_string()),
        // succ_opt only fails at NaiveDate::MAX.
        "tomorrow" => Some(
            today
                .succ_opt()
                .unwrap_or(today)
                .format(DUE_DATE_FORMAT)
                .to_string(),
        ),
        _ if DUE_DATE_RE.is_match(token) => Some(token.to_string()),
        _ => None,
    }
}

fn parse_priority(token: &str) -> Option<u8> {
    if !PRIORITY_RE.is_match(token) {
        return None;
    }
    token[2..].parse().ok()
}

/// The token must start `#` + word character; the full suffix after `#`
/// becomes the tag, punctuation included.
fn parse_tag(token: &str) -> Option<&str> {
    if TAG_RE.is_match(token) {
        Some(&token[1..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_due_date, parse_priority, parse_tag};
    use chrono::NaiveDate;

    fn reference_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 4).expect("valid reference date")
    }

    #[test]
    fn due_date_accepts_digit_shape_without_calendar_check() {
        assert_eq!(
            parse_due_date("2026-13-99", reference_day()).as_deref(),
            Some("2026-13-99")
        );
        assert_eq!(parse_due_date("26-01-01", reference_day()), None);
    }

    #[test]
    fn tomorrow_rolls_into_next_month() {
        let end_of_month = NaiveDate::from_ymd_opt(2026, 1, 31).expect("valid date");
        assert_eq!(
            parse_due_date("tomorrow", end_of_month).as_deref(),
            Some("2026-02-01")
        );
    }

    #[test]
    fn priority_outside_range_is_not_a_token() {
        assert_eq!(parse_priority("!p3"), Some(3));
        assert_eq!(parse_priority("!p0"), None);
        assert_eq!(parse_priority("!p6"), None);
        assert_eq!(parse_priority("!p12"), None);
    }

    #[test]
    fn tag_keeps_full_suffix_after_hash() {
        assert_eq!(parse_tag("#wip-2"), Some("wip-2"));
        assert_eq!(parse_tag("#"), None);
        assert_eq!(parse_tag("##x"), None);
    }
}
