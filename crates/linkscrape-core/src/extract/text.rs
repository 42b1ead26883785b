use lazy_static::lazy_static;
use regex::Regex;
use scraper::ElementRef;

lazy_static! {
    static ref COUNT_PATTERN: Regex = Regex::new(r"(\d[\d,.]*)\s*([KkMm])?\b").unwrap();
    static ref YEAR_PATTERN: Regex = Regex::new(r"\b(19|20)\d{2}\b").unwrap();
}

/// Visible text of an element with whitespace collapsed
pub fn element_text(el: ElementRef<'_>) -> String {
    collapse(&el.text().collect::<Vec<_>>().join(" "))
}

/// Like [`element_text`] but `None` when nothing is left after trimming
pub fn non_empty_text(el: ElementRef<'_>) -> Option<String> {
    let text = element_text(el);
    if text.is_empty() { None } else { Some(text) }
}

pub fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse "1,234 followers", "500+ connections" or "12K followers"
pub fn parse_count(s: &str) -> Option<u64> {
    let caps = COUNT_PATTERN.captures(s)?;
    let digits = caps.get(1)?.as_str();

    match caps.get(2).map(|m| m.as_str().to_ascii_uppercase()) {
        Some(suffix) => {
            let value: f64 = digits.replace(',', "").parse().ok()?;
            let multiplier = if suffix == "K" { 1_000.0 } else { 1_000_000.0 };
            Some((value * multiplier).round() as u64)
        }
        None => digits
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect::<String>()
            .parse()
            .ok(),
    }
}

/// Split "Acme Corp · Full-time" into its head and optional tail
pub fn split_bullet(s: &str) -> (String, Option<String>) {
    match s.split_once(" · ") {
        Some((head, tail)) => (head.trim().to_string(), non_empty(tail)),
        None => (s.trim().to_string(), None),
    }
}

/// Split "Jan 2020 - Present" into start and end
pub fn split_range(s: &str) -> Option<(String, Option<String>)> {
    let (start, end) = s
        .split_once(" - ")
        .or_else(|| s.split_once(" – "))?;
    let start = start.trim();
    if start.is_empty() {
        return None;
    }
    Some((start.to_string(), non_empty(end)))
}

pub fn looks_like_date_range(s: &str) -> bool {
    YEAR_PATTERN.is_match(s) && split_range(s).is_some()
}

pub fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}
