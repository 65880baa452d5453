//! Natural ordering for filenames with embedded numbers

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

static DIGITS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// One run of a natural sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// Lower-cased non-digit run (may be empty)
    Text(String),
    /// Digit run with leading zeros stripped
    Number(String),
}

impl Chunk {
    fn number(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        Self::Number(if trimmed.is_empty() { "0" } else { trimmed }.to_string())
    }
}

impl Ord for Chunk {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            // Normalized digit strings: longer means larger
            (Self::Number(a), Self::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for Chunk {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Split a string into alternating text and number runs.
///
/// The key always starts and ends with a text run, possibly empty, so
/// runs at the same position in two keys are always the same kind.
#[must_use]
pub fn natural_key(s: &str) -> Vec<Chunk> {
    let mut key = Vec::new();
    let mut last = 0;

    for m in DIGITS_REGEX.find_iter(s) {
        key.push(Chunk::Text(s[last..m.start()].to_lowercase()));
        key.push(Chunk::number(m.as_str()));
        last = m.end();
    }
    key.push(Chunk::Text(s[last..].to_lowercase()));

    key
}

/// Compare two strings in natural order
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a).cmp(&natural_key(b))
}

/// Sort strings in place in natural order. The sort is stable.
pub fn natural_sort<S: AsRef<str>>(items: &mut [S]) {
    items.sort_by_cached_key(|s| natural_key(s.as_ref()));
}
