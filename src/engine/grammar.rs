//! Grammar compilation and matching.
//!
//! A grammar is one regular expression describing one promotion phrasing,
//! with named capture groups for the fields its calculators need. Grammars
//! match by case-insensitive substring search; anchoring is up to the pattern
//! itself. Compilation is lazy and memoized by pattern text.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::engine::cache::{DEFAULT_CAPACITY, TextCache};

/// Compiled grammars, keyed by pattern text. A pattern that fails to compile
/// is memoized as `None` and warned about once, so a bad grammar degrades to
/// "never matches" instead of failing items.
static COMPILED: Lazy<TextCache<Option<Arc<Regex>>>> = Lazy::new(|| TextCache::new(DEFAULT_CAPACITY));

/// One successful grammar match.
///
/// Captures are copied out of the haystack so the match can cross task
/// boundaries and outlive the description it came from.
#[derive(Debug, Clone)]
pub struct GrammarMatch {
    pattern: &'static str,
    matched: String,
    groups: HashMap<String, String>,
}

impl GrammarMatch {
    /// The pattern text that produced this match.
    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    /// The full matched slice of the description.
    pub fn matched(&self) -> &str {
        &self.matched
    }

    /// A named capture group's text. Groups that did not participate in the
    /// match are absent.
    pub fn group(&self, name: &str) -> Option<&str> {
        self.groups.get(name).map(String::as_str)
    }

    /// A named capture group parsed as a number.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.group(name)?.trim().parse::<f64>().ok()
    }

    #[cfg(test)]
    pub(crate) fn stub(pattern: &'static str, groups: &[(&str, &str)]) -> Self {
        GrammarMatch {
            pattern,
            matched: String::new(),
            groups: groups.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }
}

fn compile(pattern: &'static str) -> Option<Arc<Regex>> {
    COMPILED.get_or_insert_with(pattern, || {
        match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(re) => Some(Arc::new(re)),
            Err(err) => {
                tracing::warn!(pattern, %err, "grammar failed to compile; treating it as never matching");
                None
            }
        }
    })
}

/// Search `text` for the first occurrence of `pattern`, returning the named
/// groups that participated.
pub(crate) fn search(pattern: &'static str, text: &str) -> Option<GrammarMatch> {
    let re = compile(pattern)?;
    let caps = re.captures(text)?;

    let mut groups = HashMap::new();
    for name in re.capture_names().flatten() {
        if let Some(group) = caps.name(name) {
            groups.insert(name.to_owned(), group.as_str().to_owned());
        }
    }

    let matched = caps.get(0).map(|m| m.as_str().to_owned()).unwrap_or_default();
    Some(GrammarMatch { pattern, matched, groups })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_is_case_insensitive_substring_search() {
        let found = search(r"Save\s+\$(?P<savings>\d+\.\d{2})", "Weekly: SAVE $3.00 today").unwrap();
        assert_eq!(found.matched(), "SAVE $3.00");
        assert_eq!(found.group("savings"), Some("3.00"));
        assert_eq!(found.number("savings"), Some(3.0));
    }

    #[test]
    fn non_participating_groups_are_absent() {
        let found = search(r"(?P<a>x)|(?P<b>y)", "y").unwrap();
        assert_eq!(found.group("a"), None);
        assert_eq!(found.group("b"), Some("y"));
    }

    #[test]
    fn anchored_patterns_keep_their_anchor() {
        assert!(search(r"^Deal:\s+(?P<discount>\d+)%\s+off", "Deal: 20% off").is_some());
        assert!(search(r"^Deal:\s+(?P<discount>\d+)%\s+off", "Big Deal: 20% off").is_none());
    }

    #[test]
    fn invalid_patterns_never_match() {
        assert!(search(r"Save\s+(?P<broken>[", "Save 5").is_none());
        // Memoized failure: the second call goes through the cache.
        assert!(search(r"Save\s+(?P<broken>[", "Save 5").is_none());
    }

    #[test]
    fn number_rejects_word_captures() {
        let found = search(r"buy\s+(?P<quantity>\w+)", "When you buy TWO").unwrap();
        assert_eq!(found.group("quantity"), Some("TWO"));
        assert_eq!(found.number("quantity"), None);
    }
}
