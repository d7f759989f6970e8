//! Pattern specificity scoring.
//!
//! When several grammars explain the same description, the most *literal* one
//! should win: "Buy 2, Get 1 Free" is a better explanation than the catch-all
//! "$X" grammar that also happens to match. Specificity is a pure function of
//! the pattern text (never of the runtime match):
//!
//! ```text
//!   +2  per character of pattern length
//!  +15  per capturing group
//!   +8  per non-capturing group (?:…)
//!   -8  per quantifier character (* + ?)
//!   -6  per bounded repetition {…}
//!   -4  per wildcard/dot character
//!   +5  per character class […]
//!   +3  per word-boundary marker \b
//!   +4  per anchor (^ or $)
//! ```
//!
//! Construct features count left-to-right spans (an opening delimiter to the
//! nearest close, resuming after it); character features count every
//! occurrence, escaped or not. Scores can go negative. The absolute values
//! mean nothing; only the ordering between competing patterns does.

use once_cell::sync::Lazy;

use crate::engine::cache::{DEFAULT_CAPACITY, TextCache};

static SCORES: Lazy<TextCache<i64>> = Lazy::new(|| TextCache::new(DEFAULT_CAPACITY));

/// Memoized specificity of one pattern.
pub fn specificity(pattern: &str) -> i64 {
    SCORES.get_or_insert_with(pattern, || compute(pattern))
}

/// A variant's precedence: the maximum specificity among its grammars.
pub(crate) fn precedence(patterns: &[&'static str]) -> i64 {
    patterns.iter().map(|p| specificity(p)).max().unwrap_or(0)
}

fn compute(pattern: &str) -> i64 {
    let mut score = 2 * pattern.chars().count() as i64;
    score += 15 * capturing_groups(pattern);
    score += 8 * non_capturing_groups(pattern);
    score -= 8 * count_chars(pattern, &['*', '+', '?']);
    score -= 6 * spans(pattern, '{', '}');
    score -= 4 * pattern.matches('.').count() as i64;
    score += 5 * spans(pattern, '[', ']');
    score += 3 * pattern.matches(r"\b").count() as i64;
    score += 4 * count_chars(pattern, &['^', '$']);
    score
}

/// Spans opened by `(` not immediately followed by `?:`, closed by the
/// nearest `)`. An unclosed opener counts nothing and the scan moves on.
fn capturing_groups(pattern: &str) -> i64 {
    let mut count = 0;
    let mut rest = pattern;
    while let Some(open) = rest.find('(') {
        let after = &rest[open + 1..];
        if after.starts_with("?:") {
            rest = after;
            continue;
        }
        match after.find(')') {
            Some(close) => {
                count += 1;
                rest = &after[close + 1..];
            }
            None => rest = after,
        }
    }
    count
}

/// Spans opened by `(?:`, closed by the nearest `)`.
fn non_capturing_groups(pattern: &str) -> i64 {
    let mut count = 0;
    let mut rest = pattern;
    while let Some(open) = rest.find("(?:") {
        let after = &rest[open + 3..];
        match after.find(')') {
            Some(close) => {
                count += 1;
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    count
}

fn spans(pattern: &str, open: char, close: char) -> i64 {
    let mut count = 0;
    let mut rest = pattern;
    while let Some(start) = rest.find(open) {
        let after = &rest[start + open.len_utf8()..];
        match after.find(close) {
            Some(end) => {
                count += 1;
                rest = &after[end + close.len_utf8()..];
            }
            None => break,
        }
    }
    count
}

fn count_chars(pattern: &str, wanted: &[char]) -> i64 {
    pattern.chars().filter(|c| wanted.contains(c)).count() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_weights() {
        // Each case isolates one feature on top of the +2/char baseline.
        let cases: Vec<(i64, &str)> = vec![
            (6, "abc"),
            (25, "(abc)"),          // 10 + 15
            (14, "(?:abc)"),        // 14 + 8 - 8 for the '?'
            (2, "a{2}"),            // 8 - 6
            (13, "[ab]"),           // 8 + 5
            (16, "^ab$"),           // 8 + 4 + 4
            (13, r"\babc"),         // 10 + 3
            (2, "a.b"),             // 6 - 4
            (-4, "a+"),             // 4 - 8; scores go negative
            (-2, "ab*"),            // 6 - 8
        ];
        for (expected, pattern) in cases {
            assert_eq!(specificity(pattern), expected, "pattern {pattern:?}");
        }
    }

    #[test]
    fn escaped_dollar_counts_as_an_anchor() {
        // The historical scorer counted `\$` toward the anchor weight; the
        // price grammars all lead with one, so keep that bias.
        assert_eq!(specificity(r"\$a"), 10);
        assert_eq!(specificity("za"), 4);
    }

    #[test]
    fn one_extra_capturing_group_is_worth_exactly_fifteen() {
        // Same length, so the +2/char baseline cancels out.
        assert_eq!(specificity("(abcd)") - specificity("abcdef"), 15);
    }

    #[test]
    fn one_extra_quantifier_costs_exactly_eight() {
        assert_eq!(specificity("ab+def") - specificity("abcdef"), -8);
    }

    #[test]
    fn group_walk_matches_a_left_to_right_scan() {
        // "(?:" opens a non-capturing span; the capturing walk skips only
        // that opener and still sees a capturing group nested inside.
        assert_eq!(capturing_groups("(?:(a))"), 1);
        assert_eq!(non_capturing_groups("(?:(a))"), 1);

        // A capturing span closes at the *nearest* ')'.
        assert_eq!(capturing_groups(r"(?P<v>\d+(?:\.\d+)?)"), 1);
        assert_eq!(non_capturing_groups(r"(?P<v>\d+(?:\.\d+)?)"), 1);

        // Unclosed openers count nothing.
        assert_eq!(capturing_groups("(abc"), 0);
        assert_eq!(non_capturing_groups("(?:abc"), 0);
    }

    #[test]
    fn more_literal_grammars_outscore_the_catch_all() {
        let catch_all = r"\$(?P<price>\d+\.?\d*)";
        let each = r"\$(?P<unit_price>\d+(?:\.\d+)?)\s+Each";
        let bundle = r"(?P<quantity>\d+)\s+For\s+\$(?P<volume_deals_price>\d+(?:\.\d+)?)";

        assert!(specificity(each) > specificity(catch_all));
        assert!(specificity(bundle) > specificity(catch_all));
    }
}
