use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::engine::GrammarMatch;

/// Word-form quantities the grammars capture ("When you buy TWO").
static NUMBER_WORDS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("ONE", 1.0),
        ("TWO", 2.0),
        ("THREE", 3.0),
        ("FOUR", 4.0),
        ("FIVE", 5.0),
        ("SIX", 6.0),
        ("SEVEN", 7.0),
        ("EIGHT", 8.0),
        ("NINE", 9.0),
        ("TEN", 10.0),
    ])
});

/// Resolve a captured quantity: digits first, then the word lexicon.
pub fn quantity(found: &GrammarMatch, name: &str) -> Option<f64> {
    let raw = found.group(name)?.trim();
    if let Ok(value) = raw.parse::<f64>() {
        return Some(value);
    }
    NUMBER_WORDS.get(raw.to_uppercase().as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_resolves_digits_and_words() {
        let digits = GrammarMatch::stub("", &[("quantity", "3")]);
        assert_eq!(quantity(&digits, "quantity"), Some(3.0));

        let word = GrammarMatch::stub("", &[("quantity", "two")]);
        assert_eq!(quantity(&word, "quantity"), Some(2.0));

        let unknown = GrammarMatch::stub("", &[("quantity", "DOZEN")]);
        assert_eq!(quantity(&unknown, "quantity"), None);

        let absent = GrammarMatch::stub("", &[]);
        assert_eq!(quantity(&absent, "quantity"), None);
    }
}
