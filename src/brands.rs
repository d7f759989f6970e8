//! Store-brand classification.
//!
//! Retail banners each carry a fixed set of private-label lines; an item is a
//! store brand when its title mentions any of them, whichever banner the feed
//! came from. Titles repeat heavily inside a feed, so verdicts are memoized.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::engine::cache::{DEFAULT_CAPACITY, TextCache};

/// Private-label lines by banner, lowercased for the substring check.
static STORE_BRANDS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        (
            "marianos",
            &["private selection", "kroger", "simple truth", "simple truth organic"] as &[&str],
        ),
        (
            "target",
            &["deal worthy", "good & gather", "market pantry", "favorite day", "kindfull", "smartly", "up & up"]
                as &[&str],
        ),
        (
            "jewel",
            &[
                "lucerne",
                "signature select",
                "o organics",
                "open nature",
                "waterfront bistro",
                "primo taglio",
                "soleil",
                "value corner",
                "ready meals",
            ] as &[&str],
        ),
        (
            "walmart",
            &[
                "clear american",
                "great value",
                "home bake value",
                "marketside",
                "co squared",
                "best occasions",
                "mash-up coffee",
                "world table",
            ] as &[&str],
        ),
    ])
});

static VERDICTS: Lazy<TextCache<&'static str>> = Lazy::new(|| TextCache::new(DEFAULT_CAPACITY));

/// `"yes"` when the title names any known private-label line, else `"no"`.
pub(crate) fn classify(title: &str) -> &'static str {
    VERDICTS.get_or_insert_with(title, || {
        let lower = title.to_lowercase();
        let hit = STORE_BRANDS.values().flat_map(|brands| brands.iter()).any(|brand| lower.contains(brand));
        if hit { "yes" } else { "no" }
    })
}
