//! Winner selection across the catalog.
//!
//! Every variant gets to look at every description; there is no routing or
//! exclusion step. Each variant evaluates its own grammars on its own task,
//! keeps its best-scoring match, and the winner is picked from the joined
//! candidates with a strict `>` scan in precedence-ascending catalog order.
//! Joining in spawn order (not completion order) is what keeps the outcome
//! independent of scheduling.

use std::sync::Arc;

use futures::future::join_all;

use crate::engine::GrammarMatch;
use crate::engine::catalog::Catalog;
use crate::engine::{grammar, score};

/// Outcome of resolving one text field: the winning variant (as an index
/// into the catalog's resolution order), its match, and the match's score.
#[derive(Debug, Clone)]
pub(crate) struct Resolution {
    pub variant: usize,
    pub found: GrammarMatch,
    pub score: i64,
}

/// A single variant's best candidate: the highest-scoring grammar that
/// matches, earlier-listed grammars winning score ties.
pub(crate) fn best_for_variant(patterns: &[&'static str], text: &str) -> Option<(GrammarMatch, i64)> {
    let mut best: Option<(GrammarMatch, i64)> = None;
    for &pattern in patterns {
        let Some(found) = grammar::search(pattern, text) else { continue };
        let score = score::specificity(pattern);
        match &best {
            Some((_, top)) if score <= *top => {}
            _ => best = Some((found, score)),
        }
    }
    best
}

/// Resolve `text` against the whole catalog. `None` means no grammar in any
/// variant explains the description.
pub(crate) async fn resolve(catalog: &Arc<Catalog>, text: &str) -> Option<Resolution> {
    let mut evaluations = Vec::with_capacity(catalog.len());
    for index in 0..catalog.len() {
        let catalog = Arc::clone(catalog);
        let text = text.to_owned();
        evaluations.push(tokio::spawn(async move {
            best_for_variant(catalog.entries()[index].processor.patterns(), &text)
        }));
    }

    let mut winner: Option<Resolution> = None;
    for (variant, joined) in join_all(evaluations).await.into_iter().enumerate() {
        let candidate = match joined {
            Ok(candidate) => candidate,
            Err(err) => {
                // A panicking evaluation degrades to "this variant matched
                // nothing"; the item itself keeps going.
                tracing::warn!(variant, %err, "variant evaluation failed");
                None
            }
        };
        let Some((found, score)) = candidate else { continue };
        match &winner {
            Some(current) if score <= current.score => {}
            _ => winner = Some(Resolution { variant, found, score }),
        }
    }
    winner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Processor;
    use crate::error::Result;
    use crate::record::ItemRecord;

    struct Toy(&'static str, &'static [&'static str]);

    impl Processor for Toy {
        fn name(&self) -> &'static str {
            self.0
        }
        fn patterns(&self) -> &'static [&'static str] {
            self.1
        }
        fn calculate_deal(&self, item: &ItemRecord, _found: &GrammarMatch) -> Result<ItemRecord> {
            Ok(item.clone())
        }
        fn calculate_coupon(&self, item: &ItemRecord, _found: &GrammarMatch) -> Result<ItemRecord> {
            Ok(item.clone())
        }
    }

    fn toy_catalog(variants: Vec<Toy>) -> Arc<Catalog> {
        Arc::new(Catalog::new(variants.into_iter().map(|t| Box::new(t) as Box<dyn Processor>).collect()))
    }

    #[test]
    fn grammar_local_best_prefers_the_more_specific_pattern() {
        // Both savings grammars match; the quantity-bearing one scores higher
        // and must carry the day inside the variant.
        let patterns: &[&str] = &[
            r"Save\s+\$(?P<savings>\d+(?:\.\d{2})?)",
            r"Save\s+\$(?P<savings>\d+\.\d{2})\s+off\s+(?P<quantity>\d+)\s+",
        ];
        let (found, _) = best_for_variant(patterns, "Save $3.00 off 10 participating items").unwrap();
        assert_eq!(found.group("quantity"), Some("10"));
    }

    #[test]
    fn grammar_local_ties_go_to_the_earlier_pattern() {
        let patterns: &[&str] = &["aaa", "bbb"];
        let (found, _) = best_for_variant(patterns, "bbb aaa").unwrap();
        assert_eq!(found.pattern(), "aaa");
    }

    #[tokio::test]
    async fn the_most_specific_variant_wins() {
        let catalog = toy_catalog(vec![
            Toy("catch_all", &[r"\$(?P<price>\d+\.?\d*)"]),
            Toy("bundle", &[r"(?P<quantity>\d+)\s+For\s+\$(?P<volume_deals_price>\d+(?:\.\d+)?)"]),
        ]);

        let resolution = resolve(&catalog, "3 For $5.00").await.unwrap();
        assert_eq!(catalog.entries()[resolution.variant].processor.name(), "bundle");
        assert_eq!(resolution.found.group("quantity"), Some("3"));
    }

    #[tokio::test]
    async fn score_ties_fall_to_the_earlier_variant() {
        // Identical pattern shapes score identically; the variant registered
        // first must win however the evaluations interleave.
        let catalog = toy_catalog(vec![Toy("first", &["aaa"]), Toy("second", &["bbb"])]);

        for _ in 0..16 {
            let resolution = resolve(&catalog, "bbb aaa").await.unwrap();
            assert_eq!(catalog.entries()[resolution.variant].processor.name(), "first");
        }
    }

    #[tokio::test]
    async fn unexplained_text_resolves_to_none() {
        let catalog = toy_catalog(vec![Toy("bundle", &[r"(?P<quantity>\d+)\s+For\s+\$\d+"])]);
        assert!(resolve(&catalog, "Clearance event this week").await.is_none());
    }
}
