//! The processor catalog.
//!
//! Process-wide, read-only after construction: variants are registered
//! explicitly (never discovered at runtime), each gets a precedence equal to
//! its best grammar's specificity, and the list is stably sorted by that
//! precedence once, ascending. The resolver walks the stored order with a
//! strict `>` comparison, so equal-score candidates fall to the earlier
//! variant and reruns are byte-identical.

use std::path::Path;

use crate::Processor;
use crate::engine::score;
use crate::error::Result;

pub(crate) struct Entry {
    pub processor: Box<dyn Processor>,
    pub precedence: i64,
}

/// An immutable, precedence-ordered set of processor variants.
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Catalog {
    /// Build a catalog from `processors`, keeping registration order as the
    /// tie-break between equal precedences.
    pub fn new(processors: Vec<Box<dyn Processor>>) -> Self {
        let mut entries: Vec<Entry> = processors
            .into_iter()
            .map(|processor| {
                let precedence = score::precedence(processor.patterns());
                Entry { processor, precedence }
            })
            .collect();
        entries.sort_by_key(|entry| entry.precedence);
        Catalog { entries }
    }

    /// The standard sixteen-variant catalog.
    pub fn standard() -> Self {
        Catalog::new(crate::processors::standard())
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Variant names in resolution (precedence-ascending) order.
    pub fn variant_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.processor.name()).collect()
    }

    /// Every registered grammar's pattern text, in resolution order.
    pub fn patterns(&self) -> Vec<&'static str> {
        self.entries.iter().flat_map(|entry| entry.processor.patterns().iter().copied()).collect()
    }

    /// Persist the consolidated pattern listing as pretty-printed JSON.
    ///
    /// A debugging artifact, not needed for correctness; callers decide when
    /// (and whether) to refresh it.
    pub fn write_patterns<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let listing = serde_json::to_string_pretty(&self.patterns())?;
        std::fs::write(path, listing)?;
        Ok(())
    }
}
