//! Promotion extraction engine.
//!
//! This module is the *public entry point* for the promotion engine. The
//! implementation is split into focused submodules under `src/engine/` while
//! keeping public paths stable (for example `crate::engine::Catalog` and
//! `crate::engine::QaStats`).
//!
//! ## How the parts work together
//!
//! At a high level, a batch run is a pipeline:
//!
//! ```text
//! variants (all) ──┐
//!                  │  Catalog::new               (catalog.rs)
//!                  └── precedence-ascending order ──┐
//!                                                   │
//! items ── process_batch ─── one task per item ─────┤  (scheduler.rs)
//!                                                   v
//!                                     process_item (pipeline.rs)
//!                                       - deal pass + void rule
//!                                       - coupon pass
//!                                       - store-brand classify
//!                                                   │
//!                                                   v
//!                                         resolve (resolve.rs)
//!                                           - per-variant fan-out
//!                                           - grammar-local best
//!                                             (grammar.rs, score.rs)
//!                                           - strict `>` winner scan
//!                                                   │
//!                                                   v
//!                              BatchResult { records, failures, stats }
//! ```
//!
//! The engine leans on **specificity**: every grammar gets a syntax-derived
//! score, a variant's precedence is its best score, and both grammar-local
//! and cross-variant winners are picked by score with first-seen tie-breaks.
//! That keeps resolution deterministic no matter how evaluation tasks
//! interleave.
//!
//! ## Responsibilities by module
//!
//! - `cache.rs`: the bounded memo map shared by pattern compilation, scoring
//!   and brand classification.
//! - `grammar.rs`: pattern compilation plus named-group extraction.
//! - `score.rs`: the specificity scorer and per-variant precedence.
//! - `catalog.rs`: the registered variants in resolution order, plus the
//!   pattern-listing side artifact.
//! - `resolve.rs`: picks the winning (variant, match) pair for one text.
//! - `pipeline.rs`: the per-item stages (deal, coupon, brand).
//! - `scheduler.rs`: bounded batch fan-out, failure isolation, QA counters.
//!
//! ## Public surface
//!
//! Most code interacts with the engine via:
//!
//! - [`Catalog`]
//! - [`BatchResult`] (with [`ItemFailure`] and [`QaStats`])
//! - [`specificity`] (exposed for grammar authoring; higher wins)
//!
//! ## Adding a new variant
//!
//! - Add a file under `src/processors/`, implement `Processor`, and register
//!   it in `processors::standard()`.
//! - Check the new grammars' scores against their neighbors (`specificity`);
//!   a catch-all that outscores a specific phrasing will shadow it.

#[path = "engine/cache.rs"]
pub(crate) mod cache;
#[path = "engine/catalog.rs"]
pub(crate) mod catalog;
#[path = "engine/grammar.rs"]
pub(crate) mod grammar;
#[path = "engine/pipeline.rs"]
pub(crate) mod pipeline;
#[path = "engine/resolve.rs"]
pub(crate) mod resolve;
#[path = "engine/scheduler.rs"]
pub(crate) mod scheduler;
#[path = "engine/score.rs"]
pub(crate) mod score;

pub use catalog::Catalog;
pub use grammar::GrammarMatch;
pub use scheduler::{BatchResult, ItemFailure, QaStats, worker_count};
pub use score::specificity;
