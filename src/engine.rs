//! Query evaluation engine.
//!
//! This module owns the *runtime* side of the crate: taking an immutable
//! [`QueryGroup`](crate::QueryGroup) tree and a [`Record`] and producing one
//! boolean.
//!
//! ## How the parts work together
//!
//! ```text
//! QueryGroup + Record
//!         │
//!         v
//! Evaluator::evaluate            (evaluate.rs)
//!   - vacuous truth for empty groups
//!   - AND/OR walk, depth-first, left-to-right, short-circuiting
//!         │
//!         v  per leaf rule
//!   eval_rule
//!   - record lookup (missing key -> Null operand)
//!   - cache probe via leaf_key   (cache.rs)
//!   - operator resolution (custom first, then built-in catalog)
//!   - ordered evaluator dispatch (operators/)
//!         │
//!         v
//!        bool  (or Error::Evaluation when no evaluator applies)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `evaluate.rs`: the recursive walk, leaf dispatch and the public
//!   [`Evaluator`] type.
//! - `cache.rs`: memoization keyed by a SHA-256 digest of the semantic
//!   identity of a leaf, (field, operator, rule value, data value).
//!
//! ## Concurrency
//!
//! Evaluation is synchronous and an [`Evaluator`] is a single-threaded
//! object (`&mut self`); the cache is its only state. Query trees, records
//! and operator catalogs are immutable and freely shareable.
//!
//! ## Debugging
//!
//! Set `QUERION_DEBUG_EVAL=1` to print dispatch and cache traces.

#[path = "engine/cache.rs"]
mod cache;
#[path = "engine/evaluate.rs"]
mod evaluate;

pub use evaluate::{Evaluator, Record};
