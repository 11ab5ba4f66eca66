//! querion: a headless rule-engine core.
//!
//! Build boolean filter queries as immutable trees of field/operator/value
//! rules nested under AND/OR groups, serialize them to a JSON wire format,
//! and evaluate them against records with ordered typed-comparison dispatch
//! and memoization. There is no UI here; this crate is the logical kernel a
//! query-builder front end constructs and consumes.
//!
//! ```
//! use querion::{Evaluator, QueryGroup, QueryRule, record};
//!
//! let query = QueryGroup::all()
//!     .with_rule(QueryRule::new("age", ">", 18))
//!     .with_group(
//!         QueryGroup::any()
//!             .with_rule(QueryRule::new("status", "=", "active"))
//!             .with_rule(QueryRule::new("status", "=", "pending")),
//!     );
//!
//! let mut evaluator = Evaluator::new();
//! let matched = evaluator.evaluate(&query, &record! { "age" => 25, "status" => "pending" }).unwrap();
//! assert!(matched);
//! ```

extern crate self as querion;

#[macro_use]
mod macros;
mod controller;
mod engine;
mod error;
mod model;
mod operators;
pub mod serial;
mod value;

pub use controller::{Observer, QueryController, validate_configuration};
pub use engine::{Evaluator, Record};
pub use error::{Error, EvalCause, Result};
pub use model::{Combinator, Field, InputType, QueryGroup, QueryRule};
pub use operators::{Comparator, Operator, catalog, comparisons};
pub use value::{Value, ValueKind};
