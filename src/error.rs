//! Error taxonomy for the query core.
//!
//! Three kinds of failure can cross the crate boundary:
//!
//! - [`Error::Config`]: a caller-supplied field/operator catalog is
//!   structurally invalid. Raised eagerly at controller construction,
//!   never deferred to evaluation.
//! - [`Error::Evaluation`]: a leaf rule could not be resolved to a definite
//!   boolean. Carries the rule's field/operator context plus an
//!   [`EvalCause`] explaining which stage of dispatch failed.
//! - [`Error::Format`]: a JSON document does not describe a query group.
//!
//! Everything else is deliberately a *non*-error: a field name missing from
//! a record, an empty group, a short `between` operand list, or an invalid
//! `matches` pattern all evaluate to a boolean instead of failing.

use thiserror::Error;

use crate::value::ValueKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A field/operator catalog failed structural validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A leaf rule could not produce a definite boolean.
    #[error("cannot evaluate rule on field `{field}` with operator `{operator}`: {cause}")]
    Evaluation {
        /// Field key of the failing rule.
        field: String,
        /// Operator name of the failing rule.
        operator: String,
        /// What went wrong during dispatch.
        cause: EvalCause,
    },

    /// A JSON document is not a valid query group.
    #[error("malformed query document: {0}")]
    Format(String),
}

/// Why a leaf rule failed to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalCause {
    /// The rule's operator name matched nothing in the effective registry.
    #[error("operator is not registered")]
    UnknownOperator,

    /// Every evaluator in the operator's ordered list declined both operands.
    #[error("no evaluator applies to operand kinds ({data_kind}, {rule_kind})")]
    NoApplicableEvaluator {
        /// Kind of the value resolved from the record.
        data_kind: ValueKind,
        /// Kind of the rule's comparison operand.
        rule_kind: ValueKind,
    },
}

impl Error {
    /// Shorthand for an [`Error::Evaluation`] carrying rule context.
    pub(crate) fn evaluation(field: &str, operator: &str, cause: EvalCause) -> Self {
        Error::Evaluation { field: field.to_string(), operator: operator.to_string(), cause }
    }
}
