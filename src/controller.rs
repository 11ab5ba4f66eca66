//! Configuration validation and the stateful query holder.
//!
//! The core itself is stateless values plus an evaluator; this module is the
//! thin coordination layer a query editor talks to. A [`QueryController`]
//! holds one validated [`Field`] list (immutable after construction) and one
//! current [`QueryGroup`] (replaceable, never partially mutated), and
//! notifies subscribers exactly when a replacement actually changes the
//! query.

use crate::error::{Error, Result};
use crate::model::{Field, QueryGroup};

/// Callback invoked with the new query after a real replacement.
pub type Observer = Box<dyn Fn(&QueryGroup) + Send>;

/// Validate a caller-supplied field catalog.
///
/// Structural problems are configuration errors, raised here eagerly rather
/// than surfacing later during evaluation: an empty catalog, a field with no
/// operators, a default operator that is not in its own field's list, or an
/// operator with an empty evaluator list.
pub fn validate_configuration(fields: &[Field]) -> Result<()> {
    if fields.is_empty() {
        return Err(Error::Config("field list is empty".to_string()));
    }

    for field in fields {
        if field.operators.is_empty() {
            return Err(Error::Config(format!("field `{}` declares no operators", field.name)));
        }

        for op in &field.operators {
            if op.evaluators.is_empty() {
                return Err(Error::Config(format!(
                    "operator `{}` on field `{}` has no evaluators",
                    op.name, field.name
                )));
            }
        }

        if let Some(default) = &field.default_operator {
            if !field.operators.iter().any(|op| &op.name == default) {
                return Err(Error::Config(format!(
                    "default operator `{default}` is not among the operators of field `{}`",
                    field.name
                )));
            }
        }
    }

    Ok(())
}

/// Holds the current query and its field catalog on behalf of an editor.
pub struct QueryController {
    fields: Vec<Field>,
    query: QueryGroup,
    observers: Vec<Observer>,
}

impl QueryController {
    /// Validates `fields` once and takes ownership of the initial query.
    pub fn new(fields: Vec<Field>, initial_query: QueryGroup) -> Result<Self> {
        validate_configuration(&fields)?;
        Ok(QueryController { fields, query: initial_query, observers: Vec::new() })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn current_query(&self) -> &QueryGroup {
        &self.query
    }

    /// Replace the current query.
    ///
    /// A value-equal replacement is a no-op: the stored query is untouched,
    /// no observer fires, and `false` is returned. Otherwise the query is
    /// swapped whole and every subscriber is notified once with the new
    /// value.
    pub fn replace_query(&mut self, new_query: QueryGroup) -> bool {
        if new_query == self.query {
            return false;
        }
        self.query = new_query;
        for observer in &self.observers {
            observer(&self.query);
        }
        true
    }

    /// Subscribe to query replacements.
    pub fn subscribe(&mut self, observer: impl Fn(&QueryGroup) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }
}

impl std::fmt::Debug for QueryController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryController")
            .field("fields", &self.fields)
            .field("query", &self.query)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::model::{InputType, QueryRule};
    use crate::operators::catalog;

    fn age_field() -> Field {
        Field::new("age", "Age", InputType::Number, vec![catalog::find(">").unwrap().clone()])
    }

    #[test]
    fn accepts_a_minimal_valid_catalog() {
        assert!(validate_configuration(&[age_field()]).is_ok());
    }

    #[test]
    fn rejects_empty_field_list() {
        assert!(matches!(validate_configuration(&[]), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_field_without_operators() {
        let field = Field::new("age", "Age", InputType::Number, vec![]);
        assert!(matches!(validate_configuration(&[field]), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_foreign_default_operator() {
        let field = age_field().with_default_operator("=");
        assert!(matches!(validate_configuration(&[field]), Err(Error::Config(_))));

        let ok = age_field().with_default_operator(">");
        assert!(validate_configuration(&[ok]).is_ok());
    }

    #[test]
    fn rejects_operator_without_evaluators() {
        let hollow = crate::Operator::new("hollow", "hollow", vec![]);
        let field = Field::new("age", "Age", InputType::Number, vec![hollow]);
        assert!(matches!(validate_configuration(&[field]), Err(Error::Config(_))));
    }

    #[test]
    fn construction_validates_eagerly() {
        assert!(QueryController::new(vec![], QueryGroup::all()).is_err());
        assert!(QueryController::new(vec![age_field()], QueryGroup::all()).is_ok());
    }

    #[test]
    fn replace_notifies_only_on_real_change() {
        let mut controller = QueryController::new(vec![age_field()], QueryGroup::all()).unwrap();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        controller.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        // Value-equal replacement: no-op, no notification.
        assert!(!controller.replace_query(QueryGroup::all()));
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        let changed = QueryGroup::all().with_rule(QueryRule::new("age", ">", 18));
        assert!(controller.replace_query(changed.clone()));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(controller.current_query(), &changed);

        // Replacing with the now-current value again: no notification.
        assert!(!controller.replace_query(changed));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
