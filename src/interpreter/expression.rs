use std::fmt;

use crate::{
    ast::Node,
    interpreter::{
        evaluator::core::{EvalResult, Fold, simplify},
        parser::statement::Statement,
        variables::{Variable, VariableStore},
    },
};

/// Sequence number of an expression, assigned in reading order from 1.
///
/// Used only for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpressionId(pub u64);

impl fmt::Display for ExpressionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One parsed assignment waiting to be evaluated.
///
/// The expression owns its syntax tree. Each evaluation attempt folds the
/// tree in place, so work done in an attempt that ends up blocked is kept
/// for the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    id:     ExpressionId,
    target: Variable,
    root:   Node,
}

impl Expression {
    /// Wraps a parsed statement.
    #[must_use]
    pub fn new(id: ExpressionId, statement: Statement) -> Self {
        Self { id,
               target: statement.target,
               root: statement.root }
    }

    /// The sequence number of the expression.
    #[must_use]
    pub const fn id(&self) -> ExpressionId {
        self.id
    }

    /// The variable the expression assigns.
    #[must_use]
    pub const fn target(&self) -> Variable {
        self.target
    }

    /// The current, possibly partially folded, tree.
    #[must_use]
    pub const fn root(&self) -> &Node {
        &self.root
    }

    /// Folds the tree against `vars`.
    ///
    /// # Errors
    /// Propagates the [`RuntimeError`](crate::error::RuntimeError) of
    /// [`simplify`].
    pub fn evaluate(&mut self, vars: &VariableStore) -> EvalResult<Fold> {
        simplify(&mut self.root, vars)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {} = {}", self.id, self.target, self.root)
    }
}
