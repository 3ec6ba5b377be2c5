use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::{binary::eval_binary, function},
        variables::{Variable, VariableStore},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing a failure that retrying cannot fix.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The outcome of folding a tree that did not fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fold {
    /// The tree folded to a constant with this value.
    Resolved(f64),
    /// The tree still depends on this undefined variable. It is the first
    /// one met in left-to-right order; others may be missing too.
    Blocked(Variable),
}

impl Fold {
    /// Returns the value of a resolved fold.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::Blocked(_) => None,
        }
    }

    /// Combines two folds of sibling subtrees, keeping the first blocker.
    const fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Blocked(var), _) | (Self::Resolved(_), Self::Blocked(var)) => Self::Blocked(var),
            (Self::Resolved(_), Self::Resolved(_)) => other,
        }
    }
}

/// Folds `node` as far as the variable store allows, rewriting it in place.
///
/// Every subtree whose value becomes known is replaced by a
/// [`Node::Const`], dropping the subtree. Subtrees that still depend on an
/// undefined variable are left as they are, so a later call resumes from the
/// partially folded tree instead of starting over.
///
/// - `Const` resolves to its value.
/// - `Variable` resolves and is replaced when defined, otherwise blocks.
/// - `UnaryOp` resolves when its operand does.
/// - `BinaryOp` folds both children, even when the left one blocks, and
///   resolves when both do.
/// - `FuncCall` folds every argument and resolves when all of them do.
///
/// Calling this again on a fully folded tree is harmless: a constant
/// resolves to itself.
///
/// # Errors
/// Returns [`RuntimeError::DivisionByZero`] when a division with a known
/// zero divisor is folded, and the errors of [`function::apply`]. The tree
/// may be partially rewritten when an error is returned.
///
/// # Example
/// ```
/// use lazycalc::interpreter::{
///     evaluator::core::{Fold, simplify},
///     parser::core::parse_expression,
///     variables::{Variable, VariableStore},
/// };
///
/// let a = Variable::try_from('a').unwrap();
/// let mut store = VariableStore::new();
/// let mut node = parse_expression("2 * 3 + a", 0).unwrap();
///
/// assert_eq!(simplify(&mut node, &store), Ok(Fold::Blocked(a)));
/// assert_eq!(node.to_string(), "(6 + A)");
///
/// store.set(a, 4.0);
/// assert_eq!(simplify(&mut node, &store), Ok(Fold::Resolved(10.0)));
/// assert_eq!(node.to_string(), "10");
/// ```
pub fn simplify(node: &mut Node, vars: &VariableStore) -> EvalResult<Fold> {
    let value = match node {
        Node::Const(value) => return Ok(Fold::Resolved(*value)),
        Node::Variable(var) => match vars.get(*var) {
            Some(value) => value,
            None => return Ok(Fold::Blocked(*var)),
        },
        Node::UnaryOp { op, operand } => match simplify(operand, vars)? {
            Fold::Resolved(value) => op.apply(value),
            blocked @ Fold::Blocked(_) => return Ok(blocked),
        },
        Node::BinaryOp { op, left, right } => {
            let left = simplify(left, vars)?;
            let right = simplify(right, vars)?;
            match (left, right) {
                (Fold::Resolved(a), Fold::Resolved(b)) => eval_binary(*op, a, b)?,
                _ => return Ok(left.and(right)),
            }
        },
        Node::FuncCall { function, args } => {
            let mut values = Vec::with_capacity(args.len());
            let mut fold = Fold::Resolved(0.0);
            for arg in args.iter_mut() {
                let arg_fold = simplify(arg, vars)?;
                if let Fold::Resolved(value) = arg_fold {
                    values.push(value);
                }
                fold = fold.and(arg_fold);
            }
            if let Fold::Blocked(_) = fold {
                return Ok(fold);
            }
            function::apply(*function, &values)?
        },
    };

    log::trace!("folded {node} to {value}");
    *node = Node::Const(value);
    Ok(Fold::Resolved(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::parser::core::parse_expression;

    fn var(c: char) -> Variable {
        Variable::try_from(c).unwrap()
    }

    fn fold(source: &str, vars: &VariableStore) -> (EvalResult<Fold>, Node) {
        let mut node = parse_expression(source, 0).unwrap();
        let result = simplify(&mut node, vars);
        (result, node)
    }

    #[test]
    fn literal_trees_fold_in_one_call() {
        let store = VariableStore::new();
        for (source, expected) in [("2+3*4", 14.0),
                                   ("2^3^2", 512.0),
                                   ("10-3-2", 5.0),
                                   ("-5+3", -2.0),
                                   ("3*-2", -6.0),
                                   ("3--2", 5.0),
                                   ("SUM(1;2;3)", 6.0),
                                   ("AVG(2;4)", 3.0),
                                   ("MIN(5;-1;2)", -1.0),
                                   ("MAX(5;-1;2)", 5.0),
                                   ("PRD(2;3;4)", 24.0),
                                   ("(1+2)*(3+4)/7", 3.0),
                                   ("+2.5", 2.5)]
        {
            let (result, node) = fold(source, &store);
            assert_eq!(result, Ok(Fold::Resolved(expected)), "{source}");
            assert_eq!(node, Node::Const(expected), "{source}");
        }
    }

    #[test]
    fn literal_trees_ignore_the_store() {
        let mut store = VariableStore::new();
        for letter in Variable::all() {
            store.set(letter, 100.0);
        }
        assert_eq!(fold("1 + 2", &store).0, Ok(Fold::Resolved(3.0)));
    }

    #[test]
    fn undefined_variable_blocks_and_keeps_progress() {
        let store = VariableStore::new();
        let (result, node) = fold("(1 + 2) * b + SUM(4; 5; c)", &store);

        assert_eq!(result, Ok(Fold::Blocked(var('b'))));
        assert_eq!(node.to_string(), "((3 * B) + SUM(4; 5; C))");
    }

    #[test]
    fn both_children_are_folded_even_when_left_blocks() {
        let store = VariableStore::new();
        let (result, node) = fold("x + 2 * 3", &store);

        assert_eq!(result, Ok(Fold::Blocked(var('x'))));
        assert_eq!(node.to_string(), "(X + 6)");
    }

    #[test]
    fn first_blocker_is_reported() {
        let mut store = VariableStore::new();
        assert_eq!(fold("MAX(1; q; p)", &store).0, Ok(Fold::Blocked(var('q'))));
        assert_eq!(fold("1 + r * s", &store).0, Ok(Fold::Blocked(var('r'))));

        store.set(var('q'), 1.0);
        assert_eq!(fold("MAX(1; q; p)", &store).0, Ok(Fold::Blocked(var('p'))));
    }

    #[test]
    fn resumes_after_definition() {
        let mut store = VariableStore::new();
        let mut node = parse_expression("-(a * 2) + AVG(a; 4)", 0).unwrap();

        assert_eq!(simplify(&mut node, &store), Ok(Fold::Blocked(var('a'))));
        store.set(var('a'), 3.0);
        assert_eq!(simplify(&mut node, &store), Ok(Fold::Resolved(-2.5)));
        assert_eq!(node, Node::Const(-2.5));
    }

    #[test]
    fn resimplifying_a_constant_is_idempotent() {
        let store = VariableStore::new();
        let mut node = parse_expression("SUM(1; 2) ^ 2", 0).unwrap();

        assert_eq!(simplify(&mut node, &store), Ok(Fold::Resolved(9.0)));
        assert_eq!(simplify(&mut node, &store), Ok(Fold::Resolved(9.0)));
        assert_eq!(node, Node::Const(9.0));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let store = VariableStore::new();
        assert_eq!(fold("1/0", &store).0, Err(RuntimeError::DivisionByZero));
        assert_eq!(fold("1/(2-2)", &store).0, Err(RuntimeError::DivisionByZero));
    }

    #[test]
    fn division_by_a_variable_waits_for_it() {
        let mut store = VariableStore::new();
        let mut node = parse_expression("1 / d", 0).unwrap();

        assert_eq!(simplify(&mut node, &store), Ok(Fold::Blocked(var('d'))));
        store.set(var('d'), 0.0);
        assert_eq!(simplify(&mut node, &store), Err(RuntimeError::DivisionByZero));
    }

    #[test]
    fn empty_call_fails() {
        let store = VariableStore::new();
        let mut node = Node::FuncCall { function: crate::ast::Function::Sum,
                                        args:     Vec::new(), };
        assert!(matches!(simplify(&mut node, &store), Err(RuntimeError::NoArguments { .. })));
    }

    #[test]
    fn fold_combination_keeps_the_first_blocker() {
        let a = Fold::Blocked(var('a'));
        let b = Fold::Blocked(var('b'));
        assert_eq!(a.and(b), a);
        assert_eq!(Fold::Resolved(1.0).and(b), b);
        assert_eq!(Fold::Resolved(1.0).and(Fold::Resolved(2.0)), Fold::Resolved(2.0));
        assert_eq!(Fold::Resolved(1.0).value(), Some(1.0));
        assert_eq!(a.value(), None);
    }
}
