/// Binary operator evaluation logic.
///
/// Applies `+ - * / ^` to two folded operands and reports division by zero.
pub mod binary;

/// Core folding logic.
///
/// Contains the recursive partial evaluator that rewrites an AST in place
/// against the variable store and reports whether it resolved.
pub mod core;

/// Built-in function evaluation.
///
/// The table of reductions callable from expressions, their lookup by name,
/// and their application to folded arguments.
pub mod function;
