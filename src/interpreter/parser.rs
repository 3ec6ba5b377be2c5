/// Core expression parsing.
///
/// Contains the two-stack (shunting-yard) parser that turns the tokens of a
/// right-hand side into an AST, including function-call argument grouping.
pub mod core;

/// Operator classification.
///
/// Maps tokens to unary or binary operators and defines their precedence and
/// associativity.
pub mod operator;

/// Statement parsing.
///
/// Splits a `VAR = expression` statement into its target variable and the
/// expression text, and hands the latter to the expression parser.
pub mod statement;
