/// The evaluator module folds syntax trees against the variable store.
///
/// Evaluation is partial: every subtree whose value is known is replaced by
/// a constant, and subtrees that depend on an undefined variable are kept so
/// a later attempt can resume from them.
///
/// # Responsibilities
/// - Folds unary, binary and function-call nodes in place.
/// - Reports the first undefined variable that blocks a tree.
/// - Reports arithmetic errors such as division by zero.
pub mod evaluator;
/// A queued assignment: its sequence number, target and current tree.
pub mod expression;
/// The lexer module tokenizes the right-hand side of a statement.
///
/// Produces numbers, single-letter words, function-call openers, operators,
/// parentheses and argument separators, each with its byte position. Spaces
/// and tabs are skipped; anything else is a lexical error.
pub mod lexer;
/// The parser module builds syntax trees from statements.
///
/// A shunting-yard pass turns the token stream into a tree, tracking the
/// argument lists of function calls on the operator stack. Malformed input is
/// rejected with a positioned error.
pub mod parser;
/// The round-robin evaluation queue.
///
/// Holds the pending expressions and the variable store, tries every pending
/// expression once per pass, and tells the caller when a pass made no
/// progress.
pub mod scheduler;
/// The `R`/`C` command driver used by the command-line front end.
pub mod session;
/// Single-letter variable names and the store of their values.
pub mod variables;
