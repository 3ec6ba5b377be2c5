/// Parsing errors.
///
/// Defines all error types that can occur while splitting a statement into
/// its target and right-hand side, lexing it, or building its syntax tree.
/// Parse errors are permanent: a rejected statement is never queued.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the errors that can be raised while folding an expression.
/// These are fatal for the expression that raised them; an undefined
/// variable is not one of them, it only postpones the expression.
pub mod runtime_error;
/// Session errors.
///
/// Failures of the command driver that feeds statements to the scheduler:
/// malformed command scripts, exhausted input, and I/O errors.
pub mod session_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use session_error::SessionError;
