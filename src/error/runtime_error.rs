use thiserror::Error;

use crate::ast::Function;

/// Represents the errors that permanently abort the evaluation of an
/// expression.
///
/// None of these depend on variables that may be defined later, so an
/// expression that raises one is discarded instead of retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Attempted division by zero.
    #[error("division by zero")]
    DivisionByZero,
    /// A function call node without any argument.
    #[error("{function} needs at least one argument")]
    NoArguments {
        /// The function that was called.
        function: Function,
    },
    /// An argument count that cannot be represented exactly as an `f64`.
    #[error("{function} received too many arguments ({count})")]
    TooManyArguments {
        /// The function that was called.
        function: Function,
        /// The number of arguments.
        count:    usize,
    },
}
