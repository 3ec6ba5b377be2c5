use thiserror::Error;

/// Represents all errors that can occur during lexing or parsing.
///
/// Positions are byte offsets into the full statement text, counted from
/// zero, so they can be shown under the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The statement has no `=` separating target and expression.
    #[error("statement must contain '='")]
    MissingAssignment,
    /// The left side of `=` is not a single letter.
    #[error("left side must be a single variable, found '{found}'")]
    InvalidTarget {
        /// The trimmed left side.
        found: String,
    },
    /// A character that cannot start any token.
    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter {
        /// The character encountered.
        character: char,
        /// Where it was found.
        position:  usize,
    },
    /// A numeric literal that does not fit an `f64`.
    #[error("invalid number '{literal}' at position {position}")]
    InvalidNumber {
        /// The literal text.
        literal:  String,
        /// Where the literal starts.
        position: usize,
    },
    /// A word of two or more letters not followed by `(`.
    #[error("unknown identifier '{name}' at position {position}")]
    UnknownIdentifier {
        /// The word as written.
        name:     String,
        /// Where the word starts.
        position: usize,
    },
    /// A call to a function that is not built in.
    #[error("unknown function '{name}' at position {position}")]
    UnknownFunction {
        /// The function name as written.
        name:     String,
        /// Where the name starts.
        position: usize,
    },
    /// A `)` with no open parenthesis to close.
    #[error("mismatched parentheses: unmatched ')' at position {position}")]
    UnmatchedParen {
        /// Where the `)` was found.
        position: usize,
    },
    /// A `(` that is never closed.
    #[error("mismatched parentheses: '(' at position {position} is never closed")]
    UnclosedParen {
        /// Where the `(` was found.
        position: usize,
    },
    /// An operator without enough operands.
    #[error("invalid {arity} expression at position {position}")]
    MissingOperand {
        /// `"unary"` or `"binary"`.
        arity:    &'static str,
        /// Where the operator was found.
        position: usize,
    },
    /// Two operands with no operator between them.
    #[error("unexpected operand at position {position}")]
    UnexpectedOperand {
        /// Where the extra operand was detected.
        position: usize,
    },
    /// An argument separator outside a function call.
    #[error("unexpected separator at position {position}")]
    UnexpectedSeparator {
        /// Where the separator was found.
        position: usize,
    },
    /// An empty argument slot in a function call.
    #[error("function argument missing at position {position}")]
    MissingArgument {
        /// Where the empty slot ends.
        position: usize,
    },
    /// Nothing to evaluate, either on the right side of `=` or inside `()`.
    #[error("empty expression")]
    EmptyExpression,
}
