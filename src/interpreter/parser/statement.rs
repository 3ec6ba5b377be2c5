use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        parser::core::{ParseResult, parse_expression},
        variables::Variable,
    },
};

/// A parsed assignment statement, `VAR = expression`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The variable that receives the value.
    pub target: Variable,
    /// The right-hand side.
    pub root:   Node,
}

/// Parses a single assignment statement.
///
/// The statement is split at the first `=`. The left side, with spaces and
/// tabs removed, must be exactly one letter; it names the target variable
/// case-insensitively. Everything after the `=` is parsed with
/// [`parse_expression`], and error positions refer to the whole statement.
///
/// # Parameters
/// - `text`: One statement, without a line terminator.
///
/// # Errors
/// - [`ParseError::MissingAssignment`] if there is no `=`.
/// - [`ParseError::InvalidTarget`] if the left side is not a single letter.
/// - Any error of [`parse_expression`] for the right side.
///
/// # Example
/// ```
/// use lazycalc::interpreter::parser::statement::parse_statement;
///
/// let statement = parse_statement(" b = a + 1").unwrap();
/// assert_eq!(statement.target.letter(), 'B');
/// assert_eq!(statement.root.to_string(), "(A + 1)");
///
/// assert!(parse_statement("b + 1").is_err());
/// ```
pub fn parse_statement(text: &str) -> ParseResult<Statement> {
    let Some(eq) = text.find('=') else {
        return Err(ParseError::MissingAssignment);
    };

    let lhs = text[..eq].trim_matches(|c| c == ' ' || c == '\t');
    let mut chars = lhs.chars();
    let target = match (chars.next(), chars.next()) {
        (Some(c), None) => Variable::try_from(c).ok(),
        _ => None,
    };
    let Some(target) = target else {
        return Err(ParseError::InvalidTarget { found: lhs.to_string() });
    };

    let root = parse_expression(&text[eq + 1..], eq + 1)?;
    log::debug!("parsed statement {target} = {root}");

    Ok(Statement { target, root })
}
