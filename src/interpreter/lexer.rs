use logos::Logos;

use crate::{error::ParseError, interpreter::parser::core::ParseResult};

/// Represents a lexical token of a right-hand side expression.
///
/// Spaces and tabs are skipped. Any character that cannot start one of
/// these tokens makes the lexer fail, which is reported as
/// [`ParseError::InvalidCharacter`].
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t]+")]
pub enum Token {
    /// Numeric literal such as `42`, `3.25` or `5.`. A second point ends the
    /// literal.
    #[regex(r"[0-9]+(\.[0-9]*)?", parse_number)]
    Number(f64),
    /// A word that is not directly followed by `(`: a variable when it is a
    /// single letter, an error otherwise.
    #[regex(r"[a-zA-Z]+", |lex| lex.slice().to_string())]
    Word(String),
    /// A name of two or more letters directly followed by `(`, opening a
    /// function call. Carries the name without the parenthesis.
    #[regex(r"[a-zA-Z][a-zA-Z]+\(", |lex| {
        let slice = lex.slice();
        slice[..slice.len() - 1].to_string()
    })]
    Call(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// Argument separator, `;` or `,`.
    #[token(";")]
    #[token(",")]
    Separator,
}

impl Token {
    /// Returns whether a `+` or `-` following this token is a unary operator.
    ///
    /// That is the case after an opening parenthesis, a call opener, an
    /// argument separator, or another operator. The start of the expression
    /// (no previous token) is handled by the caller.
    #[must_use]
    pub const fn expects_operand(&self) -> bool {
        matches!(self,
                 Self::LParen
                 | Self::Call(_)
                 | Self::Separator
                 | Self::Plus
                 | Self::Minus
                 | Self::Star
                 | Self::Slash
                 | Self::Caret)
    }

    /// Returns whether the token begins an operand: a number, a word, a call
    /// opener or an opening parenthesis.
    #[must_use]
    pub const fn starts_operand(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Word(_) | Self::Call(_) | Self::LParen)
    }
}

/// Parses a numeric literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: the parsed value, which may be infinite for very long
///   literals; the parser rejects those.
/// - `None`: if the slice is not a valid float.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Splits `source` into tokens paired with their byte position.
///
/// `offset` is added to every position so that errors point into the whole
/// statement rather than into the slice after `=`.
///
/// # Errors
/// Returns [`ParseError::InvalidCharacter`] for the first character that
/// cannot start a token.
///
/// # Example
/// ```
/// use lazycalc::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("SUM(x; 2)", 4).unwrap();
/// assert_eq!(tokens[0], (Token::Call("SUM".to_string()), 4));
/// assert_eq!(tokens[1], (Token::Word("x".to_string()), 8));
/// assert_eq!(tokens.last(), Some(&(Token::RParen, 12)));
/// ```
pub fn tokenize(source: &str, offset: usize) -> ParseResult<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let position = offset + lexer.span().start;
        if let Ok(tok) = token {
            tokens.push((tok, position));
        } else {
            let character = lexer.slice().chars().next().unwrap_or_default();
            return Err(ParseError::InvalidCharacter { character,
                                                      position });
        }
    }

    log::trace!("tokenized {source:?} into {} tokens", tokens.len());
    Ok(tokens)
}
