use crate::{
    ast::{BinaryOperator, UnaryOperator},
    interpreter::lexer::Token,
};

/// An operator waiting on the parser's operator stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// A prefix `+` or `-`.
    Unary(UnaryOperator),
    /// An infix operator.
    Binary(BinaryOperator),
}

impl Operator {
    /// Binding strength: `+ -` bind loosest, then `* /`, then `^`, and unary
    /// operators bind tightest.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Unary(_) => 4,
            Self::Binary(BinaryOperator::Pow) => 3,
            Self::Binary(BinaryOperator::Mul | BinaryOperator::Div) => 2,
            Self::Binary(BinaryOperator::Add | BinaryOperator::Sub) => 1,
        }
    }

    /// Only `^` groups to the right: `2^3^2` is `2^(3^2)`.
    #[must_use]
    pub const fn is_right_associative(self) -> bool {
        matches!(self, Self::Binary(BinaryOperator::Pow))
    }

    /// Returns whether `self`, sitting on the stack, must be applied before
    /// `incoming` is pushed.
    ///
    /// # Example
    /// ```
    /// use lazycalc::{
    ///     ast::BinaryOperator,
    ///     interpreter::parser::operator::Operator,
    /// };
    ///
    /// let mul = Operator::Binary(BinaryOperator::Mul);
    /// let add = Operator::Binary(BinaryOperator::Add);
    /// let pow = Operator::Binary(BinaryOperator::Pow);
    ///
    /// assert!(mul.applies_before(add));
    /// assert!(add.applies_before(add));
    /// assert!(!pow.applies_before(pow));
    /// ```
    #[must_use]
    pub const fn applies_before(self, incoming: Self) -> bool {
        let (top, next) = (self.precedence(), incoming.precedence());
        top > next || (top == next && !incoming.is_right_associative())
    }

    /// Describes the operator for error messages.
    #[must_use]
    pub const fn arity(self) -> &'static str {
        match self {
            Self::Unary(_) => "unary",
            Self::Binary(_) => "binary",
        }
    }

    /// Number of operands the operator consumes.
    #[must_use]
    pub const fn operand_count(self) -> usize {
        match self {
            Self::Unary(_) => 1,
            Self::Binary(_) => 2,
        }
    }
}

/// Maps a token to the operator it denotes.
///
/// `unary` tells whether the token stands where an operand is expected; in
/// that position `+` and `-` are prefix operators. `*`, `/` and `^` are
/// always binary. Returns `None` for tokens that are not operators.
///
/// # Example
/// ```
/// use lazycalc::{
///     ast::{BinaryOperator, UnaryOperator},
///     interpreter::{lexer::Token, parser::operator::{Operator, token_to_operator}},
/// };
///
/// assert_eq!(token_to_operator(&Token::Minus, true),
///            Some(Operator::Unary(UnaryOperator::Negate)));
/// assert_eq!(token_to_operator(&Token::Minus, false),
///            Some(Operator::Binary(BinaryOperator::Sub)));
/// assert_eq!(token_to_operator(&Token::LParen, false), None);
/// ```
#[must_use]
pub const fn token_to_operator(token: &Token, unary: bool) -> Option<Operator> {
    let op = match token {
        Token::Plus if unary => Operator::Unary(UnaryOperator::Plus),
        Token::Minus if unary => Operator::Unary(UnaryOperator::Negate),
        Token::Plus => Operator::Binary(BinaryOperator::Add),
        Token::Minus => Operator::Binary(BinaryOperator::Sub),
        Token::Star => Operator::Binary(BinaryOperator::Mul),
        Token::Slash => Operator::Binary(BinaryOperator::Div),
        Token::Caret => Operator::Binary(BinaryOperator::Pow),
        _ => return None,
    };
    Some(op)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADD: Operator = Operator::Binary(BinaryOperator::Add);
    const SUB: Operator = Operator::Binary(BinaryOperator::Sub);
    const MUL: Operator = Operator::Binary(BinaryOperator::Mul);
    const DIV: Operator = Operator::Binary(BinaryOperator::Div);
    const POW: Operator = Operator::Binary(BinaryOperator::Pow);
    const NEG: Operator = Operator::Unary(UnaryOperator::Negate);

    #[test]
    fn precedence_levels() {
        assert_eq!(ADD.precedence(), SUB.precedence());
        assert_eq!(MUL.precedence(), DIV.precedence());
        assert!(MUL.precedence() > ADD.precedence());
        assert!(POW.precedence() > MUL.precedence());
        assert!(NEG.precedence() > POW.precedence());
    }

    #[test]
    fn left_associative_ties_apply_first() {
        assert!(SUB.applies_before(SUB));
        assert!(DIV.applies_before(MUL));
        assert!(!ADD.applies_before(MUL));
    }

    #[test]
    fn power_is_right_associative() {
        assert!(POW.is_right_associative());
        assert!(!POW.applies_before(POW));
        assert!(NEG.applies_before(POW));
    }

    #[test]
    fn star_is_never_unary() {
        assert_eq!(token_to_operator(&Token::Star, true), Some(MUL));
        assert_eq!(token_to_operator(&Token::Separator, true), None);
    }

    #[test]
    fn operand_counts() {
        assert_eq!(NEG.operand_count(), 1);
        assert_eq!(POW.operand_count(), 2);
        assert_eq!(NEG.arity(), "unary");
    }
}
