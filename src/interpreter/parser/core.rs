use crate::{
    ast::{Function, Node},
    error::ParseError,
    interpreter::{
        evaluator::function,
        lexer::{Token, tokenize},
        parser::operator::{Operator, token_to_operator},
        variables::Variable,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// What an open parenthesis on the operator stack belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BracketKind {
    /// Plain grouping, `(1 + 2)`.
    Group,
    /// The argument list of a call, `SUM(1; 2)`.
    Call(Function),
}

/// An open parenthesis together with the bookkeeping of its contents.
///
/// `base` is the height of the value stack when the bracket was opened and
/// `args` the number of argument slots already closed by a separator. Every
/// slot must leave exactly one value on the stack, so the values of the
/// current slot start at `base + args`.
#[derive(Debug, Clone, Copy)]
struct Bracket {
    kind:     BracketKind,
    position: usize,
    base:     usize,
    args:     usize,
}

impl Bracket {
    const fn slot_start(&self) -> usize {
        self.base + self.args
    }
}

/// An entry of the operator stack.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Operator { op: Operator, position: usize },
    Open(Bracket),
}

/// The two stacks of the precedence-climbing parser.
///
/// Values carry the position where their source text starts so that
/// juxtaposed operands can be reported precisely.
#[derive(Default)]
struct ShuntingYard {
    operators: Vec<Pending>,
    values:    Vec<(Node, usize)>,
}

impl ShuntingYard {
    /// The lowest value-stack index the operators of the innermost open slot
    /// may consume. Operands outside the current bracket slot are out of
    /// reach.
    fn floor(&self) -> usize {
        self.operators
            .iter()
            .rev()
            .find_map(|pending| match pending {
                Pending::Open(bracket) => Some(bracket.slot_start()),
                Pending::Operator { .. } => None,
            })
            .unwrap_or(0)
    }

    fn push_value(&mut self, node: Node, position: usize) {
        log::trace!("push value {node} at {position}");
        self.values.push((node, position));
    }

    /// Pushes an operator, first applying every stacked operator that binds
    /// at least as tightly. Unary operators are prefix and never force an
    /// application.
    fn push_operator(&mut self, op: Operator, position: usize) -> ParseResult<()> {
        if let Operator::Binary(_) = op {
            while let Some(Pending::Operator { op: top, .. }) = self.operators.last()
                  && top.applies_before(op)
            {
                self.apply_top()?;
            }
        }
        log::trace!("push operator {op:?} at {position}");
        self.operators.push(Pending::Operator { op, position });
        Ok(())
    }

    /// Pops one operator and combines its operands into a node.
    ///
    /// A binary operator takes the right operand first, then the left one.
    fn apply_top(&mut self) -> ParseResult<()> {
        let Some(Pending::Operator { op, position }) = self.operators.pop() else {
            return Ok(());
        };

        if self.values.len() < self.floor() + op.operand_count() {
            return Err(ParseError::MissingOperand { arity: op.arity(),
                                                    position });
        }

        let (node, start) = match op {
            Operator::Unary(unary) => {
                let (operand, _) = self.pop_operand(op, position)?;
                (Node::unary(unary, operand), position)
            },
            Operator::Binary(binary) => {
                let (right, _) = self.pop_operand(op, position)?;
                let (left, start) = self.pop_operand(op, position)?;
                (Node::binary(binary, left, right), start)
            },
        };
        self.push_value(node, start);
        Ok(())
    }

    fn pop_operand(&mut self, op: Operator, position: usize) -> ParseResult<(Node, usize)> {
        self.values.pop().ok_or(ParseError::MissingOperand { arity: op.arity(),
                                                             position })
    }

    /// Applies operators down to the innermost open bracket, leaving the
    /// bracket on the stack. Returns `None` when there is no open bracket.
    fn reduce_to_bracket(&mut self) -> ParseResult<Option<Bracket>> {
        loop {
            match self.operators.last() {
                Some(Pending::Operator { .. }) => self.apply_top()?,
                Some(Pending::Open(bracket)) => return Ok(Some(*bracket)),
                None => return Ok(None),
            }
        }
    }

    /// Checks that the slot of `bracket` that ends at `position` holds
    /// exactly one value.
    fn close_slot(&self, bracket: &Bracket, position: usize) -> ParseResult<()> {
        let start = bracket.slot_start();
        match self.values.len().saturating_sub(start) {
            1 => Ok(()),
            0 => match bracket.kind {
                BracketKind::Call(_) => Err(ParseError::MissingArgument { position }),
                BracketKind::Group => Err(ParseError::EmptyExpression),
            },
            _ => Err(ParseError::UnexpectedOperand { position: self.values[start + 1].1 }),
        }
    }

    /// Handles an argument separator: the innermost open bracket must be a
    /// call, whose current slot is closed.
    fn separator(&mut self, position: usize) -> ParseResult<()> {
        let bracket = match self.reduce_to_bracket()? {
            Some(bracket @ Bracket { kind: BracketKind::Call(_),
                                     .. }) => bracket,
            _ => return Err(ParseError::UnexpectedSeparator { position }),
        };
        self.close_slot(&bracket, position)?;

        if let Some(Pending::Open(open)) = self.operators.last_mut() {
            open.args += 1;
        }
        Ok(())
    }

    /// Handles `)`: closes the innermost bracket and, for a call, builds the
    /// call node from exactly as many values as it has arguments.
    fn close_bracket(&mut self, position: usize) -> ParseResult<()> {
        let Some(bracket) = self.reduce_to_bracket()? else {
            return Err(ParseError::UnmatchedParen { position });
        };
        self.close_slot(&bracket, position)?;
        self.operators.pop();

        match bracket.kind {
            BracketKind::Group => {
                if let Some((_, start)) = self.values.last_mut() {
                    *start = bracket.position;
                }
            },
            BracketKind::Call(function) => {
                let args: Vec<Node> = self.values
                                          .split_off(bracket.base)
                                          .into_iter()
                                          .map(|(node, _)| node)
                                          .collect();
                log::trace!("close call {function} with {} arguments", args.len());
                self.push_value(Node::FuncCall { function, args }, bracket.position);
            },
        }
        Ok(())
    }

    /// Drains the operator stack and returns the single remaining value.
    fn finish(mut self) -> ParseResult<Node> {
        if let Some(bracket) = self.reduce_to_bracket()? {
            return Err(ParseError::UnclosedParen { position: bracket.position });
        }

        let mut values = self.values.into_iter();
        match (values.next(), values.next()) {
            (Some((node, _)), None) => Ok(node),
            (None, _) => Err(ParseError::EmptyExpression),
            (Some(_), Some((_, position))) => Err(ParseError::UnexpectedOperand { position }),
        }
    }
}

/// Resolves a word that is not a call opener.
///
/// A single letter is a variable; anything longer is unknown.
fn parse_word(word: &str, position: usize) -> ParseResult<Node> {
    let mut chars = word.chars();
    if let (Some(c), None) = (chars.next(), chars.next())
       && let Ok(var) = Variable::try_from(c)
    {
        return Ok(Node::Variable(var));
    }
    Err(ParseError::UnknownIdentifier { name: word.to_string(),
                                        position })
}

/// Parses the right-hand side of a statement into an AST.
///
/// This is a two-stack precedence-climbing parser. Operands go onto the
/// value stack; operators wait on the operator stack until an operator that
/// binds less tightly, a closing parenthesis, a separator, or the end of the
/// input forces them to be applied. Parentheses and call openers sit on the
/// operator stack as brackets that remember how many arguments they have
/// collected.
///
/// An operand is expected at the start of the expression and after `(`, a
/// call opener, a separator, or another operator; an operator is expected
/// everywhere else. In operand position `+` and `-` are unary, while any
/// other operator is missing its left operand. An operand, call or `(` in
/// operator position is juxtaposed to the previous operand.
///
/// # Parameters
/// - `source`: The expression text.
/// - `offset`: Position of `source` inside the full statement, added to
///   every error position.
///
/// # Errors
/// Returns a [`ParseError`] for invalid characters, unknown identifiers or
/// functions, mismatched parentheses, missing operands or arguments,
/// juxtaposed operands, misplaced separators, and empty input.
///
/// # Example
/// ```
/// use lazycalc::interpreter::parser::core::parse_expression;
///
/// let node = parse_expression("2 + 3 * -x", 0).unwrap();
/// assert_eq!(node.to_string(), "(2 + (3 * -X))");
///
/// let node = parse_expression("max(1; a, 2^b)", 0).unwrap();
/// assert_eq!(node.to_string(), "MAX(1; A; (2 ^ B))");
/// ```
pub fn parse_expression(source: &str, offset: usize) -> ParseResult<Node> {
    let tokens = tokenize(source, offset)?;
    let mut yard = ShuntingYard::default();
    let mut previous: Option<&Token> = None;

    for (token, position) in &tokens {
        let position = *position;
        let expect_operand = previous.is_none_or(Token::expects_operand);
        if !expect_operand && token.starts_operand() {
            return Err(ParseError::UnexpectedOperand { position });
        }

        match token {
            Token::Number(value) => {
                if !value.is_finite() {
                    let literal = source[position - offset..].chars()
                                                             .take_while(|c| {
                                                                 c.is_ascii_digit() || *c == '.'
                                                             })
                                                             .collect();
                    return Err(ParseError::InvalidNumber { literal,
                                                           position });
                }
                yard.push_value(Node::Const(*value), position);
            },
            Token::Word(word) => yard.push_value(parse_word(word, position)?, position),
            Token::Call(name) => {
                let Some(function) = function::lookup(name) else {
                    return Err(ParseError::UnknownFunction { name: name.clone(),
                                                             position });
                };
                let bracket = Bracket { kind: BracketKind::Call(function),
                                        position,
                                        base: yard.values.len(),
                                        args: 0 };
                yard.operators.push(Pending::Open(bracket));
            },
            Token::LParen => {
                let bracket = Bracket { kind: BracketKind::Group,
                                        position,
                                        base: yard.values.len(),
                                        args: 0 };
                yard.operators.push(Pending::Open(bracket));
            },
            Token::RParen => yard.close_bracket(position)?,
            Token::Separator => yard.separator(position)?,
            Token::Plus | Token::Minus | Token::Star | Token::Slash | Token::Caret => {
                if let Some(op) = token_to_operator(token, expect_operand) {
                    if expect_operand && let Operator::Binary(_) = op {
                        return Err(ParseError::MissingOperand { arity: op.arity(),
                                                                position });
                    }
                    yard.push_operator(op, position)?;
                }
            },
        }

        previous = Some(token);
    }

    yard.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str) -> String {
        parse_expression(source, 0).unwrap().to_string()
    }

    fn error(source: &str) -> ParseError {
        parse_expression(source, 0).unwrap_err()
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(render("2+3*4"), "(2 + (3 * 4))");
        assert_eq!(render("10-3-2"), "((10 - 3) - 2)");
        assert_eq!(render("2^3^2"), "(2 ^ (3 ^ 2))");
        assert_eq!(render("8/4/2"), "((8 / 4) / 2)");
        assert_eq!(render("(2+3)*4"), "((2 + 3) * 4)");
    }

    #[test]
    fn unary_operators_are_disambiguated() {
        assert_eq!(render("-5+3"), "(-5 + 3)");
        assert_eq!(render("3*-2"), "(3 * -2)");
        assert_eq!(render("3--2"), "(3 - -2)");
        assert_eq!(render("+4"), "+4");
        assert_eq!(render("(-1)"), "-1");
        assert_eq!(render("sum(-1; +2)"), "SUM(-1; +2)");
        assert_eq!(render("- - 1"), "--1");
    }

    #[test]
    fn unary_binds_tighter_than_power() {
        assert_eq!(render("-2^2"), "(-2 ^ 2)");
        assert_eq!(render("2^-1"), "(2 ^ -1)");
    }

    #[test]
    fn nested_calls_keep_separate_counts() {
        assert_eq!(render("SUM(1; MAX(2, 3; 4); 5)"), "SUM(1; MAX(2; 3; 4); 5)");
        assert_eq!(render("avg(min(1);2)"), "AVG(MIN(1); 2)");
        assert_eq!(render("PRD((1+2);3)"), "PRD((1 + 2); 3)");
    }

    #[test]
    fn call_arguments_keep_source_order() {
        let node = parse_expression("MIN(a; b; c)", 0).unwrap();
        let Node::FuncCall { function, args } = node else {
            panic!("expected a call");
        };
        assert_eq!(function, Function::Min);
        let names: Vec<String> = args.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn variables_are_case_insensitive() {
        assert_eq!(render("a + B"), "(A + B)");
    }

    #[test]
    fn unknown_words_are_rejected() {
        assert_eq!(error("ab + 1"),
                   ParseError::UnknownIdentifier { name:     "ab".to_string(),
                                                   position: 0, });
        assert_eq!(error("1 + foo(2)"),
                   ParseError::UnknownFunction { name:     "foo".to_string(),
                                                 position: 4, });
        assert!(matches!(error("sum (1)"), ParseError::UnknownIdentifier { .. }));
    }

    #[test]
    fn parenthesis_mismatch() {
        assert_eq!(error("(1 + 2"), ParseError::UnclosedParen { position: 0 });
        assert_eq!(error("1 + 2)"), ParseError::UnmatchedParen { position: 5 });
        assert_eq!(error("SUM(1;2"), ParseError::UnclosedParen { position: 0 });
    }

    #[test]
    fn missing_operands() {
        assert_eq!(error("1 +"),
                   ParseError::MissingOperand { arity:    "binary",
                                                position: 2, });
        assert_eq!(error("-"),
                   ParseError::MissingOperand { arity:    "unary",
                                                position: 0, });
        assert_eq!(error("* 2"),
                   ParseError::MissingOperand { arity:    "binary",
                                                position: 0, });
        assert!(matches!(error("(1 +)"), ParseError::MissingOperand { .. }));
    }

    #[test]
    fn operators_cannot_reach_outside_their_slot() {
        assert!(matches!(error("1 + SUM(-)"), ParseError::MissingOperand { .. }));
        assert!(matches!(error("SUM(1; *2)"), ParseError::MissingOperand { .. }));
    }

    #[test]
    fn juxtaposed_operands() {
        assert_eq!(error("1 2"), ParseError::UnexpectedOperand { position: 2 });
        assert_eq!(error("a(1)"), ParseError::UnexpectedOperand { position: 1 });
        assert_eq!(error("SUM(1 2)"), ParseError::UnexpectedOperand { position: 6 });
    }

    #[test]
    fn operand_and_operator_positions_are_enforced() {
        assert_eq!(error("1 2 +"), ParseError::UnexpectedOperand { position: 2 });
        assert_eq!(error("a b ^"), ParseError::UnexpectedOperand { position: 2 });
        assert_eq!(error("SUM(1 2 +)"), ParseError::UnexpectedOperand { position: 6 });
        assert_eq!(error("2 SUM(1)"), ParseError::UnexpectedOperand { position: 2 });
        assert_eq!(error("* 1 2"),
                   ParseError::MissingOperand { arity:    "binary",
                                                position: 0, });
        assert_eq!(error("SUM(* 1 2)"),
                   ParseError::MissingOperand { arity:    "binary",
                                                position: 4, });
        assert_eq!(error("1 + / 2"),
                   ParseError::MissingOperand { arity:    "binary",
                                                position: 4, });
    }

    #[test]
    fn function_argument_slots() {
        assert_eq!(error("SUM()"), ParseError::MissingArgument { position: 4 });
        assert_eq!(error("SUM(1;;2)"), ParseError::MissingArgument { position: 6 });
        assert_eq!(error("SUM(1;)"), ParseError::MissingArgument { position: 6 });
    }

    #[test]
    fn separators_only_inside_calls() {
        assert_eq!(error("1; 2"), ParseError::UnexpectedSeparator { position: 1 });
        assert_eq!(error("SUM((1; 2))"), ParseError::UnexpectedSeparator { position: 6 });
    }

    #[test]
    fn empty_inputs() {
        assert_eq!(error(""), ParseError::EmptyExpression);
        assert_eq!(error("  \t "), ParseError::EmptyExpression);
        assert_eq!(error("()"), ParseError::EmptyExpression);
    }

    #[test]
    fn offsets_shift_positions() {
        assert_eq!(parse_expression(" 1 $", 3).unwrap_err(),
                   ParseError::InvalidCharacter { character: '$',
                                                  position:  6, });
    }

    #[test]
    fn overlong_literals_are_rejected() {
        let literal = "9".repeat(400);
        assert_eq!(parse_expression(&literal, 0).unwrap_err(),
                   ParseError::InvalidNumber { literal,
                                               position: 0 });
    }
}
