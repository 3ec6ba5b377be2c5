use std::fmt;

use crate::interpreter::variables::Variable;

/// A unary prefix operator.
///
/// The parser produces one of these for a `+` or `-` that appears where an
/// operand is expected (start of the expression, after `(`, after an
/// argument separator, or after another operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Unary `+`, the identity.
    Plus,
    /// Unary `-`, arithmetic negation.
    Negate,
}

impl UnaryOperator {
    /// Applies the operator to a folded operand.
    ///
    /// # Example
    /// ```
    /// use lazycalc::ast::UnaryOperator;
    ///
    /// assert_eq!(UnaryOperator::Negate.apply(2.5), -2.5);
    /// assert_eq!(UnaryOperator::Plus.apply(2.5), 2.5);
    /// ```
    #[must_use]
    pub fn apply(self, operand: f64) -> f64 {
        match self {
            Self::Plus => operand,
            Self::Negate => -operand,
        }
    }

    /// The source symbol of the operator.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Negate => '-',
        }
    }
}

/// A binary infix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`, right associative.
    Pow,
}

impl BinaryOperator {
    /// The source symbol of the operator.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }
}

/// A built-in reduction over a variadic argument list.
///
/// All reductions are order independent; argument order is kept only for
/// display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    /// Arithmetic sum.
    Sum,
    /// Product.
    Prd,
    /// Smallest argument.
    Min,
    /// Largest argument.
    Max,
    /// Arithmetic mean.
    Avg,
}

impl Function {
    /// The canonical (upper case) name of the function.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sum => "SUM",
            Self::Prd => "PRD",
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::Avg => "AVG",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of the abstract syntax tree of one right-hand side.
///
/// Every non-leaf node owns its children, so the tree is acyclic and a
/// subtree can be replaced by assigning over it. Folding relies on this:
/// a subtree whose value is known is overwritten with a [`Node::Const`] and
/// the old children are dropped in the same move.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A numeric constant, either a literal or the result of folding.
    Const(f64),
    /// A reference to one of the 26 variables.
    Variable(Variable),
    /// A unary operation.
    UnaryOp {
        /// The operator to apply.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
    },
    /// A binary operation.
    BinaryOp {
        /// The operator to apply.
        op:    BinaryOperator,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
    },
    /// A call to a built-in reduction.
    FuncCall {
        /// The function being called.
        function: Function,
        /// Arguments in source order.
        args:     Vec<Self>,
    },
}

impl Node {
    /// Builds a unary node.
    #[must_use]
    pub fn unary(op: UnaryOperator, operand: Self) -> Self {
        Self::UnaryOp { op,
                        operand: Box::new(operand) }
    }

    /// Builds a binary node.
    ///
    /// # Example
    /// ```
    /// use lazycalc::ast::{BinaryOperator, Node};
    ///
    /// let node = Node::binary(BinaryOperator::Add, Node::Const(1.0), Node::Const(2.0));
    /// assert_eq!(node.to_string(), "(1 + 2)");
    /// ```
    #[must_use]
    pub fn binary(op: BinaryOperator, left: Self, right: Self) -> Self {
        Self::BinaryOp { op,
                         left: Box::new(left),
                         right: Box::new(right) }
    }

    /// Returns the value of a constant node.
    #[must_use]
    pub const fn as_const(&self) -> Option<f64> {
        match self {
            Self::Const(value) => Some(*value),
            _ => None,
        }
    }

    /// Counts the nodes of the tree, including `self`.
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Self::Const(_) | Self::Variable(_) => 1,
            Self::UnaryOp { operand, .. } => 1 + operand.size(),
            Self::BinaryOp { left, right, .. } => 1 + left.size() + right.size(),
            Self::FuncCall { args, .. } => 1 + args.iter().map(Self::size).sum::<usize>(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(value) => write!(f, "{value}"),
            Self::Variable(var) => write!(f, "{var}"),
            Self::UnaryOp { op, operand } => write!(f, "{}{operand}", op.symbol()),
            Self::BinaryOp { op, left, right } => write!(f, "({left} {} {right})", op.symbol()),
            Self::FuncCall { function, args } => {
                write!(f, "{function}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            },
        }
    }
}
