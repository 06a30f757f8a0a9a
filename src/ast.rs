use std::fmt;

use crate::interpreter::value::Number;

/// Describes where a unary operator sits relative to its operand.
///
/// Binary operators are always [`Fixity::Infix`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Fixity {
    /// Between two operands (`a + b`).
    Infix,
    /// Before the operand (`-a`).
    Prefix,
    /// After the operand (`a!`).
    Postfix,
}

/// Metadata the parser needs about an operator symbol.
///
/// `priority` only orders operators against each other; several operators may
/// share a priority, and equal priorities still re-associate to the left.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OperatorInfo {
    /// The character that spells the operator.
    pub symbol:   char,
    /// Higher binds tighter.
    pub priority: u8,
    /// Position relative to the operand(s).
    pub fixity:   Fixity,
}

impl OperatorInfo {
    const fn infix(symbol: char, priority: u8) -> Self {
        Self { symbol,
               priority,
               fixity: Fixity::Infix }
    }

    const fn unary(symbol: char, priority: u8, fixity: Fixity) -> Self {
        Self { symbol,
               priority,
               fixity }
    }
}

/// Binary operator table, in the order the operators are documented.
pub const BINARY_OPERATORS: &[OperatorInfo] = &[OperatorInfo::infix('+', 5),
                                                OperatorInfo::infix('-', 5),
                                                OperatorInfo::infix('×', 6),
                                                OperatorInfo::infix('÷', 6),
                                                OperatorInfo::infix('%', 6),
                                                OperatorInfo::infix('^', 7)];

/// Unary operator table.
///
/// Factorial outranks the sign operators, which is what makes `-3!` read as
/// `-(3!)`.
pub const UNARY_OPERATORS: &[OperatorInfo] = &[OperatorInfo::unary('-', 5, Fixity::Prefix),
                                               OperatorInfo::unary('+', 5, Fixity::Prefix),
                                               OperatorInfo::unary('!', 6, Fixity::Postfix)];

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`×`, or `*`)
    Mul,
    /// True division (`÷`, or `/`)
    Div,
    /// Floored modulo (`%`)
    Mod,
    /// Exponentiation (`^`), left-associative like every other operator.
    Pow,
}

impl BinaryOperator {
    /// Maps a symbol to its binary operator.
    ///
    /// ## Example
    /// ```
    /// use calcore::ast::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::from_symbol('×'), Some(BinaryOperator::Mul));
    /// assert_eq!(BinaryOperator::from_symbol('*'), None);
    /// assert_eq!(BinaryOperator::from_symbol('!'), None);
    /// ```
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '×' => Some(Self::Mul),
            '÷' => Some(Self::Div),
            '%' => Some(Self::Mod),
            '^' => Some(Self::Pow),
            _ => None,
        }
    }

    /// The canonical symbol of the operator.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '×',
            Self::Div => '÷',
            Self::Mod => '%',
            Self::Pow => '^',
        }
    }

    /// Looks the operator up in [`BINARY_OPERATORS`].
    #[must_use]
    pub fn info(self) -> OperatorInfo {
        let symbol = self.symbol();
        BINARY_OPERATORS.iter()
                        .copied()
                        .find(|info| info.symbol == symbol)
                        .unwrap_or(OperatorInfo::infix(symbol, 0))
    }

    /// Shorthand for `self.info().priority`.
    #[must_use]
    pub fn priority(self) -> u8 {
        self.info().priority
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Identity (`+x`).
    Positive,
    /// Arithmetic negation (`-x`).
    Negative,
    /// Factorial (`x!`).
    Factorial,
}

impl UnaryOperator {
    /// Maps a symbol to its unary operator.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Positive),
            '-' => Some(Self::Negative),
            '!' => Some(Self::Factorial),
            _ => None,
        }
    }

    /// The symbol of the operator.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Positive => '+',
            Self::Negative => '-',
            Self::Factorial => '!',
        }
    }

    /// Looks the operator up in [`UNARY_OPERATORS`].
    #[must_use]
    pub fn info(self) -> OperatorInfo {
        let symbol = self.symbol();
        UNARY_OPERATORS.iter()
                       .copied()
                       .find(|info| info.symbol == symbol)
                       .unwrap_or(OperatorInfo::unary(symbol, 0, Fixity::Prefix))
    }

    /// Shorthand for `self.info().priority`.
    #[must_use]
    pub fn priority(self) -> u8 {
        self.info().priority
    }

    /// Shorthand for `self.info().fixity`.
    #[must_use]
    pub fn fixity(self) -> Fixity {
        self.info().fixity
    }
}

/// Returns `true` if `symbol` appears in either operator table.
#[must_use]
pub const fn is_operator_symbol(symbol: char) -> bool {
    BinaryOperator::from_symbol(symbol).is_some() || UnaryOperator::from_symbol(symbol).is_some()
}

/// A node of the expression tree.
///
/// Every node owns its children exclusively, so a tree is acyclic and no
/// subtree has two parents. `position` is the 0-based character
/// offset of the token the node was built from (the operator for operator
/// nodes, the name for calls).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal such as `3` or `2.5e3`.
    NumberLiteral {
        /// The literal value, integer or real as written.
        value:    Number,
        /// Offset in the source.
        position: usize,
    },
    /// A reference to a named constant such as `π`, resolved at evaluation.
    NamedConstant {
        /// Name of the constant.
        name:     String,
        /// Offset in the source.
        position: usize,
    },
    /// A binary operation.
    BinaryOp {
        /// The operator.
        op:       BinaryOperator,
        /// Left operand.
        left:     Box<Self>,
        /// Right operand.
        right:    Box<Self>,
        /// Offset of the operator.
        position: usize,
    },
    /// A prefix or postfix unary operation.
    UnaryOp {
        /// The operator.
        op:       UnaryOperator,
        /// The operand.
        operand:  Box<Self>,
        /// Offset of the operator.
        position: usize,
    },
    /// A call such as `log(100, 10)`.
    FunctionCall {
        /// Name of the function being called.
        name:      String,
        /// Arguments in source order.
        arguments: Vec<Self>,
        /// Offset of the function name.
        position:  usize,
    },
}

impl Expr {
    /// Gets the source offset from `self`.
    /// ## Example
    /// ```
    /// use calcore::ast::Expr;
    ///
    /// let expr = Expr::NamedConstant { name:     "e".to_string(),
    ///                                  position: 4, };
    ///
    /// assert_eq!(expr.position(), 4);
    /// ```
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::NumberLiteral { position, .. }
            | Self::NamedConstant { position, .. }
            | Self::BinaryOp { position, .. }
            | Self::UnaryOp { position, .. }
            | Self::FunctionCall { position, .. } => *position,
        }
    }

    /// Builds a number literal node.
    #[must_use]
    pub fn number(value: impl Into<Number>, position: usize) -> Self {
        Self::NumberLiteral { value: value.into(),
                              position }
    }

    /// Builds a named constant node.
    #[must_use]
    pub fn constant(name: impl Into<String>, position: usize) -> Self {
        Self::NamedConstant { name: name.into(),
                              position }
    }

    /// Builds a binary operation node.
    #[must_use]
    pub fn binary(op: BinaryOperator, left: Self, right: Self, position: usize) -> Self {
        Self::BinaryOp { op,
                         left: Box::new(left),
                         right: Box::new(right),
                         position }
    }

    /// Builds a unary operation node.
    #[must_use]
    pub fn unary(op: UnaryOperator, operand: Self, position: usize) -> Self {
        Self::UnaryOp { op,
                        operand: Box::new(operand),
                        position }
    }

    /// Builds a function call node.
    #[must_use]
    pub fn call(name: impl Into<String>, arguments: Vec<Self>, position: usize) -> Self {
        Self::FunctionCall { name: name.into(),
                             arguments,
                             position }
    }

    /// Splits the run of binary nodes down the left side of `self`.
    ///
    /// Operator chains parse into left-deep trees whose depth grows with the
    /// chain's length. Walking them through this list keeps evaluation and
    /// printing at constant stack depth.
    ///
    /// # Returns
    /// The leftmost node that is not a binary operation, and the
    /// `(operator, right operand, position)` steps applied to it, innermost
    /// first. A non-binary `self` gives itself and no steps.
    ///
    /// # Example
    /// ```
    /// use calcore::{ast::BinaryOperator, parse_expression};
    ///
    /// let tree = parse_expression("1 - 2 + 3").unwrap();
    /// let (leftmost, steps) = tree.left_spine();
    /// assert_eq!(leftmost.to_string(), "1");
    /// let ops: Vec<_> = steps.iter().map(|(op, right, _)| (*op, right.to_string())).collect();
    /// assert_eq!(ops, [(BinaryOperator::Sub, "2".to_string()), (BinaryOperator::Add, "3".to_string())]);
    /// ```
    #[must_use]
    pub fn left_spine(&self) -> (&Self, Vec<(BinaryOperator, &Self, usize)>) {
        let mut steps = Vec::new();
        let mut node = self;
        while let Self::BinaryOp { op, left, right, position } = node {
            steps.push((*op, &**right, *position));
            node = &**left;
        }
        steps.reverse();
        (node, steps)
    }

    /// Moves the children of `self` into `pending`, leaving leaves behind.
    fn detach_children(&mut self, pending: &mut Vec<Self>) {
        let placeholder = || Self::number(0, 0);
        match self {
            Self::BinaryOp { left, right, .. } => {
                pending.push(std::mem::replace(&mut **left, placeholder()));
                pending.push(std::mem::replace(&mut **right, placeholder()));
            },
            Self::UnaryOp { operand, .. } => {
                pending.push(std::mem::replace(&mut **operand, placeholder()));
            },
            Self::FunctionCall { arguments, .. } => pending.append(arguments),
            Self::NumberLiteral { .. } | Self::NamedConstant { .. } => {},
        }
    }

    const fn is_leaf(&self) -> bool {
        matches!(self, Self::NumberLiteral { .. } | Self::NamedConstant { .. })
    }

    /// `true` if some child has children of its own.
    fn has_branches(&self) -> bool {
        match self {
            Self::BinaryOp { left, right, .. } => !left.is_leaf() || !right.is_leaf(),
            Self::UnaryOp { operand, .. } => !operand.is_leaf(),
            Self::FunctionCall { arguments, .. } => arguments.iter().any(|a| !a.is_leaf()),
            Self::NumberLiteral { .. } | Self::NamedConstant { .. } => false,
        }
    }
}

/// Dismantles the tree with an explicit stack, so dropping a deep chain does
/// not recurse once per node.
impl Drop for Expr {
    fn drop(&mut self) {
        if !self.has_branches() {
            return;
        }
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Stands in for a literal too large for `f64`; it lexes back to infinity.
const OVERFLOWING_LITERAL: &str = "1e309";

/// Renders the tree fully parenthesised, e.g. `(1 + (2 × 3))`, `-(3!)` or
/// `((-3)!)`. The text of any tree the parser built parses back to the same
/// tree; a literal that overflowed `f64` prints as `1e309`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumberLiteral { value: Number::Real(r), .. } if r.is_infinite() => {
                let sign = if r.is_sign_negative() { "-" } else { "" };
                write!(f, "{sign}{OVERFLOWING_LITERAL}")
            },
            Self::NumberLiteral { value, .. } => write!(f, "{value}"),
            Self::NamedConstant { name, .. } => write!(f, "{name}"),
            Self::BinaryOp { .. } => {
                let (leftmost, steps) = self.left_spine();
                for _ in &steps {
                    write!(f, "(")?;
                }
                write!(f, "{leftmost}")?;
                for (op, right, _) in steps {
                    write!(f, " {op} {right})")?;
                }
                Ok(())
            },
            Self::UnaryOp { op, operand, .. } => match (op.fixity(), operand.as_ref()) {
                (Fixity::Postfix, Self::UnaryOp { .. }) => write!(f, "(({operand}){op})"),
                (Fixity::Postfix, _) => write!(f, "({operand}{op})"),
                (Fixity::Prefix | Fixity::Infix, _) => write!(f, "{op}{operand}"),
            },
            Self::FunctionCall { name, arguments, .. } => {
                write!(f, "{name}(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            },
        }
    }
}
