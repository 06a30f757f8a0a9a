use crate::ast::{BinaryOperator, Expr};

/// Accumulates `operand (op operand)*` and folds it into one tree.
///
/// Operators wait on a stack together with the operand to their left. When
/// a new operator arrives, every waiting operator of greater or equal
/// priority takes the expression built so far as its right operand. Equal
/// priority still folds, which keeps `÷` and `×`, `-` and `+`, and chains of
/// `^` left-associative.
///
/// The waiting operators always have strictly increasing priorities, so the
/// stack never grows beyond the number of priority levels, and each
/// operator is folded exactly once. A flat chain of any length takes linear
/// time and constant stack depth.
pub(crate) struct Chain {
    waiting: Vec<(Expr, BinaryOperator, usize)>,
    last:    Expr,
}

impl Chain {
    /// Starts a chain with its first operand.
    pub(crate) const fn new(first: Expr) -> Self {
        Self { waiting: Vec::new(),
               last:    first, }
    }

    /// Appends `op operand`, folding every waiting operator that binds at
    /// least as tightly as `op`.
    ///
    /// # Parameters
    /// - `op`: The operator before `operand`.
    /// - `position`: Offset of the operator token.
    /// - `operand`: The operand after `op`.
    pub(crate) fn push(&mut self, op: BinaryOperator, position: usize, operand: Expr) {
        let mut left = std::mem::replace(&mut self.last, operand);
        while self.waiting.last().is_some_and(|(_, top, _)| top.priority() >= op.priority())
              && let Some((outer, top, top_position)) = self.waiting.pop()
        {
            left = Expr::binary(top, outer, left, top_position);
        }
        self.waiting.push((left, op, position));
    }

    /// Folds the remaining operators and returns the tree.
    pub(crate) fn finish(self) -> Expr {
        let mut right = self.last;
        for (left, op, position) in self.waiting.into_iter().rev() {
            right = Expr::binary(op, left, right, position);
        }
        right
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::BinaryOperator::{Add, Div, Mul, Pow, Sub};

    fn n(value: i64, position: usize) -> Expr {
        Expr::number(value, position)
    }

    fn fold(first: i64, rest: &[(BinaryOperator, i64)]) -> String {
        let mut chain = Chain::new(n(first, 0));
        for (i, (op, value)) in rest.iter().enumerate() {
            chain.push(*op, 4 * i + 2, n(*value, 4 * i + 4));
        }
        chain.finish().to_string()
    }

    #[test]
    fn single_operand_is_returned_as_is() {
        assert_eq!(Chain::new(n(7, 0)).finish(), n(7, 0));
    }

    #[test]
    fn operator_keeps_its_position() {
        let mut chain = Chain::new(n(1, 0));
        chain.push(Mul, 2, n(2, 4));
        assert_eq!(chain.finish(), Expr::binary(Mul, n(1, 0), n(2, 4), 2));
    }

    #[test]
    fn lower_priority_operator_takes_the_folded_left_side() {
        assert_eq!(fold(1, &[(Mul, 2), (Add, 3)]), "((1 × 2) + 3)");
    }

    #[test]
    fn higher_priority_operator_stays_below() {
        assert_eq!(fold(1, &[(Add, 2), (Mul, 3)]), "(1 + (2 × 3))");
    }

    #[test]
    fn equal_priorities_fold_left() {
        assert_eq!(fold(1, &[(Sub, 2), (Add, 3), (Sub, 4)]), "(((1 - 2) + 3) - 4)");
        assert_eq!(fold(1, &[(Div, 2), (Mul, 4)]), "((1 ÷ 2) × 4)");
        assert_eq!(fold(2, &[(Pow, 3), (Pow, 2)]), "((2 ^ 3) ^ 2)");
    }

    #[test]
    fn mixed_priorities_fold_in_one_pass() {
        assert_eq!(fold(8, &[(Sub, 2), (Mul, 3), (Pow, 2), (Add, 1)]), "((8 - (2 × (3 ^ 2))) + 1)");
    }
}
