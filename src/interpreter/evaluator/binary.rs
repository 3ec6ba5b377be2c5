use crate::{ast::BinaryOperator, error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Evaluates a binary operation on two folded operands.
///
/// Supported operators:
/// - `Add`, `Sub`, `Mul`: plain floating point arithmetic.
/// - `Div`: fails with [`RuntimeError::DivisionByZero`] when the divisor is
///   zero (of either sign).
/// - `Pow`: real power, `f64::powf`.
///
/// # Example
/// ```
/// use lazycalc::{
///     ast::BinaryOperator,
///     error::RuntimeError,
///     interpreter::evaluator::binary::eval_binary,
/// };
///
/// assert_eq!(eval_binary(BinaryOperator::Pow, 2.0, 10.0), Ok(1024.0));
/// assert_eq!(eval_binary(BinaryOperator::Div, 1.0, 0.0), Err(RuntimeError::DivisionByZero));
/// ```
pub fn eval_binary(op: BinaryOperator, left: f64, right: f64) -> EvalResult<f64> {
    let value = match op {
        BinaryOperator::Add => left + right,
        BinaryOperator::Sub => left - right,
        BinaryOperator::Mul => left * right,
        BinaryOperator::Div => {
            if right == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            left / right
        },
        BinaryOperator::Pow => left.powf(right),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        assert_eq!(eval_binary(BinaryOperator::Add, 2.0, 3.0), Ok(5.0));
        assert_eq!(eval_binary(BinaryOperator::Sub, 2.0, 3.0), Ok(-1.0));
        assert_eq!(eval_binary(BinaryOperator::Mul, 2.5, 4.0), Ok(10.0));
        assert_eq!(eval_binary(BinaryOperator::Div, 7.0, 2.0), Ok(3.5));
    }

    #[test]
    fn negative_zero_divisor_is_still_zero() {
        assert_eq!(eval_binary(BinaryOperator::Div, 1.0, -0.0), Err(RuntimeError::DivisionByZero));
        assert_eq!(eval_binary(BinaryOperator::Div, 0.0, 0.0), Err(RuntimeError::DivisionByZero));
    }

    #[test]
    fn power_follows_real_semantics() {
        assert_eq!(eval_binary(BinaryOperator::Pow, 4.0, 0.5), Ok(2.0));
        assert_eq!(eval_binary(BinaryOperator::Pow, 2.0, -1.0), Ok(0.5));
        assert!(eval_binary(BinaryOperator::Pow, -8.0, 0.5).unwrap().is_nan());
        assert_eq!(eval_binary(BinaryOperator::Pow, 0.0, -1.0), Ok(f64::INFINITY));
    }
}
