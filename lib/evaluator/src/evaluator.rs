use cursor::Position;
use num::{BigInt, BigRational, Zero};
use parser::Expr;
use scanner::{Token, TokenData};

mod pipeline;
pub use pipeline::{run_source, InterpretError, Options};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Tried to divide by zero at {0}")]
    DivisionByZero(Position),
    #[error("Invalid operator {0} at {}", .0.position)]
    InvalidOperator(Token),
}

pub type Result<T> = std::result::Result<T, EvalError>;

/// Reduces `expr` to an exact rational.
pub fn evaluate(expr: &Expr) -> Result<BigRational> {
    use TokenData::*;

    match expr {
        Expr::Literal(n) => Ok(BigRational::from_integer(BigInt::from(n.clone()))),

        Expr::Unary { operator, right } => {
            let right = evaluate(right)?;
            match operator.data {
                Plus => Ok(right),
                Minus => Ok(-right),
                _ => Err(EvalError::InvalidOperator(operator.clone())),
            }
        }

        Expr::Binary { left, operator, right } => {
            let left = evaluate(left)?;
            let right = evaluate(right)?;
            match operator.data {
                Plus => Ok(left + right),
                Minus => Ok(left - right),
                Multiply => Ok(left * right),
                Division if right.is_zero() => Err(EvalError::DivisionByZero(operator.position)),
                Division => Ok(left / right),
                _ => Err(EvalError::InvalidOperator(operator.clone())),
            }
        }
    }
}
