use crate::ast::{Expr, ExprV, Op};
use crate::lexer::Position;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum EvalError {
    #[error("division by zero at {position}")]
    DivisionByZero { position: Position },
}

/// Walks the tree depth-first, left before right, stopping at the first error.
///
/// Arithmetic wraps on overflow and division truncates toward zero.
pub fn evaluate(e: &Expr) -> Result<i64, EvalError> {
    match e.v {
        ExprV::Integer(x) => Ok(x),
        ExprV::Binary(ref left, op, ref right) => {
            let l = evaluate(left)?;
            let r = evaluate(right)?;

            match op {
                Op::Add => Ok(l.wrapping_add(r)),
                Op::Sub => Ok(l.wrapping_sub(r)),
                Op::Mul => Ok(l.wrapping_mul(r)),
                Op::Div => {
                    if r == 0 {
                        return Err(EvalError::DivisionByZero {
                            position: right.pos,
                        });
                    }
                    Ok(l.wrapping_div(r))
                }
            }
        }
    }
}
