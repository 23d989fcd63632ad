use crate::lexer::Position;
use std::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Expr {
    pub pos: Position,
    pub v: ExprV,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExprV {
    Integer(i64),
    Binary(Box<Expr>, Op, Box<Expr>),
}

impl Expr {
    pub fn integer(value: i64, pos: Position) -> Expr {
        Expr {
            pos,
            v: ExprV::Integer(value),
        }
    }

    /// A binary node takes the position of its left operand.
    pub fn binary(left: Expr, op: Op, right: Expr) -> Expr {
        Expr {
            pos: left.pos,
            v: ExprV::Binary(Box::new(left), op, Box::new(right)),
        }
    }

    pub fn pos(&self) -> Position {
        self.pos
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.v {
            ExprV::Integer(x) => write!(f, "{}", x),
            ExprV::Binary(ref left, op, ref right) => write!(f, "({} {} {})", left, op, right),
        }
    }
}
