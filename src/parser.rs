use crate::ast::{Expr, Op};
use crate::lexer::{Lexer, Position, Token, TokenKind};
use anyhow::Result;
use std::io::BufRead;
use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum SyntaxError {
    #[error("unexpected token {token} at {position}")]
    UnexpectedToken { token: Token, position: Position },

    #[error("integer literal `{literal}` out of range at {position}")]
    IntegerOutOfRange { literal: String, position: Position },

    #[error("token lookahead slot already occupied")]
    LookaheadOccupied,
}

// expression := addsub EOF
// addsub     := muldiv (('+' | '-') muldiv)*
// muldiv     := primary (('*' | '/') primary)*
// primary    := INT
pub struct Parser<R> {
    lexer: Lexer<R>,
}

impl<R: BufRead> Parser<R> {
    pub fn new(reader: R) -> Self {
        Parser::from_lexer(Lexer::new(reader))
    }

    pub fn from_lexer(lexer: Lexer<R>) -> Self {
        Parser { lexer }
    }

    pub fn parse_expression(&mut self) -> Result<Expr> {
        let expr = self.parse_add_sub()?;

        let (token, position) = self.lexer.next_token()?;
        if token.kind != TokenKind::Eof {
            return Err(SyntaxError::UnexpectedToken { token, position }.into());
        }

        log::debug!("parse_expression: {}", expr);
        Ok(expr)
    }

    fn parse_add_sub(&mut self) -> Result<Expr> {
        let mut left = self.parse_mul_div()?;

        loop {
            let (token, position) = self.lexer.next_token()?;
            let op = match token.kind {
                TokenKind::Add => Op::Add,
                TokenKind::Sub => Op::Sub,
                _ => {
                    self.lexer.unread_token(token, position)?;
                    return Ok(left);
                }
            };

            let right = self.parse_mul_div()?;
            left = Expr::binary(left, op, right);
            log::debug!("parse_add_sub: {}", left);
        }
    }

    fn parse_mul_div(&mut self) -> Result<Expr> {
        let mut left = self.parse_primary()?;

        loop {
            let (token, position) = self.lexer.next_token()?;
            let op = match token.kind {
                TokenKind::Mul => Op::Mul,
                TokenKind::Div => Op::Div,
                _ => {
                    self.lexer.unread_token(token, position)?;
                    return Ok(left);
                }
            };

            let right = self.parse_primary()?;
            left = Expr::binary(left, op, right);
            log::debug!("parse_mul_div: {}", left);
        }
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let (token, position) = self.lexer.next_token()?;
        if token.kind != TokenKind::Int {
            return Err(SyntaxError::UnexpectedToken { token, position }.into());
        }

        let value: i64 = token
            .literal
            .parse()
            .map_err(|_| SyntaxError::IntegerOutOfRange {
                literal: token.literal.clone(),
                position,
            })?;
        Ok(Expr::integer(value, position))
    }
}

pub fn parse<R: BufRead>(reader: R) -> Result<Expr> {
    Parser::new(reader).parse_expression()
}

pub fn parse_str(src: &str) -> Result<Expr> {
    parse(src.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ExprV;
    use proptest::prelude::*;

    fn render(src: &str) -> String {
        parse_str(src).unwrap().to_string()
    }

    fn syntax_error(src: &str) -> SyntaxError {
        let err = parse_str(src).unwrap_err();
        err.downcast_ref::<SyntaxError>()
            .cloned()
            .unwrap_or_else(|| panic!("not a syntax error: {:#}", err))
    }

    #[test]
    fn single_integer() {
        assert_eq!(render("42"), "42");
        assert_eq!(render("007"), "7");
    }

    #[test]
    fn simple_sum() {
        assert_eq!(render("1+2"), "(1 + 2)");
    }

    #[test]
    fn left_associative() {
        assert_eq!(render("1-2-3"), "((1 - 2) - 3)");
        assert_eq!(render("8/4/2"), "((8 / 4) / 2)");
        assert_eq!(render("1+2-3+4"), "(((1 + 2) - 3) + 4)");
    }

    #[test]
    fn precedence() {
        assert_eq!(render("2+3*4"), "(2 + (3 * 4))");
        assert_eq!(render("2*3+4"), "((2 * 3) + 4)");
        assert_eq!(render("1+2*3-4/5"), "((1 + (2 * 3)) - (4 / 5))");
        assert_eq!(render("2*3*4+5*6"), "(((2 * 3) * 4) + (5 * 6))");
    }

    #[test]
    fn whitespace_is_insignificant() {
        assert_eq!(render("1 +\n2"), render("1+2"));
        assert_eq!(render("\t 2 *\r\n 3 \n"), "(2 * 3)");
    }

    #[test]
    fn positions() {
        let e = parse_str("12 + 3\n* 45").unwrap();
        assert_eq!(e.pos, Position { line: 1, column: 2 });
        match e.v {
            ExprV::Binary(ref left, Op::Add, ref right) => {
                assert_eq!(left.pos, Position { line: 1, column: 2 });
                assert_eq!(right.pos, Position { line: 1, column: 6 });
                match right.v {
                    ExprV::Binary(_, Op::Mul, ref r) => {
                        assert_eq!(r.pos, Position { line: 2, column: 4 })
                    }
                    ref other => panic!("unexpected node {:?}", other),
                }
            }
            ref other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn illegal_token_rejected() {
        match syntax_error("3&4") {
            SyntaxError::UnexpectedToken { token, position } => {
                assert_eq!(token.kind, TokenKind::Illegal);
                assert_eq!(token.literal, "&");
                assert_eq!(position, Position { line: 1, column: 2 });
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn illegal_operand_rejected() {
        match syntax_error("1 + x") {
            SyntaxError::UnexpectedToken { token, .. } => {
                assert_eq!(token.kind, TokenKind::Illegal);
                assert_eq!(token.literal, "x");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn premature_end_of_input() {
        for src in &["", "   ", "1 +", "2*"] {
            match syntax_error(src) {
                SyntaxError::UnexpectedToken { token, .. } => assert_eq!(token.kind, TokenKind::Eof),
                other => panic!("unexpected error {:?} for {:?}", other, src),
            }
        }
    }

    #[test]
    fn leading_operator_rejected() {
        match syntax_error("-1") {
            SyntaxError::UnexpectedToken { token, .. } => assert_eq!(token.kind, TokenKind::Sub),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn trailing_operand_rejected() {
        match syntax_error("1 2") {
            SyntaxError::UnexpectedToken { token, .. } => {
                assert_eq!(token.kind, TokenKind::Int);
                assert_eq!(token.literal, "2");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn integer_out_of_range() {
        assert_eq!(render("9223372036854775807"), "9223372036854775807");
        match syntax_error("1 + 9223372036854775808") {
            SyntaxError::IntegerOutOfRange { literal, .. } => {
                assert_eq!(literal, "9223372036854775808")
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            syntax_error("3&4").to_string(),
            "unexpected token ILLEGAL `&` at 1:2"
        );
        assert_eq!(syntax_error("1+").to_string(), "unexpected token EOF at 1:2");
    }

    proptest! {
        #[test]
        fn parsing_is_deterministic(src in "[0-9]{1,3}([ \n]?[-+*/][ \n]?[0-9]{1,3}){0,8}") {
            let first = parse_str(&src).unwrap();
            let second = parse_str(&src).unwrap();
            prop_assert_eq!(first.to_string(), second.to_string());
            prop_assert_eq!(first, second);
        }
    }
}
