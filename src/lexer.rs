use crate::parser::SyntaxError;
use anyhow::{Context, Result};
use std::fmt;
use std::io::BufRead;
use utf8_chars::BufReadCharsExt;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum TokenKind {
    Eof,
    Illegal,
    /// Reserved. The lexer never produces identifiers.
    Ident,
    Int,

    // Infix ops
    Add,
    Sub,
    Mul,
    Div,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::Add => "+",
            TokenKind::Sub => "-",
            TokenKind::Mul => "*",
            TokenKind::Div => "/",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    fn bare(kind: TokenKind) -> Token {
        Token {
            kind,
            literal: String::new(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literal.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} `{}`", self.kind, self.literal)
        }
    }
}

/// Line is 1-indexed. Column counts characters consumed on the current line.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn start() -> Position {
        Position { line: 1, column: 0 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

pub struct Lexer<R> {
    reader: R,
    pos: Position,
    held_char: Option<char>,
    held_token: Option<(Token, Position)>,
}

impl<R: BufRead> Lexer<R> {
    pub fn new(reader: R) -> Self {
        Lexer {
            reader,
            pos: Position::start(),
            held_char: None,
            held_token: None,
        }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    /// Returns the next token together with the cursor position right after it.
    pub fn next_token(&mut self) -> Result<(Token, Position)> {
        if let Some(held) = self.held_token.take() {
            log::trace!("next_token: replay {} at {}", held.0, held.1);
            return Ok(held);
        }

        let token = self.lex()?;
        log::trace!("next_token: {} at {}", token, self.pos);
        Ok((token, self.pos))
    }

    pub fn unread_token(&mut self, token: Token, pos: Position) -> Result<()> {
        if self.held_token.is_some() {
            return Err(SyntaxError::LookaheadOccupied.into());
        }
        log::trace!("unread_token: {} at {}", token, pos);
        self.held_token = Some((token, pos));
        Ok(())
    }

    fn lex(&mut self) -> Result<Token> {
        loop {
            let c = match self.read_char()? {
                Some(c) => c,
                None => return Ok(Token::bare(TokenKind::Eof)),
            };

            match c {
                '\n' => self.new_line(),
                '+' => return Ok(Token::bare(TokenKind::Add)),
                '-' => return Ok(Token::bare(TokenKind::Sub)),
                '*' => return Ok(Token::bare(TokenKind::Mul)),
                '/' => return Ok(Token::bare(TokenKind::Div)),
                c if c.is_whitespace() => {}
                c if c.is_ascii_digit() => {
                    self.unread_char(c);
                    return self.lex_int();
                }
                c => {
                    return Ok(Token {
                        kind: TokenKind::Illegal,
                        literal: c.to_string(),
                    })
                }
            }
        }
    }

    fn lex_int(&mut self) -> Result<Token> {
        let mut literal = String::new();
        while let Some(c) = self.read_char()? {
            if c.is_ascii_digit() {
                literal.push(c);
            } else {
                self.unread_char(c);
                break;
            }
        }
        Ok(Token {
            kind: TokenKind::Int,
            literal,
        })
    }

    fn read_char(&mut self) -> Result<Option<char>> {
        let c = match self.held_char.take() {
            Some(c) => Some(c),
            None => self.reader.read_char().context("failed to read input")?,
        };
        if c.is_some() {
            self.pos.column += 1;
        }
        Ok(c)
    }

    fn unread_char(&mut self, c: char) {
        debug_assert!(self.held_char.is_none(), "character pushback slot occupied");
        self.held_char = Some(c);
        self.pos.column = self.pos.column.saturating_sub(1);
    }

    fn new_line(&mut self) {
        self.pos.line += 1;
        self.pos.column = 0;
    }
}
