//! Integer arithmetic over `+ - * /`: lexer, recursive-descent parser and
//! tree-walking evaluator.

pub mod ast;
pub mod eval;
pub mod lexer;
pub mod parser;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

/// Parses one expression from `input`, writes its parenthesized form and then
/// its value to `out`.
///
/// The rendering line is written before evaluation, so a division by zero
/// still leaves it in `out`.
pub fn run<R: BufRead, W: Write>(input: R, out: &mut W) -> Result<i64> {
    let expr = parser::parse(input)?;
    writeln!(out, "{}", expr).context("failed to write output")?;

    let value = eval::evaluate(&expr)?;
    log::debug!("run: {} = {}", expr, value);
    writeln!(out, "{}", value).context("failed to write output")?;
    Ok(value)
}

pub fn open_input(path: Option<&str>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            log::debug!("open_input: {}", path);
            let file = File::open(path).with_context(|| format!("failed to open {}", path))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => {
            log::debug!("open_input: stdin");
            Ok(Box::new(BufReader::new(io::stdin())))
        }
    }
}
