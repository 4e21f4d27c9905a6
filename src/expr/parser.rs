//! Signed-term parser: expression strings to [`Length`] values.
//!
//! An expression is a sequence of terms separated by `+`/`-` signs, with an
//! optional leading sign: `"20pw+40ph"`, `"-10px"`, `"50pw + 20ph"`. Each
//! term splits into its numeric literal and a trailing unit suffix by
//! scanning backward from the end until a digit or decimal point is found;
//! a term ending in a digit defaults to pixels. The backward scan keeps the
//! parser agnostic to the unit alphabet, it only requires that no unit
//! symbol contains a digit.

use crate::expr::lexer::{tokenize, Token};
use crate::expr::length::Length;
use crate::expr::splitter::SplitError;
use crate::expr::unit::{Unit, UnitError};

/// Errors from expression parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error(transparent)]
    Unit(#[from] UnitError),
    #[error(transparent)]
    Split(#[from] SplitError),
    #[error("expected {expected} values, found {found}")]
    ValueCount {
        expected: &'static str,
        found: usize,
    },
}

/// Parse an expression string into a [`Length`].
///
/// Zero terms produce [`Length::Empty`], one term a leaf, several terms a sum
/// with each term's sign folded into its value.
pub fn parse(input: &str) -> Result<Length, ParseError> {
    let tokens = tokenize(input).map_err(|position| ParseError::UnexpectedToken {
        position,
        message: "expected a sign or a term".into(),
    })?;

    let mut terms: Vec<Length> = Vec::new();
    // Sign waiting for its term: +1/-1 plus the sign's position for errors.
    let mut pending_sign: Option<(f64, usize)> = None;

    for (token, slice, offset) in tokens {
        match token {
            Token::Plus | Token::Minus => {
                if pending_sign.is_some() {
                    return Err(ParseError::UnexpectedToken {
                        position: offset,
                        message: "adjacent signs".into(),
                    });
                }
                let sign = if token == Token::Minus { -1.0 } else { 1.0 };
                pending_sign = Some((sign, offset));
            }
            Token::Term => {
                if !terms.is_empty() && pending_sign.is_none() {
                    return Err(ParseError::UnexpectedToken {
                        position: offset,
                        message: "expected `+` or `-` between terms".into(),
                    });
                }
                let sign = pending_sign.take().map_or(1.0, |(sign, _)| sign);
                terms.push(parse_term(slice, offset, sign)?);
            }
        }
    }

    if pending_sign.is_some() {
        return Err(ParseError::UnexpectedEof("expected a term after sign".into()));
    }

    Ok(match terms.len() {
        0 => Length::Empty,
        1 => terms.remove(0),
        _ => Length::sum(terms),
    })
}

/// Split one term slice into literal and unit suffix, producing a leaf.
fn parse_term(slice: &str, offset: usize, sign: f64) -> Result<Length, ParseError> {
    let split_at = slice
        .rfind(|c: char| c.is_ascii_digit() || c == '.')
        .map_or(0, |i| i + 1);
    let (literal, suffix) = slice.split_at(split_at);

    let value: f64 = literal.parse().map_err(|_| ParseError::UnexpectedToken {
        position: offset,
        message: format!("invalid numeric literal `{literal}`"),
    })?;
    let unit = if suffix.is_empty() {
        Unit::Pixel
    } else {
        Unit::from_symbol(suffix)?
    };

    Ok(Length::new(sign * value, unit))
}
