//! logos-based lexer for signed length expressions.
//!
//! The grammar has exactly three tokens: `+`, `-`, and a term. A term is a
//! numeric literal with its unit suffix attached, so `40ph` is one token and
//! `40 ph` is two (a bare number term followed by an unlexable-as-term `ph`,
//! which the parser rejects). Keeping the suffix inside the term token is what
//! lets signs act as term separators: in `20pw+40ph` the `+` can only be an
//! operator, never part of a literal.

use logos::Logos;

/// Expression token produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// `+`
    #[token("+")]
    Plus,

    /// `-`
    #[token("-")]
    Minus,

    /// Term: numeric literal with optional unit suffix, e.g. `20`, `40ph`,
    /// `12.5pw`, `50%`. The suffix alphabet is any run of letters or `%`;
    /// splitting it from the literal is the parser's job.
    #[regex(r"[0-9]+(\.[0-9]+)?[a-zA-Z%]*")]
    Term,
}

/// Tokenize an expression into `(token, slice, byte_offset)` triples.
///
/// Fails with the byte offset of the first character no token matches.
pub fn tokenize(input: &str) -> Result<Vec<(Token, &str, usize)>, usize> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(input).spanned() {
        match result {
            Ok(token) => tokens.push((token, &input[span.clone()], span.start)),
            Err(()) => return Err(span.start),
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: tokenize and return just the token variants.
    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input)
            .expect("input should lex")
            .into_iter()
            .map(|(t, _, _)| t)
            .collect()
    }

    /// Helper: tokenize and return (token, slice) pairs.
    fn tokens_with_text(input: &str) -> Vec<(Token, String)> {
        tokenize(input)
            .expect("input should lex")
            .into_iter()
            .map(|(t, s, _)| (t, s.to_string()))
            .collect()
    }

    // ── Terms ────────────────────────────────────────────────────────

    #[test]
    fn test_single_term_with_unit() {
        assert_eq!(
            tokens_with_text("40ph"),
            vec![(Token::Term, "40ph".into())]
        );
    }

    #[test]
    fn test_bare_number_is_a_term() {
        assert_eq!(tokens_with_text("42"), vec![(Token::Term, "42".into())]);
    }

    #[test]
    fn test_float_term() {
        assert_eq!(
            tokens_with_text("12.5pw"),
            vec![(Token::Term, "12.5pw".into())]
        );
    }

    #[test]
    fn test_percent_term() {
        assert_eq!(tokens_with_text("50%"), vec![(Token::Term, "50%".into())]);
    }

    // ── Signs as separators ──────────────────────────────────────────

    #[test]
    fn test_signed_sequence() {
        assert_eq!(
            tokens("20pw+40ph-10px"),
            vec![
                Token::Term,
                Token::Plus,
                Token::Term,
                Token::Minus,
                Token::Term,
            ]
        );
    }

    #[test]
    fn test_leading_minus() {
        assert_eq!(tokens("-10px"), vec![Token::Minus, Token::Term]);
    }

    #[test]
    fn test_whitespace_around_signs() {
        assert_eq!(
            tokens("50pw + 20ph"),
            vec![Token::Term, Token::Plus, Token::Term]
        );
        assert_eq!(
            tokens("  50pw\t-\n20ph  "),
            vec![Token::Term, Token::Minus, Token::Term]
        );
    }

    // ── Term adjacency ───────────────────────────────────────────────

    #[test]
    fn test_space_split_unit_is_not_one_term() {
        // "10 px" lexes as a bare-number term, then "px" fails to lex.
        let err = tokenize("10 px").unwrap_err();
        assert_eq!(err, 3);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(tokens("").is_empty());
        assert!(tokens("   \t\n  ").is_empty());
    }

    // ── Lex failures ─────────────────────────────────────────────────

    #[test]
    fn test_unlexable_character_position() {
        assert_eq!(tokenize("20pw*2").unwrap_err(), 4);
        assert_eq!(tokenize("(20pw)").unwrap_err(), 0);
    }

    #[test]
    fn test_double_decimal_point_fails() {
        assert!(tokenize("20..5px").is_err());
    }
}
