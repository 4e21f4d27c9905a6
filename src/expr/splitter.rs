//! Strict splitter for multi-value lists.
//!
//! Thickness and corner-radius strings carry 1, 2, or 4 expressions separated
//! by commas and/or spaces. The splitter enforces the strict contract: no
//! leading or trailing separator, and no empty token between two separators.
//! Runs of separators collapse only when the extra separators are spaces, so
//! `"a, b"` and `"a  b"` split cleanly while `"a , b"` and `"a,,b"` fail.

/// Errors from splitting a multi-value list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplitError {
    #[error("value is empty")]
    Empty,
    #[error("value begins with a separator")]
    LeadingSeparator,
    #[error("empty value detected")]
    EmptyToken,
}

/// Split `text` into non-empty tokens on the given separator characters.
///
/// The input is trimmed first. With an empty separator set the whole string
/// comes back as one token.
pub fn split<'a>(text: &'a str, separators: &[char]) -> Result<Vec<&'a str>, SplitError> {
    if separators.is_empty() {
        return Ok(vec![text]);
    }

    let text = text.trim();
    if text.is_empty() {
        return Err(SplitError::Empty);
    }
    if text.starts_with(|c| separators.contains(&c)) {
        return Err(SplitError::LeadingSeparator);
    }

    let mut tokens = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        if !separators.contains(&c) {
            start.get_or_insert(i);
            continue;
        }
        match start.take() {
            Some(s) => tokens.push(&text[s..i]),
            // Only spaces may extend a separator run.
            None if c != ' ' => return Err(SplitError::EmptyToken),
            None => {}
        }
    }
    match start {
        Some(s) => tokens.push(&text[s..]),
        // The input was trimmed, so an open token here means it ended in a
        // non-space separator.
        None => return Err(SplitError::EmptyToken),
    }

    Ok(tokens)
}
