//! Lexing of the bracketed field notation.
//!
//! Both the persisted transcription string and the handshape interchange file
//! use the layout `[f1]1[f2]2[f3]3[f4]4[f5]5[f6]6[f7]7`, where each body holds
//! one token per slot of that field. Tokens are single characters except in
//! the crossing slots, which consume `x+` / `x-` greedily.

use crate::error::{CoreError, Result};
use crate::schema::{self, Field, FIELD_COUNT};

/// Split a bracketed code into its seven field bodies.
///
/// Surrounding whitespace (e.g. a trailing newline from a file) is ignored.
pub fn split_fields(raw: &str) -> Result<[&str; FIELD_COUNT]> {
    let mut rest = raw.trim();
    let mut bodies = [""; FIELD_COUNT];

    for (i, field) in Field::ALL.iter().enumerate() {
        let number = field.number();
        rest = rest.strip_prefix('[').ok_or_else(|| {
            CoreError::format(format!("expected '[' opening field {number}"))
        })?;
        let close = rest.find(']').ok_or_else(|| {
            CoreError::format(format!("field {number} is missing its closing ']'"))
        })?;
        bodies[i] = &rest[..close];
        rest = &rest[close + 1..];

        let digit = char::from_digit(number as u32, 10).unwrap_or('?');
        rest = rest.strip_prefix(digit).ok_or_else(|| {
            CoreError::format(format!("field {number} must be followed by its number"))
        })?;
    }

    if !rest.is_empty() {
        return Err(CoreError::format(format!(
            "unexpected trailing text after field {FIELD_COUNT}: '{rest}'"
        )));
    }
    Ok(bodies)
}

/// Split one field body into per-slot tokens.
///
/// A `blank` character yields an empty token. The returned vector always has
/// exactly `field.len()` entries.
pub fn tokenize(field: Field, body: &str, blank: char) -> Result<Vec<String>> {
    let mut tokens = Vec::with_capacity(field.len());
    let mut rest = body;

    for number in field.slots() {
        let mut chars = rest.chars();
        let first = chars.next().ok_or_else(|| {
            CoreError::format(format!(
                "field {} has {} slot(s), expected {}",
                field.number(),
                tokens.len(),
                field.len()
            ))
        })?;

        if first == blank {
            tokens.push(String::new());
            rest = chars.as_str();
            continue;
        }

        if schema::slot(number).is_crossing() && first == 'x' {
            if let Some(second @ ('+' | '-')) = chars.clone().next() {
                tokens.push(format!("x{second}"));
                rest = &rest[2..];
                continue;
            }
        }

        tokens.push(first.to_string());
        rest = chars.as_str();
    }

    if !rest.is_empty() {
        return Err(CoreError::format(format!(
            "field {} has extra content '{rest}' after {} slot(s)",
            field.number(),
            field.len()
        )));
    }
    Ok(tokens)
}

/// Split and tokenize a whole code. Entry `i` is the value of slot `i + 1`.
pub fn tokenize_all(raw: &str, blank: char) -> Result<Vec<String>> {
    let bodies = split_fields(raw)?;
    let mut tokens = Vec::with_capacity(schema::SLOT_COUNT);
    for (field, body) in Field::ALL.iter().zip(bodies) {
        tokens.extend(tokenize(*field, body, blank)?);
    }
    Ok(tokens)
}
