//! The `<keysym1> <keysym2> …` sequence grammar.
//!
//! Equivalent to `parse_compose_sequence` (`ibuscomposetable.c:179-245`).

use crate::config::MAX_COMPOSE_LEN;
use crate::error::ParseWarning;
use crate::keysym::{keysym_flag, KeysymSource, VOID_SYMBOL};

/// Parses the `<a> <b> …` field (everything before the `:`) into a keysym
/// sequence, plus any soft warnings collected along the way. Unresolvable
/// names and out-of-range lengths fail the whole line, except an unflagged
/// keysym above `0xFFFF`, which is retained with a warning (spec.md §4.1).
pub fn parse_sequence(
    field: &str,
    line_no: usize,
    source: &dyn KeysymSource,
) -> Result<(Vec<u32>, Vec<ParseWarning>), ParseWarning> {
    let tokens = bracketed_tokens(field);
    if tokens.is_empty() {
        return Err(ParseWarning::MalformedLine { line_no, text: field.to_string() });
    }

    let mut sequence = Vec::with_capacity(tokens.len());
    let mut warnings = Vec::new();
    for token in tokens {
        let codepoint = resolve_token(token, source)
            .ok_or_else(|| ParseWarning::UnknownKeysym { line_no, name: token.to_string() })?;

        if codepoint == VOID_SYMBOL {
            return Err(ParseWarning::VoidSymbolInSequence { line_no });
        }

        if codepoint >= 0x10000 {
            let name = source.name_by_keysym(codepoint & 0xffff);
            if keysym_flag(codepoint & 0xffff, name) == 0 {
                warnings.push(ParseWarning::UnknownKeysym { line_no, name: token.to_string() });
            }
        }

        sequence.push(codepoint);
    }

    if sequence.is_empty() || sequence.len() > MAX_COMPOSE_LEN {
        return Err(ParseWarning::SequenceLengthOutOfRange {
            line_no,
            len: sequence.len(),
        });
    }

    Ok((sequence, warnings))
}

/// Splits `<a><b>...` into the substrings between matching `<`/`>` pairs,
/// ignoring any text outside brackets (the original splits on `<` and then
/// looks for the matching `>` in each fragment).
fn bracketed_tokens(field: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = field;
    while let Some(open) = rest.find('<') {
        let after_open = &rest[open + 1..];
        match after_open.find('>') {
            Some(close) => {
                let token = &after_open[..close];
                if !token.is_empty() {
                    tokens.push(token);
                }
                rest = &after_open[close + 1..];
            }
            None => break,
        }
    }
    tokens
}

/// `Uxxxx` is a hex codepoint literal; `U` alone is not (matches
/// `is_codepoint`'s special case that bare `"U"` is a keysym name).
/// Returns `None` when the token names no keysym the host knows about.
fn resolve_token(token: &str, source: &dyn KeysymSource) -> Option<u32> {
    if let Some(hex) = token.strip_prefix('U') {
        if !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return u32::from_str_radix(hex, 16).ok();
        }
    }
    source.keysym_by_name(token)
}
