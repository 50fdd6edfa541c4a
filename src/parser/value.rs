//! The quoted value and trailing-comment grammar.
//!
//! Equivalent to `parse_compose_value` (`ibuscomposetable.c:99-165`), with
//! the closing-quote rule generalised from the original's two-character
//! lookback to a full backslash-run count (spec.md §4.1).

use crate::error::ParseWarning;

/// Parses the `"value" comment?` tail of a compose line (everything after
/// the `:`). Returns the decoded Unicode scalars and the stripped comment.
pub fn parse_value(field: &str, line_no: usize) -> Result<(Vec<char>, Option<String>), ParseWarning> {
    let bytes: Vec<char> = field.chars().collect();
    let open = bytes
        .iter()
        .position(|&c| c == '"')
        .ok_or_else(|| malformed(line_no, field))?;

    let close = find_closing_quote(&bytes, open + 1).ok_or_else(|| malformed(line_no, field))?;

    let inner: String = bytes[open + 1..close].iter().collect();
    let values = decode_inner(&inner, line_no, field)?;

    let tail: String = bytes[close + 1..].iter().collect();
    let comment = strip_comment_tail(&tail);

    Ok((values, comment))
}

fn malformed(line_no: usize, text: &str) -> ParseWarning {
    ParseWarning::MalformedLine { line_no, text: text.to_string() }
}

/// Scans forward from `start` for a `"` not preceded by an odd-length run
/// of backslashes (an escaped quote is part of the value, not the close).
fn find_closing_quote(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start;
    while i < chars.len() {
        if chars[i] == '"' {
            let mut run = 0;
            let mut j = i;
            while j > start && chars[j - 1] == '\\' {
                run += 1;
                j -= 1;
            }
            if run % 2 == 0 {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}

/// Decodes the content between the quotes: either a single `\NNN` octal
/// escape (only the first octal run is honoured, matching the open
/// question in spec.md §9), or literal UTF-8 text with `\"`/`\\` unescaped.
fn decode_inner(inner: &str, line_no: usize, field: &str) -> Result<Vec<char>, ParseWarning> {
    let chars: Vec<char> = inner.chars().collect();
    if chars.first() == Some(&'\\') && chars.get(1).is_some_and(|c| ('0'..='8').contains(c)) {
        let octal_digits: String = chars[1..]
            .iter()
            .take_while(|c| ('0'..='7').contains(c))
            .collect();
        let scalar = u32::from_str_radix(&octal_digits, 8).map_err(|_| malformed(line_no, field))?;
        let ch = char::from_u32(scalar).ok_or_else(|| malformed(line_no, field))?;
        return Ok(vec![ch]);
    }

    if chars.is_empty() {
        return Err(malformed(line_no, field));
    }

    let mut out = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '\\' {
            match chars.get(i + 1) {
                Some('"') => {
                    out.push('"');
                    i += 2;
                }
                Some('\\') => {
                    out.push('\\');
                    i += 2;
                }
                _ => return Err(malformed(line_no, field)),
            }
        } else {
            out.push(c);
            i += 1;
        }
    }
    Ok(out)
}

/// The comment is the stripped tail after the closing quote; a leading `#`
/// is dropped if present.
fn strip_comment_tail(tail: &str) -> Option<String> {
    let trimmed = tail.trim();
    if trimmed.is_empty() {
        return None;
    }
    let without_hash = trimmed.strip_prefix('#').unwrap_or(trimmed).trim();
    if without_hash.is_empty() {
        None
    } else {
        Some(without_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_value_with_comment() {
        let (values, comment) = parse_value(r#""æ" # ae ligature"#, 1).unwrap();
        assert_eq!(values, vec!['æ']);
        assert_eq!(comment.as_deref(), Some("ae ligature"));
    }

    #[test]
    fn parses_escaped_quote_and_backslash() {
        let (values, _) = parse_value(r#""\"quoted\\\"" "#, 1).unwrap();
        assert_eq!(values, vec!['"', 'q', 'u', 'o', 't', 'e', 'd', '\\', '"']);
    }

    #[test]
    fn parses_octal_escape() {
        let (values, _) = parse_value(r#""\101""#, 1).unwrap();
        assert_eq!(values, vec!['A']);
    }

    #[test]
    fn parses_multi_scalar_value() {
        let (values, _) = parse_value(r#""'n""#, 1).unwrap();
        assert_eq!(values, vec!['\'', 'n']);
    }

    #[test]
    fn rejects_missing_quotes() {
        assert!(parse_value("no quotes here", 1).is_err());
    }

    #[test]
    fn rejects_unterminated_string() {
        assert!(parse_value(r#""unterminated"#, 1).is_err());
    }

    #[test]
    fn comment_without_hash_is_kept_verbatim() {
        let (_, comment) = parse_value(r#""x" trailing note"#, 1).unwrap();
        assert_eq!(comment.as_deref(), Some("trailing note"));
    }
}
