//! `include "<path>"` substitution.
//!
//! Equivalent to `expand_include_path` (`ibuscomposetable.c:259-320`). Per
//! the open question in spec.md §9, the buggy no-op trailing-whitespace
//! loop in the original is replaced with the documented intended
//! behaviour: any non-empty suffix after `%L` is rejected.

use crate::config::X11_LOCALEDATADIR;
use crate::error::IncludeWarning;

/// The result of expanding an `include` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandedInclude {
    /// `%L` appeared alone: load the built-in English baseline.
    Baseline,
    /// A concrete filesystem path with all substitutions applied.
    Path(String),
}

/// Expands `%H`, `%S`, `%%`, and `%L` substitutions left to right.
pub fn expand_include_path(
    raw: &str,
    home: Option<&str>,
    line_no: usize,
) -> Result<ExpandedInclude, IncludeWarning> {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '%' {
            match chars.get(i + 1) {
                Some('H') => {
                    let home = home.ok_or(IncludeWarning::MissingHome { line_no })?;
                    out.push_str(home);
                    i += 2;
                }
                Some('L') => {
                    let suffix: String = chars[i + 2..].iter().collect();
                    if !suffix.trim().is_empty() {
                        return Err(IncludeWarning::TrailingAfterBaseline { line_no });
                    }
                    return Ok(ExpandedInclude::Baseline);
                }
                Some('S') => {
                    out.push_str(X11_LOCALEDATADIR);
                    i += 2;
                }
                Some('%') => {
                    out.push('%');
                    i += 2;
                }
                Some(other) => {
                    return Err(IncludeWarning::UnknownSubstitution { line_no, letter: *other });
                }
                None => {
                    return Err(IncludeWarning::UnknownSubstitution { line_no, letter: '%' });
                }
            }
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    Ok(ExpandedInclude::Path(out))
}

/// Strips a leading/trailing `"` pair from an include target, matching the
/// original's quote-eating in `parse_compose_line`.
pub fn strip_quotes(raw: &str) -> &str {
    let trimmed = raw.trim_start();
    match trimmed.strip_prefix('"') {
        Some(rest) => rest.split('"').next().unwrap_or(""),
        None => trimmed,
    }
}
