//! Top-level file parsing: line splitting, include expansion, and the
//! recursion guard.
//!
//! Equivalent to `ibus_compose_list_parse_file` (`ibuscomposetable.c:419-507`).
//! Unlike the original, which only compares an include target against its
//! immediate parent's inode, this walks the full chain of ancestor files
//! so a longer cycle (`A` includes `B` includes `A`) is caught as reliably
//! as a direct self-include — the behaviour the Design Notes in spec.md §9
//! describe ("include cycles are broken by inode equality").

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::X11_LOCALEDATADIR;
use crate::error::{ComposeError, IncludeWarning, ParseWarning};
use crate::keysym::KeysymSource;
use crate::parser::include::{expand_include_path, strip_quotes, ExpandedInclude};
use crate::parser::record::ComposeRecord;
use crate::parser::sequence::parse_sequence;
use crate::parser::value::parse_value;
use crate::util::env;
use crate::util::file_status::{file_identity, FileIdentity};

/// System languages searched for the built-in English baseline file, in
/// order. Equivalent to `get_en_compose_file`'s `sys_langs`.
const EN_COMPOSE_CANDIDATES: &[&str] = &["en_US.UTF-8", "en_US", "en.UTF-8", "en"];

/// Accumulated result of parsing a file and everything it transitively
/// includes.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub records: Vec<ComposeRecord>,
    pub max_seq_len: usize,
    pub can_load_en_us: bool,
    pub warnings: Vec<ParseWarning>,
}

/// Locates the system's built-in English Compose file, if installed.
/// Returns `None` in environments without an X11 locale tree (tests, most
/// containers) — callers treat that the same as "no baseline to dedupe
/// against at the filesystem level".
fn en_compose_path() -> Option<PathBuf> {
    for lang in EN_COMPOSE_CANDIDATES {
        let path = Path::new(X11_LOCALEDATADIR).join(lang).join("Compose");
        if path.exists() {
            return Some(path);
        }
    }
    None
}

/// Parses `path` and every file it (transitively) includes.
pub fn parse_file(path: &Path, source: &dyn KeysymSource) -> Result<ParseOutcome, ComposeError> {
    let identity = file_identity(path).ok();
    let mut stack = Vec::new();
    if let Some(id) = identity {
        stack.push(id);
    }
    let en_path = en_compose_path();
    let en_identity = en_path.as_deref().and_then(|p| file_identity(p).ok());

    let mut outcome = ParseOutcome::default();
    parse_file_into(path, source, &mut stack, en_identity, &mut outcome)?;
    Ok(outcome)
}

fn parse_file_into(
    path: &Path,
    source: &dyn KeysymSource,
    stack: &mut Vec<FileIdentity>,
    en_identity: Option<FileIdentity>,
    outcome: &mut ParseOutcome,
) -> Result<(), ComposeError> {
    let contents = fs::read_to_string(path).map_err(|e| ComposeError::FatalLoad {
        path: path.to_path_buf(),
        source: e,
    })?;

    for (idx, line) in contents.split('\n').enumerate() {
        let line_no = idx + 1;
        match parse_line(line, line_no, source) {
            LineOutcome::Nothing => {}
            LineOutcome::Record(record, warnings) => {
                if outcome.max_seq_len < record.sequence.len() {
                    outcome.max_seq_len = record.sequence.len();
                }
                outcome.records.push(record);
                outcome.warnings.extend(warnings);
            }
            LineOutcome::Warning(w) => outcome.warnings.push(w),
            LineOutcome::Include(target) => {
                match expand_include_path(target, env::home().as_deref(), line_no) {
                    Ok(ExpandedInclude::Baseline) => outcome.can_load_en_us = true,
                    Ok(ExpandedInclude::Path(include_path)) => {
                        handle_include(&include_path, line_no, source, stack, en_identity, outcome)?;
                    }
                    Err(w) => outcome.warnings.push(ParseWarning::Include(w)),
                }
            }
        }
    }

    Ok(())
}

fn handle_include(
    include_path: &str,
    line_no: usize,
    source: &dyn KeysymSource,
    stack: &mut Vec<FileIdentity>,
    en_identity: Option<FileIdentity>,
    outcome: &mut ParseOutcome,
) -> Result<(), ComposeError> {
    let path = PathBuf::from(include_path);

    let identity = match file_identity(&path) {
        Ok(id) => id,
        Err(_) => {
            outcome.warnings.push(ParseWarning::Include(IncludeWarning::Unreadable {
                line_no,
                path,
            }));
            return Ok(());
        }
    };

    if stack.contains(&identity) {
        outcome.warnings.push(ParseWarning::Include(IncludeWarning::Cycle { line_no, path }));
        return Ok(());
    }

    if en_identity == Some(identity) {
        // Including the system baseline by path is equivalent to `%L`.
        outcome.can_load_en_us = true;
        return Ok(());
    }

    stack.push(identity);
    let result = parse_file_into(&path, source, stack, en_identity, outcome);
    stack.pop();
    result
}

enum LineOutcome<'a> {
    Nothing,
    Record(ComposeRecord, Vec<ParseWarning>),
    Warning(ParseWarning),
    Include(&'a str),
}

/// Parses one physical line, dispatching to the sequence/value grammar or
/// to include-target extraction. Equivalent to `parse_compose_line`
/// (`ibuscomposetable.c:339-393`).
fn parse_line<'a>(line: &'a str, line_no: usize, source: &dyn KeysymSource) -> LineOutcome<'a> {
    let trimmed = line.trim_start_matches([' ', '\t']);
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return LineOutcome::Nothing;
    }

    if let Some(rest) = trimmed.strip_prefix("include ") {
        let target = strip_quotes(rest.trim_start_matches(' '));
        return LineOutcome::Include(target);
    }

    let mut parts = trimmed.splitn(2, ':');
    let seq_field = match parts.next() {
        Some(f) => f,
        None => return LineOutcome::Warning(malformed(line_no, trimmed)),
    };
    let value_field = match parts.next() {
        Some(f) => f,
        None => return LineOutcome::Warning(malformed(line_no, trimmed)),
    };

    let (sequence, seq_warnings) = match parse_sequence(seq_field.trim(), line_no, source) {
        Ok(ok) => ok,
        Err(w) => return LineOutcome::Warning(w),
    };
    let (values, comment) = match parse_value(value_field.trim(), line_no) {
        Ok(ok) => ok,
        Err(w) => return LineOutcome::Warning(w),
    };

    LineOutcome::Record(ComposeRecord::new(sequence, values, comment), seq_warnings)
}

fn malformed(line_no: usize, text: &str) -> ParseWarning {
    ParseWarning::MalformedLine { line_no, text: text.to_string() }
}
