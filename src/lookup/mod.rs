//! The prefix-lookup engine: binary search, back-up, and classification
//! over a packed [`ComposeTable`] section.
//!
//! Equivalent to `compare_seq` / `ibus_compose_table_check`
//! (`ibuscomposetable.c:1838-1995`).

mod nfc;

pub use nfc::check_algorithmically;

use crate::keysym::{keysym_flag, KeysymSource};
use crate::table::ComposeTable;

/// Outcome of a [`table_check`] query. `Complete::extensible` and
/// `Partial` are mutually exclusive by construction, matching spec.md
/// §4.5's "never signals a complete match and a non-empty extensibility
/// probe simultaneously".
#[derive(Debug, Clone, PartialEq)]
pub enum CheckResult {
    NoMatch,
    Partial,
    Complete { output: Vec<char>, extensible: bool },
}

/// Looks up `typed` (a prefix of keysyms) against `table`'s narrow or wide
/// section.
pub fn table_check(
    table: &ComposeTable,
    typed: &[u32],
    is_wide: bool,
    source: &dyn KeysymSource,
) -> CheckResult {
    let n_compose = typed.len();
    if n_compose > table.max_seq_len as usize {
        return CheckResult::NoMatch;
    }

    let n_seqs = if is_wide { table.n_wide } else { table.n_narrow } as usize;
    if n_seqs == 0 {
        return CheckResult::NoMatch;
    }

    let cmp = |row: usize| compare_row(table, row, is_wide, typed, source);

    let mut found = match binary_search(n_seqs, cmp) {
        Some(row) => row,
        None => return CheckResult::NoMatch,
    };

    while found > 0 && cmp(found - 1) == 0 {
        found -= 1;
    }

    let row_stride = table.row_stride();
    let is_complete = n_compose == table.max_seq_len as usize
        || cell(table, found, n_compose, is_wide) == 0;

    if !is_complete {
        return CheckResult::Partial;
    }

    let output = if is_wide {
        let count = cell(table, found, row_stride - 2, is_wide) as usize;
        let index = cell(table, found, row_stride - 1, is_wide) as usize;
        (0..count)
            .filter_map(|i| char::from_u32(table.wide_value(index + i)))
            .collect()
    } else {
        let scalar = cell(table, found, row_stride - 2, is_wide) as u32;
        char::from_u32(scalar).into_iter().collect()
    };

    let extensible = found + 1 < n_seqs && cmp(found + 1) == 0;

    CheckResult::Complete { output, extensible }
}

fn cell(table: &ComposeTable, row: usize, col: usize, is_wide: bool) -> u16 {
    if is_wide {
        table.wide_cell(row, col)
    } else {
        table.narrow_cell(row, col)
    }
}

/// Returns the signed difference (as in `compare_seq`) between `typed` and
/// the stored row `row`; `0` means every cell in `0..typed.len()` matched.
fn compare_row(
    table: &ComposeTable,
    row: usize,
    is_wide: bool,
    typed: &[u32],
    source: &dyn KeysymSource,
) -> i64 {
    for (i, &typed_key) in typed.iter().enumerate() {
        let stored = cell(table, row, i, is_wide);
        let name = source.name_by_keysym(stored as u32);
        let flag = keysym_flag(stored as u32, name);
        let expected = stored as u32 + flag;
        if typed_key != expected {
            return (0xffff & typed_key) as i64 - stored as i64;
        }
    }
    0
}

/// Binary search over `0..n_seqs` for the row where `cmp(row) == 0`.
/// `cmp` must be monotonic: negative for rows before the match, positive
/// for rows after.
fn binary_search(n_seqs: usize, cmp: impl Fn(usize) -> i64) -> Option<usize> {
    let mut lo = 0;
    let mut hi = n_seqs;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match cmp(mid) {
            0 => return Some(mid),
            d if d < 0 => lo = mid + 1,
            _ => hi = mid,
        }
    }
    None
}
