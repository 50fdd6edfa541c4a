//! The built-in English (`%L`) baseline table.
//!
//! spec.md's glossary defines `%L` as "the system English compose file,
//! treated as always implicitly included unless the user opts out." The
//! core itself ships no keysym database (spec.md §1), so this is not the
//! full upstream `en_US.UTF-8/Compose` file — it's a curated, representative
//! subset of the common Latin-1 dead-key sequences, in the same raw packed
//! shape GTK+ embeds its built-in table in (`gtkimcontextsimple.c`'s
//! `default_compose_table`, reused upstream as `ibus_compose_seqs_default`).
//! A real deployment supplies the full table via [`table_list_add_array`]
//! or by pointing `%S` at an installed X11 locale tree.

use crate::table::{table_list_add_array, ComposeTable, ComposeTableList};

/// Two keysyms per sequence: a dead key followed by its base letter.
const BASELINE_MAX_SEQ_LEN: u16 = 2;

// Keysym values below are the standard X11 keysym codes for these names.
const MULTI_KEY: u16 = 0xff20;
const DEAD_ACUTE: u16 = 0xfe51;
const DEAD_GRAVE: u16 = 0xfe50;
const DEAD_CIRCUMFLEX: u16 = 0xfe52;
const DEAD_TILDE: u16 = 0xfe53;
const DEAD_DIAERESIS: u16 = 0xfe57;
const DEAD_CEDILLA: u16 = 0xfe5b;
const DEAD_ABOVERING: u16 = 0xfe58;

/// `(dead key, base letter, output)` triples forming the narrow-section
/// rows. Each row is packed as `[dead, base, output, 0]` (row stride 4 =
/// `BASELINE_MAX_SEQ_LEN + 2`).
#[rustfmt::skip]
const ENTRIES: &[(u16, u16, char)] = &[
    (DEAD_ACUTE, b'a' as u16, '\u{00e1}'), (DEAD_ACUTE, b'e' as u16, '\u{00e9}'),
    (DEAD_ACUTE, b'i' as u16, '\u{00ed}'), (DEAD_ACUTE, b'o' as u16, '\u{00f3}'),
    (DEAD_ACUTE, b'u' as u16, '\u{00fa}'), (DEAD_ACUTE, b'y' as u16, '\u{00fd}'),
    (DEAD_ACUTE, b'A' as u16, '\u{00c1}'), (DEAD_ACUTE, b'E' as u16, '\u{00c9}'),
    (DEAD_ACUTE, b'I' as u16, '\u{00cd}'), (DEAD_ACUTE, b'O' as u16, '\u{00d3}'),
    (DEAD_ACUTE, b'U' as u16, '\u{00da}'), (DEAD_ACUTE, b'c' as u16, '\u{0107}'),
    (DEAD_GRAVE, b'a' as u16, '\u{00e0}'), (DEAD_GRAVE, b'e' as u16, '\u{00e8}'),
    (DEAD_GRAVE, b'i' as u16, '\u{00ec}'), (DEAD_GRAVE, b'o' as u16, '\u{00f2}'),
    (DEAD_GRAVE, b'u' as u16, '\u{00f9}'),
    (DEAD_CIRCUMFLEX, b'a' as u16, '\u{00e2}'), (DEAD_CIRCUMFLEX, b'e' as u16, '\u{00ea}'),
    (DEAD_CIRCUMFLEX, b'i' as u16, '\u{00ee}'), (DEAD_CIRCUMFLEX, b'o' as u16, '\u{00f4}'),
    (DEAD_CIRCUMFLEX, b'u' as u16, '\u{00fb}'),
    (DEAD_TILDE, b'a' as u16, '\u{00e3}'), (DEAD_TILDE, b'n' as u16, '\u{00f1}'),
    (DEAD_TILDE, b'o' as u16, '\u{00f5}'),
    (DEAD_DIAERESIS, b'a' as u16, '\u{00e4}'), (DEAD_DIAERESIS, b'e' as u16, '\u{00eb}'),
    (DEAD_DIAERESIS, b'i' as u16, '\u{00ef}'), (DEAD_DIAERESIS, b'o' as u16, '\u{00f6}'),
    (DEAD_DIAERESIS, b'u' as u16, '\u{00fc}'),
    (DEAD_CEDILLA, b'c' as u16, '\u{00e7}'), (DEAD_CEDILLA, b'C' as u16, '\u{00c7}'),
    (DEAD_ABOVERING, b'a' as u16, '\u{00e5}'), (DEAD_ABOVERING, b'A' as u16, '\u{00c5}'),
    (MULTI_KEY, b'o' as u16, '\u{00b0}'),
];

/// Builds the raw packed array GTK-style, sorted by key so the lookup
/// engine's binary search works once this is wrapped in a [`ComposeTable`].
fn packed_data() -> Vec<u16> {
    let mut rows: Vec<(u16, u16, char)> = ENTRIES.to_vec();
    rows.sort_by_key(|&(dead, base, _)| (dead, base));

    let stride = BASELINE_MAX_SEQ_LEN as usize + 2;
    let mut data = vec![0u16; rows.len() * stride];
    for (i, &(dead, base, out)) in rows.iter().enumerate() {
        data[i * stride] = dead;
        data[i * stride + 1] = base;
        data[i * stride + 2] = out as u16;
        data[i * stride + 3] = 0;
    }
    data
}

/// Registers the baseline table in `list` (idempotent: re-registering is a
/// no-op because the data hash, and therefore the id, never changes).
pub fn register(list: &mut ComposeTableList) -> &ComposeTable {
    let data = packed_data();
    table_list_add_array(list, &data, BASELINE_MAX_SEQ_LEN, ENTRIES.len())
}
