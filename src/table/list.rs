//! `ComposeTableList`: the caller-owned, id-deduplicated list of tables.
//!
//! Equivalent to the `GSList *compose_tables` threaded through
//! `ibus_compose_table_list_add_*` (`ibuscomposetable.c:1703-1834`).

use crate::hash::data_hash;
use crate::table::ComposeTable;

/// An ordered, id-deduplicated collection of [`ComposeTable`]s. Mirrors
/// spec.md §3's `ComposeTableList`: "de-duplication by `id`. No ownership
/// cycles."
#[derive(Debug, Default)]
pub struct ComposeTableList {
    tables: Vec<ComposeTable>,
}

impl ComposeTableList {
    pub fn new() -> Self {
        ComposeTableList { tables: Vec::new() }
    }

    pub fn tables(&self) -> &[ComposeTable] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// `true` if any already-registered table requests the baseline
    /// (`can_load_en_us`), driving cross-table dedup in `normalize`.
    pub fn any_requests_baseline(&self) -> bool {
        self.tables.iter().any(|t| t.can_load_en_us)
    }

    pub fn find_by_id(&self, id: u32) -> Option<&ComposeTable> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// Registers `table`, unless a table with the same `id` is already
    /// present (idempotent, matching `ibus_compose_table_list_add_table`).
    /// Returns the table that ends up at that id, new or pre-existing.
    pub fn add_table(&mut self, table: ComposeTable) -> &ComposeTable {
        let id = table.id;
        if let Some(pos) = self.tables.iter().position(|t| t.id == id) {
            return &self.tables[pos];
        }
        self.tables.push(table);
        self.tables.last().unwrap()
    }
}

/// Ingests a built-in static table, e.g. an embedded baseline array in the
/// classic GTK/X11 `ibus_compose_seqs`-style layout: `n_seqs` rows of
/// `max_seq_len` key cells followed by a single-scalar value cell and a
/// trailing zero. Equivalent to `ibus_compose_table_list_add_array`
/// (`ibuscomposetable.c:1703-1739`).
///
/// Idempotent on id: the id is the data hash, so registering the same
/// array twice (even from two different static tables with identical
/// bytes) is a no-op the second time.
pub fn table_list_add_array<'a>(
    list: &'a mut ComposeTableList,
    data: &[u16],
    max_seq_len: u16,
    n_seqs: usize,
) -> &'a ComposeTable {
    let row_stride = max_seq_len as usize + 2;
    let length = row_stride * n_seqs;
    let id = data_hash(&data[..length.min(data.len())]);

    if list.find_by_id(id).is_none() {
        let table = ComposeTable::new_owned(
            max_seq_len,
            n_seqs as u16,
            0,
            data[..length].to_vec(),
            vec![],
            vec![],
            false,
            id,
        );
        list.add_table(table);
    }
    list.find_by_id(id).unwrap()
}
