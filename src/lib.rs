//! Compose-sequence parsing, packed table compilation, and incremental
//! prefix lookup for X11/IBus-style Compose files.
//!
//! A `Compose` file declares sequences of keysyms ("`<Multi_key> <a> <e> :
//! "æ"`") that an input method should combine into a single output string.
//! This crate parses that grammar, de-duplicates declared sequences against
//! a built-in English baseline, compiles the result into a compact packed
//! table, persists it as a versioned cache, and answers "does this typed
//! prefix match a sequence, and if so, what does it produce?" queries at
//! runtime. A parallel Unicode NFC path handles dead-key combining that
//! isn't in any table.
//!
//! The crate owns no keysym name/code database — callers implement
//! [`KeysymSource`] over whatever keysym table their platform provides.

pub mod baseline;
pub mod config;
pub mod error;
mod hash;
pub mod keysym;
pub mod lookup;
pub mod normalize;
pub mod parser;
pub mod table;
mod util;

pub use error::{BuildError, CacheError, ComposeError, IncludeWarning, ParseWarning};
pub use keysym::{KeysymSource, StaticKeysymSource, VOID_SYMBOL};
pub use lookup::{check_algorithmically, table_check, CheckResult};
pub use parser::ComposeRecord;
pub use table::{table_list_add_array, ComposeTable, ComposeTableList};
#[cfg(feature = "recursive")]
pub use util::file_list::create_file_list;

use std::path::Path;

/// Loads `path` into `list`, reusing a fresh on-disk cache when one exists
/// and building (then caching) a fresh table otherwise. Idempotent on the
/// source path's id. See spec section 6, `table_list_add_file`.
pub fn table_list_add_file<'a>(
    list: &'a mut ComposeTableList,
    path: &Path,
    source: &dyn KeysymSource,
) -> Result<&'a ComposeTable, ComposeError> {
    table::load_or_build(list, path, source)
}

/// Registers an already-built table in `list`. A thin wrapper around
/// [`ComposeTableList::add_table`] kept as a free function to mirror the
/// C API's `table_list_add_table`.
pub fn table_list_add_table(list: &mut ComposeTableList, table: ComposeTable) -> &ComposeTable {
    list.add_table(table)
}
