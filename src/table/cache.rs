//! Cache-aware file loading: the glue between the parser, normaliser,
//! builder, and codec that implements `table_list_add_file`.
//!
//! Equivalent to `ibus_compose_table_list_add_file` / `rewrite_compose_file`
//! (`ibuscomposetable.c:1644-1820`).

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ComposeError;
use crate::hash::str_hash;
use crate::keysym::KeysymSource;
use crate::normalize::normalize;
use crate::parser::parse_file;
use crate::table::builder::build_table;
use crate::table::codec::{deserialize, peek_version, serialize};
use crate::table::{ComposeTable, ComposeTableList};
use crate::util::env;
use crate::util::file_status::is_cache_fresh;

const MIGRATION_THRESHOLD_SEQS: usize = 100;

const REWRITE_BANNER: &str = "\
# This file was rewritten to add the line:\n\
\n\
include \"%L\"\n\
\n\
# This is necessary to add your own Compose sequences\n\
# in addition to the builtin sequences. If this\n\
# is not what you want, just remove that line.\n\
#\n\
# A backup of the previous file contents has been made.\n\
\n\
\n";

/// Resolves the on-disk cache path for a source Compose file, matching
/// `ibus_compose_hash_get_cache_path`: `<cache-dir>/<hex id>.cache`. Returns
/// `None` if the cache directory can't be created, in which case the
/// caller should skip caching rather than fail the whole load (spec.md §7
/// kind 7: cache I/O failures are never fatal).
pub fn cache_path_for(source_path: &Path) -> Option<PathBuf> {
    let id = source_id(source_path);
    let dir = env::cache_dir()?;
    if fs::create_dir_all(&dir).is_err() {
        return None;
    }
    Some(dir.join(format!("{id:08x}.cache")))
}

fn source_id(source_path: &Path) -> u32 {
    str_hash(&source_path.to_string_lossy())
}

/// Loads `path` into `list`, consulting (and refreshing) the on-disk cache.
/// Idempotent on id: a file already present in `list` is returned as-is
/// without touching the filesystem again.
pub fn load_or_build<'a>(
    list: &'a mut ComposeTableList,
    path: &Path,
    source: &dyn KeysymSource,
) -> Result<&'a ComposeTable, ComposeError> {
    let id = source_id(path);
    if list.find_by_id(id).is_some() {
        return Ok(list.find_by_id(id).unwrap());
    }

    let cache_path = cache_path_for(path);
    let mut saved_version = None;
    if let Some(cache_path) = &cache_path {
        if is_cache_fresh(cache_path, path) {
            if let Ok(bytes) = fs::read(cache_path) {
                saved_version = peek_version(&bytes);
                if let Ok(mut table) = deserialize(&bytes) {
                    table.id = id;
                    return Ok(list.add_table(table));
                }
            }
        }
    }

    let outcome = parse_file(path, source)?;
    let (records, _warnings) = normalize(
        outcome.records,
        outcome.max_seq_len,
        outcome.can_load_en_us,
        list,
        source,
    );

    if records.is_empty() && !outcome.can_load_en_us {
        return Err(ComposeError::FatalLoad {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "no compose entries"),
        });
    }

    let table = build_table(&records, outcome.max_seq_len, outcome.can_load_en_us, id)?;

    let total_seqs = table.n_narrow as usize + table.n_wide as usize;
    if let Some(sv) = saved_version {
        if sv > 0 && sv < crate::config::CACHE_VERSION && !table.can_load_en_us
            && total_seqs < MIGRATION_THRESHOLD_SEQS
        {
            if let Ok(()) = rewrite_compose_file(path) {
                return Err(ComposeError::MigrationRequired {
                    path: path.to_path_buf(),
                    message: format!(
                        "Compose file {} was rewritten to add `include \"%L\"`; retry the load",
                        path.display()
                    ),
                });
            }
        }
    }

    if let Some(cache_path) = &cache_path {
        let bytes = serialize(&table, false);
        if let Err(e) = fs::write(cache_path, bytes) {
            eprintln!("compose-table: failed to save cache {}: {e}", cache_path.display());
        }
    }

    Ok(list.add_table(table))
}

/// Prepends the `%L`-adding banner to `compose_file`, preserving its prior
/// contents below the banner. Equivalent to `rewrite_compose_file`
/// (`ibuscomposetable.c:1644-1692`), but using an atomic rename instead of
/// truncate-then-write so a crash mid-write can't corrupt the user's file.
fn rewrite_compose_file(compose_file: &Path) -> std::io::Result<()> {
    let original = fs::read_to_string(compose_file)?;
    let mut rewritten = String::with_capacity(REWRITE_BANNER.len() + original.len());
    rewritten.push_str(REWRITE_BANNER);
    rewritten.push_str(&original);

    let tmp_path = compose_file.with_extension("compose-tmp");
    fs::write(&tmp_path, rewritten)?;
    fs::rename(&tmp_path, compose_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keysym::StaticKeysymSource;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn source() -> StaticKeysymSource {
        StaticKeysymSource::new(vec![
            ("Multi_key", 0xff20),
            ("a", 0x61),
            ("e", 0x65),
        ])
    }

    #[test]
    fn loads_and_caches_a_fresh_file() {
        let dir = TempDir::new().unwrap();
        std::env::set_var("IBUS_COMPOSE_CACHE_DIR", dir.path().join("cache"));
        let compose_path = dir.path().join("Compose");
        let mut f = File::create(&compose_path).unwrap();
        writeln!(f, "<Multi_key> <a> <e> : \"\u{00e6}\"").unwrap();
        drop(f);

        let mut list = ComposeTableList::new();
        let table = load_or_build(&mut list, &compose_path, &source()).unwrap();
        assert_eq!(table.n_narrow, 1);
        let expected_id = source_id(&compose_path);
        assert_eq!(table.id, expected_id);

        let cache_path = cache_path_for(&compose_path).unwrap();
        assert!(cache_path.exists());
        std::env::remove_var("IBUS_COMPOSE_CACHE_DIR");
    }

    #[test]
    fn reuses_cache_on_second_load() {
        let dir = TempDir::new().unwrap();
        std::env::set_var("IBUS_COMPOSE_CACHE_DIR", dir.path().join("cache"));
        let compose_path = dir.path().join("Compose");
        let mut f = File::create(&compose_path).unwrap();
        writeln!(f, "<Multi_key> <a> <e> : \"\u{00e6}\"").unwrap();
        drop(f);

        let mut list1 = ComposeTableList::new();
        load_or_build(&mut list1, &compose_path, &source()).unwrap();

        let mut list2 = ComposeTableList::new();
        let table = load_or_build(&mut list2, &compose_path, &source()).unwrap();
        assert_eq!(table.n_narrow, 1);
        assert_eq!(table.id, source_id(&compose_path));
        std::env::remove_var("IBUS_COMPOSE_CACHE_DIR");
    }

    #[test]
    fn second_call_with_same_path_is_idempotent_without_reparsing() {
        let dir = TempDir::new().unwrap();
        std::env::set_var("IBUS_COMPOSE_CACHE_DIR", dir.path().join("cache"));
        let compose_path = dir.path().join("Compose");
        let mut f = File::create(&compose_path).unwrap();
        writeln!(f, "<Multi_key> <a> <e> : \"\u{00e6}\"").unwrap();
        drop(f);

        let mut list = ComposeTableList::new();
        load_or_build(&mut list, &compose_path, &source()).unwrap();
        load_or_build(&mut list, &compose_path, &source()).unwrap();
        assert_eq!(list.len(), 1);
        std::env::remove_var("IBUS_COMPOSE_CACHE_DIR");
    }
}
