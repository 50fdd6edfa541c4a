//! End-to-end coverage of spec.md §4.4's auto-migration: an older-format
//! cache with no `%L` opt-out and a small record count causes the source
//! file to be rewritten with an `include "%L"` line, and the caller gets
//! back a distinguished `MigrationRequired` error on this call and a clean
//! load on the retry.

use std::fs::{self, File};
use std::io::Write;

use compose_table::table::cache_path_for;
use compose_table::{table_list_add_file, ComposeError, ComposeTableList, StaticKeysymSource};
use tempfile::TempDir;

fn source() -> StaticKeysymSource {
    StaticKeysymSource::new(vec![("Multi_key", 0xff20), ("a", 0x61), ("e", 0x65)])
}

#[test]
fn legacy_cache_triggers_rewrite_and_migration_error_then_clean_retry() {
    let dir = TempDir::new().unwrap();
    std::env::set_var("IBUS_COMPOSE_CACHE_DIR", dir.path().join("cache"));
    let path = dir.path().join("Compose");
    File::create(&path).unwrap().write_all(b"<Multi_key> <a> <e> : \"x\"\n").unwrap();

    // Plant a minimal "legacy" cache: valid magic, an old version number,
    // nothing else. `peek_version` reads it; full `deserialize` correctly
    // rejects it as a version mismatch, so the loader falls through to a
    // fresh parse while remembering the legacy version number.
    let cache_path = cache_path_for(&path).unwrap();
    let mut legacy = b"IBusComposeTable".to_vec();
    legacy.extend_from_slice(&3u16.to_ne_bytes());
    fs::write(&cache_path, &legacy).unwrap();
    // Cache must be newer than the source to be considered fresh.
    filetime::set_file_mtime(&cache_path, filetime::FileTime::now()).unwrap();

    let src = source();
    let mut list = ComposeTableList::new();
    let err = table_list_add_file(&mut list, &path, &src).unwrap_err();
    assert!(matches!(err, ComposeError::MigrationRequired { .. }));
    assert_eq!(list.len(), 0);

    let rewritten = fs::read_to_string(&path).unwrap();
    assert!(rewritten.contains("include \"%L\""));

    // Retrying now succeeds cleanly: the file has %L, so the migration
    // condition (`!can_load_en_us`) no longer holds.
    let mut list2 = ComposeTableList::new();
    let table = table_list_add_file(&mut list2, &path, &src).unwrap();
    assert!(table.can_load_en_us);

    std::env::remove_var("IBUS_COMPOSE_CACHE_DIR");
}
