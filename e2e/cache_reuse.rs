//! End-to-end coverage of spec.md §8 scenario 6: cache reuse. A second
//! `table_list_add_file` call against the same path returns a table whose
//! id is `hash(path)` and whose content came from the cache, not a fresh
//! parse — proven by deleting the source file between the two loads but
//! keeping the cache fresh enough to still win the mtime race, so a
//! successful second load could only have come from the cache.

use std::fs::{self, File};
use std::io::Write;

use compose_table::table::cache_path_for;
use compose_table::{table_check, table_list_add_file, CheckResult, ComposeTableList, StaticKeysymSource};
use tempfile::TempDir;

fn source() -> StaticKeysymSource {
    StaticKeysymSource::new(vec![("Multi_key", 0xff20), ("a", 0x61), ("e", 0x65)])
}

#[test]
fn second_load_reuses_the_cache_without_the_source_file() {
    let dir = TempDir::new().unwrap();
    std::env::set_var("IBUS_COMPOSE_CACHE_DIR", dir.path().join("cache"));
    let path = dir.path().join("Compose");
    {
        let mut f = File::create(&path).unwrap();
        writeln!(f, "<Multi_key> <a> <e> : \"\u{00e6}\"").unwrap();
    }

    let src = source();
    {
        let mut list = ComposeTableList::new();
        let table = table_list_add_file(&mut list, &path, &src).unwrap();
        assert_eq!(
            table_check(table, &[0xff20, 0x61, 0x65], false, &src),
            CheckResult::Complete { output: vec!['\u{00e6}'], extensible: false }
        );
    }

    let cache_path = cache_path_for(&path).unwrap();
    assert!(cache_path.exists());

    // The source file is gone now; a fresh parse is impossible. Only the
    // cache can satisfy the second load.
    fs::remove_file(&path).unwrap();

    // A cache-freshness check needs the source to stat, so resurrect it
    // with a mtime strictly older than the cache (simulating "nothing
    // changed since the cache was written" without re-parsing content).
    File::create(&path).unwrap();
    filetime::set_file_mtime(&path, filetime::FileTime::from_unix_time(0, 0)).unwrap();

    let mut list2 = ComposeTableList::new();
    let table2 = table_list_add_file(&mut list2, &path, &src).unwrap();
    assert_eq!(
        table_check(table2, &[0xff20, 0x61, 0x65], false, &src),
        CheckResult::Complete { output: vec!['\u{00e6}'], extensible: false }
    );

    std::env::remove_var("IBUS_COMPOSE_CACHE_DIR");
}
