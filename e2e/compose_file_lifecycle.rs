//! End-to-end coverage of spec.md §8's concrete scenarios 1, 2, and 4:
//! parsing a simple record, an `include "%L"` baseline opt-in, and the
//! narrow/wide split on value width.

use std::fs::File;
use std::io::Write;

use compose_table::{
    table_check, table_list_add_file, CheckResult, ComposeTableList, StaticKeysymSource,
};
use tempfile::TempDir;

fn keysyms() -> StaticKeysymSource {
    StaticKeysymSource::new(vec![
        ("Multi_key", 0xff20),
        ("dead_acute", 0xfe51),
        ("a", 0x61),
        ("e", 0x65),
        ("apostrophe", 0x27),
        ("n", 0x6e),
    ])
}

fn write_compose(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("Compose");
    let mut f = File::create(&path).unwrap();
    f.write_all(body.as_bytes()).unwrap();
    path
}

#[test]
fn scenario_1_parses_a_simple_ligature_record() {
    let dir = TempDir::new().unwrap();
    std::env::set_var("IBUS_COMPOSE_CACHE_DIR", dir.path().join("cache"));
    let path = write_compose(&dir, "<Multi_key> <a> <e> : \"\u{00e6}\" # ae ligature\n");

    let source = keysyms();
    let mut list = ComposeTableList::new();
    let table = table_list_add_file(&mut list, &path, &source).unwrap();

    let result = table_check(table, &[0xff20, 0x61, 0x65], false, &source);
    assert_eq!(result, CheckResult::Complete { output: vec!['\u{00e6}'], extensible: false });
    std::env::remove_var("IBUS_COMPOSE_CACHE_DIR");
}

#[test]
fn scenario_2_baseline_include_then_single_user_record() {
    let dir = TempDir::new().unwrap();
    std::env::set_var("IBUS_COMPOSE_CACHE_DIR", dir.path().join("cache"));
    let path = write_compose(
        &dir,
        "include \"%L\"\n<dead_acute> <a> : \"\u{00e1}\"\n",
    );

    let source = keysyms();
    let mut list = ComposeTableList::new();
    let table = table_list_add_file(&mut list, &path, &source).unwrap();

    assert!(table.can_load_en_us);
    let result = table_check(table, &[0xfe51, 0x61], false, &source);
    assert_eq!(result, CheckResult::Complete { output: vec!['\u{00e1}'], extensible: false });
    std::env::remove_var("IBUS_COMPOSE_CACHE_DIR");
}

#[test]
fn scenario_4_narrow_and_wide_rows_coexist_in_one_table() {
    let dir = TempDir::new().unwrap();
    std::env::set_var("IBUS_COMPOSE_CACHE_DIR", dir.path().join("cache"));
    let path = write_compose(
        &dir,
        "<dead_acute> <a> : \"\u{1eaf}\"\n<apostrophe> <n> : \"'n\"\n",
    );

    let source = keysyms();
    let mut list = ComposeTableList::new();
    let table = table_list_add_file(&mut list, &path, &source).unwrap();

    assert_eq!(table.n_narrow, 1);
    assert_eq!(table.n_wide, 1);

    let narrow = table_check(table, &[0xfe51, 0x61], false, &source);
    assert_eq!(narrow, CheckResult::Complete { output: vec!['\u{1eaf}'], extensible: false });

    let wide = table_check(table, &[0x27, 0x6e], true, &source);
    assert_eq!(wide, CheckResult::Complete { output: vec!['\'', 'n'], extensible: false });
    std::env::remove_var("IBUS_COMPOSE_CACHE_DIR");
}

#[test]
fn incremental_prefixes_report_partial_then_complete_then_no_match() {
    let dir = TempDir::new().unwrap();
    std::env::set_var("IBUS_COMPOSE_CACHE_DIR", dir.path().join("cache"));
    let path = write_compose(&dir, "<Multi_key> <a> <e> : \"\u{00e6}\"\n");

    let source = keysyms();
    let mut list = ComposeTableList::new();
    let table = table_list_add_file(&mut list, &path, &source).unwrap();

    assert_eq!(table_check(table, &[0xff20], false, &source), CheckResult::Partial);
    assert_eq!(table_check(table, &[0xff20, 0x61], false, &source), CheckResult::Partial);
    assert_eq!(
        table_check(table, &[0xff20, 0x61, 0x65], false, &source),
        CheckResult::Complete { output: vec!['\u{00e6}'], extensible: false }
    );
    assert_eq!(table_check(table, &[0xff20, 0x65], false, &source), CheckResult::NoMatch);
    std::env::remove_var("IBUS_COMPOSE_CACHE_DIR");
}
