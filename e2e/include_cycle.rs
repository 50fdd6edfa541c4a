//! End-to-end coverage of spec.md §8 scenario 3: a pair of files that
//! include each other terminates with one record from each and exactly
//! one cycle warning, never an infinite loop.

use std::fs::File;
use std::io::Write;

use compose_table::parser::parse_file;
use compose_table::{IncludeWarning, ParseWarning, StaticKeysymSource};
use tempfile::TempDir;

#[test]
fn mutually_including_files_terminate_with_one_record_each() {
    let dir = TempDir::new().unwrap();
    let a_path = dir.path().join("A");
    let b_path = dir.path().join("B");

    {
        let mut a = File::create(&a_path).unwrap();
        writeln!(a, "include \"{}\"", b_path.display()).unwrap();
        writeln!(a, "<Multi_key> <a> <e> : \"1\"").unwrap();

        let mut b = File::create(&b_path).unwrap();
        writeln!(b, "include \"{}\"", a_path.display()).unwrap();
        writeln!(b, "<Multi_key> <a> <e> : \"2\"").unwrap();
    }

    let source = StaticKeysymSource::new(vec![("Multi_key", 0xff20), ("a", 0x61), ("e", 0x65)]);
    let outcome = parse_file(&a_path, &source).unwrap();

    assert_eq!(outcome.records.len(), 2);
    let cycle_warnings: Vec<_> = outcome
        .warnings
        .iter()
        .filter(|w| matches!(w, ParseWarning::Include(IncludeWarning::Cycle { .. })))
        .collect();
    assert_eq!(cycle_warnings.len(), 1);
}

#[test]
fn a_file_including_itself_is_skipped_not_infinite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Compose");
    {
        let mut f = File::create(&path).unwrap();
        writeln!(f, "include \"{}\"", path.display()).unwrap();
        writeln!(f, "<Multi_key> <a> <e> : \"1\"").unwrap();
    }

    let source = StaticKeysymSource::new(vec![("Multi_key", 0xff20), ("a", 0x61), ("e", 0x65)]);
    let outcome = parse_file(&path, &source).unwrap();
    assert_eq!(outcome.records.len(), 1);
}
