//! Criterion benchmarks for Compose-file parsing.
//!
//! Run with:
//!   cargo bench --bench parse

use std::fs::File;
use std::io::Write;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tempfile::TempDir;

use compose_table::parser::parse_file;
use compose_table::StaticKeysymSource;

fn keysyms() -> StaticKeysymSource {
    StaticKeysymSource::new(vec![
        ("Multi_key", 0xff20),
        ("dead_acute", 0xfe51),
        ("a", 0x61),
        ("e", 0x65),
    ])
}

fn write_synthetic_compose(dir: &TempDir, lines: usize) -> std::path::PathBuf {
    let path = dir.path().join("Compose");
    let mut f = File::create(&path).unwrap();
    for i in 0..lines {
        writeln!(
            f,
            "<Multi_key> <a> <e> : \"\u{00e6}{i}\" # synthetic entry {i}"
        )
        .unwrap();
    }
    path
}

fn bench_parse_file(c: &mut Criterion) {
    let source = keysyms();
    let mut group = c.benchmark_group("parse_file");

    for &lines in &[100usize, 1_000, 10_000] {
        let dir = TempDir::new().unwrap();
        let path = write_synthetic_compose(&dir, lines);
        let byte_len = std::fs::metadata(&path).unwrap().len();
        group.throughput(Throughput::Bytes(byte_len));

        group.bench_with_input(BenchmarkId::from_parameter(lines), &path, |b, path| {
            b.iter(|| parse_file(black_box(path), &source).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_file);
criterion_main!(benches);
