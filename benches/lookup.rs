//! Criterion benchmarks for the prefix-lookup engine.
//!
//! Run with:
//!   cargo bench --bench lookup

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use compose_table::table::build_table;
use compose_table::{table_check, ComposeRecord, StaticKeysymSource};

fn keysyms() -> StaticKeysymSource {
    StaticKeysymSource::new(vec![("Multi_key", 0xff20)])
}

fn synthetic_records(n: usize) -> Vec<ComposeRecord> {
    (0..n as u32)
        .map(|i| {
            ComposeRecord::new(
                vec![0xff20, 0x61 + (i % 26), 0x100 + i],
                vec![char::from_u32(0x2500 + (i % 200)).unwrap()],
                None,
            )
        })
        .collect()
}

fn bench_table_check(c: &mut Criterion) {
    let source = keysyms();
    let mut group = c.benchmark_group("table_check");

    for &n in &[64usize, 1_024, 16_384] {
        let mut records = synthetic_records(n);
        records.sort_by(|a, b| a.padded_keys(3).cmp(&b.padded_keys(3)));
        let table = build_table(&records, 3, false, 1).unwrap();

        let hit = &records[n / 2].sequence;
        group.bench_with_input(BenchmarkId::new("hit", n), &table, |b, table| {
            b.iter(|| table_check(black_box(table), black_box(hit), false, &source))
        });

        let miss = vec![0xff20, 0xdead, 0xbeef];
        group.bench_with_input(BenchmarkId::new("miss", n), &table, |b, table| {
            b.iter(|| table_check(black_box(table), black_box(&miss), false, &source))
        });

        let partial = &records[n / 2].sequence[..1];
        group.bench_with_input(BenchmarkId::new("partial", n), &table, |b, table| {
            b.iter(|| table_check(black_box(table), black_box(partial), false, &source))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_table_check);
criterion_main!(benches);
