#![no_main]
use libfuzzer_sys::fuzz_target;

use compose_table::keysym::StaticKeysymSource;
use compose_table::parser::ComposeRecord;
use compose_table::table::build_table;
use compose_table::table_check;

fn source() -> StaticKeysymSource {
    StaticKeysymSource::new(vec![("Multi_key", 0xff20), ("a", 0x61)])
}

/// Builds a handful of short, valid records out of arbitrary bytes so the
/// table always constructs successfully, then fuzzes the lookup engine
/// itself (binary search, back-up, classification) with arbitrary typed
/// sequences instead of fuzzing construction.
fn records_from(data: &[u8]) -> Vec<ComposeRecord> {
    data.chunks(4)
        .filter(|chunk| !chunk.is_empty())
        .take(64)
        .map(|chunk| {
            let len = (chunk[0] % 3 + 1) as usize;
            let sequence: Vec<u32> = chunk[1..].iter().take(len).map(|&b| 0x100 + b as u32).collect();
            let sequence = if sequence.is_empty() { vec![0x100] } else { sequence };
            let value = char::from_u32(0x2500 + chunk[0] as u32).unwrap_or('?');
            ComposeRecord::new(sequence, vec![value], None)
        })
        .collect()
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let (table_bytes, query_bytes) = data.split_at(data.len() / 2);

    let mut records = records_from(table_bytes);
    if records.is_empty() {
        return;
    }
    let max_seq_len = records.iter().map(|r| r.sequence.len()).max().unwrap_or(1);
    records.sort_by(|a, b| a.padded_keys(max_seq_len).cmp(&b.padded_keys(max_seq_len)));

    let table = match build_table(&records, max_seq_len, false, 1) {
        Ok(t) => t,
        Err(_) => return,
    };

    let src = source();
    for typed in query_bytes.chunks(4) {
        let typed: Vec<u32> = typed.iter().map(|&b| 0x100 + b as u32).collect();
        let _ = table_check(&table, &typed, false, &src);
        let _ = table_check(&table, &typed, true, &src);
    }
});
