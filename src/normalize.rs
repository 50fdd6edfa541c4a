//! Cross-table deduplication, sorting, and same-key deduplication.
//!
//! Equivalent to `ibus_compose_list_check_duplicated_with_en` /
//! `ibus_compose_list_check_duplicated_with_own`
//! (`ibuscomposetable.c:517-706`), generalised from "the English baseline"
//! to "any peer table that requests the baseline" (spec.md §4.2).

use crate::error::ParseWarning;
use crate::keysym::KeysymSource;
use crate::lookup::{check_algorithmically, table_check, CheckResult};
use crate::parser::ComposeRecord;
use crate::table::ComposeTableList;

/// Runs the three-step normalisation algorithm of spec.md §4.2 and returns
/// the surviving records (sorted, deduplicated) plus any warnings raised
/// along the way.
pub fn normalize(
    mut records: Vec<ComposeRecord>,
    max_seq_len: usize,
    can_load_en_us: bool,
    peers: &ComposeTableList,
    source: &dyn KeysymSource,
) -> (Vec<ComposeRecord>, Vec<ParseWarning>) {
    if can_load_en_us || peers.any_requests_baseline() {
        records.retain(|record| !peer_reproduces(record, peers, source));
    }

    records.sort_by(|a, b| a.padded_keys(max_seq_len).cmp(&b.padded_keys(max_seq_len)));

    let mut warnings = Vec::new();
    let mut kept: Vec<ComposeRecord> = Vec::with_capacity(records.len());
    for record in records {
        let keys = record.padded_keys(max_seq_len);
        if let Some(last) = kept.last() {
            if last.padded_keys(max_seq_len) == keys {
                if last.values != record.values {
                    warnings.push(ParseWarning::DuplicateKey { keys });
                }
                *kept.last_mut().unwrap() = record;
                continue;
            }
        }
        kept.push(record);
    }

    (kept, warnings)
}

/// True if some already-loaded peer table (or the algorithmic NFC path)
/// produces exactly `record`'s values for `record`'s keys, making the
/// record redundant.
fn peer_reproduces(record: &ComposeRecord, peers: &ComposeTableList, source: &dyn KeysymSource) -> bool {
    for table in peers.tables() {
        for is_wide in [false, true] {
            if let CheckResult::Complete { output, extensible: _ } =
                table_check(table, &record.sequence, is_wide, source)
            {
                if output == record.values {
                    return true;
                }
            }
        }
    }

    if record.values.len() == 1 {
        if let Some(scalar) = check_algorithmically(&record.sequence, source) {
            return scalar == record.values[0];
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keysym::StaticKeysymSource;
    use crate::table::ComposeTable;

    fn source() -> StaticKeysymSource {
        StaticKeysymSource::new(vec![("a", 0x61), ("e", 0x65), ("Multi_key", 0xff20)])
    }

    fn record(seq: Vec<u32>, value: char) -> ComposeRecord {
        ComposeRecord::new(seq, vec![value], None)
    }

    #[test]
    fn sorts_by_padded_key() {
        let records = vec![record(vec![0x65], 'e'), record(vec![0x61], 'a')];
        let (sorted, warnings) = normalize(records, 1, false, &ComposeTableList::new(), &source());
        assert!(warnings.is_empty());
        assert_eq!(sorted[0].sequence, vec![0x61]);
        assert_eq!(sorted[1].sequence, vec![0x65]);
    }

    #[test]
    fn later_duplicate_wins_and_warns_on_conflict() {
        let records = vec![record(vec![0x61], 'a'), record(vec![0x61], 'b')];
        let (kept, warnings) = normalize(records, 1, false, &ComposeTableList::new(), &source());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].values, vec!['b']);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn identical_duplicates_produce_no_warning() {
        let records = vec![record(vec![0x61], 'a'), record(vec![0x61], 'a')];
        let (kept, warnings) = normalize(records, 1, false, &ComposeTableList::new(), &source());
        assert_eq!(kept.len(), 1);
        assert!(warnings.is_empty());
    }

    #[test]
    fn cross_table_dedup_drops_records_the_baseline_already_covers() {
        let narrow = vec![0xff20, 0x61, b'x' as u16, 0];
        let baseline = ComposeTable::new_owned(2, 1, 0, narrow, vec![], vec![], true, 1);
        let mut list = ComposeTableList::new();
        list.add_table(baseline);

        let records = vec![record(vec![0xff20, 0x61], 'x')];
        let (kept, _) = normalize(records, 2, false, &list, &source());
        assert!(kept.is_empty());
    }
}
