//! Packing normalised records into the bimodal narrow/wide table shape.
//!
//! Equivalent to `ibus_compose_table_new_with_list`
//! (`ibuscomposetable.c:1351-1544`). The original keeps the narrow/wide
//! rows as two separately-allocated slabs glued together only for
//! serialisation; this keeps that split but as two owned `Vec`s rather
//! than one `rawdata` blob with manual pointer arithmetic.

use crate::error::BuildError;
use crate::parser::ComposeRecord;
use crate::table::ComposeTable;

/// A record is narrow iff its output is exactly one scalar that fits in a
/// `u16` (spec.md §4.4: `len(values)==1 AND values[0] <= 0xFFFF`).
fn is_narrow(record: &ComposeRecord) -> bool {
    record.values.len() == 1 && (record.values[0] as u32) <= 0xffff
}

/// Packs `records` (already sorted and deduplicated by `normalize`) into a
/// [`ComposeTable`]. `records` must be sorted by [`ComposeRecord::padded_keys`]
/// for the lookup engine's binary search to find anything.
pub fn build_table(
    records: &[ComposeRecord],
    max_seq_len: usize,
    can_load_en_us: bool,
    id: u32,
) -> Result<ComposeTable, BuildError> {
    let row_stride = max_seq_len + 2;

    let n_narrow = records.iter().filter(|r| is_narrow(r)).count();
    let n_wide = records.len() - n_narrow;

    checked_rows(n_narrow, row_stride)?;
    checked_rows(n_wide, row_stride)?;

    let mut narrow = vec![0u16; n_narrow * row_stride];
    let mut wide_first = vec![0u16; n_wide * row_stride];
    let mut wide_second = Vec::new();

    let mut narrow_row = 0usize;
    let mut wide_row = 0usize;
    for record in records {
        if is_narrow(record) {
            let base = narrow_row * row_stride;
            for (i, &key) in record.sequence.iter().enumerate() {
                narrow[base + i] = (key & 0xffff) as u16;
            }
            narrow[base + row_stride - 2] = record.values[0] as u16;
            narrow[base + row_stride - 1] = 0;
            narrow_row += 1;
        } else {
            let base = wide_row * row_stride;
            for (i, &key) in record.sequence.iter().enumerate() {
                wide_first[base + i] = (key & 0xffff) as u16;
            }
            let index = wide_second.len();
            wide_second.extend(record.values.iter().map(|&c| c as u32));
            wide_first[base + row_stride - 2] = record.values.len() as u16;
            wide_first[base + row_stride - 1] = index as u16;
            wide_row += 1;
        }
    }

    Ok(ComposeTable::new_owned(
        max_seq_len as u16,
        n_narrow as u16,
        n_wide as u16,
        narrow,
        wide_first,
        wide_second,
        can_load_en_us,
        id,
    ))
}

/// Mirrors the original's `s_size_16bit * n_index_stride > SIZE_MAX / 2`
/// overflow guard (spec.md §4.4 "overflow checks").
fn checked_rows(rows: usize, row_stride: usize) -> Result<(), BuildError> {
    rows.checked_mul(row_stride)
        .ok_or(BuildError::Overflow { rows, row_stride })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seq: Vec<u32>, values: Vec<char>) -> ComposeRecord {
        ComposeRecord::new(seq, values, None)
    }

    #[test]
    fn narrow_record_goes_to_narrow_section() {
        let records = vec![record(vec![0x61, 0x65], vec!['\u{00e6}'])];
        let table = build_table(&records, 2, false, 1).unwrap();
        assert_eq!(table.n_narrow, 1);
        assert_eq!(table.n_wide, 0);
        assert_eq!(table.narrow_cell(0, 0), 0x61);
        assert_eq!(table.narrow_cell(0, 1), 0x65);
        assert_eq!(table.narrow_cell(0, 2), '\u{00e6}' as u16);
    }

    #[test]
    fn multi_scalar_record_goes_to_wide_section() {
        let records = vec![record(vec![0x27, 0x6e], vec!['\'', 'n'])];
        let table = build_table(&records, 2, false, 1).unwrap();
        assert_eq!(table.n_narrow, 0);
        assert_eq!(table.n_wide, 1);
        assert_eq!(table.wide_cell(0, 2), 2); // value_count
        assert_eq!(table.wide_cell(0, 3), 0); // value_index
        assert_eq!(table.wide_value(0), '\'' as u32);
        assert_eq!(table.wide_value(1), 'n' as u32);
    }

    #[test]
    fn above_bmp_single_scalar_goes_to_wide_section() {
        // A single emoji scalar above 0xFFFF still needs the wide section
        // even though len(values) == 1.
        let records = vec![record(vec![0x61], vec!['\u{1f600}'])];
        let table = build_table(&records, 1, false, 1).unwrap();
        assert_eq!(table.n_narrow, 0);
        assert_eq!(table.n_wide, 1);
    }

    #[test]
    fn mixed_records_split_into_both_sections() {
        let records = vec![
            record(vec![0x61], vec!['a']),
            record(vec![0x62, 0x63], vec!['x', 'y']),
        ];
        let table = build_table(&records, 2, true, 7).unwrap();
        assert_eq!(table.n_narrow, 1);
        assert_eq!(table.n_wide, 1);
        assert!(table.can_load_en_us);
        assert_eq!(table.id, 7);
    }

    #[test]
    fn empty_records_build_an_empty_table() {
        let table = build_table(&[], 0, true, 1).unwrap();
        assert_eq!(table.n_narrow, 0);
        assert_eq!(table.n_wide, 0);
        assert!(table.can_load_en_us);
    }
}
