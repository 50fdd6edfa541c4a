//! The versioned binary cache codec.
//!
//! Equivalent to `ibus_compose_table_serialize` /
//! `ibus_compose_table_deserialize` (`ibuscomposetable.c:934-1225`). The
//! original wraps its arrays in GVariant's `(sqqqqqvvvy)` tuple type;
//! SPEC_FULL.md §4.4 keeps that exact field order but drops the GVariant
//! framing in favour of a flat byte layout, since nothing downstream of
//! this crate needs GVariant interop.
//!
//! Layout (all multi-byte fields native-endian, or byte-swapped together
//! when `reverse_endianness` is requested):
//!
//! ```text
//! [0..16)   magic "IBusComposeTable"
//! [16..18)  version: u16
//! [18..20)  max_seq_len: u16
//! [20..22)  n_narrow: u16
//! [22..24)  n_wide: u16
//! [24..26)  second_size: u16
//! [26..X)   narrow rows:    n_narrow * row_stride * u16
//! [X..Y)    wide-first rows: n_wide * row_stride * u16
//! [Y..Z)    wide value pool: second_size * u32
//! [Z..Z+1)  compose_type: u8 (1 iff can_load_en_us)
//! ```

use std::sync::Arc;

use crate::config::{CACHE_MAGIC, CACHE_VERSION};
use crate::error::CacheError;
use crate::table::ComposeTable;

/// Serialises `table` to its on-disk byte layout. When `reverse_endianness`
/// is set, every multi-byte field is byte-swapped before being written —
/// intended for producing a cache for a host of the opposite endianness
/// (spec.md §4.4), never for the local round trip.
pub fn serialize(table: &ComposeTable, reverse_endianness: bool) -> Vec<u8> {
    let row_stride = table.row_stride();
    let n_narrow = table.n_narrow as usize;
    let n_wide = table.n_wide as usize;
    let second_size = table.second_size as usize;

    let mut out = Vec::with_capacity(
        26 + (n_narrow + n_wide) * row_stride * 2 + second_size * 4 + 1,
    );
    out.extend_from_slice(CACHE_MAGIC.as_bytes());
    push_u16(&mut out, CACHE_VERSION, reverse_endianness);
    push_u16(&mut out, table.max_seq_len, reverse_endianness);
    push_u16(&mut out, table.n_narrow, reverse_endianness);
    push_u16(&mut out, table.n_wide, reverse_endianness);
    push_u16(&mut out, table.second_size, reverse_endianness);

    for row in 0..n_narrow {
        for col in 0..row_stride {
            push_u16(&mut out, table.narrow_cell(row, col), reverse_endianness);
        }
    }
    for row in 0..n_wide {
        for col in 0..row_stride {
            push_u16(&mut out, table.wide_cell(row, col), reverse_endianness);
        }
    }
    for i in 0..second_size {
        push_u32(&mut out, table.wide_value(i), reverse_endianness);
    }

    out.push(if table.can_load_en_us { 1 } else { 0 });
    out
}

/// Parses `bytes` back into a [`ComposeTable`]. The returned table's `id`
/// is always `0`; callers that load from a named cache file already know
/// the id (it's how the cache path was derived) and set it after the call.
///
/// Per spec.md §7 kind 4, any shape problem here should be treated by the
/// caller as a cache miss, never propagated as a hard failure.
pub fn deserialize(bytes: &[u8]) -> Result<ComposeTable, CacheError> {
    if bytes.len() < 18 {
        return Err(CacheError::BadMagic);
    }
    if &bytes[0..16] != CACHE_MAGIC.as_bytes() {
        return Err(CacheError::BadMagic);
    }
    let version = read_u16(bytes, 16);
    if version != CACHE_VERSION {
        return Err(CacheError::VersionMismatch { found: version, expected: CACHE_VERSION });
    }

    if bytes.len() < 26 {
        return Err(CacheError::ShapeMismatch { detail: "truncated header" });
    }
    let max_seq_len = read_u16(bytes, 18);
    let n_narrow = read_u16(bytes, 20);
    let n_wide = read_u16(bytes, 22);
    let second_size = read_u16(bytes, 24);

    let row_stride = max_seq_len as usize + 2;
    let narrow_off = 26;
    let narrow_len = n_narrow as usize * row_stride * 2;
    let wide_first_off = narrow_off + narrow_len;
    let wide_first_len = n_wide as usize * row_stride * 2;
    let wide_second_off = wide_first_off + wide_first_len;
    let wide_second_len = second_size as usize * 4;
    let compose_type_off = wide_second_off + wide_second_len;

    if bytes.len() < compose_type_off + 1 {
        return Err(CacheError::ShapeMismatch { detail: "array lengths exceed buffer" });
    }

    let can_load_en_us = bytes[compose_type_off] != 0;

    let shared: Arc<[u8]> = Arc::from(bytes.to_vec().into_boxed_slice());
    Ok(ComposeTable::new_borrowed(
        max_seq_len,
        n_narrow,
        n_wide,
        second_size,
        can_load_en_us,
        0,
        shared,
        narrow_off,
        wide_first_off,
        wide_second_off,
    ))
}

/// Reads just the magic + version header, without validating shape. Used
/// by `table::cache` to recognise a stale cache from an older format
/// version (driving the §4.4 auto-migration check) without fully parsing
/// what is about to be discarded anyway.
pub fn peek_version(bytes: &[u8]) -> Option<u16> {
    if bytes.len() < 18 || &bytes[0..16] != CACHE_MAGIC.as_bytes() {
        return None;
    }
    Some(read_u16(bytes, 16))
}

fn push_u16(out: &mut Vec<u8>, value: u16, reverse: bool) {
    let v = if reverse { value.swap_bytes() } else { value };
    out.extend_from_slice(&v.to_ne_bytes());
}

fn push_u32(out: &mut Vec<u8>, value: u32, reverse: bool) {
    let v = if reverse { value.swap_bytes() } else { value };
    out.extend_from_slice(&v.to_ne_bytes());
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_ne_bytes([bytes[offset], bytes[offset + 1]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::build_table;

    fn sample_table() -> ComposeTable {
        use crate::parser::ComposeRecord;
        let records = vec![
            ComposeRecord::new(vec![0x61, 0x65], vec!['\u{00e6}'], None),
            ComposeRecord::new(vec![0x62, 0x63], vec!['x', 'y'], None),
        ];
        build_table(&records, 2, true, 42).unwrap()
    }

    #[test]
    fn round_trips_content_and_lookup_shape() {
        let table = sample_table();
        let bytes = serialize(&table, false);
        let restored = deserialize(&bytes).unwrap();

        assert_eq!(restored.max_seq_len, table.max_seq_len);
        assert_eq!(restored.n_narrow, table.n_narrow);
        assert_eq!(restored.n_wide, table.n_wide);
        assert_eq!(restored.second_size, table.second_size);
        assert_eq!(restored.can_load_en_us, table.can_load_en_us);
        assert_eq!(restored.narrow_cell(0, 0), table.narrow_cell(0, 0));
        assert_eq!(restored.narrow_cell(0, 1), table.narrow_cell(0, 1));
        assert_eq!(restored.wide_cell(0, 0), table.wide_cell(0, 0));
        assert_eq!(restored.wide_value(0), table.wide_value(0));
        assert_eq!(restored.wide_value(1), table.wide_value(1));
    }

    #[test]
    fn rejects_bad_magic() {
        let bytes = vec![0u8; 30];
        assert_eq!(deserialize(&bytes).unwrap_err(), CacheError::BadMagic);
    }

    #[test]
    fn rejects_wrong_version() {
        let mut bytes = serialize(&sample_table(), false);
        bytes[16] = 0xff;
        bytes[17] = 0xff;
        assert_eq!(
            deserialize(&bytes).unwrap_err(),
            CacheError::VersionMismatch { found: 0xffff, expected: CACHE_VERSION }
        );
    }

    #[test]
    fn rejects_truncated_payload() {
        let mut bytes = serialize(&sample_table(), false);
        bytes.truncate(bytes.len() - 5);
        assert!(matches!(deserialize(&bytes), Err(CacheError::ShapeMismatch { .. })));
    }

    #[test]
    fn reverse_endianness_byte_swaps_payload() {
        let table = sample_table();
        let forward = serialize(&table, false);
        let reversed = serialize(&table, true);
        assert_ne!(forward, reversed);
        // Un-swapping the reversed buffer's u16 header cells recovers the
        // forward buffer's values (simulating the opposite-endian host
        // that would naturally byte-swap multi-byte reads).
        let fwd_max_seq_len = u16::from_ne_bytes([forward[18], forward[19]]);
        let rev_max_seq_len = u16::from_ne_bytes([reversed[18], reversed[19]]).swap_bytes();
        assert_eq!(fwd_max_seq_len, rev_max_seq_len);
    }

    #[test]
    fn empty_table_round_trips() {
        let table = build_table(&[], 0, true, 1).unwrap();
        let bytes = serialize(&table, false);
        let restored = deserialize(&bytes).unwrap();
        assert_eq!(restored.n_narrow, 0);
        assert_eq!(restored.n_wide, 0);
        assert!(restored.can_load_en_us);
    }
}
