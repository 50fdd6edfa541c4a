#![no_main]
use libfuzzer_sys::fuzz_target;

use compose_table::table::{deserialize, serialize};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as a cache file. Most inputs fail the magic/version/
    // shape checks and that's fine — what matters is `deserialize` never
    // panics or reads out of bounds, and that whatever it does accept
    // round-trips losslessly through `serialize`.
    let table = match deserialize(data) {
        Ok(t) => t,
        Err(_) => return,
    };

    let reserialized = serialize(&table, false);
    let reloaded = deserialize(&reserialized).expect("a table we just serialized must deserialize");

    assert_eq!(reloaded.max_seq_len, table.max_seq_len);
    assert_eq!(reloaded.n_narrow, table.n_narrow);
    assert_eq!(reloaded.n_wide, table.n_wide);
    assert_eq!(reloaded.second_size, table.second_size);

    let stride = table.row_stride();
    for row in 0..table.n_narrow as usize {
        for col in 0..stride {
            assert_eq!(reloaded.narrow_cell(row, col), table.narrow_cell(row, col));
        }
    }
    for row in 0..table.n_wide as usize {
        for col in 0..stride {
            assert_eq!(reloaded.wide_cell(row, col), table.wide_cell(row, col));
        }
    }
    for idx in 0..table.second_size as usize {
        assert_eq!(reloaded.wide_value(idx), table.wide_value(idx));
    }
});
