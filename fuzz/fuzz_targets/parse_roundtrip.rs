#![no_main]
use libfuzzer_sys::fuzz_target;

use std::io::Write;

use compose_table::keysym::StaticKeysymSource;
use compose_table::parser::parse_file;

fn source() -> StaticKeysymSource {
    StaticKeysymSource::new(vec![
        ("Multi_key", 0xff20),
        ("dead_acute", 0xfe51),
        ("a", 0x61),
        ("e", 0x65),
    ])
}

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as Compose-file contents, including invalid UTF-8 and
    // malformed grammar — `parse_file` must never panic, only return
    // warnings or a fatal I/O error.
    let dir = match tempfile::TempDir::new() {
        Ok(d) => d,
        Err(_) => return,
    };
    let path = dir.path().join("Compose");
    {
        let mut f = match std::fs::File::create(&path) {
            Ok(f) => f,
            Err(_) => return,
        };
        if f.write_all(data).is_err() {
            return;
        }
    }

    let src = source();
    let _ = parse_file(&path, &src);
});
