//! The "typed keysym" flag rule.
//!
//! Equivalent to `ibus_compose_key_flag` (`ibuscomposetable.c:628-668`).
//! A typed keysym carries one of three disambiguation flags depending on
//! how X11 overloads its low 16 bits against legacy/Unicode codepoints;
//! the flag is folded into the stored sequence element so the lookup
//! comparator in `lookup` can tell a typed key from a bare Unicode value
//! that happens to share the low bits.

/// `<Aogonek>` is unused in UTF-8 compose sequences; `<ohorn>` is assumed
/// instead in the en-US Compose file and the vn keymap.
const LEGACY_AOGONEK: u32 = 0x1a1;
/// `<Zabovedot>` is unused; `<Uhorn>` is assumed instead.
const LEGACY_ZABOVEDOT: u32 = 0x1af;
/// `<caron>` is unused; `<EZH>` is assumed instead (fr(nodeadkeys) keymap).
const LEGACY_CARON: u32 = 0x1b7;

/// en-US ships a MUSICAL SYMBOL compose table in this keysym range.
const MUSICAL_SYMBOL_LO: u32 = 0xd143;
const MUSICAL_SYMBOL_HI: u32 = 0xd1e8;

pub const FLAG_NONE: u32 = 0;
pub const FLAG_MUSICAL_SYMBOL: u32 = 0x10000;
pub const FLAG_UNNAMED: u32 = 0x1000000;

/// Resolves the flag a stored sequence element needs when it is typed as
/// `key`, given the host's name for it (`None` if the host has none, which
/// the original source treats the same as a `"0x..."`-named synthetic key).
pub fn keysym_flag(key: u32, name: Option<&str>) -> u32 {
    if key <= 0xff {
        return FLAG_NONE;
    }
    if (MUSICAL_SYMBOL_LO..=MUSICAL_SYMBOL_HI).contains(&key) {
        return FLAG_MUSICAL_SYMBOL;
    }
    match key {
        LEGACY_AOGONEK | LEGACY_ZABOVEDOT | LEGACY_CARON => return FLAG_UNNAMED,
        _ => {}
    }
    match name {
        None => FLAG_UNNAMED,
        Some(name) if name.starts_with("0x") => FLAG_UNNAMED,
        // <Pointer_EnableKeys> has no Compose file entry; <UFEF9> is used instead.
        Some(name) if name.starts_with("Poi") => FLAG_UNNAMED,
        Some(_) => FLAG_NONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_keys_are_unflagged() {
        assert_eq!(keysym_flag(0x41, Some("A")), FLAG_NONE);
        assert_eq!(keysym_flag(0xff, Some("anything")), FLAG_NONE);
    }

    #[test]
    fn musical_symbol_range_is_flagged() {
        assert_eq!(keysym_flag(0xd143, Some("whatever")), FLAG_MUSICAL_SYMBOL);
        assert_eq!(keysym_flag(0xd1e8, None), FLAG_MUSICAL_SYMBOL);
        assert_eq!(keysym_flag(0xd142, Some("x")), FLAG_NONE);
        assert_eq!(keysym_flag(0xd1e9, Some("x")), FLAG_NONE);
    }

    #[test]
    fn legacy_punned_keysyms_are_flagged() {
        assert_eq!(keysym_flag(0x1a1, Some("Aogonek")), FLAG_UNNAMED);
        assert_eq!(keysym_flag(0x1af, Some("Zabovedot")), FLAG_UNNAMED);
        assert_eq!(keysym_flag(0x1b7, Some("caron")), FLAG_UNNAMED);
    }

    #[test]
    fn missing_or_hex_name_is_flagged() {
        assert_eq!(keysym_flag(0x2000, None), FLAG_UNNAMED);
        assert_eq!(keysym_flag(0x2000, Some("0x2000")), FLAG_UNNAMED);
    }

    #[test]
    fn pointer_enable_keys_is_flagged() {
        assert_eq!(keysym_flag(0xfef9, Some("Pointer_EnableKeys")), FLAG_UNNAMED);
    }

    #[test]
    fn named_keys_are_unflagged() {
        assert_eq!(keysym_flag(0xff20, Some("Multi_key")), FLAG_NONE);
        assert_eq!(keysym_flag(0x1000, Some("Cyrillic_a")), FLAG_NONE);
    }
}
