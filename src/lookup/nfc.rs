//! The NFC canonical-permutation fallback for dead-key combining.
//!
//! Equivalent to `ibus_check_algorithmically` / `check_normalize_nfc`
//! (`ibuscomposetable.c:2077-2151`). Runs only after the exact-table path
//! misses, on a buffer shaped as zero-or-more dead keys followed by
//! exactly one base key.

use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

use crate::config::MAX_COMPOSE_ALGORITHM_LEN;
use crate::keysym::KeysymSource;

/// Attempts to resolve `typed` algorithmically via Unicode canonical
/// composition. Returns `None` if the buffer isn't a legal
/// dead-keys-then-base shape, is too long, or no permutation of the
/// dead-key tail composes to a single scalar.
pub fn check_algorithmically(typed: &[u32], source: &dyn KeysymSource) -> Option<char> {
    let n = typed.len();
    if n == 0 || n > MAX_COMPOSE_ALGORITHM_LEN {
        return None;
    }

    let dead_count = typed.iter().take_while(|&&k| source.is_dead_key(k)).count();
    // All dead keys with no base yet: still composing, nothing to emit.
    if dead_count == n {
        return None;
    }
    // Anything but "dead keys then exactly one trailing base" doesn't apply.
    if dead_count == 0 || dead_count != n - 1 {
        return None;
    }

    let base = source.keysym_to_base_char(typed[n - 1])?;
    let mut buffer: Vec<char> = Vec::with_capacity(n);
    buffer.push(base);
    for &dead in &typed[..dead_count] {
        let scalar = source
            .keysym_to_unicode(dead, true)
            .or_else(|| source.keysym_to_base_char(dead))?;
        buffer.push(scalar);
    }

    // Xorg reuses dead_tilde for the perispomeni diacritic; within the
    // Greek block, treat a combining tilde as perispomeni instead.
    if ('\u{0390}'..='\u{03ff}').contains(&buffer[0]) {
        for c in buffer.iter_mut().skip(1) {
            if *c == '\u{0303}' {
                *c = '\u{0342}';
            }
        }
    }

    search_permutations(buffer)
}

fn search_permutations(mut buffer: Vec<char>) -> Option<char> {
    let n = buffer.len();
    let tail_len = n - 1;
    let n_combinations: u32 = (1..=tail_len as u32).product::<u32>().max(1);

    for combo in 0..n_combinations {
        canonical_ordering(&mut buffer);
        let composed: String = buffer.iter().collect::<String>().nfc().collect();
        let mut chars = composed.chars();
        if let (Some(only), None) = (chars.next(), chars.next()) {
            return Some(only);
        }

        if tail_len > 1 {
            let j = (combo as usize % tail_len) + 1;
            let k = ((combo as usize + 1) % tail_len) + 1;
            buffer.swap(j, k);
        } else {
            break;
        }
    }

    None
}

/// Stable insertion sort within runs of non-starter (non-zero combining
/// class) scalars, matching the observable effect of the Unicode Canonical
/// Ordering Algorithm on short dead-key tails.
fn canonical_ordering(buffer: &mut [char]) {
    for i in 1..buffer.len() {
        let mut j = i;
        while j > 0 {
            let ccc_prev = canonical_combining_class(buffer[j - 1]);
            let ccc_cur = canonical_combining_class(buffer[j]);
            if ccc_prev != 0 && ccc_prev > ccc_cur {
                buffer.swap(j - 1, j);
                j -= 1;
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keysym::StaticKeysymSource;

    struct DeadKeySource;

    impl KeysymSource for DeadKeySource {
        fn keysym_by_name(&self, _name: &str) -> Option<u32> {
            None
        }
        fn name_by_keysym(&self, keysym: u32) -> Option<&str> {
            match keysym {
                0xfe51 => Some("dead_acute"),
                0xfe52 => Some("dead_breve"),
                _ => None,
            }
        }
        fn keysym_to_base_char(&self, keysym: u32) -> Option<char> {
            char::from_u32(keysym)
        }
    }

    #[test]
    fn single_dead_key_and_base_compose() {
        let source = DeadKeySource;
        let typed = [0xfe51, 'a' as u32]; // dead_acute + a -> á
        let result = check_algorithmically(&typed, &source);
        assert_eq!(result, Some('\u{00e1}'));
    }

    #[test]
    fn two_dead_keys_compose_regardless_of_order() {
        // dead_breve + dead_acute + a -> a with breve and acute (U+1EAF),
        // in either typed order, per spec.md §4.6 and §8 scenario 5.
        let source = DeadKeySource;
        let typed_1 = [0xfe52, 0xfe51, 'a' as u32];
        let typed_2 = [0xfe51, 0xfe52, 'a' as u32];
        assert_eq!(check_algorithmically(&typed_1, &source), Some('\u{1eaf}'));
        assert_eq!(check_algorithmically(&typed_2, &source), Some('\u{1eaf}'));
    }

    #[test]
    fn all_dead_keys_with_no_base_is_none() {
        let source = DeadKeySource;
        let typed = [0xfe51, 0xfe52];
        assert_eq!(check_algorithmically(&typed, &source), None);
    }

    #[test]
    fn unrelated_ascii_is_none() {
        let source = StaticKeysymSource::new(vec![("a", 'a' as u32)]);
        let typed = ['a' as u32];
        assert_eq!(check_algorithmically(&typed, &source), None);
    }
}
