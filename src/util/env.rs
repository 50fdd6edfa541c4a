//! Centralised environment and XDG directory reads.
//!
//! All `std::env::var` access for this crate goes through here, mirroring
//! the teacher's `cli/constants.rs` convention of funnelling global reads
//! through one module instead of scattering `std::env::var` across the
//! codebase.

use std::env;
use std::path::PathBuf;

use crate::config::{ENV_CACHE_DIR, ENV_HOME, ENV_TABLE_PRINT};

/// `$HOME`, consumed by the `%H` include substitution.
pub fn home() -> Option<String> {
    env::var(ENV_HOME).ok()
}

/// `true` if `IBUS_COMPOSE_TABLE_PRINT` is set to any non-empty value.
pub fn table_print_requested() -> bool {
    env::var(ENV_TABLE_PRINT)
        .map(|v| !v.is_empty())
        .unwrap_or(false)
}

/// Resolves the directory tables are cached in: `$IBUS_COMPOSE_CACHE_DIR`
/// if set, else `$XDG_CACHE_HOME/ibus/compose` (via the `dirs` crate's
/// platform-aware cache-dir resolution).
pub fn cache_dir() -> Option<PathBuf> {
    if let Ok(dir) = env::var(ENV_CACHE_DIR) {
        if !dir.is_empty() {
            return Some(PathBuf::from(dir));
        }
    }
    dirs::cache_dir().map(|d| d.join("ibus").join("compose"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cache_dir_is_nested_under_ibus_compose() {
        if let Some(dir) = dirs::cache_dir() {
            assert_eq!(
                dir.join("ibus").join("compose").file_name().unwrap(),
                "compose"
            );
        }
    }

    #[test]
    fn table_print_requested_false_when_unset() {
        env::remove_var(ENV_TABLE_PRINT);
        assert!(!table_print_requested());
    }
}
