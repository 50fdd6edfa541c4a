//! Compile-time configuration constants.
//!
//! Migrated from the `#define`s in `ibuscomposetable.c` / `ibuscomposetable.h`
//! (upstream IBus). Platform-detection macros from the C source (byte-order
//! probing via `#ifdef WORDS_BIGENDIAN`) are not needed here: Rust exposes
//! `u16::to_le_bytes` / `from_le_bytes` directly at each call site.

/// Longest legal compose key sequence. Corresponds to `IBUS_MAX_COMPOSE_LEN`.
pub const MAX_COMPOSE_LEN: usize = 24;

/// Cap on the NFC permutation path, chosen so `9! == 40320` stays far below
/// `SHRT_MAX`. Corresponds to `IBUS_MAX_COMPOSE_ALGORITHM_LEN`.
pub const MAX_COMPOSE_ALGORITHM_LEN: usize = 9;

/// Current on-disk cache format version. Any mismatch is treated as a cache
/// miss and triggers a rebuild. Corresponds to `IBUS_COMPOSE_TABLE_VERSION`.
pub const CACHE_VERSION: u16 = 5;

/// Magic header written at the start of every cache file.
/// Corresponds to `IBUS_COMPOSE_TABLE_MAGIC`.
pub const CACHE_MAGIC: &str = "IBusComposeTable";

/// Compile-time system locale directory, substituted for `%S` in include
/// paths. Corresponds to `X11_LOCALEDATADIR`.
pub const X11_LOCALEDATADIR: &str = "/usr/share/X11/locale";

/// Environment variable overriding the cache directory.
pub const ENV_CACHE_DIR: &str = "IBUS_COMPOSE_CACHE_DIR";

/// Environment variable that, when set to any non-empty value, requests a
/// human-readable dump of a built table.
pub const ENV_TABLE_PRINT: &str = "IBUS_COMPOSE_TABLE_PRINT";

/// Environment variable consumed by the `%H` include substitution.
pub const ENV_HOME: &str = "HOME";
