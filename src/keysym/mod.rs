//! Keysym-level helpers: the typed-keysym flag rule and the host name
//! service seam that the parser and NFC lookup resolve names through.

mod flag;
mod host;

pub use flag::{keysym_flag, FLAG_MUSICAL_SYMBOL, FLAG_NONE, FLAG_UNNAMED};
pub use host::{DeadKeyCombine, KeysymSource, StaticKeysymSource, DEAD_KEY_COMBINES, VOID_SYMBOL};
