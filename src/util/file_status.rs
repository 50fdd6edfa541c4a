//! File status queries used by include-cycle detection and cache staleness.
//!
//! - [`file_identity`] — `(dev, ino)` pair used to recognise "this is the
//!   same file" even when reached by two different paths.
//! - [`is_stale`]      — mtime comparison driving the cache validity rule.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Device/inode pair identifying a file independent of the path used to
/// reach it. Two paths that `stat` to the same `FileIdentity` are the same
/// file, even across symlinks or bind mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileIdentity {
    pub dev: u64,
    pub ino: u64,
}

/// `stat`s `path` and returns its `(dev, ino)` identity.
///
/// Used by the include resolver to detect a file including itself (directly
/// or through the system baseline) without following symlinks into a loop.
#[cfg(unix)]
pub fn file_identity(path: &Path) -> io::Result<FileIdentity> {
    use nix::sys::stat::stat;
    let st = stat(path).map_err(io::Error::from)?;
    Ok(FileIdentity {
        dev: st.st_dev as u64,
        ino: st.st_ino as u64,
    })
}

#[cfg(not(unix))]
pub fn file_identity(path: &Path) -> io::Result<FileIdentity> {
    // Non-POSIX targets have no stable inode; canonicalising the path and
    // hashing it still detects a literal repeated include.
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let canon = fs::canonicalize(path)?;
    let mut hasher = DefaultHasher::new();
    canon.hash(&mut hasher);
    Ok(FileIdentity { dev: 0, ino: hasher.finish() })
}

/// Returns `true` if `path` exists and is a regular file.
pub fn is_reg_file(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_file())
        .unwrap_or(false)
}

/// A cache file at `cache_path` is valid only if it exists and its mtime is
/// not older than `source_path`'s. Any I/O failure is treated as "not
/// valid" (the caller falls back to rebuilding), matching the cache-miss
/// policy in spec.md §7 kind 4.
pub fn is_cache_fresh(cache_path: &Path, source_path: &Path) -> bool {
    let cache_mtime = match mtime(cache_path) {
        Ok(t) => t,
        Err(_) => return false,
    };
    let source_mtime = match mtime(source_path) {
        Ok(t) => t,
        Err(_) => return false,
    };
    cache_mtime >= source_mtime
}

fn mtime(path: &Path) -> io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}
