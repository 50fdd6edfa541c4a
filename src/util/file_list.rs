//! Recursive directory expansion for the CLI's bulk rebuild command.
//!
//! Only built with the `recursive` feature; the library itself never walks
//! directories on its own.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Expands a mixed list of file and directory paths into a flat list of
/// regular files. Directories are walked recursively; symlinks are never
/// followed (`walkdir`'s default `follow_links(false)`), so a symlink to a
/// directory is not recursed into and a symlink entry found during a walk
/// is excluded. A symlink passed directly as a non-directory input is
/// forwarded unchanged.
pub fn create_file_list(inputs: &[&Path]) -> io::Result<Vec<PathBuf>> {
    let mut result = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input) {
                let entry = entry.map_err(|e| {
                    e.io_error()
                        .map(|io| io::Error::new(io.kind(), io.to_string()))
                        .unwrap_or_else(|| io::Error::other(e.to_string()))
                })?;
                if entry.file_type().is_file() {
                    result.push(entry.into_path());
                }
            }
        } else {
            result.push(input.to_path_buf());
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("a"), b"a").unwrap();
        fs::write(root.join("sub/b"), b"b").unwrap();
        dir
    }

    #[test]
    fn expands_directory_recursively() {
        let dir = make_tree();
        let list = create_file_list(&[dir.path()]).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn passes_regular_file_through() {
        let dir = make_tree();
        let file = dir.path().join("a");
        let list = create_file_list(&[file.as_path()]).unwrap();
        assert_eq!(list, vec![file]);
    }

    #[test]
    fn empty_inputs_returns_empty_list() {
        assert!(create_file_list(&[]).unwrap().is_empty());
    }
}
