//! Filesystem utilities.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Replace the contents of `path` with `contents` in one step.
///
/// The data is written to a temporary file next to `path` and then renamed
/// over it, so readers see either the old file or the complete new one.
/// The parent directory must already exist.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    tmp.write_all(contents)
        .and_then(|()| tmp.as_file().sync_all())
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to write file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_creates_and_overwrites() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.conf");

        write_atomic(&path, b"first contents\n").unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "first contents\n");

        write_atomic(&path, b"second\n").unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "second\n");

        // No temporary files are left behind.
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_missing_parent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("out.conf");

        let err = write_atomic(&path, b"data").unwrap_err();
        assert!(format!("{:#}", err).contains("out.conf"));
        assert!(!path.exists());
    }
}
