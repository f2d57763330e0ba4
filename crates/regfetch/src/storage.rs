//! Local artifact storage: size probes, atomic writes, directory listing.
//!
//! Only existence and size of a file are tracked. There is no checksum or
//! version metadata.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{FetchError, FetchResult};

/// Suffix of the temporary file written before the final rename.
const PART_SUFFIX: &str = ".part";

/// State of a catalog entry's file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LocalArtifact {
    /// No regular file at the path.
    Missing,
    /// A file exists but is at or below the validity threshold.
    Undersized { bytes: u64 },
    /// A file larger than the threshold exists.
    Present { bytes: u64 },
}

impl LocalArtifact {
    /// Classify the file at `path` against `min_valid_size`.
    pub fn inspect(path: &Path, min_valid_size: u64) -> Self {
        match probe(path) {
            None => Self::Missing,
            Some(bytes) if bytes > min_valid_size => Self::Present { bytes },
            Some(bytes) => Self::Undersized { bytes },
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present { .. })
    }
}

/// A file in the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileListing {
    pub name: String,
    pub bytes: u64,
}

impl FileListing {
    pub fn size_kb(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }
}

/// Size of the regular file at `path`, if there is one.
pub fn probe(path: &Path) -> Option<u64> {
    let meta = std::fs::metadata(path).ok()?;
    meta.is_file().then_some(meta.len())
}

/// Create the output directory and any missing parents.
pub fn ensure_dir(path: &Path) -> FetchResult<()> {
    std::fs::create_dir_all(path).map_err(|source| FetchError::OutputDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `bytes` to `path` through a sibling temp file and a rename, so a
/// crash never leaves a truncated file under the final name.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = part_path(path);

    let result = (|| {
        let mut file = std::fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);
        std::fs::rename(&tmp, path)
    })();

    if result.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    result
}

/// Every regular file in `dir`, sorted by name.
pub fn list_dir(dir: &Path) -> FetchResult<Vec<FileListing>> {
    let to_err = |source: std::io::Error| FetchError::ListDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(to_err)? {
        let entry = entry.map_err(to_err)?;
        let meta = entry.metadata().map_err(to_err)?;
        if !meta.is_file() {
            continue;
        }
        files.push(FileListing {
            name: entry.file_name().to_string_lossy().into_owned(),
            bytes: meta.len(),
        });
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

fn part_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(PART_SUFFIX);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MIN_VALID_SIZE;

    #[test]
    fn test_threshold_boundary() {
        let dir = tempfile::tempdir().unwrap();
        let at = dir.path().join("at.pdf");
        let above = dir.path().join("above.pdf");
        std::fs::write(&at, vec![0u8; MIN_VALID_SIZE as usize]).unwrap();
        std::fs::write(&above, vec![0u8; MIN_VALID_SIZE as usize + 1]).unwrap();

        assert_eq!(
            LocalArtifact::inspect(&at, MIN_VALID_SIZE),
            LocalArtifact::Undersized { bytes: 10240 }
        );
        assert!(LocalArtifact::inspect(&above, MIN_VALID_SIZE).is_present());
    }

    #[test]
    fn test_missing_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            LocalArtifact::inspect(&dir.path().join("nope.pdf"), MIN_VALID_SIZE),
            LocalArtifact::Missing
        );
        // A directory with the target name is not an artifact.
        assert_eq!(probe(dir.path()), None);
    }

    #[test]
    fn test_write_atomic_replaces_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"old").unwrap();

        write_atomic(&path, b"%PDF-1.7 new").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7 new");
        assert!(!dir.path().join("doc.pdf.part").exists());
    }

    #[test]
    fn test_write_atomic_failure_leaves_no_part() {
        let dir = tempfile::tempdir().unwrap();
        // Renaming a file over a non-empty directory fails.
        let target = dir.path().join("doc.pdf");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("inner"), b"x").unwrap();

        assert!(write_atomic(&target, b"%PDF").is_err());
        assert!(!dir.path().join("doc.pdf.part").exists());
    }

    #[test]
    fn test_list_dir_sorted_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.pdf"), vec![0u8; 2048]).unwrap();
        std::fs::write(dir.path().join("a.pdf"), vec![0u8; 512]).unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let files = list_dir(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "a.pdf");
        assert_eq!(files[1].name, "b.pdf");
        assert!((files[1].size_kb() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ensure_dir_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("documents/regulations/fipsas");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_ensure_dir_blocked_by_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("documents");
        std::fs::write(&blocker, b"not a dir").unwrap();
        let result = ensure_dir(&blocker.join("regulations"));
        assert!(matches!(result, Err(FetchError::OutputDir { .. })));
    }
}
