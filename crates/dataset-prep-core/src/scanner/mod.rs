use crate::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Immutable snapshot record for one regular file. Taken once per run; no
/// entry is re-read after classification unless explicitly re-hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub file_size: u64,
    /// Lower-cased extension without the dot; empty when the file has none.
    pub extension: String,
}

impl FileEntry {
    fn from_path(path: PathBuf, file_size: u64) -> Self {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        Self {
            path,
            file_size,
            extension,
        }
    }
}

/// Flat listing of the regular files directly under `dir`, sorted
/// lexicographically by path. Skips subdirectories and symlinks. Freshly
/// read on every call; results are only valid for this snapshot.
pub fn snapshot_directory(dir: &Path) -> Result<Vec<FileEntry>, Error> {
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        let metadata = fs::symlink_metadata(&path).map_err(|e| Error::io(&path, e))?;
        if !metadata.is_file() {
            continue;
        }
        files.push(FileEntry::from_path(path, metadata.len()));
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Immediate subdirectories of `root` as (name, path) pairs, sorted by name.
/// Used by the class balance check, where each subdirectory is one class.
pub fn list_subdirectories(root: &Path) -> Result<Vec<(String, PathBuf)>, Error> {
    if !root.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    let entries = fs::read_dir(root).map_err(|e| Error::io(root, e))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(root, e))?;
        let path = entry.path();
        if path.is_dir() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            dirs.push((name, path));
        }
    }

    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(dirs)
}
