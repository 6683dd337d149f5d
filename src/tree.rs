//! Whole-directory helpers: copy a tree, recreate a tree, zip a tree.
//!
//! ```
//! use seabuild::tree::{copy_tree, make_tree};
//!
//! let dir = tempfile::tempdir()?;
//! let copy = dir.path().join("copy_of_fixture");
//! make_tree(&copy)?;
//! copy_tree("./fixture", &copy, None, None)?;
//! assert!(copy.join("dir1/dir2/nested.txt").exists());
//! # Ok::<(), std::io::Error>(())
//! ```

use crate::classify::Mode;
use crate::fileio::{copy_file, Transform};
use std::fs::File;
use std::io::{Error, Result};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Use the platform separator throughout, and end with exactly one.
pub fn normalize_root(path: impl AsRef<Path>) -> PathBuf {
    let raw = path.as_ref().to_string_lossy().replace('/', &MAIN_SEPARATOR.to_string());
    let trimmed = raw.trim_end_matches(MAIN_SEPARATOR);
    let base = if trimmed.is_empty() && raw.is_empty() {
        "."
    } else {
        trimmed
    };
    PathBuf::from(format!("{}{}", base, MAIN_SEPARATOR))
}

fn walk_err(e: walkdir::Error) -> Error {
    Error::from(e)
}

/// Path of `entry` relative to `root`, as a zip entry name.
fn entry_name(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<String>>()
        .join("/")
}

/// Copy every file under `src` to the same relative place under `dst`.
///
/// Directories are created as needed and never removed, so files that only
/// exist in `dst` survive. Returns how many files were copied.
pub fn copy_tree(
    src: impl AsRef<Path>,
    dst: impl AsRef<Path>,
    forced: Option<Mode>,
    transform: Option<Transform>,
) -> Result<usize> {
    let (src, dst) = (normalize_root(src), normalize_root(dst));
    let mut copied = 0;

    for entry in WalkDir::new(&src).sort_by_file_name() {
        let entry = entry.map_err(walk_err)?;
        let rel = entry
            .path()
            .strip_prefix(&src)
            .map_err(|e| Error::other(e))?;
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            if !target.is_dir() {
                std::fs::create_dir_all(&target)?;
            }
        } else if entry.path().is_file() {
            copy_file(entry.path(), &target, forced, transform)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Make sure `path` exists as an empty directory, wiping anything there before.
pub fn make_tree(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        std::fs::remove_dir_all(path)?;
    }
    std::fs::create_dir_all(path)
}

/// Zip every file under `path` into a new archive at `zip_path`.
///
/// Entry names are relative to `path`. If the archive itself lives inside the
/// tree, it is left out. Returns how many entries were written.
pub fn zip_tree(path: impl AsRef<Path>, zip_path: impl AsRef<Path>) -> Result<usize> {
    let root = normalize_root(path);
    let zip_path = zip_path.as_ref();

    let mut zip = ZipWriter::new(File::create(zip_path)?);
    let zip_real = std::fs::canonicalize(zip_path)?;
    let mut written = 0;

    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry.map_err(walk_err)?;
        if entry.file_type().is_dir() || !entry.path().is_file() {
            continue;
        }
        if std::fs::canonicalize(entry.path())? == zip_real {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(&root)
            .map_err(|e| Error::other(e))?;

        zip.start_file(entry_name(rel), SimpleFileOptions::default())
            .map_err(|e| Error::other(e))?;
        let mut reader = File::open(entry.path())?;
        std::io::copy(&mut reader, &mut zip)?;
        written += 1;
    }

    zip.finish().map_err(|e| Error::other(e))?;
    Ok(written)
}
