//! Incremental, diff-gated file writing.
//!
//! Every artefact is rendered to memory first, compared byte-for-byte
//! against the file on disk, and only rewritten on difference. Unchanged
//! files keep their timestamps, so a consuming build system recompiles
//! only what the schema change actually touched.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Outcome of one diff-and-replace call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// The file did not exist before.
    New,
    /// The file existed with different contents.
    Modified,
    /// The file already had exactly this content; nothing was written.
    Unchanged,
}

impl FileStatus {
    /// One-character report tag: `A` new, `M` modified, `.` unchanged.
    #[must_use]
    pub fn tag(self) -> char {
        match self {
            Self::New => 'A',
            Self::Modified => 'M',
            Self::Unchanged => '.',
        }
    }
}

/// Per-file entry of the generation report.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Path of the output file.
    pub path: PathBuf,
    /// What happened to it.
    pub status: FileStatus,
}

/// Replaces the contents of `path` with `new_contents` if they differ.
///
/// A missing file reads as empty. In dry-run mode nothing is written and
/// only the would-change status is reported.
///
/// # Errors
/// Returns an IO error when the file cannot be written.
pub fn diff_and_replace(path: &Path, new_contents: &str, dry_run: bool) -> io::Result<FileReport> {
    let original = fs::read(path).unwrap_or_default();

    if original == new_contents.as_bytes() {
        tracing::debug!(". {}", path.display());
        return Ok(FileReport {
            path: path.to_path_buf(),
            status: FileStatus::Unchanged,
        });
    }

    let status = if path.exists() {
        FileStatus::Modified
    } else {
        FileStatus::New
    };
    tracing::info!("{} {}", status.tag(), path.display());

    if !dry_run {
        fs::write(path, new_contents)?;
    }

    Ok(FileReport {
        path: path.to_path_buf(),
        status,
    })
}
