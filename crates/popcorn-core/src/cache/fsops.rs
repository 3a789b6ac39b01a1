//! Best-effort filesystem walks used by the cache manager.
//!
//! Nothing here returns an error: faults on individual entries are logged
//! and either folded into a [`FolderReport`] or, for size measurement,
//! turned into a zero result.

use super::report::{FailureKind, FolderReport, ItemFailure};
use crate::error::format_error_chain;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, error};
use walkdir::WalkDir;

/// Total size in bytes of every regular file beneath `path`.
///
/// Returns 0 when `path` is not a directory or when any entry cannot be
/// read. Symbolic links are not followed.
pub fn directory_size(path: &Path) -> u64 {
    if !path.is_dir() {
        debug!(path = %path.display(), "not a directory, size is zero");
        return 0;
    }
    match try_directory_size(path) {
        Ok(total) => total,
        Err(err) => {
            error!(
                path = %path.display(),
                error = %format_error_chain(&err),
                "failed to measure directory"
            );
            0
        }
    }
}

fn try_directory_size(path: &Path) -> Result<u64, walkdir::Error> {
    let mut total: u64 = 0;
    for entry in WalkDir::new(path) {
        let entry = entry?;
        if entry.file_type().is_file() {
            total = total.saturating_add(entry.metadata()?.len());
        }
    }
    Ok(total)
}

/// Removal primitives used by [`delete_contents`].
pub(crate) trait Remover {
    fn remove_file(&mut self, path: &Path) -> io::Result<()>;
    fn remove_dir_all(&mut self, path: &Path) -> io::Result<()>;
}

struct FsRemover;

impl Remover for FsRemover {
    fn remove_file(&mut self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir_all(&mut self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }
}

/// Empties `path`, keeping the directory itself.
///
/// Files are removed one by one first, then each immediate subdirectory is
/// removed recursively. A failure on one entry never stops the others.
pub fn delete_contents(path: &Path) -> FolderReport {
    delete_contents_with(path, &mut FsRemover)
}

pub(crate) fn delete_contents_with<R: Remover>(path: &Path, remover: &mut R) -> FolderReport {
    if !path.is_dir() {
        debug!(path = %path.display(), "directory missing, nothing to delete");
        return FolderReport::missing(path);
    }

    let mut report = FolderReport::new(path);
    remove_files(path, remover, &mut report);
    remove_subdirectories(path, remover, &mut report);
    report
}

fn remove_files<R: Remover>(root: &Path, remover: &mut R, report: &mut FolderReport) {
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let at = err.path().unwrap_or(root).to_path_buf();
                record(report, &at, FailureKind::Enumerate, &err);
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }
        match remover.remove_file(entry.path()) {
            Ok(()) => report.files_removed += 1,
            Err(err) => record(report, entry.path(), FailureKind::RemoveFile, &err),
        }
    }
}

fn remove_subdirectories<R: Remover>(root: &Path, remover: &mut R, report: &mut FolderReport) {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(err) => {
            record(report, root, FailureKind::Enumerate, &err);
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                record(report, root, FailureKind::Enumerate, &err);
                continue;
            }
        };
        let path = entry.path();
        match entry.file_type() {
            Ok(file_type) if file_type.is_dir() => {}
            Ok(_) => continue,
            Err(err) => {
                record(report, &path, FailureKind::Enumerate, &err);
                continue;
            }
        }
        match remover.remove_dir_all(&path) {
            Ok(()) => report.dirs_removed += 1,
            Err(err) => record(report, &path, FailureKind::RemoveDir, &err),
        }
    }
}

fn record<E: std::error::Error>(
    report: &mut FolderReport,
    path: &Path,
    kind: FailureKind,
    err: &E,
) {
    let message = format_error_chain(err);
    match kind {
        FailureKind::Enumerate => {
            error!(path = %path.display(), error = %message, "error while listing folder")
        }
        FailureKind::RemoveFile => {
            error!(path = %path.display(), error = %message, "error while deleting file")
        }
        FailureKind::RemoveDir => {
            error!(path = %path.display(), error = %message, "error while deleting folder")
        }
    }
    report.failures.push(ItemFailure {
        path: path.to_path_buf(),
        kind,
        message,
    });
}
