use super::category::CacheCategory;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Enumerate,
    RemoveFile,
    RemoveDir,
}

/// A single entry that could not be listed or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    pub path: PathBuf,
    pub kind: FailureKind,
    pub message: String,
}

/// Outcome of emptying one directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderReport {
    pub category: Option<CacheCategory>,
    pub path: PathBuf,
    /// `false` when the directory was absent and nothing was attempted.
    pub existed: bool,
    pub files_removed: u64,
    pub dirs_removed: u64,
    pub failures: Vec<ItemFailure>,
}

impl FolderReport {
    pub(crate) fn new(path: &Path) -> Self {
        Self {
            category: None,
            path: path.to_path_buf(),
            existed: true,
            files_removed: 0,
            dirs_removed: 0,
            failures: Vec::new(),
        }
    }

    pub(crate) fn missing(path: &Path) -> Self {
        Self {
            existed: false,
            ..Self::new(path)
        }
    }

    pub(crate) fn with_category(mut self, category: CacheCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of a whole cache clear, one entry per category visited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClearReport {
    pub folders: Vec<FolderReport>,
}

impl ClearReport {
    pub fn folder(&self, category: CacheCategory) -> Option<&FolderReport> {
        self.folders
            .iter()
            .find(|folder| folder.category == Some(category))
    }

    pub fn files_removed(&self) -> u64 {
        self.folders.iter().map(|folder| folder.files_removed).sum()
    }

    pub fn dirs_removed(&self) -> u64 {
        self.folders.iter().map(|folder| folder.dirs_removed).sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemFailure> {
        self.folders.iter().flat_map(|folder| folder.failures.iter())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn is_clean(&self) -> bool {
        self.folders.iter().all(FolderReport::is_clean)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryUsage {
    pub category: CacheCategory,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Disk usage per category, for the settings view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheUsage {
    pub categories: Vec<CategoryUsage>,
    pub total_bytes: u64,
}

impl CacheUsage {
    pub fn bytes_for(&self, category: CacheCategory) -> u64 {
        self.categories
            .iter()
            .find(|usage| usage.category == category)
            .map(|usage| usage.bytes)
            .unwrap_or(0)
    }
}
