use super::category::CacheCategory;
use super::fsops;
use super::report::{CacheUsage, CategoryUsage, ClearReport, FolderReport};
use super::root::{validate_entry_name, CachePaths, CacheRoot};
use crate::config::CacheConfig;
use crate::error::{format_error_chain, CoreError, CoreResult};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Owns the cache directory layout and its lifecycle operations.
///
/// Holds no locks; callers sequence clears against active writers.
#[derive(Debug, Clone)]
pub struct CacheManager {
    root: CacheRoot,
}

impl CacheManager {
    pub fn new(root: CacheRoot) -> Self {
        Self { root }
    }

    pub fn from_config(cfg: &CacheConfig) -> CoreResult<Self> {
        Ok(Self::new(CacheRoot::new(cfg.resolve_root())?))
    }

    pub fn root(&self) -> &CacheRoot {
        &self.root
    }

    pub fn path(&self, category: CacheCategory) -> &Path {
        self.root.path(category)
    }

    /// Creates every missing category directory, parents included.
    pub fn ensure_folders_exist(&self) -> CoreResult<()> {
        for (category, path) in self.root.iter() {
            if path.is_dir() {
                continue;
            }
            create_dir(path)?;
            debug!(%category, path = %path.display(), "created cache folder");
        }
        Ok(())
    }

    pub fn directory_size(&self, path: &Path) -> u64 {
        fsops::directory_size(path)
    }

    pub fn category_size(&self, category: CacheCategory) -> u64 {
        fsops::directory_size(self.path(category))
    }

    pub fn usage(&self) -> CacheUsage {
        let categories: Vec<CategoryUsage> = self
            .root
            .iter()
            .map(|(category, path)| CategoryUsage {
                category,
                path: path.to_path_buf(),
                bytes: fsops::directory_size(path),
            })
            .collect();
        let total_bytes = categories
            .iter()
            .fold(0u64, |total, usage| total.saturating_add(usage.bytes));
        CacheUsage {
            categories,
            total_bytes,
        }
    }

    /// Empties the download and subtitle folders, and the assets folder when
    /// `include_assets` is set. Category directories themselves are kept.
    pub fn clear_folders(&self, include_assets: bool) -> ClearReport {
        let assets = include_assets.then_some(CacheCategory::Assets);
        let folders: Vec<FolderReport> = assets
            .into_iter()
            .chain(CacheCategory::CLEARED_ON_SHUTDOWN)
            .map(|category| {
                fsops::delete_contents(self.path(category)).with_category(category)
            })
            .collect();
        let report = ClearReport { folders };

        if report.is_clean() {
            info!(
                include_assets,
                files = report.files_removed(),
                dirs = report.dirs_removed(),
                "cache folders cleared"
            );
        } else {
            error!(
                include_assets,
                files = report.files_removed(),
                dirs = report.dirs_removed(),
                failures = report.failure_count(),
                "cache folders partially cleared"
            );
        }
        report
    }

    /// Best-effort removal of everything inside `path`.
    pub fn delete_folder(&self, path: &Path) -> FolderReport {
        fsops::delete_contents(path)
    }

    /// Creates and returns `Subtitles/<media_id>`.
    pub fn ensure_subtitle_dir(&self, media_id: &str) -> CoreResult<PathBuf> {
        let path = self.subtitles_for(media_id)?;
        create_dir(&path)?;
        Ok(path)
    }

    /// Streams `reader` into `Assets/<name>`, replacing any previous file.
    pub fn extract_asset<R: Read>(&self, name: &str, mut reader: R) -> CoreResult<PathBuf> {
        let name = validate_entry_name(name)?;
        let assets = self.path(CacheCategory::Assets);
        create_dir(assets)?;

        let destination = assets.join(name);
        let mut file = fs::File::create(&destination)?;
        let written = io::copy(&mut reader, &mut file)?;
        file.sync_all()?;
        debug!(path = %destination.display(), bytes = written, "extracted asset");
        Ok(destination)
    }
}

impl CachePaths for CacheManager {
    fn path(&self, category: CacheCategory) -> &Path {
        self.root.path(category)
    }
}

fn create_dir(path: &Path) -> CoreResult<()> {
    fs::create_dir_all(path).map_err(|source| {
        let err = CoreError::Filesystem {
            path: path.to_path_buf(),
            source,
        };
        error!(error = %format_error_chain(&err), "cache folder unavailable");
        err
    })
}
