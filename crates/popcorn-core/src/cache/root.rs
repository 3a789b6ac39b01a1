use super::category::CacheCategory;
use crate::error::{CoreError, CoreResult};
use std::path::{Component, Path, PathBuf};

/// Read-only view of the cache layout handed to collaborators.
///
/// Subtitle fetchers, downloaders and the drop handler take an
/// `Arc<dyn CachePaths>` at construction instead of looking the cache up
/// from global state.
pub trait CachePaths: Send + Sync {
    fn path(&self, category: CacheCategory) -> &Path;

    /// Per-media subtitle directory, `Subtitles/<media_id>`.
    fn subtitles_for(&self, media_id: &str) -> CoreResult<PathBuf> {
        let name = validate_entry_name(media_id)?;
        Ok(self.path(CacheCategory::Subtitles).join(name))
    }
}

/// Absolute category directories derived once from a base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRoot {
    base: PathBuf,
    paths: [PathBuf; 6],
}

impl CacheRoot {
    pub fn new(base: impl Into<PathBuf>) -> CoreResult<Self> {
        let base = base.into();
        if base.as_os_str().is_empty() {
            return Err(CoreError::Config("cache base directory is empty".to_string()));
        }
        let base = std::path::absolute(&base).map_err(|err| {
            CoreError::Config(format!(
                "cannot resolve cache base directory {}: {err}",
                base.display()
            ))
        })?;

        let paths = CacheCategory::ALL.map(|category| {
            category
                .suffix()
                .iter()
                .fold(base.clone(), |path, part| path.join(part))
        });
        Ok(Self { base, paths })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self, category: CacheCategory) -> &Path {
        &self.paths[index_of(category)]
    }

    pub fn assets(&self) -> &Path {
        self.path(CacheCategory::Assets)
    }

    pub fn subtitles(&self) -> &Path {
        self.path(CacheCategory::Subtitles)
    }

    pub fn movie_downloads(&self) -> &Path {
        self.path(CacheCategory::MovieDownloads)
    }

    pub fn show_downloads(&self) -> &Path {
        self.path(CacheCategory::ShowDownloads)
    }

    pub fn drop_files_downloads(&self) -> &Path {
        self.path(CacheCategory::DropFilesDownloads)
    }

    pub fn movie_torrent_downloads(&self) -> &Path {
        self.path(CacheCategory::MovieTorrentDownloads)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CacheCategory, &Path)> + '_ {
        CacheCategory::ALL
            .into_iter()
            .map(move |category| (category, self.path(category)))
    }
}

impl CachePaths for CacheRoot {
    fn path(&self, category: CacheCategory) -> &Path {
        CacheRoot::path(self, category)
    }
}

/// Position of `category` in [`CacheCategory::ALL`].
fn index_of(category: CacheCategory) -> usize {
    match category {
        CacheCategory::Assets => 0,
        CacheCategory::Subtitles => 1,
        CacheCategory::MovieDownloads => 2,
        CacheCategory::DropFilesDownloads => 3,
        CacheCategory::ShowDownloads => 4,
        CacheCategory::MovieTorrentDownloads => 5,
    }
}

/// Accepts names that stay inside their parent directory: exactly one
/// normal path component.
pub(crate) fn validate_entry_name(name: &str) -> CoreResult<&str> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(name),
        _ => Err(CoreError::InvalidName(name.to_string())),
    }
}
