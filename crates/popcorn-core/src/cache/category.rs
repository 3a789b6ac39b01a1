use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed cache directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheCategory {
    Assets,
    Subtitles,
    MovieDownloads,
    ShowDownloads,
    DropFilesDownloads,
    MovieTorrentDownloads,
}

impl CacheCategory {
    /// Every category, in creation order.
    pub const ALL: [CacheCategory; 6] = [
        CacheCategory::Assets,
        CacheCategory::Subtitles,
        CacheCategory::MovieDownloads,
        CacheCategory::DropFilesDownloads,
        CacheCategory::ShowDownloads,
        CacheCategory::MovieTorrentDownloads,
    ];

    /// Categories emptied on every clear, in clearing order. Assets are only
    /// cleared on request.
    pub const CLEARED_ON_SHUTDOWN: [CacheCategory; 5] = [
        CacheCategory::Subtitles,
        CacheCategory::MovieDownloads,
        CacheCategory::DropFilesDownloads,
        CacheCategory::ShowDownloads,
        CacheCategory::MovieTorrentDownloads,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheCategory::Assets => "assets",
            CacheCategory::Subtitles => "subtitles",
            CacheCategory::MovieDownloads => "movie-downloads",
            CacheCategory::ShowDownloads => "show-downloads",
            CacheCategory::DropFilesDownloads => "drop-files-downloads",
            CacheCategory::MovieTorrentDownloads => "movie-torrent-downloads",
        }
    }

    /// Path components appended to the cache base directory.
    pub fn suffix(&self) -> &'static [&'static str] {
        match self {
            CacheCategory::Assets => &["Assets"],
            CacheCategory::Subtitles => &["Subtitles"],
            CacheCategory::MovieDownloads => &["Downloads", "Movies"],
            CacheCategory::ShowDownloads => &["Downloads", "Shows"],
            CacheCategory::DropFilesDownloads => &["Downloads", "Dropped"],
            CacheCategory::MovieTorrentDownloads => &["Torrents", "Movies"],
        }
    }
}

impl fmt::Display for CacheCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CacheCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| CoreError::Config(format!("unknown cache category: {s}")))
    }
}
