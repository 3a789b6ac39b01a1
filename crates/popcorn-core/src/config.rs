use crate::error::CoreResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides every other source of the cache base directory.
pub const CACHE_DIR_ENV: &str = "POPCORN_CACHE_DIR";

const APP_DIR_NAME: &str = "Popcorn";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CoreConfig {
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub root_dir: Option<PathBuf>,
    /// Empty the download and subtitle folders when the session ends.
    pub clear_on_exit: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root_dir: None,
            clear_on_exit: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub directory: Option<PathBuf>,
}

impl CoreConfig {
    pub fn load(path: &Path) -> CoreResult<Self> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Loads `path` when given and present, otherwise falls back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> CoreResult<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }
}

impl CacheConfig {
    /// Base directory of the cache: environment override, configured
    /// directory, platform cache directory, then the temp directory.
    pub fn resolve_root(&self) -> PathBuf {
        let from_env = std::env::var_os(CACHE_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        self.resolve_root_with(from_env)
    }

    fn resolve_root_with(&self, from_env: Option<PathBuf>) -> PathBuf {
        from_env
            .or_else(|| self.root_dir.clone())
            .or_else(|| dirs::cache_dir().map(|dir| dir.join(APP_DIR_NAME)))
            .unwrap_or_else(|| std::env::temp_dir().join(APP_DIR_NAME))
    }
}
