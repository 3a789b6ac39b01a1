use crate::cache::{CacheManager, CachePaths, ClearReport};
use crate::error::{format_error_chain, CoreResult};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownPolicy {
    /// Empty downloads and subtitles when the session ends. Assets are kept.
    ClearOnExit,
    Keep,
}

impl ShutdownPolicy {
    pub fn from_clear_on_exit(clear_on_exit: bool) -> Self {
        if clear_on_exit {
            ShutdownPolicy::ClearOnExit
        } else {
            ShutdownPolicy::Keep
        }
    }
}

/// Full clear, assets included, followed by recreating the folders. A folder
/// that cannot be recreated is logged; the clear itself never fails.
pub fn clear_all(manager: &CacheManager) -> ClearReport {
    let report = manager.clear_folders(true);
    if let Err(err) = manager.ensure_folders_exist() {
        warn!(error = %format_error_chain(&err), "cache folders missing after clear");
    }
    report
}

/// The cache as seen by a running application: folders exist for as long as
/// the session is alive and are cleared when it ends.
#[derive(Debug)]
pub struct CacheSession {
    manager: Arc<CacheManager>,
    policy: ShutdownPolicy,
    closed: bool,
}

impl CacheSession {
    /// Creates the cache folders before any writer gets a handle.
    pub fn start(manager: Arc<CacheManager>, policy: ShutdownPolicy) -> CoreResult<Self> {
        manager.ensure_folders_exist()?;
        info!(base = %manager.root().base_dir().display(), ?policy, "cache session started");
        Ok(Self {
            manager,
            policy,
            closed: false,
        })
    }

    pub fn manager(&self) -> &Arc<CacheManager> {
        &self.manager
    }

    pub fn paths(&self) -> Arc<dyn CachePaths> {
        self.manager.clone()
    }

    /// User-triggered full clear, assets included. Folders are recreated
    /// afterwards so writers can keep running.
    pub fn clear_cache(&self) -> ClearReport {
        clear_all(&self.manager)
    }

    pub fn shutdown(mut self) -> Option<ClearReport> {
        self.close()
    }

    fn close(&mut self) -> Option<ClearReport> {
        if self.closed {
            return None;
        }
        self.closed = true;
        match self.policy {
            ShutdownPolicy::ClearOnExit => Some(self.manager.clear_folders(false)),
            ShutdownPolicy::Keep => None,
        }
    }
}

impl Drop for CacheSession {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheCategory, CacheRoot};
    use std::fs;

    fn session(policy: ShutdownPolicy) -> (tempfile::TempDir, CacheSession) {
        let dir = tempfile::tempdir().unwrap();
        let manager = CacheManager::new(CacheRoot::new(dir.path()).unwrap());
        let session = CacheSession::start(Arc::new(manager), policy).unwrap();
        (dir, session)
    }

    fn seed(session: &CacheSession) {
        for category in CacheCategory::ALL {
            fs::write(session.manager().path(category).join("item"), b"x").unwrap();
        }
    }

    #[test]
    fn start_creates_folders_for_collaborators() {
        let (_dir, session) = session(ShutdownPolicy::Keep);
        let paths = session.paths();
        for category in CacheCategory::ALL {
            assert!(paths.path(category).is_dir());
        }
    }

    #[test]
    fn shutdown_clears_everything_but_assets() {
        let (_dir, session) = session(ShutdownPolicy::ClearOnExit);
        seed(&session);
        let manager = session.manager().clone();

        let report = session.shutdown().expect("clear on exit");
        assert_eq!(report.files_removed(), 5);
        assert!(report.folder(CacheCategory::Assets).is_none());
        assert!(manager.path(CacheCategory::Assets).join("item").exists());
    }

    #[test]
    fn keep_policy_leaves_files() {
        let (_dir, session) = session(ShutdownPolicy::Keep);
        seed(&session);
        let manager = session.manager().clone();
        assert!(session.shutdown().is_none());
        assert_eq!(manager.usage().total_bytes, 6);
    }

    #[test]
    fn drop_runs_shutdown_clear() {
        let (_dir, session) = session(ShutdownPolicy::ClearOnExit);
        seed(&session);
        let manager = session.manager().clone();
        drop(session);
        assert_eq!(manager.usage().total_bytes, 1);
    }

    #[test]
    fn clear_all_survives_a_blocked_folder() {
        let dir = tempfile::tempdir().unwrap();
        let manager = CacheManager::new(CacheRoot::new(dir.path()).unwrap());
        fs::create_dir_all(manager.path(CacheCategory::Assets)).unwrap();
        fs::write(manager.path(CacheCategory::Assets).join("logo.png"), b"png").unwrap();
        fs::write(dir.path().join("Downloads"), b"not a dir").unwrap();

        let report = clear_all(&manager);
        assert_eq!(report.files_removed(), 1);
        assert!(report.is_clean());
        assert!(!manager.path(CacheCategory::Assets).join("logo.png").exists());
        assert!(manager.path(CacheCategory::Subtitles).is_dir());
    }

    #[test]
    fn clear_cache_includes_assets_and_keeps_folders() {
        let (_dir, session) = session(ShutdownPolicy::Keep);
        seed(&session);
        let report = session.clear_cache();
        assert_eq!(report.files_removed(), 6);
        assert!(report.is_clean());
        for category in CacheCategory::ALL {
            assert!(session.manager().path(category).is_dir());
        }
    }
}
