//! Local on-disk cache: category layout, measurement and cleanup.

mod category;
pub mod fsops;
mod manager;
mod report;
mod root;

pub use category::CacheCategory;
pub use manager::CacheManager;
pub use report::{CacheUsage, CategoryUsage, ClearReport, FailureKind, FolderReport, ItemFailure};
pub use root::{CachePaths, CacheRoot};
