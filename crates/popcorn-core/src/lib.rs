pub mod cache;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod logging;

pub use cache::{CacheCategory, CacheManager, CachePaths, CacheRoot, CacheUsage, ClearReport};
pub use config::{CacheConfig, CoreConfig, LoggingConfig};
pub use error::{CoreError, CoreResult};
pub use lifecycle::{clear_all, CacheSession, ShutdownPolicy};
