use std::error::Error;
use std::path::PathBuf;
use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
    /// A cache directory could not be created.
    #[error("failed to create directory {}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid cache entry name: {0:?}")]
    InvalidName(String),
}

/// Formats an error together with every `source` in its chain.
///
/// ```
/// use popcorn_core::error::format_error_chain;
///
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
/// assert_eq!(format_error_chain(&err), "disk full");
/// ```
pub fn format_error_chain<E: Error + ?Sized>(error: &E) -> String {
    let mut chain = vec![error.to_string()];
    let mut source = error.source();

    while let Some(err) = source {
        chain.push(format!("caused by: {}", err));
        source = err.source();
    }

    chain.join(": ")
}
