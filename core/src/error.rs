use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("document source not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("no index snapshot at {path}; build one first")]
    IndexNotFound { path: PathBuf },

    #[error("unsupported snapshot version {found} (expected {expected})")]
    SnapshotVersion { found: u32, expected: u32 },

    #[error("cache backend unavailable: {0}")]
    CacheUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding error: {0}")]
    Encode(#[from] bincode::Error),

    #[error("metadata encoding error: {0}")]
    Json(#[from] serde_json::Error),
}
