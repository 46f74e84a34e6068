use crate::error::{Result, SearchError};
use crate::index::Index;
use serde::{Deserialize, Serialize};
use std::fs::{self, create_dir_all};
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    created_at: &'a str,
    index: &'a Index,
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    created_at: String,
    index: Index,
}

/// Human-readable sidecar summary. Diagnostic only; the snapshot is
/// authoritative.
#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub version: u32,
    pub created_at: String,
    pub num_docs: usize,
    pub avg_doc_len: f64,
    pub terms: usize,
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
    fn snapshot(&self) -> PathBuf {
        self.root.join("index.bin")
    }
    fn meta(&self) -> PathBuf {
        self.root.join("meta.json")
    }
}

/// Write the index as a versioned snapshot plus a `meta.json` summary.
/// Returns the snapshot path.
pub fn save_index(paths: &IndexPaths, index: &Index) -> Result<PathBuf> {
    create_dir_all(&paths.root)?;
    let created_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    let snap = SnapshotRef {
        version: SNAPSHOT_VERSION,
        created_at: &created_at,
        index,
    };
    let out = paths.snapshot();
    fs::write(&out, bincode::serialize(&snap)?)?;

    let meta = MetaFile {
        version: SNAPSHOT_VERSION,
        created_at,
        num_docs: index.num_docs,
        avg_doc_len: index.avg_doc_len,
        terms: index.num_terms(),
    };
    fs::write(paths.meta(), serde_json::to_string_pretty(&meta)?)?;
    Ok(out)
}

/// Load a snapshot back into memory. Fails with `IndexNotFound` when no
/// snapshot exists at the expected location.
pub fn load_index(paths: &IndexPaths) -> Result<Index> {
    let path = paths.snapshot();
    if !path.exists() {
        return Err(SearchError::IndexNotFound { path });
    }
    let buf = fs::read(&path)?;
    let snap: Snapshot = bincode::deserialize(&buf)?;
    if snap.version != SNAPSHOT_VERSION {
        return Err(SearchError::SnapshotVersion {
            found: snap.version,
            expected: SNAPSHOT_VERSION,
        });
    }
    tracing::debug!(created_at = %snap.created_at, "loaded index snapshot");
    Ok(snap.index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_snapshot_is_index_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let paths = IndexPaths::new(dir.path());
        match load_index(&paths) {
            Err(SearchError::IndexNotFound { .. }) => {}
            other => panic!("expected IndexNotFound, got {other:?}"),
        }
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let paths = IndexPaths::new(dir.path());
        let snap = Snapshot {
            version: SNAPSHOT_VERSION + 1,
            created_at: String::new(),
            index: Index::new(),
        };
        fs::write(paths.snapshot(), bincode::serialize(&snap).unwrap()).unwrap();
        match load_index(&paths) {
            Err(SearchError::SnapshotVersion { found, .. }) => {
                assert_eq!(found, SNAPSHOT_VERSION + 1)
            }
            other => panic!("expected SnapshotVersion, got {other:?}"),
        }
    }
}
