use crate::error::{Result, SearchError};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// An enumerable source of `(doc id, raw text)` pairs. Format extraction
/// (PDF conversion, upload handling) happens upstream of this trait.
pub trait DocumentSource {
    fn documents(&self) -> Result<Vec<(String, String)>>;
}

/// Recursively reads `*.txt` files under a root directory, in sorted path
/// order. Doc ids are paths relative to the root.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl DocumentSource for DirSource {
    fn documents(&self) -> Result<Vec<(String, String)>> {
        if !self.root.is_dir() {
            return Err(SearchError::SourceNotFound {
                path: self.root.clone(),
            });
        }
        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path().is_file()
                    && e.path().extension().and_then(|s| s.to_str()) == Some("txt")
            })
            .map(|e| e.path().to_path_buf())
            .collect();
        files.sort();

        let mut docs = Vec::with_capacity(files.len());
        for path in files {
            let raw = fs::read(&path)?;
            let text = String::from_utf8_lossy(&raw).into_owned();
            let id = path
                .strip_prefix(&self.root)
                .unwrap_or(&path)
                .to_string_lossy()
                .into_owned();
            docs.push((id, text));
        }
        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_root_is_source_not_found() {
        let src = DirSource::new("/definitely/not/a/real/dir");
        match src.documents() {
            Err(SearchError::SourceNotFound { .. }) => {}
            other => panic!("expected SourceNotFound, got {other:?}"),
        }
    }

    #[test]
    fn walks_txt_files_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.txt"), "beta").unwrap();
        fs::write(dir.path().join("a.txt"), "alpha").unwrap();
        fs::write(dir.path().join("sub/c.txt"), "gamma").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let docs = DirSource::new(dir.path()).documents().unwrap();
        let ids: Vec<&str> = docs.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["a.txt", "b.txt", "sub/c.txt"]);
        assert_eq!(docs[0].1, "alpha");
    }
}
