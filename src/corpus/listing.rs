use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::DocumentRecord;
use crate::error::{CorpusError, CorpusResult};

const RECORD_EXTENSION: &str = ".json";

/// Identifier of a record file: its name without the `.json` suffix
fn identifier_from_file_name(name: &str) -> &str {
    name.strip_suffix(RECORD_EXTENSION).unwrap_or(name)
}

/// The identifiers found in one collection directory, each mapped to its file name
#[derive(Debug, Clone)]
pub struct Listing {
    dir: PathBuf,
    entries: BTreeMap<String, String>,
}

impl Listing {
    /// Build a listing from directory entry names.
    ///
    /// Two names mapping to the same identifier fail with `DuplicateIdentifier`
    /// instead of being merged, so a broken crawl cannot produce a silent undercount.
    pub fn from_names<I>(dir: &Path, names: I) -> CorpusResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut entries = BTreeMap::new();
        for name in names {
            let id = identifier_from_file_name(&name).to_string();
            if entries.contains_key(&id) {
                return Err(CorpusError::DuplicateIdentifier {
                    dir: dir.to_path_buf(),
                    identifier: id,
                });
            }
            entries.insert(id, name);
        }
        Ok(Self {
            dir: dir.to_path_buf(),
            entries,
        })
    }

    /// List a collection directory. A missing directory is an I/O error and a
    /// file name that is not UTF-8 cannot be an identifier.
    pub fn read_dir(dir: &Path) -> CorpusResult<Self> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| CorpusError::io(dir, e))? {
            let entry = entry.map_err(|e| CorpusError::io(dir, e))?;
            let name = entry.file_name().into_string().map_err(|name| CorpusError::NonUtf8FileName {
                dir: dir.to_path_buf(),
                name,
            })?;
            names.push(name);
        }
        Self::from_names(dir, names)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Identifiers in sorted order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn path(&self, id: &str) -> Option<PathBuf> {
        self.entries.get(id).map(|name| self.dir.join(name))
    }
}

/// Load a single record; a missing or non-string `text` field is a malformed record
pub fn read_record(path: &Path) -> CorpusResult<DocumentRecord> {
    let content = fs::read_to_string(path).map_err(|e| CorpusError::io(path, e))?;
    serde_json::from_str(&content).map_err(|source| CorpusError::MalformedRecord {
        path: path.to_path_buf(),
        source,
    })
}
