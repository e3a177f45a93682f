use std::fmt;
use std::path::{Path, PathBuf};

use crate::extract::NormalizedDoi;

/// Which collection of a journal a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Abstracts,
    Fulltext,
}

impl DocumentKind {
    pub fn dir_name(&self) -> &'static str {
        match self {
            DocumentKind::Abstracts => "abstracts",
            DocumentKind::Fulltext => "fulltext",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Directory layout of the on-disk corpus: `{root}/{journal}/{kind}/{id}.json`
#[derive(Debug, Clone)]
pub struct CorpusLayout {
    root: PathBuf,
}

impl CorpusLayout {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn journal_dir(&self, journal: &str) -> PathBuf {
        self.root.join(journal)
    }

    pub fn kind_dir(&self, journal: &str, kind: DocumentKind) -> PathBuf {
        self.journal_dir(journal).join(kind.dir_name())
    }

    pub fn record_path(&self, journal: &str, kind: DocumentKind, id: &NormalizedDoi) -> PathBuf {
        self.kind_dir(journal, kind).join(id.file_name())
    }
}
