use log::debug;
use std::fs::{self, File};
use std::io::{BufWriter, Write};

use super::{CorpusLayout, DocumentKind};
use crate::common::{Document, DocumentRecord};
use crate::error::{CorpusError, CorpusResult};
use crate::extract::normalize_doi;

/// Persists fetched documents as one JSON file per record
#[derive(Debug, Clone)]
pub struct CorpusWriter {
    layout: CorpusLayout,
}

impl CorpusWriter {
    pub fn new(layout: CorpusLayout) -> Self {
        Self { layout }
    }

    /// Write every document of one journal collection, returning how many files were written.
    ///
    /// The target directory is created if needed. A record whose normalized DOI already
    /// exists replaces the previous file.
    pub fn write_documents<'a, I>(&self, journal: &str, kind: DocumentKind, documents: I) -> CorpusResult<usize>
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let dir = self.layout.kind_dir(journal, kind);
        fs::create_dir_all(&dir).map_err(|e| CorpusError::io(&dir, e))?;

        let mut written = 0;
        for document in documents {
            let id = normalize_doi(&document.doi);
            let path = self.layout.record_path(journal, kind, &id);

            let file = File::create(&path).map_err(|e| CorpusError::io(&path, e))?;
            let mut writer = BufWriter::new(file);
            let record = DocumentRecord {
                text: document.text.clone(),
            };
            serde_json::to_writer(&mut writer, &record).map_err(|e| CorpusError::io(&path, e.into()))?;
            writer.flush().map_err(|e| CorpusError::io(&path, e))?;
            written += 1;
        }

        debug!("Wrote {} {} records for {}", written, kind, journal);
        Ok(written)
    }
}
