use serde::{Deserialize, Serialize};
use std::fmt;

/// A document pulled from a source, keyed by its raw (not yet normalized) DOI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub doi: String,
    pub text: String,
}

impl Document {
    pub fn new(doi: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            doi: doi.into(),
            text: text.into(),
        }
    }
}

/// On-disk body of a single corpus record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub text: String,
}

/// Counts for one journal from a single aggregation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalStats {
    pub journal: String,
    pub abstract_count: usize,
    pub fulltext_count: usize,
    pub token_count: usize,
}

impl JournalStats {
    /// Either collection is empty, which usually means a crawl failed or was skipped
    pub fn is_zero_count(&self) -> bool {
        self.abstract_count == 0 || self.fulltext_count == 0
    }
}

impl fmt::Display for JournalStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]: abstracts [{}], fulltext [{}], tokens [{}]",
            self.journal, self.abstract_count, self.fulltext_count, self.token_count
        )
    }
}

/// Corpus-wide totals folded from per-journal stats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusTotals {
    pub abstracts: usize,
    pub fulltext: usize,
    pub tokens: usize,
}

impl CorpusTotals {
    pub fn plus(self, stats: &JournalStats) -> Self {
        Self {
            abstracts: self.abstracts + stats.abstract_count,
            fulltext: self.fulltext + stats.fulltext_count,
            tokens: self.tokens + stats.token_count,
        }
    }

    pub fn from_stats<'a, I>(stats: I) -> Self
    where
        I: IntoIterator<Item = &'a JournalStats>,
    {
        stats.into_iter().fold(Self::default(), Self::plus)
    }
}

/// Statistics from an abstract or full-text crawl
#[derive(Debug, Clone, Default)]
pub struct FetchStats {
    pub journals_processed: usize,
    pub documents_written: usize,
}
