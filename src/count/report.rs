use std::fmt;

use crate::common::{CorpusTotals, JournalStats};
use crate::error::CorpusError;

/// A journal left out of the totals under skip-and-report
#[derive(Debug)]
pub struct JournalFailure {
    pub journal: String,
    pub error: CorpusError,
}

/// Result of one aggregation run; journals appear in journal-list order
#[derive(Debug)]
pub struct CorpusReport {
    pub journals: Vec<JournalStats>,
    pub failures: Vec<JournalFailure>,
    pub totals: CorpusTotals,
}

impl CorpusReport {
    pub fn zero_count_journals(&self) -> impl Iterator<Item = &JournalStats> {
        self.journals.iter().filter(|s| s.is_zero_count())
    }
}

impl fmt::Display for CorpusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stats in &self.journals {
            writeln!(f, "{}", stats)?;
        }
        writeln!(f, "Total abstracts: [{}]", self.totals.abstracts)?;
        writeln!(f, "Total fulltext: [{}]", self.totals.fulltext)?;
        writeln!(f, "Total tokens: [{}]", self.totals.tokens)?;
        for stats in self.zero_count_journals() {
            writeln!(
                f,
                "{}: abstracts [{}], fulltext [{}]",
                stats.journal, stats.abstract_count, stats.fulltext_count
            )?;
        }
        for failure in &self.failures {
            writeln!(f, "FAILED {}: {}", failure.journal, failure.error)?;
        }
        Ok(())
    }
}
