use log::{debug, info, warn};
use rayon::prelude::*;

use super::{CorpusReport, JournalFailure, TokenCounter};
use crate::common::{create_journal_progress_bar, CorpusTotals, JournalStats};
use crate::corpus::{read_record, CorpusLayout, DocumentKind, Listing};
use crate::error::CorpusResult;

/// What to do when one journal's work unit fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the whole run with the first failure in journal-list order
    #[default]
    FailFast,
    /// Leave the journal out of the totals and list it in the report
    SkipAndReport,
}

#[derive(Debug, Clone)]
pub struct CountOptions {
    pub workers: usize,
    pub count_tokens: bool,
    pub failure_policy: FailurePolicy,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            workers: 1,
            count_tokens: false,
            failure_policy: FailurePolicy::FailFast,
        }
    }
}

fn count_record_tokens(listing: &Listing, id: &str, counter: &dyn TokenCounter) -> CorpusResult<usize> {
    match listing.path(id) {
        Some(path) => {
            let record = read_record(&path)?;
            counter.count_tokens(&record.text)
        }
        None => Ok(0),
    }
}

/// Count one journal's abstracts, full texts and (with a counter) tokens.
///
/// Full-text records already contain their abstract, so an abstract whose identifier also
/// has a full-text record contributes no tokens of its own.
pub fn count_journal(
    layout: &CorpusLayout,
    journal: &str,
    counter: Option<&dyn TokenCounter>,
) -> CorpusResult<JournalStats> {
    let abstracts = Listing::read_dir(&layout.kind_dir(journal, DocumentKind::Abstracts))?;
    let fulltext = Listing::read_dir(&layout.kind_dir(journal, DocumentKind::Fulltext))?;

    let mut token_count = 0;
    if let Some(counter) = counter {
        for id in fulltext.identifiers() {
            token_count += count_record_tokens(&fulltext, id, counter)?;
        }
        for id in abstracts.identifiers().filter(|id| !fulltext.contains(id)) {
            token_count += count_record_tokens(&abstracts, id, counter)?;
        }
    }

    let stats = JournalStats {
        journal: journal.to_string(),
        abstract_count: abstracts.len(),
        fulltext_count: fulltext.len(),
        token_count,
    };
    debug!("{}", stats);
    Ok(stats)
}

/// Fold per-journal results, in journal-list order, into a report
pub fn reduce_results(
    results: Vec<(String, CorpusResult<JournalStats>)>,
    policy: FailurePolicy,
) -> CorpusResult<CorpusReport> {
    let mut journals = Vec::with_capacity(results.len());
    let mut failures = Vec::new();

    for (journal, result) in results {
        match (result, policy) {
            (Ok(stats), _) => journals.push(stats),
            (Err(e), FailurePolicy::FailFast) => return Err(e),
            (Err(error), FailurePolicy::SkipAndReport) => {
                warn!("Skipping {}: {}", journal, error);
                failures.push(JournalFailure { journal, error });
            }
        }
    }

    let totals = CorpusTotals::from_stats(&journals);
    Ok(CorpusReport {
        journals,
        failures,
        totals,
    })
}

/// Count every journal on a bounded worker pool and reduce the results into a report.
///
/// Each journal is an independent task; `make_counter` is called once per task when token
/// counting is on, so no tokenizer state is shared between journals. Results are collected
/// in journal-list order regardless of completion order.
pub fn count_corpus<F>(
    layout: &CorpusLayout,
    journals: &[String],
    options: &CountOptions,
    make_counter: F,
) -> CorpusResult<CorpusReport>
where
    F: Fn() -> CorpusResult<Box<dyn TokenCounter>> + Sync,
{
    let workers = options.workers.max(1);
    info!("Counting {} journals with {} workers", journals.len(), workers);

    let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build()?;
    let progress = create_journal_progress_bar(journals.len() as u64);

    let results: Vec<(String, CorpusResult<JournalStats>)> = pool.install(|| {
        journals
            .par_iter()
            .map(|journal| {
                let result = if options.count_tokens {
                    make_counter().and_then(|counter| count_journal(layout, journal, Some(&*counter)))
                } else {
                    count_journal(layout, journal, None)
                };
                progress.set_message(journal.clone());
                progress.inc(1);
                (journal.clone(), result)
            })
            .collect()
    });

    progress.finish_and_clear();
    reduce_results(results, options.failure_policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::count::tokenize::write_word_level_tokenizer;
    use crate::count::{HfTokenCounter, WhitespaceTokenCounter};
    use crate::error::{CorpusError, ErrorKind};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn whitespace() -> CorpusResult<Box<dyn TokenCounter>> {
        Ok(Box::new(WhitespaceTokenCounter))
    }

    fn write_record(root: &Path, journal: &str, kind: &str, id: &str, text: &str) {
        let dir = root.join(journal).join(kind);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(format!("{}.json", id)),
            serde_json::json!({ "text": text }).to_string(),
        )
        .unwrap();
    }

    fn empty_journal(root: &Path, journal: &str) {
        fs::create_dir_all(root.join(journal).join("abstracts")).unwrap();
        fs::create_dir_all(root.join(journal).join("fulltext")).unwrap();
    }

    fn token_options(workers: usize) -> CountOptions {
        CountOptions {
            workers,
            count_tokens: true,
            failure_policy: FailurePolicy::FailFast,
        }
    }

    #[test]
    fn test_disjoint_sets_sum_both() {
        let dir = tempdir().unwrap();
        write_record(dir.path(), "J", "abstracts", "a1", "one two");
        write_record(dir.path(), "J", "abstracts", "a2", "three");
        write_record(dir.path(), "J", "fulltext", "f1", "four five six");

        let layout = CorpusLayout::new(dir.path());
        let stats = count_journal(&layout, "J", Some(&WhitespaceTokenCounter)).unwrap();
        assert_eq!(stats.abstract_count, 2);
        assert_eq!(stats.fulltext_count, 1);
        assert_eq!(stats.token_count, 2 + 1 + 3);
    }

    #[test]
    fn test_overlap_counts_fulltext_copy_only() {
        let dir = tempdir().unwrap();
        write_record(dir.path(), "J", "abstracts", "x", "short abstract");
        write_record(dir.path(), "J", "abstracts", "y", "another short abstract");
        write_record(dir.path(), "J", "fulltext", "x", "short abstract and a body");
        write_record(dir.path(), "J", "fulltext", "y", "another short abstract body");

        let layout = CorpusLayout::new(dir.path());
        let stats = count_journal(&layout, "J", Some(&WhitespaceTokenCounter)).unwrap();
        assert_eq!(stats.abstract_count, 2);
        assert_eq!(stats.fulltext_count, 2);
        assert_eq!(stats.token_count, 5 + 4);
    }

    #[test]
    fn test_model_tokenizer_counts() {
        let dir = tempdir().unwrap();
        write_record(dir.path(), "J", "abstracts", "x", "brain cells");
        write_record(dir.path(), "J", "abstracts", "y", "neurons fire.");
        write_record(dir.path(), "J", "fulltext", "x", "brain cells and synapses");

        let tokenizer_path = dir.path().join("tokenizer.json");
        write_word_level_tokenizer(&tokenizer_path, &["brain", "cells", "neurons", "fire"]);
        let counter = HfTokenCounter::from_file(&tokenizer_path).unwrap();

        let stats = count_journal(&CorpusLayout::new(dir.path()), "J", Some(&counter)).unwrap();
        assert_eq!((stats.abstract_count, stats.fulltext_count), (2, 1));
        // fulltext x: 4 tokens; abstract y: "neurons", "fire", "."
        assert_eq!(stats.token_count, 4 + 3);
    }

    #[test]
    fn test_tokens_off_reads_no_records() {
        let dir = tempdir().unwrap();
        write_record(dir.path(), "J", "fulltext", "x", "a b c");
        fs::create_dir_all(dir.path().join("J/abstracts")).unwrap();
        // Not a valid record; only listed, never parsed
        fs::write(dir.path().join("J/abstracts/broken.json"), "{").unwrap();

        let stats = count_journal(&CorpusLayout::new(dir.path()), "J", None).unwrap();
        assert_eq!((stats.abstract_count, stats.fulltext_count, stats.token_count), (1, 1, 0));
    }

    #[test]
    fn test_malformed_record_fails_when_counting_tokens() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("J/fulltext")).unwrap();
        write_record(dir.path(), "J", "abstracts", "ok", "fine");
        fs::write(dir.path().join("J/abstracts/bad.json"), r#"{"body":"x"}"#).unwrap();

        let err = count_journal(&CorpusLayout::new(dir.path()), "J", Some(&WhitespaceTokenCounter)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedRecord);
    }

    #[test]
    fn test_empty_journal_is_zero_count() {
        let dir = tempdir().unwrap();
        empty_journal(dir.path(), "B");
        let layout = CorpusLayout::new(dir.path());

        let report = count_corpus(&layout, &["B".to_string()], &token_options(2), whitespace).unwrap();
        let stats = &report.journals[0];
        assert_eq!((stats.abstract_count, stats.fulltext_count, stats.token_count), (0, 0, 0));
        assert_eq!(report.zero_count_journals().count(), 1);
    }

    #[test]
    fn test_totals_independent_of_worker_count() {
        let dir = tempdir().unwrap();
        let mut journals = Vec::new();
        for j in 0..12 {
            let name = format!("Journal {}", j);
            empty_journal(dir.path(), &name);
            for d in 0..j {
                write_record(dir.path(), &name, "abstracts", &format!("d{}", d), "alpha beta");
                if d % 2 == 0 {
                    write_record(dir.path(), &name, "fulltext", &format!("d{}", d), "alpha beta gamma");
                }
            }
            journals.push(name);
        }
        let layout = CorpusLayout::new(dir.path());

        let single = count_corpus(&layout, &journals, &token_options(1), whitespace).unwrap();
        let many = count_corpus(&layout, &journals, &token_options(8), whitespace).unwrap();

        assert_eq!(single.totals, many.totals);
        assert_eq!(single.journals, many.journals);
        let names: Vec<&str> = many.journals.iter().map(|s| s.journal.as_str()).collect();
        assert_eq!(names, journals.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_missing_directory_fails_fast() {
        let dir = tempdir().unwrap();
        empty_journal(dir.path(), "Present");
        let layout = CorpusLayout::new(dir.path());
        let journals = vec!["Present".to_string(), "Missing".to_string()];

        let err = count_corpus(&layout, &journals, &CountOptions::default(), whitespace).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_skip_and_report_keeps_other_journals() {
        let dir = tempdir().unwrap();
        write_record(dir.path(), "Good", "abstracts", "a", "x y");
        write_record(dir.path(), "Good", "fulltext", "b", "z");
        let layout = CorpusLayout::new(dir.path());
        let journals = vec!["Missing".to_string(), "Good".to_string()];
        let options = CountOptions {
            workers: 2,
            count_tokens: true,
            failure_policy: FailurePolicy::SkipAndReport,
        };

        let report = count_corpus(&layout, &journals, &options, whitespace).unwrap();
        assert_eq!(report.journals.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].journal, "Missing");
        assert_eq!(report.totals, CorpusTotals { abstracts: 1, fulltext: 1, tokens: 3 });
    }

    #[test]
    fn test_reduce_reports_first_failure_in_list_order() {
        let results = vec![
            ("A".to_string(), Ok(JournalStats::default())),
            (
                "B".to_string(),
                Err(CorpusError::DuplicateIdentifier {
                    dir: "B/abstracts".into(),
                    identifier: "x".to_string(),
                }),
            ),
            ("C".to_string(), Err(CorpusError::Tokenizer("boom".to_string()))),
        ];
        let err = reduce_results(results, FailurePolicy::FailFast).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);
    }

    #[test]
    fn test_counter_built_once_per_journal() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let dir = tempdir().unwrap();
        for name in ["A", "B", "C"] {
            write_record(dir.path(), name, "abstracts", "a", "x");
            write_record(dir.path(), name, "fulltext", "b", "y");
        }
        let layout = CorpusLayout::new(dir.path());
        let journals: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        let built = AtomicUsize::new(0);

        count_corpus(&layout, &journals, &token_options(3), || {
            built.fetch_add(1, Ordering::SeqCst);
            whitespace()
        })
        .unwrap();
        assert_eq!(built.load(Ordering::SeqCst), 3);
    }
}
