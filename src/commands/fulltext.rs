use anyhow::{Context, Result};
use log::info;
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

use crate::cli::FulltextArgs;
use crate::common::{create_journal_progress_bar, format_elapsed, resolve_workers, setup_logging, FetchStats};
use crate::corpus::{CorpusLayout, CorpusWriter, JournalList};
use crate::fetch::{fetch_journal_fulltext, PubgetRunner, YearRange};

/// Run the fulltext command with the given arguments
pub fn run_fulltext(args: FulltextArgs) -> Result<FetchStats> {
    let start_time = Instant::now();

    setup_logging(&args.log_level)?;

    info!("Starting PMC full-text crawl");
    info!("Journal list: {}", args.journal_list);
    info!("Dataset directory: {}", args.dataset_dir);
    info!("Work directory: {}", args.work_dir);
    info!("Years: {}-{}", args.min_year, args.max_year);

    let journals = JournalList::load(Path::new(&args.journal_list))?;
    let years = YearRange {
        min: args.min_year,
        max: args.max_year,
    };

    let workers = resolve_workers(args.workers);
    info!("Using {} workers.", workers);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .context("Failed to build thread pool")?;

    let runner = PubgetRunner::new(&args.pubget, Path::new(&args.work_dir));
    let writer = CorpusWriter::new(CorpusLayout::new(&args.dataset_dir));
    let progress = create_journal_progress_bar(journals.len() as u64);

    let results: Vec<Result<usize>> = pool.install(|| {
        journals
            .journal_names
            .par_iter()
            .map(|journal| {
                let result = fetch_journal_fulltext(&runner, &writer, journal, years, args.keep_downloads);
                progress.set_message(journal.clone());
                progress.inc(1);
                result
            })
            .collect()
    });

    progress.finish_with_message("Full-text crawl complete");

    let mut stats = FetchStats::default();
    for result in results {
        stats.documents_written += result?;
        stats.journals_processed += 1;
    }

    info!("==================== FINAL SUMMARY ====================");
    info!("Total execution time: {}", format_elapsed(start_time.elapsed()));
    info!("Journals processed: {}", stats.journals_processed);
    info!("Fulltext records written: {}", stats.documents_written);
    info!("========================================================");

    Ok(stats)
}
