use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use log::info;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::cli::AbstractsArgs;
use crate::common::{create_journal_progress_bar, format_elapsed, setup_logging, FetchStats};
use crate::corpus::{CorpusLayout, CorpusWriter, DocumentKind, JournalList};
use crate::extract::PubmedXmlExtractor;
use crate::fetch::{create_http_client, fetch_journal_abstracts, EutilsClient, YearRange};

const EUTILS_USER_AGENT: &str = concat!("pubmed-corpus/", env!("CARGO_PKG_VERSION"));

async fn crawl_journal(
    eutils: &EutilsClient,
    writer: &CorpusWriter,
    journal: &str,
    years: YearRange,
    batch_size: usize,
) -> Result<usize> {
    let documents = fetch_journal_abstracts(eutils, &PubmedXmlExtractor, journal, years, batch_size)
        .await
        .with_context(|| format!("Failed to fetch abstracts for {}", journal))?;
    let written = writer
        .write_documents(journal, DocumentKind::Abstracts, &documents)
        .with_context(|| format!("Failed to write abstracts for {}", journal))?;
    info!("[{}]: wrote {} abstract records", journal, written);
    Ok(written)
}

pub async fn run_abstracts_async(args: AbstractsArgs) -> Result<FetchStats> {
    let start_time = Instant::now();

    setup_logging(&args.log_level)?;

    info!("Starting PubMed abstract crawl");
    info!("Journal list: {}", args.journal_list);
    info!("Dataset directory: {}", args.dataset_dir);
    info!("Years: {}-{}", args.min_year, args.max_year);
    info!("Concurrency: {}", args.concurrency);

    let journals = JournalList::load(Path::new(&args.journal_list))?;
    let years = YearRange {
        min: args.min_year,
        max: args.max_year,
    };

    let client = create_http_client(Duration::from_secs(args.timeout), EUTILS_USER_AGENT)
        .context("Failed to create HTTP client")?;
    let eutils = EutilsClient::new(client, &args.base_url, args.api_key.clone());
    let writer = CorpusWriter::new(CorpusLayout::new(&args.dataset_dir));
    let progress = create_journal_progress_bar(journals.len() as u64);
    let batch_size = args.batch_size;

    let results: Vec<Result<usize>> = stream::iter(journals.journal_names.iter())
        .map(|journal| {
            let eutils = &eutils;
            let writer = &writer;
            let progress = &progress;
            async move {
                let result = crawl_journal(eutils, writer, journal, years, batch_size).await;
                progress.set_message(journal.clone());
                progress.inc(1);
                result
            }
        })
        .buffered(args.concurrency.max(1))
        .collect()
        .await;

    progress.finish_with_message("Abstract crawl complete");

    let mut stats = FetchStats::default();
    for result in results {
        stats.documents_written += result?;
        stats.journals_processed += 1;
    }

    info!("==================== FINAL SUMMARY ====================");
    info!("Total execution time: {}", format_elapsed(start_time.elapsed()));
    info!("Journals processed: {}", stats.journals_processed);
    info!("Abstract records written: {}", stats.documents_written);
    info!("========================================================");

    Ok(stats)
}

/// Run the abstracts command with the given arguments
pub fn run_abstracts(args: AbstractsArgs) -> Result<FetchStats> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_abstracts_async(args))
}
