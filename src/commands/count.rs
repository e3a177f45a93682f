use anyhow::{bail, Result};
use log::{info, warn};
use std::path::Path;
use std::time::Instant;

use crate::cli::CountArgs;
use crate::common::{format_elapsed, resolve_workers, setup_logging};
use crate::corpus::{CorpusLayout, JournalList};
use crate::count::{count_corpus, load_token_counter, CorpusReport, CountOptions, FailurePolicy};

/// Run the count command and print the report to stdout
pub fn run_count(args: CountArgs) -> Result<CorpusReport> {
    let start_time = Instant::now();

    setup_logging(&args.log_level)?;

    let journals = JournalList::load(Path::new(&args.journal_list))?;
    let options = CountOptions {
        workers: resolve_workers(args.workers),
        count_tokens: args.count_tokens,
        failure_policy: if args.keep_going {
            FailurePolicy::SkipAndReport
        } else {
            FailurePolicy::FailFast
        },
    };

    info!("Counting corpus under {}", args.dataset_dir);
    info!("Journals: {}", journals.len());
    if journals.is_empty() {
        warn!("Journal list {} is empty; the report will only contain zero totals", args.journal_list);
    }
    if options.count_tokens {
        info!("Tokenizer: {}", args.tokenizer);
    }

    let layout = CorpusLayout::new(&args.dataset_dir);
    let tokenizer = args.tokenizer.as_str();
    let report = count_corpus(&layout, &journals.journal_names, &options, || load_token_counter(tokenizer))?;

    print!("{}", report);
    info!("Count complete in {}", format_elapsed(start_time.elapsed()));

    if !report.failures.is_empty() {
        bail!("{} journals failed", report.failures.len());
    }
    Ok(report)
}
