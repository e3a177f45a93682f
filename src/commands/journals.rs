use anyhow::{bail, Context, Result};
use log::info;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::cli::JournalsArgs;
use crate::common::{create_spinner, format_elapsed, setup_logging};
use crate::corpus::JournalList;
use crate::fetch::{create_http_client, fetch_journal_names, BROWSER_USER_AGENT};

pub async fn run_journals_async(args: JournalsArgs) -> Result<JournalList> {
    let start_time = Instant::now();

    setup_logging(&args.log_level)?;

    info!("Starting journal discovery");
    info!("Ranking page: {}", args.url);
    info!("Output: {}", args.output);

    let client = create_http_client(Duration::from_secs(args.timeout), BROWSER_USER_AGENT)
        .context("Failed to create HTTP client")?;
    let spinner = create_spinner("Downloading ranking page...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    let names = fetch_journal_names(&client, &args.url).await;
    spinner.finish_and_clear();
    let names = names?;
    if names.is_empty() {
        bail!("No journal links found on {}", args.url);
    }

    let list = JournalList::new(names);
    list.save(Path::new(&args.output))?;

    info!("Saved {} journal names to {} in {}", list.len(), args.output, format_elapsed(start_time.elapsed()));
    Ok(list)
}

/// Run the journals command with the given arguments
pub fn run_journals(args: JournalsArgs) -> Result<JournalList> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_journals_async(args))
}
