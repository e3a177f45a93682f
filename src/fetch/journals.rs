use anyhow::Result;
use log::info;
use reqwest::Client;

use super::get_text;
use crate::extract::extract_journal_names;

pub const DEFAULT_RANKING_URL: &str = "https://research.com/journals-rankings/neuroscience";

/// Download a ranking page and extract the journal names it links to
pub async fn fetch_journal_names(client: &Client, url: &str) -> Result<Vec<String>> {
    info!("Fetching journal ranking page: {}", url);
    let html = get_text(client, url, &[]).await?;
    let names = extract_journal_names(&html);
    info!("Found {} journal names", names.len());
    Ok(names)
}
