use anyhow::{anyhow, Result};
use log::{debug, info};
use reqwest::Client;

use super::get_text;
use crate::common::Document;
use crate::extract::{parse_search_response, RecordExtractor, SearchHandle};

pub const EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// `efetch` caps a single page at 10,000 records
pub const MAX_FETCH_BATCH: usize = 10_000;

const PUBMED_DB: &str = "pubmed";

/// Publication-date window of a crawl, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: u16,
    pub max: u16,
}

/// PubMed search term for every article of a journal published within the year range
pub fn journal_search_term(journal: &str, years: YearRange) -> String {
    format!("{}[Journal] AND {}:{}[DP]", journal, years.min, years.max)
}

/// Client for the E-utilities `esearch`/`efetch` pair over the history server
#[derive(Debug, Clone)]
pub struct EutilsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl EutilsClient {
    pub fn new(client: Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn endpoint(&self, eutil: &str) -> String {
        format!("{}/{}", self.base_url, eutil)
    }

    fn with_api_key<'a>(&self, mut params: Vec<(&'a str, String)>) -> Vec<(&'a str, String)> {
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }
        params
    }

    /// Run a search and keep its result set on the history server
    pub async fn search(&self, term: &str) -> Result<SearchHandle> {
        let params = self.with_api_key(vec![
            ("db", PUBMED_DB.to_string()),
            ("term", term.to_string()),
            ("usehistory", "y".to_string()),
            ("retmax", "0".to_string()),
        ]);
        let xml = get_text(&self.client, &self.endpoint("esearch.fcgi"), &params).await?;
        parse_search_response(&xml)
            .ok_or_else(|| anyhow!("esearch response for '{}' has no QueryKey/WebEnv", term))
    }

    /// Fetch one page of abstracts from a stored result set
    pub async fn fetch_page(&self, handle: &SearchHandle, retstart: usize, retmax: usize) -> Result<String> {
        let params = self.with_api_key(vec![
            ("db", PUBMED_DB.to_string()),
            ("query_key", handle.query_key.clone()),
            ("WebEnv", handle.web_env.clone()),
            ("retstart", retstart.to_string()),
            ("retmax", retmax.to_string()),
            ("retmode", "xml".to_string()),
            ("rettype", "abstract".to_string()),
        ]);
        get_text(&self.client, &self.endpoint("efetch.fcgi"), &params).await
    }
}

/// Search a journal, page through every hit and extract its documents
pub async fn fetch_journal_abstracts<E: RecordExtractor>(
    eutils: &EutilsClient,
    extractor: &E,
    journal: &str,
    years: YearRange,
    batch_size: usize,
) -> Result<Vec<Document>> {
    let term = journal_search_term(journal, years);
    let handle = eutils.search(&term).await?;
    info!("[{}]: {} search hits", journal, handle.count);

    let batch_size = batch_size.clamp(1, MAX_FETCH_BATCH);
    let mut documents = Vec::new();
    let mut retstart = 0;
    while retstart < handle.count {
        let page = eutils.fetch_page(&handle, retstart, batch_size).await?;
        let extracted = extractor.extract(&page);
        debug!(
            "[{}]: retstart {} yielded {} documents",
            journal,
            retstart,
            extracted.len()
        );
        documents.extend(extracted);
        retstart += batch_size;
    }

    Ok(documents)
}
