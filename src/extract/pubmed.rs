use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use super::clean_doi;
use crate::common::Document;

lazy_static! {
    /// Cited works carry their own ArticleId blocks; they are dropped before matching articles
    static ref REFERENCE_PATTERN: Regex = Regex::new(r"(?s)<Reference>.*?</Reference>").unwrap();

    static ref ARTICLE_PATTERN: Regex =
        Regex::new(r"(?s)<PubmedArticle>(.*?)</PubmedArticle>").unwrap();

    /// Plain and structured (`Label="METHODS"`) abstract sections
    static ref ABSTRACT_PATTERN: Regex =
        Regex::new(r"(?s)<AbstractText(?:\s[^>]*)?>(.*?)</AbstractText>").unwrap();

    static ref DOI_PATTERN: Regex =
        Regex::new(r#"(?s)<ArticleId IdType="doi">(.*?)</ArticleId>"#).unwrap();

    static ref COUNT_PATTERN: Regex = Regex::new(r"<Count>(\d+)</Count>").unwrap();
    static ref QUERY_KEY_PATTERN: Regex = Regex::new(r"<QueryKey>(\d+)</QueryKey>").unwrap();
    static ref WEB_ENV_PATTERN: Regex = Regex::new(r"<WebEnv>(\S+?)</WebEnv>").unwrap();
}

/// Turns a fetched source document into corpus documents.
///
/// Callers only depend on this trait, so the markup strategy can change
/// without touching the fetchers.
pub trait RecordExtractor {
    fn extract(&self, document: &str) -> Vec<Document>;
}

/// Regex-based extractor for PubMed `efetch` XML (`rettype=abstract`)
#[derive(Debug, Default, Clone, Copy)]
pub struct PubmedXmlExtractor;

impl RecordExtractor for PubmedXmlExtractor {
    fn extract(&self, document: &str) -> Vec<Document> {
        let without_refs = REFERENCE_PATTERN.replace_all(document, "");
        let mut documents = Vec::new();
        let mut skipped_no_doi = 0usize;

        for article in ARTICLE_PATTERN.captures_iter(&without_refs) {
            let body = &article[1];

            let sections: Vec<&str> = ABSTRACT_PATTERN
                .captures_iter(body)
                .filter_map(|cap| cap.get(1).map(|m| m.as_str().trim()))
                .filter(|s| !s.is_empty())
                .collect();
            if sections.is_empty() {
                continue;
            }

            let doi = DOI_PATTERN
                .captures(body)
                .and_then(|cap| cap.get(1))
                .and_then(|m| clean_doi(m.as_str()));

            match doi {
                Some(doi) => documents.push(Document::new(doi, sections.join("\n"))),
                None => skipped_no_doi += 1,
            }
        }

        if skipped_no_doi > 0 {
            debug!("Skipped {} articles with an abstract but no DOI", skipped_no_doi);
        }

        documents
    }
}

/// History-server handle returned by `esearch` with `usehistory=y`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHandle {
    pub count: usize,
    pub query_key: String,
    pub web_env: String,
}

/// Parse an `esearch` response. Returns None when the history handle is missing.
///
/// `<Count>` also appears inside the translation stack; the first occurrence is the total.
pub fn parse_search_response(xml: &str) -> Option<SearchHandle> {
    let count = COUNT_PATTERN
        .captures(xml)
        .and_then(|cap| cap[1].parse().ok())
        .unwrap_or(0);
    let query_key = QUERY_KEY_PATTERN.captures(xml)?[1].to_string();
    let web_env = WEB_ENV_PATTERN.captures(xml)?[1].to_string();

    Some(SearchHandle {
        count,
        query_key,
        web_env,
    })
}
