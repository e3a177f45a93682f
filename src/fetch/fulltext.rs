use anyhow::{bail, Context, Result};
use log::{info, warn};
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::YearRange;
use crate::common::Document;
use crate::corpus::{CorpusWriter, DocumentKind};
use crate::extract::clean_doi;

const TEXT_TABLE_SUFFIX: &str = "text.csv";
const METADATA_TABLE_SUFFIX: &str = "metadata.csv";

/// PMC query for every article of a journal published within the year range
pub fn fulltext_query(journal: &str, years: YearRange) -> String {
    format!(
        "({}[Journal]) AND ({}[Publication Date] : {}[Publication Date])",
        journal, years.min, years.max
    )
}

/// Drives the external `pubget` harvester
#[derive(Debug, Clone)]
pub struct PubgetRunner {
    program: String,
    work_dir: PathBuf,
}

impl PubgetRunner {
    pub fn new(program: &str, work_dir: &Path) -> Self {
        Self {
            program: program.to_string(),
            work_dir: work_dir.to_path_buf(),
        }
    }

    pub fn data_dir(&self, journal: &str) -> PathBuf {
        self.work_dir.join(format!("pubget_data_{}", journal))
    }

    /// Download and extract a journal's articles; an existing data directory is reused as-is
    pub fn run(&self, journal: &str, query: &str) -> Result<PathBuf> {
        let data_dir = self.data_dir(journal);
        if data_dir.exists() {
            info!("{} already exists, skipping pubget", data_dir.display());
            return Ok(data_dir);
        }

        info!("Fetching fulltext for {}", journal);
        let status = Command::new(&self.program)
            .arg("run")
            .arg(&data_dir)
            .arg("-q")
            .arg(query)
            .status()
            .with_context(|| format!("Failed to launch {}", self.program))?;

        if !status.success() {
            bail!("{} exited with {} for {}", self.program, status, journal);
        }
        Ok(data_dir)
    }
}

/// The two pubget tables a journal's full texts are rebuilt from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PubgetTables {
    pub text: PathBuf,
    pub metadata: PathBuf,
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

/// Locate `*text.csv` and `*metadata.csv` anywhere under a pubget data directory
pub fn find_pubget_tables(dir: &Path) -> Result<PubgetTables> {
    let mut files = Vec::new();
    collect_files(dir, &mut files)?;
    files.sort();

    let find = |suffix: &str| {
        files
            .iter()
            .find(|p| p.file_name().map_or(false, |n| n.to_string_lossy().ends_with(suffix)))
            .cloned()
    };

    let text = find(TEXT_TABLE_SUFFIX)
        .with_context(|| format!("No {} under {}", TEXT_TABLE_SUFFIX, dir.display()))?;
    let metadata = find(METADATA_TABLE_SUFFIX)
        .with_context(|| format!("No {} under {}", METADATA_TABLE_SUFFIX, dir.display()))?;
    Ok(PubgetTables { text, metadata })
}

fn read_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to open {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn string_column(df: &DataFrame, name: &str, path: &Path) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .with_context(|| format!("Column '{}' missing from {}", name, path.display()))?
        .cast(&DataType::String)?;
    let values = column
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(values)
}

/// Rebuild full-text documents from pubget's row-aligned text and metadata tables.
///
/// Record text is the abstract and body joined by a newline, so it contains the abstract.
/// Rows without a DOI are dropped; a missing abstract or body counts as empty.
pub fn read_fulltext_documents(tables: &PubgetTables) -> Result<Vec<Document>> {
    let text_df = read_csv(&tables.text)?;
    let metadata_df = read_csv(&tables.metadata)?;

    let abstracts = string_column(&text_df, "abstract", &tables.text)?;
    let bodies = string_column(&text_df, "body", &tables.text)?;
    let dois = string_column(&metadata_df, "doi", &tables.metadata)?;

    if dois.len() != abstracts.len() {
        warn!(
            "{} has {} rows but {} has {}; extra rows are ignored",
            tables.text.display(),
            abstracts.len(),
            tables.metadata.display(),
            dois.len()
        );
    }

    let documents = abstracts
        .into_iter()
        .zip(bodies)
        .zip(dois)
        .filter_map(|((abstract_text, body), doi)| {
            let doi = clean_doi(doi.as_deref()?)?;
            let text = format!(
                "{}\n{}",
                abstract_text.unwrap_or_default(),
                body.unwrap_or_default()
            );
            Some(Document::new(doi, text))
        })
        .collect();

    Ok(documents)
}

/// Harvest one journal's full texts into the corpus, returning the number of records written
pub fn fetch_journal_fulltext(
    runner: &PubgetRunner,
    writer: &CorpusWriter,
    journal: &str,
    years: YearRange,
    keep_downloads: bool,
) -> Result<usize> {
    let data_dir = runner.run(journal, &fulltext_query(journal, years))?;
    let tables = find_pubget_tables(&data_dir)?;
    let documents = read_fulltext_documents(&tables)?;

    let written = writer
        .write_documents(journal, DocumentKind::Fulltext, &documents)
        .with_context(|| format!("Failed to write fulltext for {}", journal))?;

    if !keep_downloads {
        fs::remove_dir_all(&data_dir)
            .with_context(|| format!("Failed to remove {}", data_dir.display()))?;
    }

    info!("[{}]: wrote {} fulltext records", journal, written);
    Ok(written)
}
