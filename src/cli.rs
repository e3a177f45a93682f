use clap::{Parser, Subcommand};

use crate::count::WHITESPACE_TOKENIZER;
use crate::fetch::{DEFAULT_RANKING_URL, EUTILS_BASE_URL};

#[derive(Parser)]
#[command(name = "pubmed-corpus")]
#[command(about = "Crawl PubMed/PMC journal corpora to disk and count documents and tokens")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape journal names from a ranking page and save the journal list
    Journals(JournalsArgs),

    /// Fetch abstracts for every listed journal from PubMed E-utilities
    Abstracts(AbstractsArgs),

    /// Fetch full texts for every listed journal from PMC via pubget
    Fulltext(FulltextArgs),

    /// Count abstracts, full texts and tokens per journal
    Count(CountArgs),
}

#[derive(Parser, Clone)]
pub struct JournalsArgs {
    /// Ranking page listing journal links
    #[arg(short, long, default_value = DEFAULT_RANKING_URL)]
    pub url: String,

    /// Output journal list file
    #[arg(short, long, default_value = "journal_names.json")]
    pub output: String,

    /// Timeout in seconds for the page request
    #[arg(short, long, default_value = "60")]
    pub timeout: u64,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

#[derive(Parser, Clone)]
pub struct AbstractsArgs {
    /// Journal list file
    #[arg(short, long, default_value = "journal_names.json")]
    pub journal_list: String,

    /// Root directory of the corpus
    #[arg(short, long, default_value = "dataset")]
    pub dataset_dir: String,

    /// First publication year to include
    #[arg(long, default_value = "2002")]
    pub min_year: u16,

    /// Last publication year to include
    #[arg(long, default_value = "2022")]
    pub max_year: u16,

    /// Records per efetch page (at most 10000)
    #[arg(short, long, default_value = "10000")]
    pub batch_size: usize,

    /// Journals crawled concurrently
    #[arg(short, long, default_value = "1")]
    pub concurrency: usize,

    /// NCBI API key (raises the request rate limit)
    #[arg(long)]
    pub api_key: Option<String>,

    /// E-utilities base URL
    #[arg(long, default_value = EUTILS_BASE_URL)]
    pub base_url: String,

    /// Timeout in seconds per request
    #[arg(short, long, default_value = "120")]
    pub timeout: u64,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

#[derive(Parser, Clone)]
pub struct FulltextArgs {
    /// Journal list file
    #[arg(short, long, default_value = "journal_names.json")]
    pub journal_list: String,

    /// Root directory of the corpus
    #[arg(short, long, default_value = "dataset")]
    pub dataset_dir: String,

    /// First publication year to include
    #[arg(long, default_value = "2002")]
    pub min_year: u16,

    /// Last publication year to include
    #[arg(long, default_value = "2022")]
    pub max_year: u16,

    /// Journals harvested in parallel (0 = number of CPUs)
    #[arg(short, long, default_value = "100")]
    pub workers: usize,

    /// Directory holding pubget downloads
    #[arg(long, default_value = ".")]
    pub work_dir: String,

    /// pubget executable
    #[arg(long, default_value = "pubget")]
    pub pubget: String,

    /// Keep pubget downloads instead of deleting them
    #[arg(long, default_value = "false")]
    pub keep_downloads: bool,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

#[derive(Parser, Clone)]
pub struct CountArgs {
    /// Journal list file
    #[arg(short, long, default_value = "journal_names.json")]
    pub journal_list: String,

    /// Root directory of the corpus
    #[arg(short, long, default_value = "dataset")]
    pub dataset_dir: String,

    /// Tokenizer: a Hugging Face model id, a tokenizer.json path, or "whitespace"
    #[arg(short, long, default_value = "gpt2")]
    pub tokenizer: String,

    /// Count tokens as well as documents
    #[arg(long, default_value = "false")]
    pub count_tokens: bool,

    /// Journals counted in parallel (0 = number of CPUs)
    #[arg(short, long, default_value = "8")]
    pub workers: usize,

    /// Skip journals that fail and report them instead of aborting the run
    #[arg(long, default_value = "false")]
    pub keep_going: bool,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}
