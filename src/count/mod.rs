pub mod aggregator;
pub mod report;
pub mod tokenize;

pub use aggregator::{count_corpus, count_journal, reduce_results, CountOptions, FailurePolicy};
pub use report::{CorpusReport, JournalFailure};
pub use tokenize::{
    load_token_counter, HfTokenCounter, TokenCounter, WhitespaceTokenCounter, WHITESPACE_TOKENIZER,
};
