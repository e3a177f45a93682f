pub mod cli;
pub mod commands;
pub mod common;
pub mod corpus;
pub mod count;
pub mod error;
pub mod extract;
pub mod fetch;

pub use error::{CorpusError, CorpusResult, ErrorKind};
