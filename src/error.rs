use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Category of a corpus error, used to decide how a failure is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    InvariantViolation,
    MalformedRecord,
    Tokenizer,
    WorkerPool,
}

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("duplicate identifier '{identifier}' in {}", .dir.display())]
    DuplicateIdentifier { dir: PathBuf, identifier: String },

    #[error("file name {name:?} in {} is not valid UTF-8", .dir.display())]
    NonUtf8FileName { dir: PathBuf, name: OsString },

    #[error("malformed record {}: {source}", .path.display())]
    MalformedRecord {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl CorpusError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        CorpusError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CorpusError::Io { .. } => ErrorKind::Io,
            CorpusError::DuplicateIdentifier { .. } | CorpusError::NonUtf8FileName { .. } => {
                ErrorKind::InvariantViolation
            }
            CorpusError::MalformedRecord { .. } => ErrorKind::MalformedRecord,
            CorpusError::Tokenizer(_) => ErrorKind::Tokenizer,
            CorpusError::WorkerPool(_) => ErrorKind::WorkerPool,
        }
    }
}

pub type CorpusResult<T> = std::result::Result<T, CorpusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let io = CorpusError::io(
            Path::new("dataset/Neuron/abstracts"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(io.kind(), ErrorKind::Io);
        assert!(io.to_string().contains("dataset/Neuron/abstracts"));

        let dup = CorpusError::DuplicateIdentifier {
            dir: PathBuf::from("dataset/Neuron/fulltext"),
            identifier: "10-1016--j-neuron".to_string(),
        };
        assert_eq!(dup.kind(), ErrorKind::InvariantViolation);
        assert!(dup.to_string().contains("10-1016--j-neuron"));

        let bad_json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let malformed = CorpusError::MalformedRecord {
            path: PathBuf::from("x.json"),
            source: bad_json,
        };
        assert_eq!(malformed.kind(), ErrorKind::MalformedRecord);

        let non_utf8 = CorpusError::NonUtf8FileName {
            dir: PathBuf::from("dataset/Neuron/abstracts"),
            name: OsString::from("bad.json"),
        };
        assert_eq!(non_utf8.kind(), ErrorKind::InvariantViolation);
    }
}
