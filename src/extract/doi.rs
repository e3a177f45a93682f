use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    /// Resolver and scheme prefixes that sometimes precede a DOI in harvested metadata
    static ref DOI_PREFIX_PATTERN: Regex = Regex::new(
        r"(?i)^(?:doi:\s*|(?:https?://)?(?:dx\.)?doi\.org/)"
    ).unwrap();
}

/// A DOI rewritten into a token that is safe to use as a file name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedDoi(String);

impl NormalizedDoi {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the record stored under this identifier
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for NormalizedDoi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Map a raw DOI to its on-disk identifier.
///
/// `/` becomes `--`, `.` becomes `-`, and both parentheses become `=`.
/// Distinct DOIs may collide (e.g. `a.b` and `a-b`); colliding records overwrite each other.
pub fn normalize_doi(raw: &str) -> NormalizedDoi {
    let mut out = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        match c {
            '/' => out.push_str("--"),
            '.' => out.push('-'),
            '(' | ')' => out.push('='),
            other => out.push(other),
        }
    }
    NormalizedDoi(out)
}

/// Clean up a DOI captured from markup or a metadata table
/// - Trim surrounding whitespace
/// - Strip `doi:` and resolver URL prefixes
pub fn clean_doi(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let stripped = DOI_PREFIX_PATTERN.replace(trimmed, "");
    let doi = stripped.trim();
    if doi.is_empty() {
        None
    } else {
        Some(doi.to_string())
    }
}
