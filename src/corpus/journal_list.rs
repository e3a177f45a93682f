use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Persisted enumeration of the journals the corpus covers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalList {
    pub journal_names: Vec<String>,
}

impl JournalList {
    pub fn new(journal_names: Vec<String>) -> Self {
        Self { journal_names }
    }

    pub fn len(&self) -> usize {
        self.journal_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.journal_names.is_empty()
    }

    /// Save the list to file as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize journal list")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write journal list to {:?}", path))?;
        Ok(())
    }

    /// Load the list from file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read journal list from {:?}", path))?;
        let list: Self = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse journal list {:?}", path))?;
        Ok(list)
    }
}
