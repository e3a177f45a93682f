use hf_hub::api::sync::Api;
use log::debug;
use std::path::Path;
use tokenizers::Tokenizer;

use crate::error::{CorpusError, CorpusResult};

/// Name that selects the built-in whitespace tokenizer instead of a model tokenizer
pub const WHITESPACE_TOKENIZER: &str = "whitespace";

/// Counts the tokens a tokenizer produces for a piece of text
pub trait TokenCounter {
    fn count_tokens(&self, text: &str) -> CorpusResult<usize>;
}

/// Splits on Unicode whitespace; needs no model files
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceTokenCounter;

impl TokenCounter for WhitespaceTokenCounter {
    fn count_tokens(&self, text: &str) -> CorpusResult<usize> {
        Ok(text.split_whitespace().count())
    }
}

/// Hugging Face tokenizer loaded from a `tokenizer.json`
pub struct HfTokenCounter {
    tokenizer: Tokenizer,
}

impl HfTokenCounter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> CorpusResult<Self> {
        let tokenizer = Tokenizer::from_file(path.as_ref()).map_err(|e| {
            CorpusError::Tokenizer(format!(
                "Failed to load tokenizer from {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;
        Ok(Self { tokenizer })
    }

    /// Resolve `tokenizer.json` of a Hub model id (e.g. `gpt2`) through the local hf-hub cache
    pub fn from_pretrained(model_id: &str) -> CorpusResult<Self> {
        let api = Api::new()
            .map_err(|e| CorpusError::Tokenizer(format!("Failed to create HF API: {}", e)))?;
        let path = api.model(model_id.to_string()).get("tokenizer.json").map_err(|e| {
            CorpusError::Tokenizer(format!("Failed to fetch tokenizer for {}: {}", model_id, e))
        })?;
        debug!("Resolved tokenizer for {} to {:?}", model_id, path);
        Self::from_file(path)
    }
}

impl TokenCounter for HfTokenCounter {
    fn count_tokens(&self, text: &str) -> CorpusResult<usize> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| CorpusError::Tokenizer(format!("Tokenizer failed to encode text: {}", e)))?;
        Ok(encoding.get_ids().len())
    }
}

/// Build a token counter from an identifier: the built-in `whitespace`,
/// a path to a `tokenizer.json`, or a Hub model id.
pub fn load_token_counter(identifier: &str) -> CorpusResult<Box<dyn TokenCounter>> {
    if identifier == WHITESPACE_TOKENIZER {
        return Ok(Box::new(WhitespaceTokenCounter));
    }
    let path = Path::new(identifier);
    if path.is_file() {
        return Ok(Box::new(HfTokenCounter::from_file(path)?));
    }
    Ok(Box::new(HfTokenCounter::from_pretrained(identifier)?))
}

/// Write a word-level `tokenizer.json` with a whitespace pre-tokenizer; unknown words map to `[UNK]`
#[cfg(test)]
pub(crate) fn write_word_level_tokenizer(path: &Path, words: &[&str]) {
    let mut vocab = serde_json::Map::new();
    vocab.insert("[UNK]".to_string(), serde_json::json!(0));
    for (i, word) in words.iter().enumerate() {
        vocab.insert(word.to_string(), serde_json::json!(i + 1));
    }
    let tokenizer_json = serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": null,
        "pre_tokenizer": { "type": "Whitespace" },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": "[UNK]"
        }
    });
    std::fs::write(path, tokenizer_json.to_string()).unwrap();
}
