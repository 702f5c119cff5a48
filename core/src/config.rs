use crate::error::{Result, SearchError};
use crate::tokenizer::NormalizeOptions;
use crate::vectorize::VectorizeOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Per-call search settings. Every field has a default, so a config file
/// only needs the keys it changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub normalize: NormalizeOptions,
    pub vectorize: VectorizeOptions,
    /// Restrict the corpus to files of this language or extension before fitting.
    pub language: Option<String>,
    pub top_k: Option<usize>,
}

impl SearchOptions {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| SearchError::io(path, e))?;
        serde_json::from_str(&raw).map_err(|e| SearchError::parse(path, e))
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = Some(k);
        self
    }
}
