use crate::error::{Result, SearchError};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Full metadata record of a snippet, in file order.
pub type Metadata = serde_json::Map<String, Value>;

const DESCRIPTION_FIELD: &str = "description";

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    /// Searchable text: file content in directory mode, the description in metadata mode.
    pub text: String,
    pub metadata: Option<Metadata>,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into(), metadata: None }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// What to do with a file that is not text or a record without a description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Fail the whole load on the first bad entry.
    #[default]
    Abort,
    /// Drop the entry and log a warning.
    Skip,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Only load entries whose identifier extension matches this language tag.
    pub language: Option<String>,
    pub on_error: ErrorPolicy,
}

/// Documents in insertion order with unique identifiers.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    docs: Vec<Document>,
    index: HashMap<String, usize>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_documents<I: IntoIterator<Item = Document>>(docs: I) -> Result<Self> {
        let mut corpus = Self::new();
        for doc in docs {
            corpus.insert(doc)?;
        }
        Ok(corpus)
    }

    pub fn insert(&mut self, doc: Document) -> Result<()> {
        if self.index.contains_key(&doc.id) {
            return Err(SearchError::DuplicateDocument { id: doc.id });
        }
        self.index.insert(doc.id.clone(), self.docs.len());
        self.docs.push(doc);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.index.get(id).map(|&i| &self.docs[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.docs.iter()
    }

    /// Subset of documents whose identifier matches `language`, order preserved.
    pub fn filter_language(&self, language: &str) -> Result<Corpus> {
        Corpus::from_documents(self.docs.iter().filter(|d| matches_language(&d.id, language)).cloned())
    }

    /// One document per regular file directly inside `dir`, identified by file name.
    /// Symlinks are followed; a dangling link is an I/O error.
    pub fn from_dir<P: AsRef<Path>>(dir: P, opts: &LoadOptions) -> Result<Self> {
        let dir = dir.as_ref();
        let meta = fs::metadata(dir).map_err(|e| SearchError::io(dir, e))?;
        if !meta.is_dir() {
            let err = std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory");
            return Err(SearchError::io(dir, err));
        }

        let mut corpus = Corpus::new();
        let walker = WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true).sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|e| SearchError::io(dir, e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let id = entry.file_name().to_string_lossy().into_owned();
            if let Some(lang) = opts.language.as_deref() {
                if !matches_language(&id, lang) {
                    continue;
                }
            }
            let bytes = fs::read(entry.path()).map_err(|e| SearchError::io(entry.path(), e))?;
            let text = match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(_) => match opts.on_error {
                    ErrorPolicy::Abort => return Err(SearchError::Decode { id }),
                    ErrorPolicy::Skip => {
                        tracing::warn!(%id, "skipping file that is not valid UTF-8");
                        continue;
                    }
                },
            };
            corpus.insert(Document::new(id, text))?;
        }
        tracing::info!(path = %dir.display(), documents = corpus.len(), "loaded snippet directory");
        Ok(corpus)
    }

    /// Load `{ id: { "description": ..., ... } }`; the description is the searchable text.
    pub fn from_metadata_file<P: AsRef<Path>>(path: P, opts: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| SearchError::io(path, e))?;
        let records: serde_json::Map<String, Value> =
            serde_json::from_str(&raw).map_err(|e| SearchError::parse(path, e))?;

        let mut corpus = Corpus::new();
        for (id, record) in records {
            if let Some(lang) = opts.language.as_deref() {
                if !matches_language(&id, lang) {
                    continue;
                }
            }
            let doc = match document_from_record(&id, record) {
                Ok(doc) => doc,
                Err(err) => match opts.on_error {
                    ErrorPolicy::Abort => return Err(err),
                    ErrorPolicy::Skip => {
                        tracing::warn!(%id, error = %err, "skipping malformed metadata record");
                        continue;
                    }
                },
            };
            corpus.insert(doc)?;
        }
        tracing::info!(path = %path.display(), documents = corpus.len(), "loaded snippet metadata");
        Ok(corpus)
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.docs.iter()
    }
}

fn document_from_record(id: &str, record: Value) -> Result<Document> {
    let schema = |reason: &str| SearchError::Schema { id: id.to_string(), reason: reason.to_string() };
    let Value::Object(fields) = record else {
        return Err(schema("record is not an object"));
    };
    let description = match fields.get(DESCRIPTION_FIELD) {
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(schema("`description` is not a string")),
        None => return Err(schema("missing `description`")),
    };
    Ok(Document::new(id, description).with_metadata(fields))
}

/// File extensions a language tag stands for. Unknown tags are taken as an extension.
fn extensions_for(language: &str) -> Vec<String> {
    let tag = language.trim().trim_start_matches('.').to_lowercase();
    let known: &[&str] = match tag.as_str() {
        "python" => &["py", "pyw"],
        "javascript" => &["js", "mjs", "cjs", "jsx"],
        "typescript" => &["ts", "tsx"],
        "rust" => &["rs"],
        "go" | "golang" => &["go"],
        "java" => &["java"],
        "c" => &["c", "h"],
        "cpp" | "c++" => &["cpp", "cc", "cxx", "hpp", "hh"],
        "ruby" => &["rb"],
        "shell" | "bash" => &["sh", "bash"],
        _ => &[],
    };
    if known.is_empty() {
        vec![tag]
    } else {
        known.iter().map(|s| s.to_string()).collect()
    }
}

pub fn matches_language(id: &str, language: &str) -> bool {
    let Some(ext) = Path::new(id).extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let ext = ext.to_lowercase();
    extensions_for(language).iter().any(|e| *e == ext)
}
