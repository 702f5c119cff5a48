//! TF-IDF similarity search over a corpus of code snippets.
//!
//! Pipeline: load a [`Corpus`], then [`search`] normalizes the query and every
//! document, fits a TF-IDF [`FeatureSpace`] over both, scores each document by
//! cosine similarity and returns them ranked.

pub mod config;
pub mod corpus;
pub mod error;
pub mod rank;
pub mod search;
pub mod similarity;
pub mod tokenizer;
pub mod vectorize;

pub use config::SearchOptions;
pub use corpus::{Corpus, Document, ErrorPolicy, LoadOptions, Metadata};
pub use error::{Result, SearchError};
pub use rank::ScoredResult;
pub use search::search;
pub use tokenizer::NormalizeOptions;
pub use vectorize::{FeatureSpace, SparseVector, TermId, VectorizeOptions};
