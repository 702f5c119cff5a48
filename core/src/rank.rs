use crate::corpus::{Corpus, Metadata};
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    pub score: f32,
}

/// Sort by score descending and attach metadata from `corpus`.
///
/// The sort is stable, so equal scores keep corpus order. `top_k` truncates
/// the list; `None` returns every document.
pub fn rank(scores: Vec<(&str, f32)>, corpus: &Corpus, top_k: Option<usize>) -> Vec<ScoredResult> {
    let mut scored = scores;
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    if let Some(k) = top_k {
        scored.truncate(k);
    }
    scored
        .into_iter()
        .map(|(id, score)| ScoredResult {
            id: id.to_string(),
            metadata: corpus.get(id).and_then(|d| d.metadata.clone()),
            score,
        })
        .collect()
}
