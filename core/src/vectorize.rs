use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub type TermId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizeOptions {
    /// Use idf = ln(1 + N/df) instead of ln(N/df). The plain form gives zero
    /// weight to a term present in every fitted text.
    pub smoothed_idf: bool,
    /// Use tf = 1 + ln(count) instead of the raw count.
    pub sublinear_tf: bool,
}

impl Default for VectorizeOptions {
    fn default() -> Self {
        Self { smoothed_idf: true, sublinear_tf: false }
    }
}

/// L2-normalized sparse vector, entries sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    pub entries: Vec<(TermId, f32)>,
}

impl SparseVector {
    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, w)| *w == 0.0)
    }

    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f32;
        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            if ta == tb {
                sum += wa * wb;
                i += 1;
                j += 1;
            } else if ta < tb {
                i += 1;
            } else {
                j += 1;
            }
        }
        sum
    }
}

/// Vocabulary and IDF weights fitted over one search call's texts.
#[derive(Debug, Clone, Default)]
pub struct FeatureSpace {
    pub dictionary: HashMap<String, TermId>,
    pub df: Vec<u32>,
    pub idf: Vec<f32>,
    pub num_texts: u32,
    opts: VectorizeOptions,
}

/// Output of a fit: the query vector and one row per corpus text.
#[derive(Debug, Clone)]
pub struct Fitted {
    pub space: FeatureSpace,
    pub query: SparseVector,
    pub rows: Vec<SparseVector>,
}

impl FeatureSpace {
    /// Fit over `corpus ∪ {query}` and transform every text into the shared space.
    pub fn fit(corpus: &[Vec<String>], query: &[String], opts: &VectorizeOptions) -> Result<Fitted> {
        let mut space = FeatureSpace { opts: *opts, ..Default::default() };
        for tokens in corpus.iter().map(Vec::as_slice).chain(std::iter::once(query)) {
            space.observe(tokens);
        }
        if space.dictionary.is_empty() && corpus.is_empty() {
            return Err(SearchError::EmptyCorpus);
        }

        let n = space.num_texts.max(1) as f32;
        space.idf = space
            .df
            .iter()
            .map(|&df| {
                let ratio = n / df.max(1) as f32;
                if opts.smoothed_idf { (1.0 + ratio).ln() } else { ratio.ln() }
            })
            .collect();

        let rows = corpus.iter().map(|t| space.transform(t)).collect();
        let query = space.transform(query);
        tracing::debug!(texts = space.num_texts, terms = space.dictionary.len(), "fitted feature space");
        Ok(Fitted { space, query, rows })
    }

    fn observe(&mut self, tokens: &[String]) {
        self.num_texts += 1;
        let mut seen: HashSet<TermId> = HashSet::new();
        for term in tokens {
            let tid = match self.dictionary.get(term) {
                Some(&tid) => tid,
                None => {
                    let tid = self.df.len() as TermId;
                    self.dictionary.insert(term.clone(), tid);
                    self.df.push(0);
                    tid
                }
            };
            if seen.insert(tid) {
                self.df[tid as usize] += 1;
            }
        }
    }

    /// TF-IDF weights of `tokens`, L2-normalized. Unknown terms are ignored.
    pub fn transform(&self, tokens: &[String]) -> SparseVector {
        let mut tf_raw: HashMap<TermId, u32> = HashMap::new();
        for term in tokens {
            if let Some(&tid) = self.dictionary.get(term) {
                *tf_raw.entry(tid).or_insert(0) += 1;
            }
        }
        let mut entries: Vec<(TermId, f32)> = tf_raw
            .into_iter()
            .map(|(tid, count)| {
                let tf = if self.opts.sublinear_tf { 1.0 + (count as f32).ln() } else { count as f32 };
                (tid, tf * self.idf[tid as usize])
            })
            .collect();
        entries.sort_by_key(|(tid, _)| *tid);

        let mut v = SparseVector { entries };
        let norm = v.norm();
        if norm > 0.0 {
            for (_, w) in v.entries.iter_mut() {
                *w /= norm;
            }
        }
        v
    }

    pub fn vocabulary_len(&self) -> usize {
        self.dictionary.len()
    }
}
