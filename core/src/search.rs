use crate::config::SearchOptions;
use crate::corpus::Corpus;
use crate::error::{Result, SearchError};
use crate::rank::{rank, ScoredResult};
use crate::similarity::score_all;
use crate::tokenizer::normalize;
use crate::vectorize::FeatureSpace;
use std::borrow::Cow;

/// Rank every document of `corpus` against `query`.
///
/// The feature space is refitted on each call over the (language-filtered)
/// corpus plus the query; nothing is cached between calls.
pub fn search(corpus: &Corpus, query: &str, options: &SearchOptions) -> Result<Vec<ScoredResult>> {
    let corpus: Cow<'_, Corpus> = match options.language.as_deref() {
        Some(lang) => Cow::Owned(corpus.filter_language(lang)?),
        None => Cow::Borrowed(corpus),
    };
    if corpus.is_empty() {
        return Err(SearchError::EmptyCorpus);
    }

    let doc_tokens: Vec<Vec<String>> = corpus.iter().map(|d| normalize(&d.text, &options.normalize)).collect();
    let query_tokens = normalize(query, &options.normalize);
    tracing::debug!(query, tokens = ?query_tokens, "normalized query");

    let fitted = FeatureSpace::fit(&doc_tokens, &query_tokens, &options.vectorize)?;
    let ids: Vec<&str> = corpus.iter().map(|d| d.id.as_str()).collect();
    let scores = score_all(&ids, &fitted.query, &fitted.rows);
    let results = rank(scores, &corpus, options.top_k);

    tracing::debug!(
        documents = corpus.len(),
        terms = fitted.space.vocabulary_len(),
        hits = results.iter().filter(|r| r.score > 0.0).count(),
        "search complete"
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Document;

    fn snippets() -> Corpus {
        Corpus::from_documents(vec![
            Document::new("a.py", "def sort_list(x): return sorted(x)"),
            Document::new("b.py", "print('hello')"),
            Document::new("c.js", "const xs = [3, 1, 2].sort();"),
        ])
        .unwrap()
    }

    #[test]
    fn exact_identifier_ranks_first() {
        let results = search(&snippets(), "sort_list", &SearchOptions::default()).unwrap();
        assert_eq!(results[0].id, "a.py");
        let b = results.iter().find(|r| r.id == "b.py").unwrap();
        assert!(results[0].score > b.score);
    }

    #[test]
    fn language_filter_shrinks_the_corpus() {
        let opts = SearchOptions::default().with_language("js");
        let results = search(&snippets(), "sort", &opts).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "c.js");
    }

    #[test]
    fn filter_matching_nothing_is_an_error() {
        let opts = SearchOptions::default().with_language("rust");
        assert!(matches!(search(&snippets(), "sort", &opts), Err(SearchError::EmptyCorpus)));
    }

    #[test]
    fn empty_corpus_is_an_error() {
        let err = search(&Corpus::new(), "anything", &SearchOptions::default()).unwrap_err();
        assert!(matches!(err, SearchError::EmptyCorpus));
    }
}
