use criterion::{criterion_group, criterion_main, Criterion};
use snipsearch_core::tokenizer::{normalize, NormalizeOptions};
use snipsearch_core::{search, Corpus, Document, SearchOptions};

const WORDS: &[&str] = &[
    "sort", "list", "vector", "parse", "json", "file", "read", "write", "socket", "buffer", "hash", "map",
    "string", "split", "join", "thread", "lock", "queue", "retry", "timeout",
];

fn generated_corpus(n: usize) -> Corpus {
    let docs = (0..n).map(|i| {
        let text: Vec<&str> = (0..40).map(|j| WORDS[(i * 7 + j * 13) % WORDS.len()]).collect();
        Document::new(format!("snippet_{i:05}.py"), text.join(" "))
    });
    Corpus::from_documents(docs).expect("unique ids")
}

fn bench_search(c: &mut Criterion) {
    let corpus = generated_corpus(1_000);
    let opts = SearchOptions::default();
    c.bench_function("search_1k_snippets", |b| b.iter(|| search(&corpus, "how do I read a json file", &opts)));
}

fn bench_normalize(c: &mut Criterion) {
    let text = "def sort_list(xs): return sorted(xs, key=lambda x: x.name) # Sorts a list of records";
    let opts = NormalizeOptions::default();
    c.bench_function("normalize_snippet", |b| b.iter(|| normalize(text, &opts)));
}

criterion_group!(benches, bench_search, bench_normalize);
criterion_main!(benches);
