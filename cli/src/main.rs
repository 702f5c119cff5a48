use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use snipsearch_core::{search, Corpus, ErrorPolicy, LoadOptions, ScoredResult, SearchOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "snipsearch")]
#[command(about = "Rank code snippets against a natural-language query with TF-IDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a snippet directory or a metadata file
    Search(SearchArgs),
}

#[derive(Args)]
struct SearchArgs {
    #[command(flatten)]
    source: Source,
    /// Natural-language query
    #[arg(long, short)]
    query: String,
    /// Only search files of this language or extension (e.g. py, python, .rs)
    #[arg(long)]
    language: Option<String>,
    /// Return at most this many results
    #[arg(long)]
    top_k: Option<usize>,
    /// JSON file with search options; flags given here take precedence
    #[arg(long)]
    config: Option<PathBuf>,
    /// Skip undecodable files and malformed records instead of failing
    #[arg(long, default_value_t = false)]
    skip_malformed: bool,
    /// Print one JSON object per result
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Source {
    /// Directory with one snippet per file
    #[arg(long)]
    dir: Option<PathBuf>,
    /// JSON file mapping snippet name to {"description": ..., ...}
    #[arg(long)]
    metadata: Option<PathBuf>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search(args) => run_search(args),
    }
}

fn run_search(args: SearchArgs) -> Result<()> {
    let mut options = match &args.config {
        Some(path) => SearchOptions::from_json_file(path).with_context(|| format!("loading config {}", path.display()))?,
        None => SearchOptions::default(),
    };
    if args.language.is_some() {
        options.language = args.language.clone();
    }
    if args.top_k.is_some() {
        options.top_k = args.top_k;
    }

    let load = LoadOptions {
        language: None,
        on_error: if args.skip_malformed { ErrorPolicy::Skip } else { ErrorPolicy::Abort },
    };
    let corpus = match (&args.source.dir, &args.source.metadata) {
        (Some(dir), _) => Corpus::from_dir(dir, &load).with_context(|| format!("loading snippets from {}", dir.display()))?,
        (None, Some(file)) => {
            Corpus::from_metadata_file(file, &load).with_context(|| format!("loading metadata from {}", file.display()))?
        }
        (None, None) => anyhow::bail!("one of --dir or --metadata is required"),
    };

    let results = search(&corpus, &args.query, &options).context("search failed")?;
    tracing::info!(results = results.len(), "ranked snippets");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        for r in &results {
            writeln!(out, "{}", serde_json::to_string(r)?)?;
        }
    } else {
        print_table(&mut out, &results)?;
    }
    Ok(())
}

fn print_table(out: &mut impl Write, results: &[ScoredResult]) -> Result<()> {
    let width = results.iter().map(|r| r.id.chars().count()).max().unwrap_or(0).max(8);
    for (rank, r) in results.iter().enumerate() {
        let description = r
            .metadata
            .as_ref()
            .and_then(|m| m.get("description"))
            .and_then(|v| v.as_str())
            .unwrap_or("");
        writeln!(out, "{:>3}. {:<width$}  {:.4}  {}", rank + 1, r.id, r.score, description)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipsearch_core::Metadata;

    #[test]
    fn table_shows_rank_score_and_description() {
        let mut meta = Metadata::new();
        meta.insert("description".into(), "sorts a list".into());
        let results = vec![
            ScoredResult { id: "a.py".into(), metadata: Some(meta), score: 0.5 },
            ScoredResult { id: "b.py".into(), metadata: None, score: 0.0 },
        ];
        let mut buf = Vec::new();
        print_table(&mut buf, &results).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  1. a.py"));
        assert!(lines[0].contains("0.5000"));
        assert!(lines[0].ends_with("sorts a list"));
        assert!(lines[1].contains("0.0000"));
    }

    #[test]
    fn table_pads_by_characters() {
        let results = vec![
            ScoredResult { id: "ééééééééé.py".into(), metadata: None, score: 0.25 },
            ScoredResult { id: "a.py".into(), metadata: None, score: 0.0 },
        ];
        let mut buf = Vec::new();
        print_table(&mut buf, &results).unwrap();
        let text = String::from_utf8(buf).unwrap();
        // "  1. " + 12-character id column + two spaces
        for line in text.lines() {
            assert_eq!(line.chars().position(|c| c == '0'), Some(5 + 12 + 2), "{line:?}");
        }
    }

    #[test]
    fn source_flags_are_exclusive() {
        let both = Cli::try_parse_from(["snipsearch", "search", "--dir", "d", "--metadata", "m.json", "-q", "x"]);
        assert!(both.is_err());
        let neither = Cli::try_parse_from(["snipsearch", "search", "-q", "x"]);
        assert!(neither.is_err());
        let ok = Cli::try_parse_from(["snipsearch", "search", "--dir", "d", "-q", "x", "--top-k", "3"]);
        assert!(ok.is_ok());
    }
}
