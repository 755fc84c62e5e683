use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use fts_core::DocId;
use fts_indexer::{load_documents, open_or_build, url_key, OpenOptions, Origin};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "fts")]
#[command(about = "Build and query an on-disk full text search index", long_about = None)]
struct Cli {
    #[command(flatten)]
    paths: PathArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PathArgs {
    /// Persisted index file
    #[arg(long, global = true, env = "FTS_INDEX", default_value = "enwiki.idx")]
    index: PathBuf,
    /// Corpus file or directory (.xml.gz, .xml, .jsonl, .json)
    #[arg(long, global = true, env = "FTS_CORPUS", default_value = "enwiki-latest-abstract1.xml.gz")]
    corpus: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the index from the corpus and persist it
    Build,
    /// Run an AND query, loading the index or building it if missing
    Search {
        /// Free text query; every analyzed term must match
        query: String,
        /// Re-read the corpus and print the matching documents
        #[arg(long, default_value_t = false)]
        show: bool,
        /// Maximum number of documents printed with --show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Print index statistics
    Stats,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();
    let cli = Cli::parse();

    let force_rebuild = matches!(cli.command, Commands::Build);
    let opts = OpenOptions { index_path: cli.paths.index, corpus_path: cli.paths.corpus, force_rebuild };
    let opened = open_or_build(&opts)?;

    match cli.command {
        Commands::Build => {}
        Commands::Search { query, show, limit } => {
            let ids = opened.index.search(&query);
            tracing::info!(%query, hits = ids.len(), "search complete");
            println!("{:?}", ids);
            if show && !ids.is_empty() {
                print_documents(&opts, &ids, limit)?;
            }
        }
        Commands::Stats => {
            let stats = opened.index.stats();
            println!("origin:    {}", if opened.origin == Origin::Loaded { "loaded" } else { "built" });
            println!("terms:     {}", stats.num_terms);
            println!("postings:  {}", stats.num_postings);
            match stats.max_doc_id {
                Some(id) => println!("max doc:   {}", id),
                None => println!("max doc:   -"),
            }
        }
    }

    // The build finished in memory but the cache could not be written.
    match opened.persist_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn print_documents(opts: &OpenOptions, ids: &[DocId], limit: usize) -> Result<()> {
    let wanted: HashSet<DocId> = ids.iter().copied().take(limit).collect();
    let docs = load_documents(&opts.corpus_path)?;
    for doc in docs.iter().filter(|d| wanted.contains(&d.id)) {
        println!("[{}]\t{}\t{}\n\t{}", doc.id, url_key(&doc.url), doc.title, doc.text);
    }
    if ids.len() > limit {
        println!("... {} more", ids.len() - limit);
    }
    Ok(())
}
