use crate::corpus::load_documents;
use anyhow::{Context, Result};
use fts_core::persist::{load_from_path, save_to_path};
use fts_core::{probe, CacheProbe, InvertedIndex};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct OpenOptions {
    /// Persisted index; its presence means "load", its absence means "rebuild".
    pub index_path: PathBuf,
    pub corpus_path: PathBuf,
    /// Rebuild from the corpus even if a persisted index exists.
    pub force_rebuild: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Loaded,
    Built,
}

pub struct Opened {
    pub index: InvertedIndex,
    pub origin: Origin,
    /// Set when a fresh index was built but could not be written. The
    /// in-memory index is still usable for this run.
    pub persist_error: Option<anyhow::Error>,
}

/// Load the persisted index, or build it from the corpus and persist it.
///
/// An unreadable or corrupt index file is rebuilt. A path that cannot even
/// be inspected is a fatal error.
pub fn open_or_build(opts: &OpenOptions) -> Result<Opened> {
    if !opts.force_rebuild {
        match probe(&opts.index_path) {
            CacheProbe::Present => {
                tracing::info!(path = %opts.index_path.display(), "full text search index exists; using it");
                match load_from_path(&opts.index_path) {
                    Ok(index) => return Ok(Opened { index, origin: Origin::Loaded, persist_error: None }),
                    Err(e) => tracing::warn!(error = format!("{e:#}"), "persisted index is unusable; rebuilding"),
                }
            }
            CacheProbe::Absent => {
                tracing::info!(path = %opts.index_path.display(), "full text search index does not exist; building");
            }
            CacheProbe::Unreadable(e) => {
                return Err(e).with_context(|| format!("checking {}", opts.index_path.display()));
            }
        }
    }
    build(opts)
}

fn build(opts: &OpenOptions) -> Result<Opened> {
    let docs = load_documents(&opts.corpus_path)?;
    let mut index = InvertedIndex::new();
    index.add(&docs);
    let stats = index.stats();
    tracing::info!(docs = docs.len(), terms = stats.num_terms, postings = stats.num_postings, "index built");

    let persist_error = match save_to_path(&index, &opts.index_path) {
        Ok(()) => None,
        Err(e) => {
            tracing::error!(error = format!("{e:#}"), "failed to persist index; continuing in memory");
            Some(e)
        }
    };
    Ok(Opened { index, origin: Origin::Built, persist_error })
}
