use crate::analyzer::{default_analyzer, Analyzer};
use crate::document::{DocId, Document};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Term -> ids of the documents containing it.
///
/// Every posting list is strictly increasing. Documents must be added in
/// ascending id order and never twice; `search` relies on that ordering.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<DocId>>, // ids sorted ascending, no duplicates
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub num_terms: usize,
    pub num_postings: usize,
    pub max_doc_id: Option<DocId>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Index a batch of documents with the default analyzer.
    pub fn add<'a, I>(&mut self, docs: I)
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let analyzer = default_analyzer();
        let mut count = 0usize;
        for doc in docs {
            self.add_with(analyzer, doc);
            count += 1;
        }
        tracing::debug!(docs = count, terms = self.postings.len(), "added documents");
    }

    pub fn add_document(&mut self, doc: &Document) {
        self.add_with(default_analyzer(), doc);
    }

    /// Index one document with `analyzer`. Queries must then go through
    /// [`InvertedIndex::search_with`] using the same analyzer.
    pub fn add_with(&mut self, analyzer: &Analyzer, doc: &Document) {
        for term in analyzer.analyze(&doc.text) {
            let ids = self.postings.entry(term).or_default();
            // All terms of one document arrive together, so checking the tail is enough.
            match ids.last() {
                Some(&last) if last == doc.id => continue,
                Some(&last) => debug_assert!(last < doc.id, "document {} added out of order after {}", doc.id, last),
                None => {}
            }
            ids.push(doc.id);
        }
    }

    /// AND-search: ids of the documents containing every query term, ascending.
    ///
    /// A term missing from the index makes the result empty. A query that
    /// analyzes to no terms at all (blank, punctuation, only stopwords)
    /// matches nothing.
    pub fn search(&self, query: &str) -> Vec<DocId> {
        self.search_with(default_analyzer(), query)
    }

    pub fn search_with(&self, analyzer: &Analyzer, query: &str) -> Vec<DocId> {
        let mut result: Option<Vec<DocId>> = None;
        for term in analyzer.analyze(query) {
            let Some(ids) = self.postings.get(&term) else {
                tracing::debug!(%term, "term not in index");
                return Vec::new();
            };
            let next = match result {
                None => ids.clone(),
                Some(acc) => intersect(&acc, ids),
            };
            if next.is_empty() {
                return next;
            }
            result = Some(next);
        }
        result.unwrap_or_default()
    }

    pub fn postings(&self, term: &str) -> Option<&[DocId]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    pub fn contains_term(&self, term: &str) -> bool { self.postings.contains_key(term) }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            num_terms: self.postings.len(),
            num_postings: self.postings.values().map(Vec::len).sum(),
            max_doc_id: self.postings.values().filter_map(|ids| ids.last().copied()).max(),
        }
    }
}

/// Intersect two strictly increasing id lists in one linear pass.
///
/// Both inputs must be sorted ascending; unsorted input gives wrong results.
pub fn intersect(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}
