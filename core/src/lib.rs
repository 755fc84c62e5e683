pub mod analyzer;
pub mod document;
pub mod index;
pub mod persist;

pub use analyzer::{analyze, Analyzer};
pub use document::{DocId, Document};
pub use index::{intersect, IndexStats, InvertedIndex};
pub use persist::{probe, CacheProbe};
