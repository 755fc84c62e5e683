pub mod cache;
pub mod corpus;

pub use cache::{open_or_build, OpenOptions, Opened, Origin};
pub use corpus::{load_documents, url_key};
