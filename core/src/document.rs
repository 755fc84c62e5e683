use serde::{Deserialize, Serialize};

pub type DocId = u32;

/// A corpus record. The index only looks at `id` and `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub url: String,
    pub text: String,
}

impl Document {
    pub fn new(id: DocId, text: impl Into<String>) -> Self {
        Self { id, title: String::new(), url: String::new(), text: text.into() }
    }
}
