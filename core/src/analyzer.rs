use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

/// Stopwords dropped at both index and query time.
pub const DEFAULT_STOPWORDS: &[&str] = &["a", "and", "be", "have", "i", "in", "of", "that", "the", "to"];

lazy_static! {
    // A token is a maximal run of Unicode letters and numbers.
    static ref TOKEN_RE: Regex = Regex::new(r"[\p{L}\p{N}]+").expect("valid regex");
    static ref DEFAULT_ANALYZER: Analyzer = Analyzer::default();
    /// Snowball's English stop word list. These are returned unstemmed.
    static ref STEM_EXEMPT: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","did","do","does","doing","don","down","during",
            "each","few","for","from","further",
            "had","has","have","having","he","her","here","hers","herself","him","himself","his","how",
            "i","if","in","into","is","it","its","itself","just",
            "me","more","most","my","myself",
            "no","nor","not","now","of","off","on","once","only","or","other","our","ours","ourselves","out","over","own",
            "s","same","she","should","so","some","such",
            "t","than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","very",
            "was","we","were","what","when","where","which","while","who","whom","why","will","with",
            "you","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

/// Split text into raw tokens on every character that is neither a letter nor a number.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str())
}

/// Lowercase each token using the full Unicode mapping.
pub fn lowercase<'a>(tokens: impl Iterator<Item = &'a str> + 'a) -> impl Iterator<Item = String> + 'a {
    tokens.map(str::to_lowercase)
}

/// Text analysis chain: tokenize, lowercase, drop stopwords, stem.
///
/// The same analyzer must be used to build an index and to query it,
/// otherwise terms will not line up.
pub struct Analyzer {
    stopwords: HashSet<String>,
    stemmer: Stemmer,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::with_stopwords(DEFAULT_STOPWORDS.iter().copied())
    }
}

impl Analyzer {
    pub fn new() -> Self { Self::default() }

    /// Build an analyzer with a custom closed stopword set. Entries are
    /// compared against already lowercased tokens.
    pub fn with_stopwords<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stopwords: words.into_iter().map(Into::into).collect(),
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    pub fn is_stopword(&self, token: &str) -> bool { self.stopwords.contains(token) }

    /// Reduce a lowercased token to its English stem. Words of one or two
    /// characters and Snowball stop words are left as they are.
    pub fn stem(&self, token: &str) -> String {
        if token.chars().count() <= 2 || STEM_EXEMPT.contains(token) {
            return token.to_string();
        }
        self.stemmer.stem(token).into_owned()
    }

    /// Lazily analyze `text` into terms, preserving occurrence order and duplicates.
    pub fn analyze<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        lowercase(tokenize(text))
            .filter(move |token| !self.is_stopword(token))
            .map(move |token| self.stem(&token))
    }
}

/// Analyze with the default analyzer.
pub fn analyze(text: &str) -> impl Iterator<Item = String> + '_ {
    DEFAULT_ANALYZER.analyze(text)
}

pub fn analyze_to_vec(text: &str) -> Vec<String> {
    analyze(text).collect()
}

pub(crate) fn default_analyzer() -> &'static Analyzer {
    &DEFAULT_ANALYZER
}
