use fts_core::{DocId, Document, InvertedIndex};

fn donut_index() -> InvertedIndex {
    let mut idx = InvertedIndex::new();
    idx.add(&[
        Document::new(0, "A donut on a glass plate. Only the donuts."),
        Document::new(1, "donut is a donut"),
    ]);
    idx
}

#[test]
fn plural_and_singular_share_postings() {
    let idx = donut_index();
    assert_eq!(idx.search("donut"), vec![0, 1]);
    assert_eq!(idx.search("Donuts"), vec![0, 1]);
    assert_eq!(idx.postings("donut"), Some(&[0, 1][..]));
}

#[test]
fn unknown_term_gives_no_results() {
    let idx = donut_index();
    assert!(!idx.contains_term("xyz"));
    assert!(idx.contains_term("donut"));
    assert!(idx.search("nonexistent term xyz").is_empty());
    // One known and one unknown term is still unsatisfiable.
    assert!(idx.search("donut xyz").is_empty());
}

#[test]
fn empty_query_matches_nothing() {
    let idx = donut_index();
    assert!(idx.search("").is_empty());
    assert!(idx.search("    ").is_empty());
    // Only stopwords analyze to zero terms as well.
    assert!(idx.search("the and of").is_empty());
}

#[test]
fn multi_term_query_intersects() {
    let mut idx = InvertedIndex::new();
    idx.add(&[
        Document::new(3, "a small house"),
        Document::new(7, "small cat"),
        Document::new(9, "small world"),
    ]);
    assert_eq!(idx.postings("cat"), Some(&[7][..]));
    assert_eq!(idx.postings("small"), Some(&[3, 7, 9][..]));
    assert_eq!(idx.search("cat"), vec![7]);
    assert_eq!(idx.search("small cat"), vec![7]);
    assert_eq!(idx.search("cat small"), vec![7]);
    assert!(idx.search("house world").is_empty());
}

#[test]
fn each_document_appears_once_per_term() {
    let mut idx = InvertedIndex::new();
    let doc = Document::new(5, "wild cat, wild cats, wildly wild");
    idx.add(std::iter::once(&doc));
    for term in ["wild", "cat"] {
        assert_eq!(idx.postings(term), Some(&[5][..]), "term {term}");
    }
}

#[test]
fn postings_stay_sorted_across_batches() {
    let mut idx = InvertedIndex::new();
    let first: Vec<Document> = (0..50).map(|i| Document::new(i, format!("common t{i}"))).collect();
    let second: Vec<Document> = (50..100).map(|i| Document::new(i, format!("common t{}", i % 7))).collect();
    idx.add(&first);
    idx.add(&second);

    for term in idx.terms() {
        let ids = idx.postings(term).unwrap();
        assert!(ids.windows(2).all(|w| w[0] < w[1]), "{term} not strictly increasing: {ids:?}");
    }
    let all: Vec<DocId> = (0..100).collect();
    assert_eq!(idx.search("common"), all);
}

#[test]
fn search_matches_brute_force() {
    let texts = [
        "red fox jumps", "red hen", "lazy fox sleeps", "red fox sleeps",
        "hen and fox", "nothing here", "fox red red fox",
    ];
    let docs: Vec<Document> = texts.iter().enumerate().map(|(i, t)| Document::new(i as DocId, *t)).collect();
    let mut idx = InvertedIndex::new();
    idx.add(&docs);

    for query in ["red fox", "fox", "red hen", "fox sleeps", "lazy red"] {
        let qterms = fts_core::analyzer::analyze_to_vec(query);
        let expected: Vec<DocId> = docs
            .iter()
            .filter(|d| {
                let dterms = fts_core::analyzer::analyze_to_vec(&d.text);
                qterms.iter().all(|q| dterms.contains(q))
            })
            .map(|d| d.id)
            .collect();
        assert_eq!(idx.search(query), expected, "query {query:?}");
    }
}
