use criterion::{criterion_group, criterion_main, Criterion};
use fts_core::analyzer::analyze_to_vec;
use fts_core::{Document, InvertedIndex};

const ABSTRACT: &str = "The wildcat is a species complex comprising two small wild cat species: \
the European wildcat (Felis silvestris) and the African wildcat (F. lybica). The European wildcat \
inhabits forests in Europe and the Caucasus, while the African wildcat inhabits semi-arid landscapes \
and steppes in Africa, the Arabian Peninsula, Central Asia, into western India and western China.";

fn bench_analyze(c: &mut Criterion) {
    c.bench_function("analyze_abstract", |b| b.iter(|| analyze_to_vec(ABSTRACT)));
}

fn bench_search(c: &mut Criterion) {
    let docs: Vec<Document> = (0..2_000)
        .map(|i| Document::new(i, format!("{ABSTRACT} doc{} group{}", i, i % 13)))
        .collect();
    let mut idx = InvertedIndex::new();
    idx.add(&docs);
    c.bench_function("search_small_wild_cat", |b| b.iter(|| idx.search("small wild cat")));
    c.bench_function("search_selective", |b| b.iter(|| idx.search("wildcat group7")));
}

criterion_group!(benches, bench_analyze, bench_search);
criterion_main!(benches);
