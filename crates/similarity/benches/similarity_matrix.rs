//! Benchmarks for vectorization and similarity matrix construction
//!
//! Run with: cargo bench --package similarity
//!
//! Uses a synthetic catalog so no data files are needed.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use similarity::{SimilarityMatrix, TfidfVectorizer};

const WORDS: &[&str] = &[
    "space", "war", "robots", "heist", "detective", "romance", "comedy", "alien",
    "dragon", "kingdom", "ocean", "pirate", "city", "murder", "family", "journey",
    "school", "music", "ghost", "island", "army", "queen", "prison", "escape",
];

fn synthetic_corpus(n_docs: usize) -> Vec<String> {
    (0..n_docs)
        .map(|i| {
            (0..12)
                .map(|k| WORDS[(i * 7 + k * k * 3 + k) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn bench_vectorize(c: &mut Criterion) {
    let corpus = synthetic_corpus(2000);
    let vectorizer = TfidfVectorizer::new();

    c.bench_function("tfidf_fit_transform_2000", |b| {
        b.iter(|| {
            let space = vectorizer.fit_transform(black_box(corpus.as_slice())).unwrap();
            black_box(space)
        })
    });
}

fn bench_similarity_matrix(c: &mut Criterion) {
    let corpus = synthetic_corpus(2000);
    let space = TfidfVectorizer::new().fit_transform(corpus.as_slice()).unwrap();

    c.bench_function("similarity_matrix_2000", |b| {
        b.iter(|| {
            let matrix = SimilarityMatrix::from_vector_space(black_box(&space));
            black_box(matrix)
        })
    });
}

criterion_group!(benches, bench_vectorize, bench_similarity_matrix);
criterion_main!(benches);
