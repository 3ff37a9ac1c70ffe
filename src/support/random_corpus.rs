//! Synthetic corpus generator used only by benches and demos, in the style
//! of `create_test_document` in
//! `examples/Khanh-21522203-Drusdenx/benches/database_benchmark.rs`: pick
//! words from a small fixed pool with `rand::Rng` rather than generating
//! arbitrary byte strings, since a benchmark wants realistic word reuse
//! (repeated terms, shared vocabulary) rather than uniformly random text.

use rand::Rng;

const WORD_POOL: &[&str] = &[
    "cat", "dog", "fox", "rat", "owl", "cow", "pig", "hen", "ant", "bee",
    "fluffy", "curly", "nasty", "funny", "white", "groomed", "expressive",
    "white", "collar", "tail", "eyes", "park", "city", "garden", "river",
];

pub fn generate_word(rng: &mut impl Rng) -> &'static str {
    WORD_POOL[rng.gen_range(0..WORD_POOL.len())]
}

pub fn generate_document_text(rng: &mut impl Rng, word_count: usize) -> String {
    (0..word_count).map(|_| generate_word(rng)).collect::<Vec<_>>().join(" ")
}

pub fn generate_ratings(rng: &mut impl Rng, count: usize) -> Vec<i32> {
    (0..count).map(|_| rng.gen_range(-10..=10)).collect()
}

pub fn generate_query(rng: &mut impl Rng, word_count: usize) -> String {
    (0..word_count)
        .map(|_| {
            let word = generate_word(rng);
            if rng.gen_bool(0.15) {
                format!("-{word}")
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn generate_queries(rng: &mut impl Rng, query_count: usize, max_words_per_query: usize) -> Vec<String> {
    (0..query_count)
        .map(|_| generate_query(rng, 1 + rng.gen_range(0..max_words_per_query)))
        .collect()
}
