//! TF-IDF accumulation and ranking. Grounded on `FindAllDocuments` /
//! `FindTopDocuments` in `original_source/search-server/search_server.cpp`
//! (accumulate plus-term contributions, erase documents hit by a
//! minus-term, sort by descending relevance with a rating tiebreak, cap at
//! `MAX_RESULT_DOCUMENT_COUNT`) and on
//! `examples/Khanh-21522203-Drusdenx/src/scoring/scorer.rs`'s `TfIdfScorer`
//! for the idiomatic shape of a standalone scoring module. The parallel
//! path accumulates into `index::concurrent_map::ShardedAccumulator`
//! instead of a plain `HashMap`.

use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::core::types::{DocumentId, DocumentStatus};
use crate::index::concurrent_map::ShardedAccumulator;
use crate::index::document_store::DocumentStore;
use crate::parallel::policy::ExecutionPolicy;
use crate::query::compiler::CompiledQuery;

pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
const RELEVANCE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct FoundDocument {
    pub id: DocumentId,
    pub relevance: f64,
    pub rating: i32,
}

fn inverse_document_frequency(store: &DocumentStore, term: &str) -> Option<f64> {
    let doc_freq = store.posting_list(term)?.len();
    if doc_freq == 0 {
        return None;
    }
    Some((store.document_count() as f64 / doc_freq as f64).ln())
}

fn accumulate_sequential(store: &DocumentStore, query: &CompiledQuery) -> HashMap<DocumentId, f64> {
    let mut relevance: HashMap<DocumentId, f64> = HashMap::new();
    for term in &query.plus_words {
        let Some(idf) = inverse_document_frequency(store, term) else {
            continue;
        };
        if let Some(postings) = store.posting_list(term) {
            for (&id, &tf) in postings {
                *relevance.entry(id).or_insert(0.0) += tf * idf;
            }
        }
    }
    for term in &query.minus_words {
        if let Some(postings) = store.posting_list(term) {
            for &id in postings.keys() {
                relevance.remove(&id);
            }
        }
    }
    relevance
}

fn accumulate_parallel(
    store: &DocumentStore,
    query: &CompiledQuery,
    shard_count: usize,
) -> HashMap<DocumentId, f64> {
    let acc = ShardedAccumulator::new(shard_count);
    query.plus_words.par_iter().for_each(|term| {
        let Some(idf) = inverse_document_frequency(store, term) else {
            return;
        };
        if let Some(postings) = store.posting_list(term) {
            for (&id, &tf) in postings {
                acc.accumulate(id, tf * idf);
            }
        }
    });
    query.minus_words.par_iter().for_each(|term| {
        if let Some(postings) = store.posting_list(term) {
            for &id in postings.keys() {
                acc.erase(id);
            }
        }
    });
    acc.build_ordinary_map()
}

/// Accumulates relevance for every document matched by `query`'s plus-terms
/// and not excluded by any minus-term. Does not apply a status/predicate
/// filter or truncate — see `rank`.
pub fn find_all_documents(
    store: &DocumentStore,
    query: &CompiledQuery,
    policy: ExecutionPolicy,
    shard_count: usize,
) -> HashMap<DocumentId, f64> {
    match policy {
        ExecutionPolicy::Sequential => accumulate_sequential(store, query),
        ExecutionPolicy::Parallel => accumulate_parallel(store, query, shard_count),
    }
}

/// Applies `predicate`, builds `FoundDocument`s, sorts by descending
/// relevance (documents within `RELEVANCE_EPSILON` of each other break ties
/// by descending rating) and truncates to `limit`. Ties that survive both
/// comparisons keep ascending document-id order, since the input is sorted
/// by id before the relevance/rating sort and Rust's sort is stable.
pub fn rank<F>(
    store: &DocumentStore,
    scored: HashMap<DocumentId, f64>,
    predicate: F,
    limit: usize,
) -> Vec<FoundDocument>
where
    F: Fn(DocumentId, DocumentStatus, i32) -> bool,
{
    let mut documents: Vec<FoundDocument> = scored
        .into_iter()
        .filter_map(|(id, relevance)| {
            let status = store.status_of(id)?;
            let rating = store.rating_of(id)?;
            predicate(id, status, rating).then_some(FoundDocument { id, relevance, rating })
        })
        .collect();

    documents.sort_by_key(|d| d.id);
    documents.sort_by(|a, b| {
        if (a.relevance - b.relevance).abs() < RELEVANCE_EPSILON {
            b.rating.cmp(&a.rating)
        } else {
            b.relevance.partial_cmp(&a.relevance).unwrap_or(Ordering::Equal)
        }
    });
    documents.truncate(limit);
    documents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DocumentStatus;
    use crate::index::document_store::DocumentStore;
    use crate::query::compiler::compile_query;
    use std::collections::HashSet;

    fn sample_store() -> DocumentStore {
        let mut s = DocumentStore::from_text("in the").unwrap();
        s.add_document(0, "white cat and fashionable collar", DocumentStatus::Actual, &[8, -3])
            .unwrap();
        s.add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7])
            .unwrap();
        s.add_document(2, "groomed dog expressive eyes", DocumentStatus::Actual, &[5, -12, 2, 1])
            .unwrap();
        s.add_document(3, "groomed starling evgeniy", DocumentStatus::Banned, &[9])
            .unwrap();
        s
    }

    #[test]
    fn tf_idf_matches_the_closed_form_for_a_single_hit() {
        let mut store = DocumentStore::from_text("").unwrap();
        store
            .add_document(42, "cat whith collar in the city", DocumentStatus::Actual, &[1, 2, 3])
            .unwrap();
        store
            .add_document(52, "dog whith collar in the vilage", DocumentStatus::Actual, &[1, 2, 3])
            .unwrap();
        let query = compile_query("cat", &HashSet::new()).unwrap();
        let scored = find_all_documents(&store, &query, ExecutionPolicy::Sequential, 4);
        let expected = (2.0_f64 / 1.0).ln() * (1.0 / 6.0);
        assert!((scored[&42] - expected).abs() < 1e-12);
        assert!(!scored.contains_key(&52));
    }

    #[test]
    fn sequential_and_parallel_accumulation_agree() {
        let store = sample_store();
        let query = compile_query("fluffy groomed cat", &HashSet::new()).unwrap();
        let seq = find_all_documents(&store, &query, ExecutionPolicy::Sequential, 4);
        let par = find_all_documents(&store, &query, ExecutionPolicy::Parallel, 4);
        assert_eq!(seq.len(), par.len());
        for (id, relevance) in &seq {
            assert!((par[id] - relevance).abs() < 1e-9);
        }
    }

    #[test]
    fn minus_word_excludes_matching_documents() {
        let store = sample_store();
        let query = compile_query("cat -groomed", &HashSet::new()).unwrap();
        let seq = find_all_documents(&store, &query, ExecutionPolicy::Sequential, 4);
        assert!(!seq.contains_key(&2));
    }

    #[test]
    fn ranking_orders_by_relevance_then_rating_and_truncates() {
        let store = sample_store();
        let query = compile_query("fluffy groomed cat", &HashSet::new()).unwrap();
        let scored = find_all_documents(&store, &query, ExecutionPolicy::Sequential, 4);
        let ranked = rank(&store, scored, |_, status, _| status == DocumentStatus::Actual, MAX_RESULT_DOCUMENT_COUNT);
        assert!(ranked.windows(2).all(|w| w[0].relevance >= w[1].relevance - 1e-9));
        assert!(ranked.iter().all(|d| d.id != 3));
    }

    #[test]
    fn predicate_filters_out_documents() {
        let store = sample_store();
        let query = compile_query("groomed", &HashSet::new()).unwrap();
        let scored = find_all_documents(&store, &query, ExecutionPolicy::Sequential, 4);
        let ranked = rank(&store, scored, |id, _, _| id != 2, MAX_RESULT_DOCUMENT_COUNT);
        assert!(ranked.iter().all(|d| d.id != 2));
    }

    #[test]
    fn unknown_term_contributes_nothing() {
        let store = sample_store();
        let query = compile_query("nonexistent", &HashSet::new()).unwrap();
        let scored = find_all_documents(&store, &query, ExecutionPolicy::Sequential, 4);
        assert!(scored.is_empty());
    }
}
