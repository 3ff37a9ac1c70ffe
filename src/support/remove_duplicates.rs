//! Drops documents whose term sets exactly duplicate an earlier document's,
//! grounded on `RemoveDuplicates` in
//! `original_source/search-server/remove_duplicates.h/.cpp`: a set of
//! already-seen word-set "signatures" keyed on sorted distinct terms (TF
//! values don't participate), iterated in insertion order — matching the
//! original's `for (const int& document_id : search_server)`, which walks
//! `document_ids_` in push order — so the first document added with a given
//! term set survives, not the one with the lowest id.

use std::collections::HashSet;
use std::sync::Arc;

use crate::core::types::DocumentId;
use crate::parallel::policy::ExecutionPolicy;
use crate::server::SearchServer;

/// Removes duplicate documents from `server`, returning the removed ids in
/// the order duplicates were discovered (insertion order of `server`).
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocumentId> {
    let ids: Vec<DocumentId> = server.iter_ids().collect();

    let mut seen_signatures: HashSet<Vec<Arc<str>>> = HashSet::new();
    let mut duplicates = Vec::new();
    for id in ids {
        let mut signature: Vec<Arc<str>> = server.word_frequencies(id).keys().cloned().collect();
        signature.sort_unstable_by(|a, b| a.as_ref().cmp(b.as_ref()));
        if !seen_signatures.insert(signature) {
            println!("Found duplicate document id {id}");
            duplicates.push(id);
        }
    }

    for &id in &duplicates {
        server.remove_document(ExecutionPolicy::Sequential, id);
    }
    duplicates
}
