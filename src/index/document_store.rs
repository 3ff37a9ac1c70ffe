//! Holds per-document metadata and text, and the two cross-indexes
//! (`term -> doc -> TF` and `doc -> term -> TF`) that must always stay in
//! lock-step (§3, invariant I4).
//!
//! Index keys are `Arc<str>`, interned once per unique term and shared
//! (refcounted, not byte-copied) between both maps. Document text is owned
//! by each metadata entry. This is the "owned strings" alternative the spec
//! explicitly sanctions in place of an address-stable arena of
//! `string_view`s (see SPEC_FULL.md §3/§9).

use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use crate::analysis::tokenizer::{is_valid_word, split_into_words};
use crate::core::error::{Error, Result};
use crate::core::types::{compute_average_rating, DocumentData, DocumentId, DocumentStatus};
use crate::parallel::policy::ExecutionPolicy;

pub struct DocumentStore {
    stop_words: HashSet<Arc<str>>,
    term_to_docs: HashMap<Arc<str>, HashMap<DocumentId, f64>>,
    doc_to_terms: HashMap<DocumentId, HashMap<Arc<str>, f64>>,
    metadata: HashMap<DocumentId, DocumentData>,
    texts: HashMap<DocumentId, String>,
    document_ids: Vec<DocumentId>,
}

impl DocumentStore {
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for word in stop_words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(Error::invalid_argument(format!(
                    "stop word \"{word}\" is invalid"
                )));
            }
            set.insert(Arc::from(word));
        }
        Ok(DocumentStore {
            stop_words: set,
            term_to_docs: HashMap::new(),
            doc_to_terms: HashMap::new(),
            metadata: HashMap::new(),
            texts: HashMap::new(),
            document_ids: Vec::new(),
        })
    }

    pub fn from_text(stop_words_text: &str) -> Result<Self> {
        let words: Vec<&str> = split_into_words(stop_words_text)
            .into_iter()
            .filter(|w| !w.is_empty())
            .collect();
        Self::new(words)
    }

    fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn stop_words(&self) -> &HashSet<Arc<str>> {
        &self.stop_words
    }

    /// Returns the existing interned `Arc<str>` for `word` if the term is
    /// already indexed, otherwise allocates a fresh one.
    fn intern_term(&self, word: &str) -> Arc<str> {
        match self.term_to_docs.get_key_value(word) {
            Some((term, _)) => term.clone(),
            None => Arc::from(word),
        }
    }

    /// Splits `text` on spaces, drops empty runs (a Term is a non-empty
    /// sequence of bytes per §3) and rejects control-byte tokens.
    fn split_and_validate<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        let mut words = Vec::new();
        for word in split_into_words(text) {
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(Error::invalid_argument(format!(
                    "word \"{word}\" is invalid"
                )));
            }
            words.push(word);
        }
        Ok(words)
    }

    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 {
            return Err(Error::invalid_argument(format!(
                "document id {id} must be non-negative"
            )));
        }
        if self.metadata.contains_key(&id) {
            return Err(Error::invalid_argument(format!(
                "document id {id} is already live"
            )));
        }

        let words = self.split_and_validate(text)?;
        let non_stop: Vec<&str> = words
            .into_iter()
            .filter(|w| !self.is_stop_word(w))
            .collect();

        let mut forward: HashMap<Arc<str>, f64> = HashMap::new();
        if !non_stop.is_empty() {
            let inv_count = 1.0 / non_stop.len() as f64;
            for word in non_stop {
                let term = self.intern_term(word);
                *forward.entry(term).or_insert(0.0) += inv_count;
            }
        }

        for (term, tf) in &forward {
            self.term_to_docs
                .entry(term.clone())
                .or_default()
                .insert(id, *tf);
        }
        self.doc_to_terms.insert(id, forward);

        self.metadata.insert(
            id,
            DocumentData {
                rating: compute_average_rating(ratings),
                status,
            },
        );
        self.texts.insert(id, text.to_string());
        self.document_ids.push(id);
        Ok(())
    }

    pub fn remove_document(&mut self, policy: ExecutionPolicy, id: DocumentId) {
        let Some(pos) = self.document_ids.iter().position(|&d| d == id) else {
            return;
        };
        self.document_ids.remove(pos);
        self.metadata.remove(&id);
        self.texts.remove(&id);

        let Some(terms) = self.doc_to_terms.remove(&id) else {
            return;
        };

        match policy {
            ExecutionPolicy::Sequential => {
                for term in terms.keys() {
                    if let Some(postings) = self.term_to_docs.get_mut(term.as_ref()) {
                        postings.remove(&id);
                        if postings.is_empty() {
                            self.term_to_docs.remove(term.as_ref());
                        }
                    }
                }
            }
            ExecutionPolicy::Parallel => {
                // The index's outer map isn't `Sync` for mutation, so the
                // purge itself stays sequential; what we parallelise is
                // deciding which postings become empty, which is the part
                // that scales with the document's term count.
                let term_list: Vec<&Arc<str>> = terms.keys().collect();
                let empties: Vec<bool> = term_list
                    .par_iter()
                    .map(|term| {
                        self.term_to_docs
                            .get(term.as_ref())
                            .map(|postings| postings.len() <= 1)
                            .unwrap_or(false)
                    })
                    .collect();
                for (term, becomes_empty) in term_list.into_iter().zip(empties) {
                    if becomes_empty {
                        self.term_to_docs.remove(term.as_ref());
                    } else if let Some(postings) = self.term_to_docs.get_mut(term.as_ref()) {
                        postings.remove(&id);
                    }
                }
            }
        }
    }

    pub fn get_word_frequencies(&self, id: DocumentId) -> &HashMap<Arc<str>, f64> {
        static EMPTY: OnceLock<HashMap<Arc<str>, f64>> = OnceLock::new();
        self.doc_to_terms
            .get(&id)
            .unwrap_or_else(|| EMPTY.get_or_init(HashMap::new))
    }

    pub fn document_count(&self) -> usize {
        self.document_ids.len()
    }

    pub fn iter_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.document_ids.iter().copied()
    }

    pub fn is_live(&self, id: DocumentId) -> bool {
        self.metadata.contains_key(&id)
    }

    pub fn status_of(&self, id: DocumentId) -> Option<DocumentStatus> {
        self.metadata.get(&id).map(|d| d.status)
    }

    pub fn rating_of(&self, id: DocumentId) -> Option<i32> {
        self.metadata.get(&id).map(|d| d.rating)
    }

    pub fn text_of(&self, id: DocumentId) -> Option<&str> {
        self.texts.get(&id).map(String::as_str)
    }

    pub fn posting_list(&self, term: &str) -> Option<&HashMap<DocumentId, f64>> {
        self.term_to_docs.get(term)
    }

    /// Terms present in `id`'s document that occur in `words`, in `words`'
    /// own iteration order, deduplicated.
    pub fn matching_terms<'w>(
        &self,
        id: DocumentId,
        words: impl Iterator<Item = &'w Arc<str>>,
        policy: ExecutionPolicy,
    ) -> Vec<Arc<str>> {
        let doc_terms = self.get_word_frequencies(id);
        match policy {
            ExecutionPolicy::Sequential => words
                .filter(|w| doc_terms.contains_key(w.as_ref()))
                .cloned()
                .collect(),
            ExecutionPolicy::Parallel => {
                let words: Vec<&Arc<str>> = words.collect();
                let mut matched: Vec<Arc<str>> = words
                    .par_iter()
                    .filter(|w| doc_terms.contains_key(w.as_ref()))
                    .map(|w| (*w).clone())
                    .collect();
                matched.sort_unstable_by(|a, b| a.as_ref().cmp(b.as_ref()));
                matched.dedup();
                matched
            }
        }
    }

    pub fn any_term_present(
        &self,
        id: DocumentId,
        words: impl Iterator<Item = Arc<str>>,
        policy: ExecutionPolicy,
    ) -> bool {
        let doc_terms = self.get_word_frequencies(id);
        match policy {
            ExecutionPolicy::Sequential => words.into_iter().any(|w| doc_terms.contains_key(w.as_ref())),
            ExecutionPolicy::Parallel => {
                let words: Vec<Arc<str>> = words.collect();
                words.par_iter().any(|w| doc_terms.contains_key(w.as_ref()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(stop_words: &str) -> DocumentStore {
        DocumentStore::from_text(stop_words).unwrap()
    }

    #[test]
    fn add_document_computes_tf_over_non_stop_tokens() {
        let mut s = store("in the");
        s.add_document(42, "cat in the city", DocumentStatus::Actual, &[1, 2, 3])
            .unwrap();
        let freqs = s.get_word_frequencies(42);
        assert_eq!(freqs.len(), 2); // cat, city
        assert!((freqs.get("cat").copied().unwrap_or(0.0) - 0.5).abs() < 1e-9);
        assert!(!freqs.contains_key("in"));
    }

    #[test]
    fn duplicate_tokens_accumulate_tf() {
        let mut s = store("");
        s.add_document(1, "flurry cat flurry tail", DocumentStatus::Actual, &[])
            .unwrap();
        let freqs = s.get_word_frequencies(1);
        assert!((freqs.get("flurry").copied().unwrap() - 0.5).abs() < 1e-9);
        assert!((freqs.get("cat").copied().unwrap() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn rejects_negative_or_duplicate_id() {
        let mut s = store("");
        assert!(s.add_document(-1, "cat", DocumentStatus::Actual, &[]).is_err());
        s.add_document(1, "cat", DocumentStatus::Actual, &[]).unwrap();
        assert!(s.add_document(1, "dog", DocumentStatus::Actual, &[]).is_err());
    }

    #[test]
    fn rejects_control_byte_in_text() {
        let mut s = store("");
        assert!(s
            .add_document(1, "cat\tdog", DocumentStatus::Actual, &[])
            .is_err());
    }

    #[test]
    fn index_symmetry_holds_after_add_and_remove() {
        let mut s = store("");
        s.add_document(1, "cat dog cat", DocumentStatus::Actual, &[])
            .unwrap();
        for (term, tf) in s.get_word_frequencies(1).clone() {
            assert_eq!(s.posting_list(&term).unwrap().get(&1), Some(&tf));
        }
        s.remove_document(ExecutionPolicy::Sequential, 1);
        assert!(!s.is_live(1));
        assert!(s.posting_list("cat").is_none() || !s.posting_list("cat").unwrap().contains_key(&1));
        assert_eq!(s.get_word_frequencies(1).len(), 0);
    }

    #[test]
    fn remove_document_is_idempotent() {
        let mut s = store("");
        s.add_document(1, "cat", DocumentStatus::Actual, &[]).unwrap();
        s.remove_document(ExecutionPolicy::Sequential, 1);
        s.remove_document(ExecutionPolicy::Sequential, 1);
        assert_eq!(s.document_count(), 0);
    }

    #[test]
    fn remove_then_add_succeeds() {
        let mut s = store("");
        s.add_document(1, "cat", DocumentStatus::Actual, &[]).unwrap();
        s.remove_document(ExecutionPolicy::Sequential, 1);
        s.add_document(1, "dog", DocumentStatus::Actual, &[]).unwrap();
        assert!(s.get_word_frequencies(1).contains_key("dog"));
    }

    #[test]
    fn parallel_and_sequential_removal_agree() {
        let mut seq = store("");
        let mut par = store("");
        for s in [&mut seq, &mut par] {
            s.add_document(1, "cat dog bird", DocumentStatus::Actual, &[])
                .unwrap();
            s.add_document(2, "cat bird", DocumentStatus::Actual, &[])
                .unwrap();
        }
        seq.remove_document(ExecutionPolicy::Sequential, 1);
        par.remove_document(ExecutionPolicy::Parallel, 1);
        assert_eq!(seq.document_count(), par.document_count());
        assert_eq!(
            seq.posting_list("cat").map(|m| m.len()),
            par.posting_list("cat").map(|m| m.len())
        );
    }

    #[test]
    fn get_word_frequencies_on_missing_id_is_empty_and_does_not_insert() {
        let s = store("");
        assert!(s.get_word_frequencies(999).is_empty());
        assert_eq!(s.document_count(), 0);
    }
}
