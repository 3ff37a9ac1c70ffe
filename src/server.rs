//! Public facade. Wraps a `DocumentStore` and a `SearchServerConfig`,
//! exposing the operations `original_source/search-server/search_server.h`
//! declares on its `SearchServer` class: add/remove a document, rank
//! top documents for a query, match a single document against a query, and
//! read back per-document word frequencies.

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::config::SearchServerConfig;
use crate::core::error::{Error, Result};
use crate::core::types::{DocumentId, DocumentStatus};
use crate::index::document_store::DocumentStore;
use crate::parallel::policy::ExecutionPolicy;
use crate::query::compiler::compile_query;
pub use crate::scoring::scorer::{FoundDocument, MAX_RESULT_DOCUMENT_COUNT};
use crate::scoring::scorer::{find_all_documents, rank};

pub struct SearchServer {
    store: DocumentStore,
    config: SearchServerConfig,
}

impl SearchServer {
    pub fn new(stop_words_text: &str) -> Result<Self> {
        Self::with_config(stop_words_text, SearchServerConfig::default())
    }

    pub fn from_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_words_with_config(stop_words, SearchServerConfig::default())
    }

    pub fn with_config(stop_words_text: &str, config: SearchServerConfig) -> Result<Self> {
        Self::apply_thread_pool_config(&config);
        Ok(SearchServer {
            store: DocumentStore::from_text(stop_words_text)?,
            config,
        })
    }

    pub fn from_words_with_config<I, S>(stop_words: I, config: SearchServerConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::apply_thread_pool_config(&config);
        Ok(SearchServer {
            store: DocumentStore::new(stop_words)?,
            config,
        })
    }

    fn apply_thread_pool_config(config: &SearchServerConfig) {
        let threads = config.worker_threads.unwrap_or_else(num_cpus::get);
        let _ = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global();
    }

    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        self.store.add_document(id, text, status, ratings)
    }

    pub fn remove_document(&mut self, policy: ExecutionPolicy, id: DocumentId) {
        self.store.remove_document(policy, id)
    }

    pub fn document_count(&self) -> usize {
        self.store.document_count()
    }

    pub fn iter_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.store.iter_ids()
    }

    pub fn text_of(&self, id: DocumentId) -> Option<&str> {
        self.store.text_of(id)
    }

    pub fn word_frequencies(&self, id: DocumentId) -> &HashMap<Arc<str>, f64> {
        self.store.get_word_frequencies(id)
    }

    pub fn find_top_documents<F>(
        &self,
        raw_query: &str,
        predicate: F,
        policy: ExecutionPolicy,
    ) -> Result<Vec<FoundDocument>>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let query = compile_query(raw_query, self.store.stop_words())?;
        let scored = find_all_documents(&self.store, &query, policy, self.config.shard_count);
        Ok(rank(&self.store, scored, predicate, self.config.max_result_document_count))
    }

    pub fn find_top_documents_default(&self, raw_query: &str) -> Result<Vec<FoundDocument>> {
        self.find_top_documents(
            raw_query,
            |_, status, _| status == DocumentStatus::Actual,
            ExecutionPolicy::Sequential,
        )
    }

    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<FoundDocument>> {
        self.find_top_documents(
            raw_query,
            move |_, doc_status, _| doc_status == status,
            ExecutionPolicy::Sequential,
        )
    }

    pub fn find_top_documents_with<F>(&self, raw_query: &str, predicate: F) -> Result<Vec<FoundDocument>>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        self.find_top_documents(raw_query, predicate, ExecutionPolicy::Sequential)
    }

    /// Matches `raw_query` against a single live document: `Err` if the
    /// query is malformed or `id` isn't live; otherwise the plus-terms
    /// present in the document (empty if any minus-term is present) and
    /// the document's status.
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocumentId,
        policy: ExecutionPolicy,
    ) -> Result<(Vec<Arc<str>>, DocumentStatus)> {
        let status = self
            .store
            .status_of(id)
            .ok_or_else(|| Error::out_of_range(format!("document id {id} is not live")))?;
        let query = compile_query(raw_query, self.store.stop_words())?;

        if self
            .store
            .any_term_present(id, query.minus_words.iter().cloned(), policy)
        {
            return Ok((Vec::new(), status));
        }
        let matched = self.store.matching_terms(id, query.plus_words.iter(), policy);
        Ok((matched, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_server() -> SearchServer {
        let mut s = SearchServer::new("in the").unwrap();
        s.add_document(0, "white cat and fashionable collar", DocumentStatus::Actual, &[8, -3])
            .unwrap();
        s.add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7])
            .unwrap();
        s.add_document(2, "groomed dog expressive eyes", DocumentStatus::Banned, &[5, -12, 2, 1])
            .unwrap();
        s
    }

    #[test]
    fn find_top_documents_default_filters_to_actual_status() {
        let server = sample_server();
        let found = server.find_top_documents_default("dog").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn find_top_documents_with_status_selects_banned() {
        let server = sample_server();
        let found = server
            .find_top_documents_with_status("dog", DocumentStatus::Banned)
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
    }

    #[test]
    fn match_document_returns_empty_on_minus_word() {
        let server = sample_server();
        let (words, status) = server
            .match_document("cat -fluffy", 1, ExecutionPolicy::Sequential)
            .unwrap();
        assert!(words.is_empty());
        assert_eq!(status, DocumentStatus::Actual);
    }

    #[test]
    fn match_document_returns_matched_plus_words() {
        let server = sample_server();
        let (words, _) = server
            .match_document("cat tail bird", 1, ExecutionPolicy::Sequential)
            .unwrap();
        let words: Vec<&str> = words.iter().map(|w| w.as_ref()).collect();
        assert_eq!(words, vec!["cat", "tail"]);
    }

    #[test]
    fn match_document_on_missing_id_is_out_of_range() {
        let server = sample_server();
        assert!(server
            .match_document("cat", 999, ExecutionPolicy::Sequential)
            .is_err());
    }

    #[test]
    fn remove_document_drops_it_from_results() {
        let mut server = sample_server();
        server.remove_document(ExecutionPolicy::Sequential, 1);
        assert_eq!(server.document_count(), 2);
        let found = server.find_top_documents_default("fluffy").unwrap();
        assert!(found.is_empty());
    }
}
