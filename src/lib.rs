//! In-memory full-text search engine.
//!
//! Ingests short text documents into an inverted index and answers ranked
//! TF-IDF queries with boolean minus-term exclusion, stop-word filtering,
//! status/predicate filtering and parallel batch execution.

pub mod core;
pub mod diagnostics;
pub mod analysis;
pub mod index;
pub mod query;
pub mod scoring;
pub mod parallel;
pub mod support;
pub mod server;

/*
┌─────────────────────────── SearchServer ───────────────────────────┐
│                                                                     │
│  stop_words: HashSet<Arc<str>>                                     │
│  store: DocumentStore ─┬─ term_to_docs: HashMap<Arc<str>, HashMap>  │
│                        └─ doc_to_terms: HashMap<DocId, HashMap>     │
│  config: SearchServerConfig { shard_count, max_result_document_count}│
│                                                                     │
│  find_top_documents(query, predicate, policy)                      │
│    -> query::compiler::compile_query                               │
│    -> scoring::scorer::find_all_documents (sequential | parallel)   │
│    -> sort + truncate to MAX_RESULT_DOCUMENT_COUNT                  │
└─────────────────────────────────────────────────────────────────────┘
*/

pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::types::{DocumentId, DocumentStatus};
pub use crate::core::config::SearchServerConfig;
pub use crate::parallel::policy::ExecutionPolicy;
pub use crate::server::{SearchServer, FoundDocument, MAX_RESULT_DOCUMENT_COUNT};
