use serde::{Deserialize, Serialize};

/// Tunables the spec leaves as implementation defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchServerConfig {
    /// Shard count for the concurrent accumulator used by parallel scoring.
    pub shard_count: usize,
    /// Truncation limit for `find_top_documents`.
    pub max_result_document_count: usize,
    /// Worker threads for the rayon pool backing `ExecutionPolicy::Parallel`.
    /// `None` lets rayon pick `num_cpus::get()`.
    pub worker_threads: Option<usize>,
}

impl Default for SearchServerConfig {
    fn default() -> Self {
        SearchServerConfig {
            shard_count: 8,
            max_result_document_count: 5,
            worker_threads: None,
        }
    }
}
