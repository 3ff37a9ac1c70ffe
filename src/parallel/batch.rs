//! Batch query execution across many independent query strings against one
//! server, mirroring `ProcessQueries`/`ProcessQueriesJoined` in
//! `original_source/search-server/process_queries.h/.cpp`: each query is
//! resolved independently (so one query's `Err` doesn't affect another's),
//! `process_queries` keeps per-query grouping, `process_queries_joined`
//! concatenates every query's results in query order.

use rayon::prelude::*;

use crate::core::error::Result;
use crate::scoring::scorer::FoundDocument;
use crate::server::SearchServer;

/// Runs every query in `queries` against `server` concurrently via `rayon`,
/// each with its own sequential `find_top_documents` call. Returns one
/// `Result` per input query, in input order.
pub fn process_queries(server: &SearchServer, queries: &[String]) -> Vec<Result<Vec<FoundDocument>>> {
    queries
        .par_iter()
        .map(|query| server.find_top_documents_default(query))
        .collect()
}

/// Like `process_queries`, but concatenates every successful query's
/// documents into one flat list, in query order, dropping failed queries.
pub fn process_queries_joined(server: &SearchServer, queries: &[String]) -> Vec<FoundDocument> {
    process_queries(server, queries)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DocumentStatus;

    fn sample_server() -> SearchServer {
        let mut s = SearchServer::new("in the").unwrap();
        s.add_document(0, "white cat and fashionable collar", DocumentStatus::Actual, &[8, -3])
            .unwrap();
        s.add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7])
            .unwrap();
        s.add_document(2, "groomed dog expressive eyes", DocumentStatus::Actual, &[5, -12, 2, 1])
            .unwrap();
        s
    }

    #[test]
    fn process_queries_preserves_order_and_isolates_errors() {
        let server = sample_server();
        let queries = vec!["cat".to_string(), "cat --dog".to_string(), "dog".to_string()];
        let results = process_queries(&server, &queries);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    #[test]
    fn process_queries_joined_concatenates_in_query_order() {
        let server = sample_server();
        let queries = vec!["cat".to_string(), "dog".to_string()];
        let joined = process_queries_joined(&server, &queries);
        assert!(!joined.is_empty());
    }
}
