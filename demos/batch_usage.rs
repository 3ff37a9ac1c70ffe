use search_server::core::types::DocumentStatus;
use search_server::parallel::batch::{process_queries, process_queries_joined};
use search_server::support::remove_duplicates::remove_duplicates;
use search_server::support::request_queue::RequestQueue;
use search_server::SearchServer;

fn main() -> search_server::Result<()> {
    let mut server = SearchServer::new("and with")?;
    server.add_document(1, "funny pet and nasty rat", DocumentStatus::Actual, &[])?;
    server.add_document(2, "funny pet with curly hair", DocumentStatus::Actual, &[])?;
    server.add_document(3, "funny pet and curly hair", DocumentStatus::Actual, &[])?;
    server.add_document(4, "funny pet and curly hair", DocumentStatus::Actual, &[])?;

    let removed = remove_duplicates(&mut server);
    println!("removed duplicate ids: {removed:?}");

    let queries = vec!["curly".to_string(), "rat -curly".to_string(), "nonexistent".to_string()];
    for (query, result) in queries.iter().zip(process_queries(&server, &queries)) {
        match result {
            Ok(docs) => println!("{query:?} -> {} document(s)", docs.len()),
            Err(err) => println!("{query:?} -> error: {err}"),
        }
    }

    let joined = process_queries_joined(&server, &queries);
    println!("joined result count: {}", joined.len());

    let mut request_queue = RequestQueue::new(&server);
    for query in &queries {
        let _ = request_queue.add_find_request(query);
    }
    println!("no-result requests so far: {}", request_queue.no_result_requests());

    Ok(())
}
