use search_server::core::types::DocumentStatus;
use search_server::{ExecutionPolicy, SearchServer};

fn main() -> search_server::Result<()> {
    let mut server = SearchServer::new("and in on")?;

    server.add_document(0, "white cat and fashionable collar", DocumentStatus::Actual, &[8, -3])?;
    server.add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7])?;
    server.add_document(2, "groomed dog expressive eyes", DocumentStatus::Actual, &[5, -12, 2, 1])?;
    server.add_document(3, "groomed starling evgeniy", DocumentStatus::Banned, &[9])?;

    println!("ACTUAL results for \"fluffy groomed cat\":");
    for doc in server.find_top_documents_default("fluffy groomed cat")? {
        println!("  id={} relevance={:.6} rating={}", doc.id, doc.relevance, doc.rating);
    }

    let (matched, status) = server.match_document("fluffy -groomed", 1, ExecutionPolicy::Sequential)?;
    println!("match_document(1) -> {matched:?} ({status:?})");

    server.remove_document(ExecutionPolicy::Sequential, 1);
    println!("document_count after removal: {}", server.document_count());

    Ok(())
}
