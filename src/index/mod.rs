pub mod concurrent_map;
pub mod document_store;
