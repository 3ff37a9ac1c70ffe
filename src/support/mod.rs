#[cfg(any(test, feature = "random_corpus"))]
pub mod random_corpus;
pub mod remove_duplicates;
pub mod request_queue;
