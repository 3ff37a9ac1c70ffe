use serde::{Deserialize, Serialize};

/// Document identifier. Negative values are rejected at the API boundary;
/// the type stays signed so that validation is a normal comparison rather
/// than a conversion.
pub type DocumentId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// Per-document metadata held by the store; everything except the text
/// itself, which lives alongside this entry (see `index::document_store`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
}

/// Mean of `ratings`, truncated toward zero; 0 for an empty vector.
pub fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
    (sum / ratings.len() as i64) as i32
}
