//! Turns a raw query string into a `CompiledQuery`: a sorted, deduplicated
//! set of plus-terms and a deduplicated set of minus-terms, with stop words
//! dropped from both. Mirrors `SearchServer::ParseQuery`/`ParseQueryWord`
//! in `original_source/search-server/search_server.cpp` exactly, including
//! the asymmetry with document ingestion: a query word is validated
//! strictly and an invalid one fails the whole query, where document text
//! silently drops the bad token's emptiness (see `index::document_store`).

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::analysis::tokenizer::{is_valid_word, split_into_words};
use crate::core::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct CompiledQuery {
    /// Sorted (by term value), deduplicated.
    pub plus_words: Vec<Arc<str>>,
    pub minus_words: HashSet<Arc<str>>,
}

struct QueryWord<'a> {
    text: &'a str,
    is_minus: bool,
}

fn parse_query_word(raw: &str) -> Result<QueryWord<'_>> {
    let is_minus = raw.starts_with('-');
    let text = if is_minus { &raw[1..] } else { raw };
    if text.is_empty() {
        return Err(Error::invalid_argument(
            "query word is empty after removing the minus sign",
        ));
    }
    if is_minus && text.starts_with('-') {
        return Err(Error::invalid_argument(format!(
            "query word \"{raw}\" has a double minus"
        )));
    }
    if !is_valid_word(text) {
        return Err(Error::invalid_argument(format!(
            "query word \"{raw}\" is invalid"
        )));
    }
    Ok(QueryWord { text, is_minus })
}

/// Compiles `raw_query` against `stop_words`. Unlike document ingestion,
/// an empty token (from consecutive spaces) is a hard error here, matching
/// the original's strict query-side validation.
pub fn compile_query(raw_query: &str, stop_words: &HashSet<Arc<str>>) -> Result<CompiledQuery> {
    let mut plus = BTreeSet::new();
    let mut minus = HashSet::new();
    for raw in split_into_words(raw_query) {
        let word = parse_query_word(raw)?;
        if stop_words.contains(word.text) {
            continue;
        }
        if word.is_minus {
            minus.insert(Arc::<str>::from(word.text));
        } else {
            plus.insert(Arc::<str>::from(word.text));
        }
    }
    Ok(CompiledQuery {
        plus_words: plus.into_iter().collect(),
        minus_words: minus,
    })
}
