//! Byte-oriented splitting, deliberately not Unicode word segmentation:
//! the spec pins `SplitIntoWords`' exact behavior (split on ASCII `' '`,
//! empty runs pass through as empty slices for the caller to filter).

/// Splits `text` on ASCII space. Consecutive spaces produce empty slices.
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split(' ').collect()
}

/// True iff no byte in `word` is a control byte (`< 0x20`).
pub fn is_valid_word(word: &str) -> bool {
    word.bytes().all(|b| b >= 0x20)
}
