//! Stop-word scanning
//!
//! Locates where generation should have terminated in an already-decoded
//! text. Decoding and tokenization stay in the runner; this helper only
//! answers "which stop word fired first, and where".

/// Location of the first stop word in a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopMatch {
    /// Byte offset where the stop word begins
    pub start: usize,
    /// The stop word that matched
    pub word: String,
}

/// Earliest stop-word occurrence in `text`.
///
/// The earliest byte offset wins. When two stop words match at the same
/// offset (overlapping entries), the one listed first wins — list order
/// affects nothing else. Duplicate entries cannot change the result, and
/// empty entries are ignored.
pub fn first_stop(text: &str, stop_words: &[String]) -> Option<StopMatch> {
    let mut best: Option<StopMatch> = None;
    for word in stop_words {
        if word.is_empty() {
            continue;
        }
        if let Some(start) = text.find(word.as_str()) {
            let earlier = match &best {
                Some(current) => start < current.start,
                None => true,
            };
            if earlier {
                best = Some(StopMatch {
                    start,
                    word: word.clone(),
                });
            }
        }
    }
    best
}

/// Text up to (excluding) the first stop word; unchanged when none match
pub fn truncate_at_stop<'a>(text: &'a str, stop_words: &[String]) -> &'a str {
    match first_stop(text, stop_words) {
        Some(hit) => &text[..hit.start],
        None => text,
    }
}
