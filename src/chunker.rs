//! Document chunking
//!
//! Splits document text into bounded word-count segments so each segment
//! fits within the completion service's input limit.

use tracing::debug;

/// Split text into chunks of at most `max_tokens` whitespace-delimited
/// tokens each.
///
/// A "token" is a maximal run of non-whitespace characters and counts as 1
/// against the budget regardless of its length, so the budget is a coarse
/// word-count ceiling rather than a true sub-word token limit. Tokens are
/// accumulated greedily; when the next token would exceed the budget the
/// current chunk is closed and a new one starts with that token. A single
/// token is never split or dropped, so every chunk holds at least one token.
///
/// Concatenating the chunks in order and re-splitting on whitespace
/// reproduces the original token sequence exactly.
pub fn split_into_chunks(text: &str, max_tokens: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for token in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 > max_tokens {
            chunks.push(current.join(" "));
            current.clear();
        }
        current.push(token);
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    debug!(
        input_len = text.len(),
        chunk_count = chunks.len(),
        max_tokens,
        "Text chunked"
    );

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_count(chunk: &str) -> usize {
        chunk.split_whitespace().count()
    }

    #[test]
    fn chunking_is_lossless() {
        let text = "The quick  brown fox\njumps over\tthe lazy dog. \
                    Pack my box with five dozen liquor jugs.";
        let chunks = split_into_chunks(text, 3);

        let original: Vec<&str> = text.split_whitespace().collect();
        let rejoined = chunks.join(" ");
        let roundtrip: Vec<&str> = rejoined.split_whitespace().collect();

        assert_eq!(roundtrip, original);
    }

    #[test]
    fn no_chunk_exceeds_budget() {
        let text = "one two three four five six seven eight nine ten eleven";
        for budget in 1..=12 {
            for chunk in split_into_chunks(text, budget) {
                assert!(token_count(&chunk) <= budget, "budget {budget} violated by {chunk:?}");
            }
        }
    }

    #[test]
    fn over_long_single_token_is_emitted_alone() {
        let text = "short pneumonoultramicroscopicsilicovolcanoconiosis short";
        let chunks = split_into_chunks(text, 1);

        assert_eq!(
            chunks,
            vec![
                "short".to_string(),
                "pneumonoultramicroscopicsilicovolcanoconiosis".to_string(),
                "short".to_string(),
            ]
        );
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split_into_chunks("", 3500).is_empty());
        assert!(split_into_chunks("   \n\t  ", 3500).is_empty());
    }

    #[test]
    fn four_thousand_tokens_with_budget_3500_gives_two_chunks() {
        // 5 repeated paragraphs of 800 tokens each
        let paragraph = "word ".repeat(800);
        let text = paragraph.repeat(5);
        assert_eq!(text.split_whitespace().count(), 4000);

        let chunks = split_into_chunks(&text, 3500);
        assert_eq!(chunks.len(), 2);
        assert_eq!(token_count(&chunks[0]), 3500);
        assert_eq!(token_count(&chunks[1]), 500);
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunks = split_into_chunks("alpha beta gamma", 3500);
        assert_eq!(chunks, vec!["alpha beta gamma".to_string()]);
    }
}
