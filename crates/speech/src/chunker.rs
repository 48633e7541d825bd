//! Sentence-aware text chunking for TTS
//!
//! The TTS API caps input length per request, so replies are split on
//! sentence boundaries and greedily packed up to the limit. A single
//! sentence longer than the limit is sent as its own chunk rather than
//! split mid-sentence.

/// Split text into sentences, keeping terminal punctuation attached
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut in_terminator = false;

    for (i, c) in text.char_indices() {
        let is_terminator = matches!(c, '.' | '!' | '?');
        if in_terminator && !is_terminator {
            sentences.push(&text[start..i]);
            start = i;
        }
        in_terminator = is_terminator;
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences
}

/// Chunk text into pieces of at most `max_chars` characters
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in split_sentences(text) {
        if current.chars().count() + sentence.chars().count() <= max_chars {
            current.push_str(sentence);
        } else {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            current.push_str(sentence);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = chunk_text("Hello there. How are you?", 200);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], "Hello there. How are you?");
    }

    #[test]
    fn test_splits_on_sentence_boundary() {
        let text = "First sentence here. Second sentence here. Third one.";
        let chunks = chunk_text(text, 25);
        assert!(chunks.len() >= 2);
        for chunk in &chunks[..chunks.len() - 1] {
            assert!(chunk.trim_end().ends_with('.'));
        }
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_oversize_sentence_kept_whole() {
        let long = "a".repeat(300);
        let chunks = chunk_text(&long, 200);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 300);
    }

    #[test]
    fn test_empty_text() {
        assert!(chunk_text("", 200).is_empty());
    }

    #[test]
    fn test_no_terminal_punctuation() {
        let chunks = chunk_text("no punctuation at all", 200);
        assert_eq!(chunks, vec!["no punctuation at all"]);
    }
}
