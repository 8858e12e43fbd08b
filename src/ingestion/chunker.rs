//! Word-window text chunking

/// Splits document text into consecutive, non-overlapping word windows
///
/// Chunk boundaries are purely positional; no attempt is made to respect
/// sentence or section boundaries.
pub struct WordChunker {
    /// Words per chunk
    chunk_size: usize,
}

impl WordChunker {
    /// Create a chunker with the given window size in words
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    /// Split text into word windows; the final window may be shorter
    ///
    /// Total over all inputs: empty or whitespace-only text yields an empty
    /// sequence. Rejoining the chunks with single spaces reproduces the
    /// whitespace tokenization of the input.
    pub fn split(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();

        words
            .chunks(self.chunk_size)
            .map(|window| window.join(" "))
            .collect()
    }
}

impl Default for WordChunker {
    fn default() -> Self {
        Self::new(300)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_chunks() {
        let chunker = WordChunker::new(300);
        assert!(chunker.split("").is_empty());
        assert!(chunker.split("   \n\t  ").is_empty());
    }

    #[test]
    fn chunk_count_is_ceiling_of_word_count() {
        let chunker = WordChunker::new(10);
        let text = (0..25).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");

        let chunks = chunker.split(&text);
        assert_eq!(chunks.len(), 3); // ceil(25 / 10)
        assert_eq!(chunks[0].split_whitespace().count(), 10);
        assert_eq!(chunks[2].split_whitespace().count(), 5);
    }

    #[test]
    fn rejoined_chunks_reconstruct_tokenization() {
        let chunker = WordChunker::new(4);
        let text = "the  quick\nbrown fox\tjumps over   the lazy dog";

        let chunks = chunker.split(text);
        let rejoined = chunks.join(" ");
        let original: Vec<&str> = text.split_whitespace().collect();
        let roundtrip: Vec<&str> = rejoined.split_whitespace().collect();
        assert_eq!(original, roundtrip);
    }

    #[test]
    fn single_short_document_is_one_chunk() {
        let chunker = WordChunker::new(300);
        let chunks = chunker.split("just a few words");
        assert_eq!(chunks, vec!["just a few words".to_string()]);
    }
}
