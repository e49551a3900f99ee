//! Recursive character text splitting with overlap.

use crate::models::{Chunk, Document, IngestConfig};

/// Boundary ladder, softest first: paragraph, line, sentence, word.
/// The empty separator is the character-level fallback.
const SEPARATORS: &[&str] = &["\n\n", "\n", ". ", " ", ""];

/// Splits documents into overlapping chunks at natural boundaries.
///
/// Text is first cut into pieces at the softest separator that keeps each
/// piece within the chunk size, recursing into harder separators for
/// oversized pieces. Pieces keep their trailing separator, so chunks are
/// exact substrings of the input and the covered span can be reconstructed
/// from the char offsets carried by each chunk.
#[derive(Debug, Clone)]
pub struct TextChunker {
    /// Maximum chunk size in characters
    chunk_size: usize,
    /// Overlap carried between consecutive chunks, in characters
    overlap: usize,
}

impl TextChunker {
    pub fn new(config: &IngestConfig) -> Self {
        Self {
            chunk_size: config.chunk_size as usize,
            overlap: config.chunk_overlap as usize,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&IngestConfig::default())
    }

    /// Chunk a document into overlapping segments.
    ///
    /// Deterministic for a given input; an empty document yields no chunks.
    pub fn chunk(&self, document: &Document) -> Vec<Chunk> {
        let chars: Vec<char> = document.text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let mut pieces = Vec::new();
        self.split_range(&chars, 0, chars.len(), 0, &mut pieces);

        self.merge_pieces(&pieces)
            .into_iter()
            .map(|(start, end)| {
                let text: String = chars[start..end].iter().collect();
                Chunk::from_document(document, text, start, end)
            })
            .collect()
    }

    /// Cut `chars[start..end]` into pieces no longer than the chunk size,
    /// using the separator at `level` and recursing into harder separators
    /// for pieces that still exceed it.
    fn split_range(
        &self,
        chars: &[char],
        start: usize,
        end: usize,
        level: usize,
        out: &mut Vec<(usize, usize)>,
    ) {
        if end - start <= self.chunk_size {
            out.push((start, end));
            return;
        }

        let sep: Vec<char> = SEPARATORS[level].chars().collect();

        if sep.is_empty() {
            // Character-level fallback: single-char pieces so the merge
            // step can still honor the overlap budget
            for i in start..end {
                out.push((i, i + 1));
            }
            return;
        }

        // Boundaries sit just after each separator, keeping the separator
        // attached to the preceding piece
        let mut piece_start = start;
        let mut i = start;
        let mut found = false;

        while i + sep.len() <= end {
            if chars[i..i + sep.len()] == sep[..] {
                found = true;
                let piece_end = i + sep.len();
                self.emit_piece(chars, piece_start, piece_end, level, out);
                piece_start = piece_end;
                i = piece_end;
            } else {
                i += 1;
            }
        }

        if !found {
            // No boundary at this level anywhere in the range
            self.split_range(chars, start, end, level + 1, out);
            return;
        }

        if piece_start < end {
            self.emit_piece(chars, piece_start, end, level, out);
        }
    }

    fn emit_piece(
        &self,
        chars: &[char],
        start: usize,
        end: usize,
        level: usize,
        out: &mut Vec<(usize, usize)>,
    ) {
        if end - start <= self.chunk_size {
            out.push((start, end));
        } else {
            self.split_range(chars, start, end, level + 1, out);
        }
    }

    /// Greedily merge pieces into windows of at most `chunk_size` chars.
    ///
    /// When a window is emitted, whole trailing pieces totalling at most
    /// `overlap` chars are carried into the next window.
    fn merge_pieces(&self, pieces: &[(usize, usize)]) -> Vec<(usize, usize)> {
        let mut chunks = Vec::new();
        let mut first = 0;
        let mut window_len = 0;

        for (idx, &(s, e)) in pieces.iter().enumerate() {
            let piece_len = e - s;

            if window_len + piece_len > self.chunk_size && window_len > 0 {
                chunks.push((pieces[first].0, pieces[idx - 1].1));

                while window_len > self.overlap
                    || (window_len + piece_len > self.chunk_size && window_len > 0)
                {
                    window_len -= pieces[first].1 - pieces[first].0;
                    first += 1;
                }
            }

            window_len += piece_len;
        }

        if first < pieces.len() {
            chunks.push((pieces[first].0, pieces[pieces.len() - 1].1));
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker(size: u32, overlap: u32) -> TextChunker {
        TextChunker::new(&IngestConfig {
            chunk_size: size,
            chunk_overlap: overlap,
            ..Default::default()
        })
    }

    fn doc(text: &str) -> Document {
        Document::new("docs/test.txt", text)
    }

    /// Reconstruct the input by dropping each chunk's leading overlap,
    /// derived from the char offsets.
    fn reconstruct(chunks: &[Chunk]) -> String {
        let mut out = String::new();
        let mut covered = 0u64;
        for chunk in chunks {
            let skip = (covered.saturating_sub(chunk.start_offset)) as usize;
            out.extend(chunk.text.chars().skip(skip));
            covered = chunk.end_offset;
        }
        out
    }

    fn sample_text() -> String {
        let mut text = String::new();
        for p in 0..12 {
            for s in 0..6 {
                text.push_str(&format!(
                    "Paragraph {p} sentence {s} has a handful of ordinary words in it. "
                ));
            }
            text.push_str("\n\n");
        }
        text
    }

    #[test]
    fn test_empty_document_yields_no_chunks() {
        assert!(TextChunker::with_defaults().chunk(&doc("")).is_empty());
    }

    #[test]
    fn test_small_document_single_chunk() {
        let chunks = TextChunker::with_defaults().chunk(&doc("Hello, world!"));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Hello, world!");
        assert_eq!(chunks[0].start_offset, 0);
        assert_eq!(chunks[0].end_offset, 13);
    }

    #[test]
    fn test_chunks_respect_size_limit() {
        let chunker = chunker(100, 20);
        for chunk in chunker.chunk(&doc(&sample_text())) {
            assert!(chunk.text.chars().count() <= 100);
        }
    }

    #[test]
    fn test_overlap_bounded_by_configuration() {
        let chunker = chunker(100, 20);
        let chunks = chunker.chunk(&doc(&sample_text()));
        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            assert!(pair[1].start_offset < pair[0].end_offset || pair[0].end_offset == pair[1].start_offset);
            let shared = pair[0].end_offset.saturating_sub(pair[1].start_offset);
            assert!(shared <= 20, "overlap {shared} exceeds 20");
        }
    }

    #[test]
    fn test_reconstruction_natural_text() {
        let text = sample_text();
        let chunks = chunker(100, 20).chunk(&doc(&text));
        assert_eq!(reconstruct(&chunks), text);
    }

    #[test]
    fn test_reconstruction_default_parameters() {
        let text = sample_text();
        let chunks = TextChunker::with_defaults().chunk(&doc(&text));
        assert_eq!(reconstruct(&chunks), text);
    }

    #[test]
    fn test_reconstruction_without_separators() {
        // No soft boundary anywhere: character fallback
        let text = "x".repeat(2500);
        let chunks = chunker(1000, 200).chunk(&doc(&text));
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 1000);
        }
        for pair in chunks.windows(2) {
            assert_eq!(pair[0].end_offset - pair[1].start_offset, 200);
        }
        assert_eq!(reconstruct(&chunks), text);
    }

    #[test]
    fn test_prefers_paragraph_boundaries() {
        let text = "first paragraph here\n\nsecond paragraph here\n\nthird paragraph here\n\n";
        let chunks = chunker(30, 5).chunk(&doc(text));
        assert!(chunks.len() > 1);
        for chunk in &chunks[..chunks.len() - 1] {
            assert!(
                chunk.text.ends_with("\n\n"),
                "chunk {:?} does not end at a paragraph break",
                chunk.text
            );
        }
        assert_eq!(reconstruct(&chunks), text);
    }

    #[test]
    fn test_falls_back_to_word_boundaries() {
        // One long paragraph, no sentence ends: splits between words
        let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa";
        let chunks = chunker(20, 5).chunk(&doc(text));
        assert!(chunks.len() > 1);
        for chunk in &chunks[..chunks.len() - 1] {
            assert!(chunk.text.ends_with(' '), "chunk {:?} splits a word", chunk.text);
        }
        assert_eq!(reconstruct(&chunks), text);
    }

    #[test]
    fn test_chunking_is_deterministic() {
        let text = sample_text();
        let chunker = TextChunker::with_defaults();
        let a = chunker.chunk(&doc(&text));
        let b = chunker.chunk(&doc(&text));
        assert_eq!(a, b);
    }

    #[test]
    fn test_chunks_carry_source_path() {
        let chunks = chunker(100, 20).chunk(&doc(&sample_text()));
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert_eq!(chunk.source_path, "docs/test.txt");
        }
    }

    #[test]
    fn test_multibyte_text_splits_on_char_boundaries() {
        let text = "å".repeat(120);
        let chunks = chunker(50, 10).chunk(&doc(&text));
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 50);
        }
        assert_eq!(reconstruct(&chunks), text);
    }
}
