//! Recursive character splitter with overlap and start-offset tracking.
//!
//! Splits document text into [`Chunk`]s no longer than a configured
//! `chunk_size`, using a prioritized separator ladder from coarsest to
//! finest granularity (paragraph, line, word, character by default). The
//! split is lossless: separators are retained as the suffix of the piece
//! they terminate, so concatenating the underlying pieces reconstructs the
//! original text exactly, and every chunk records the character offset of
//! its first character in the source document.
//!
//! # Algorithm
//!
//! 1. Pick the first separator in the ladder that occurs in the text (the
//!    empty string always matches and splits between characters).
//! 2. Split on every literal occurrence, keeping the separator attached to
//!    the preceding piece.
//! 3. Greedily merge consecutive pieces into a buffer while the merged
//!    length stays within `chunk_size`. On overflow, emit the buffer as a
//!    chunk and seed the next buffer with trailing whole pieces totalling
//!    at most `chunk_overlap` characters.
//! 4. A single piece longer than `chunk_size` is recursed into with the
//!    remaining (finer) separators; with the ladder exhausted it is emitted
//!    oversized. This is the one accepted exception to the size bound.
//!
//! Lengths and offsets are measured in characters (Unicode scalar values),
//! not bytes.

use crate::error::{Error, Result};
use crate::models::{Chunk, Document};

/// Default separator ladder: paragraph, line, word, character.
pub const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// A contiguous span of source text with its character offset.
struct Span {
    start: usize,
    content: String,
}

/// Recursive character splitter.
///
/// Pure: splitting has no side effects and the same input always produces
/// the same chunks.
#[derive(Debug, Clone)]
pub struct Splitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<String>,
}

impl Splitter {
    /// Create a splitter with the default separator ladder.
    ///
    /// Rejects `chunk_size == 0` and `chunk_overlap >= chunk_size` with
    /// [`Error::Configuration`].
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::Configuration("chunk_size must be > 0".to_string()));
        }
        if chunk_overlap >= chunk_size {
            return Err(Error::Configuration(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                chunk_overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Replace the separator ladder, ordered coarsest to finest.
    pub fn with_separators(mut self, separators: Vec<String>) -> Self {
        self.separators = separators;
        self
    }

    /// Split a batch of documents, preserving document order.
    pub fn split_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        documents
            .iter()
            .flat_map(|doc| self.split_document(doc))
            .collect()
    }

    /// Split one document into chunks carrying its metadata plus
    /// `start_index`. Empty content yields zero chunks.
    pub fn split_document(&self, document: &Document) -> Vec<Chunk> {
        let mut spans = Vec::new();
        self.split_spans(&document.content, 0, &self.separators, &mut spans);
        spans
            .into_iter()
            .map(|span| Chunk::new(span.content, &document.metadata, span.start))
            .collect()
    }

    /// Split bare text; chunks carry only the `start_index` metadata entry.
    pub fn split_text(&self, text: &str) -> Vec<Chunk> {
        self.split_document(&Document::from_text(text))
    }

    fn split_spans(&self, text: &str, base: usize, separators: &[String], out: &mut Vec<Span>) {
        if text.is_empty() {
            return;
        }

        // First separator that occurs in the text; "" always matches.
        let found = separators
            .iter()
            .position(|sep| sep.is_empty() || text.contains(sep.as_str()));
        let Some(sep_idx) = found else {
            // Indivisible under this ladder.
            out.push(Span {
                start: base,
                content: text.to_string(),
            });
            return;
        };
        let separator = &separators[sep_idx];
        let remaining = &separators[sep_idx + 1..];

        let pieces = split_lossless(text, separator);
        self.merge_pieces(&pieces, base, remaining, out);
    }

    /// Greedy merge with whole-piece overlap carry.
    ///
    /// `pieces` are (character offset, text) pairs whose concatenation is
    /// the original block. Oversized pieces flush the buffer and recurse.
    fn merge_pieces(
        &self,
        pieces: &[(usize, &str)],
        base: usize,
        remaining: &[String],
        out: &mut Vec<Span>,
    ) {
        // Buffer of (offset, piece, char length); lengths cached because
        // the overlap carry re-measures trailing pieces on every flush.
        let mut buf: Vec<(usize, &str, usize)> = Vec::new();
        let mut total = 0usize;

        for &(offset, piece) in pieces {
            let piece_len = piece.chars().count();

            if piece_len > self.chunk_size {
                flush(&mut buf, base, out);
                total = 0;
                if remaining.is_empty() {
                    out.push(Span {
                        start: base + offset,
                        content: piece.to_string(),
                    });
                } else {
                    self.split_spans(piece, base + offset, remaining, out);
                }
                continue;
            }

            if total + piece_len > self.chunk_size && !buf.is_empty() {
                emit(&buf, base, out);
                // Drop leading pieces until what remains fits both the
                // overlap budget and the incoming piece.
                let mut keep_from = 0;
                while keep_from < buf.len()
                    && (total > self.chunk_overlap
                        || (total + piece_len > self.chunk_size && total > 0))
                {
                    total -= buf[keep_from].2;
                    keep_from += 1;
                }
                buf.drain(..keep_from);
            }

            buf.push((offset, piece, piece_len));
            total += piece_len;
        }

        if !buf.is_empty() {
            emit(&buf, base, out);
        }
    }
}

/// Emit the buffered pieces as one span without clearing the buffer.
fn emit(buf: &[(usize, &str, usize)], base: usize, out: &mut Vec<Span>) {
    let content: String = buf.iter().map(|(_, piece, _)| *piece).collect();
    out.push(Span {
        start: base + buf[0].0,
        content,
    });
}

/// Emit and clear.
fn flush(buf: &mut Vec<(usize, &str, usize)>, base: usize, out: &mut Vec<Span>) {
    if !buf.is_empty() {
        emit(buf, base, out);
        buf.clear();
    }
}

/// Split `text` on every literal occurrence of `separator`, retaining the
/// separator as each piece's suffix so concatenation is lossless. The empty
/// separator splits between every character. Returns (character offset,
/// piece) pairs.
fn split_lossless<'a>(text: &'a str, separator: &str) -> Vec<(usize, &'a str)> {
    let mut pieces = Vec::new();
    let mut offset = 0usize;
    if separator.is_empty() {
        let mut iter = text.char_indices().peekable();
        while let Some((byte_start, _)) = iter.next() {
            let byte_end = iter.peek().map(|&(i, _)| i).unwrap_or(text.len());
            pieces.push((offset, &text[byte_start..byte_end]));
            offset += 1;
        }
    } else {
        for piece in text.split_inclusive(separator) {
            pieces.push((offset, piece));
            offset += piece.chars().count();
        }
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Metadata;

    fn char_len(s: &str) -> usize {
        s.chars().count()
    }

    /// Rebuild the source text from chunks by skipping overlapped prefixes.
    fn reconstruct(chunks: &[Chunk]) -> String {
        let mut covered = 0usize;
        let mut text = String::new();
        for c in chunks {
            let len = char_len(&c.content);
            if c.start_index + len > covered {
                let skip = covered.saturating_sub(c.start_index);
                text.extend(c.content.chars().skip(skip));
                covered = c.start_index + len;
            }
        }
        text
    }

    #[test]
    fn worked_example_character_ladder() {
        let splitter = Splitter::new(5, 2)
            .unwrap()
            .with_separators(vec![String::new()]);
        let chunks = splitter.split_text("AAAAABBBBBCCCCC");
        let got: Vec<(&str, usize)> = chunks
            .iter()
            .map(|c| (c.content.as_str(), c.start_index))
            .collect();
        assert_eq!(
            got,
            vec![
                ("AAAAA", 0),
                ("AABBB", 3),
                ("BBBBC", 6),
                ("BCCCC", 9),
                ("CCC", 12),
            ]
        );
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let splitter = Splitter::new(100, 10).unwrap();
        assert!(splitter.split_text("").is_empty());
    }

    #[test]
    fn short_document_is_one_chunk_at_zero() {
        let splitter = Splitter::new(100, 10).unwrap();
        let chunks = splitter.split_text("Hello, world!");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "Hello, world!");
        assert_eq!(chunks[0].start_index, 0);
    }

    #[test]
    fn rejects_zero_chunk_size() {
        assert!(matches!(
            Splitter::new(0, 0),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn rejects_overlap_not_smaller_than_size() {
        assert!(matches!(
            Splitter::new(10, 10),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            Splitter::new(10, 11),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn reconstruction_is_lossless() {
        let text = "First paragraph with some words.\n\nSecond paragraph, a \
                    bit longer than the first one.\n\nThird.\nWith a line \
                    break inside.\n\nAnd a final trailer sentence here.";
        for (size, overlap) in [(20, 5), (30, 10), (50, 0), (7, 2)] {
            let splitter = Splitter::new(size, overlap).unwrap();
            let chunks = splitter.split_text(text);
            assert_eq!(
                reconstruct(&chunks),
                text,
                "reconstruction failed for size={} overlap={}",
                size,
                overlap
            );
        }
    }

    #[test]
    fn chunks_respect_size_bound() {
        let text = "one two three four five six seven eight nine ten \
                    eleven twelve thirteen fourteen fifteen";
        let splitter = Splitter::new(20, 5).unwrap();
        for chunk in splitter.split_text(text) {
            assert!(
                char_len(&chunk.content) <= 20,
                "oversized chunk: {:?}",
                chunk.content
            );
        }
    }

    #[test]
    fn oversized_indivisible_piece_is_accepted() {
        // No separator matches inside the long token, and the ladder has
        // no character-level fallback, so the token exceeds the bound.
        let splitter = Splitter::new(5, 1)
            .unwrap()
            .with_separators(vec![" ".to_string()]);
        let chunks = splitter.split_text("tiny incomprehensibilities end");
        assert!(chunks.iter().any(|c| char_len(&c.content) > 5));
        assert_eq!(reconstruct(&chunks), "tiny incomprehensibilities end");
    }

    #[test]
    fn start_indices_are_monotonic() {
        let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa";
        let splitter = Splitter::new(12, 4).unwrap();
        let chunks = splitter.split_text(text);
        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            assert!(pair[0].start_index <= pair[1].start_index);
        }
    }

    #[test]
    fn consecutive_chunks_share_overlap() {
        let splitter = Splitter::new(8, 3)
            .unwrap()
            .with_separators(vec![String::new()]);
        let chunks = splitter.split_text("abcdefghijklmnopqrstuvwxyz");
        for pair in chunks.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let a_end = a.start_index + char_len(&a.content);
            let shared = a_end - b.start_index;
            assert!(shared > 0 && shared <= 3, "unexpected overlap {}", shared);
            let a_suffix: String = a
                .content
                .chars()
                .skip(char_len(&a.content) - shared)
                .collect();
            let b_prefix: String = b.content.chars().take(shared).collect();
            assert_eq!(a_suffix, b_prefix);
        }
    }

    #[test]
    fn start_index_counts_characters_not_bytes() {
        let splitter = Splitter::new(4, 1)
            .unwrap()
            .with_separators(vec![String::new()]);
        let text = "éééééééé";
        let chunks = splitter.split_text(text);
        assert_eq!(reconstruct(&chunks), text);
        for chunk in &chunks {
            assert!(char_len(&chunk.content) <= 4);
        }
    }

    #[test]
    fn metadata_is_copied_with_start_index() {
        let mut meta = Metadata::new();
        meta.insert("source".to_string(), "report.pdf".into());
        meta.insert("page".to_string(), 3.into());
        let doc = Document::new("word ".repeat(30), meta);
        let splitter = Splitter::new(40, 10).unwrap();
        let chunks = splitter.split_document(&doc);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert_eq!(chunk.metadata["source"], "report.pdf");
            assert_eq!(chunk.metadata["page"], 3);
            assert_eq!(
                chunk.metadata["start_index"],
                serde_json::json!(chunk.start_index)
            );
        }
    }

    #[test]
    fn paragraph_separator_preferred_over_finer_ones() {
        let text = "Para one.\n\nPara two.\n\nPara three.";
        let splitter = Splitter::new(12, 0).unwrap();
        let chunks = splitter.split_text(text);
        // Each paragraph fits on its own; splits land on paragraph bounds.
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].content, "Para one.\n\n");
        assert_eq!(chunks[1].content, "Para two.\n\n");
        assert_eq!(chunks[2].content, "Para three.");
    }

    #[test]
    fn split_documents_preserves_document_order() {
        let docs = vec![
            Document::from_text("first doc text"),
            Document::from_text("second doc text"),
        ];
        let splitter = Splitter::new(100, 0).unwrap();
        let chunks = splitter.split_documents(&docs);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content, "first doc text");
        assert_eq!(chunks[1].content, "second doc text");
    }

    #[test]
    fn deterministic() {
        let text = "Alpha\n\nBeta\n\nGamma\n\nDelta epsilon zeta";
        let splitter = Splitter::new(10, 3).unwrap();
        let c1 = splitter.split_text(text);
        let c2 = splitter.split_text(text);
        assert_eq!(c1.len(), c2.len());
        for (a, b) in c1.iter().zip(c2.iter()) {
            assert_eq!(a.content, b.content);
            assert_eq!(a.start_index, b.start_index);
        }
    }
}
