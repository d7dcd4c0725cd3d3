//! Document chunking: markdown cleanup followed by sentence-bounded chunking.

pub mod clean;
pub mod sentence;

use serde::{Deserialize, Serialize};

pub use clean::clean_text;

/// Output of the chunking process.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// Position in document order, 0-based.
    pub index: usize,
    /// Sentences joined with a single space.
    pub text: String,
    pub sentences: Vec<String>,
    /// Number of leading sentences carried over from the previous chunk.
    pub overlap: usize,
    /// Approximate, whitespace-delimited.
    pub word_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkOptions {
    /// Target words per chunk. A single oversized sentence may exceed it.
    pub word_budget: usize,
    /// Nominal overlap in words. The chunker carries whole sentences instead,
    /// see [`sentence::OVERLAP_SENTENCES`].
    pub overlap_words: usize,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            word_budget: 250,
            overlap_words: 30,
        }
    }
}

/// Clean raw document text and chunk it.
/// Returns an empty Vec when nothing usable survives cleaning.
pub fn chunk_document(raw: &str, options: &ChunkOptions) -> Vec<Chunk> {
    let cleaned = clean_text(raw);
    if cleaned.is_empty() {
        return Vec::new();
    }

    sentence::chunk_sentences(&cleaned, options)
}
