//! Sentence-bounded chunker.
//!
//! Sentences are accumulated until the word budget would be exceeded, then
//! the chunk is flushed and the next one is seeded with the last two
//! sentences of the flushed chunk. A sentence is never cut, so a single
//! sentence longer than the budget becomes its own oversized chunk.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Chunk, ChunkOptions};

/// Terminal punctuation run followed by whitespace or end of text.
static RE_SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+(\s+|$)").unwrap());

/// Fragments shorter than this (in chars) are dropped as noise.
const MIN_SENTENCE_CHARS: usize = 10;
/// Chunks shorter than this (in chars) are dropped.
const MIN_CHUNK_CHARS: usize = 20;
/// Sentences carried from the end of one chunk into the next.
pub const OVERLAP_SENTENCES: usize = 2;

/// Split text into trimmed sentences, keeping terminal punctuation.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;

    for caps in RE_SENTENCE_END.captures_iter(text) {
        let (Some(whole), Some(gap)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_sentence(&mut sentences, &text[start..gap.start()]);
        start = whole.end();
    }
    if start < text.len() {
        push_sentence(&mut sentences, &text[start..]);
    }

    sentences
}

fn push_sentence<'a>(out: &mut Vec<&'a str>, raw: &'a str) {
    let sentence = raw.trim();
    if sentence.chars().count() >= MIN_SENTENCE_CHARS {
        out.push(sentence);
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Chunk already-cleaned text.
pub fn chunk_sentences(text: &str, options: &ChunkOptions) -> Vec<Chunk> {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut overlap = 0usize;
    let mut words = 0usize;

    for sentence in sentences {
        let sentence_words = word_count(sentence);

        if !current.is_empty() && words + sentence_words > options.word_budget {
            let carried = current[current.len().saturating_sub(OVERLAP_SENTENCES)..].to_vec();
            chunks.push(build_chunk(&current, overlap));

            overlap = carried.len();
            words = carried.iter().map(|s| word_count(s)).sum::<usize>() + sentence_words;
            current = carried;
            current.push(sentence);
        } else {
            current.push(sentence);
            words += sentence_words;
        }
    }

    // Flush remaining
    if !current.is_empty() {
        chunks.push(build_chunk(&current, overlap));
    }

    // A dropped chunk's sentences live on only as the next chunk's overlap,
    // so that overlap becomes new content.
    let mut kept: Vec<Chunk> = Vec::with_capacity(chunks.len());
    let mut dropped_previous = false;
    for chunk in chunks {
        if chunk.text.chars().count() < MIN_CHUNK_CHARS {
            dropped_previous = true;
            continue;
        }
        let overlap = if dropped_previous { 0 } else { chunk.overlap };
        dropped_previous = false;
        kept.push(Chunk {
            index: kept.len(),
            overlap,
            ..chunk
        });
    }
    kept
}

fn build_chunk(sentences: &[&str], overlap: usize) -> Chunk {
    let text = sentences.join(" ");
    Chunk {
        index: 0,
        word_count: word_count(&text),
        text,
        sentences: sentences.iter().map(|s| s.to_string()).collect(),
        overlap,
    }
}
