//! Lexical relevance scoring of chunks against a question.
//!
//! score = whole_word × (whole-word hits of every token)
//!       + substring × (tokens present anywhere as a substring)
//!       + phrase_bonus (chunk contains the whole cleaned question)
//!
//! Substring presence is counted on top of whole-word hits, so a token that
//! matches cleanly earns both.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::chunking::Chunk;

static RE_NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Tokens of this many chars or fewer are ignored.
const MAX_IGNORED_TOKEN_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Points per whole-word occurrence of a token
    pub whole_word: u32,
    /// Points per token present as a substring
    pub substring: u32,
    /// Flat bonus when the chunk contains the whole cleaned question
    pub phrase_bonus: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            whole_word: 3,
            substring: 1,
            phrase_bonus: 8,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScoredChunk<'a> {
    pub chunk: &'a Chunk,
    pub score: u32,
}

/// A question prepared for scoring: compiled once, applied to every chunk.
pub struct QuestionTerms {
    phrase: String,
    tokens: Vec<(String, Regex)>,
}

impl QuestionTerms {
    pub fn new(question: &str) -> Self {
        let lowered = question.to_lowercase();
        let stripped = RE_NON_WORD.replace_all(&lowered, "");
        let phrase = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

        let tokens = phrase
            .split(' ')
            .filter(|t| t.chars().count() > MAX_IGNORED_TOKEN_CHARS)
            .filter_map(|t| {
                RegexBuilder::new(&format!(r"\b{}\b", regex::escape(t)))
                    .case_insensitive(true)
                    .build()
                    .ok()
                    .map(|re| (t.to_string(), re))
            })
            .collect();

        Self { phrase, tokens }
    }

    /// Score a single chunk text.
    pub fn score(&self, text: &str, weights: &ScoreWeights) -> u32 {
        let lowered = text.to_lowercase();
        let mut score = 0u32;

        for (token, re) in &self.tokens {
            let hits = re.find_iter(text).count() as u32;
            score = score.saturating_add(weights.whole_word.saturating_mul(hits));
            if lowered.contains(token.as_str()) {
                score = score.saturating_add(weights.substring);
            }
        }

        if !self.phrase.is_empty() && lowered.contains(&self.phrase) {
            score = score.saturating_add(weights.phrase_bonus);
        }

        score
    }
}

/// Rank chunks by lexical overlap with the question, highest first, keeping `top_k`.
/// Equal scores keep document order.
pub fn rank_chunks<'a>(
    chunks: &'a [Chunk],
    question: &str,
    top_k: usize,
    weights: &ScoreWeights,
) -> Vec<ScoredChunk<'a>> {
    let terms = QuestionTerms::new(question);

    let mut scored: Vec<ScoredChunk<'a>> = chunks
        .iter()
        .map(|chunk| ScoredChunk {
            chunk,
            score: terms.score(&chunk.text, weights),
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(top_k);
    scored
}

/// Pick the chunks to send to the QA models.
///
/// When nothing matched lexically (top score 0) the ranking is meaningless,
/// so the first `max_chunks` chunks in document order are used instead.
pub fn select_context<'a>(
    chunks: &'a [Chunk],
    ranked: &[ScoredChunk<'a>],
    max_chunks: usize,
) -> Vec<&'a Chunk> {
    match ranked.first() {
        Some(top) if top.score > 0 => ranked.iter().take(max_chunks).map(|s| s.chunk).collect(),
        _ => chunks.iter().take(max_chunks).collect(),
    }
}
