use serde::{Deserialize, Serialize};

use crate::chunking::ChunkOptions;
use crate::search::lexical::ScoreWeights;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// Remote question-answering API configuration
    pub qa: QaConfig,
    /// Sentence chunker budgets
    pub chunking: ChunkOptions,
    /// Lexical ranking configuration
    pub ranking: RankingConfig,
    /// Answers at or below this confidence are discarded
    pub min_answer_confidence: f64,
}

/// Configuration for the hosted inference API serving the extractive QA models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaConfig {
    /// Base URL; the model repository id is appended as a path segment.
    pub base_url: String,
    /// Bearer token for the inference API
    pub api_key: Option<String>,
    /// Per-call request timeout in seconds (capped at 120).
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// How many ranked chunks the scorer returns
    pub top_k: usize,
    /// How many chunks are sent to each model
    pub max_context_chunks: usize,
    pub weights: ScoreWeights,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:9000".to_string(),
            qa: QaConfig::default(),
            chunking: ChunkOptions::default(),
            ranking: RankingConfig::default(),
            min_answer_confidence: 0.01,
        }
    }
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-inference.huggingface.co/models".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_k: 4,
            max_context_chunks: 3,
            weights: ScoreWeights::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("PDF_QA_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(url) = std::env::var("QA_BASE_URL") {
            config.qa.base_url = url;
        }
        if let Ok(key) = std::env::var("HUGGINGFACE_API_KEY") {
            config.qa.api_key = Some(key);
        }
        if let Ok(val) = std::env::var("QA_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.qa.timeout_secs = v.min(120);
            }
        }

        // Chunking
        if let Ok(val) = std::env::var("CHUNK_WORD_BUDGET") {
            if let Ok(v) = val.parse() {
                config.chunking.word_budget = v;
            }
        }
        if let Ok(val) = std::env::var("CHUNK_OVERLAP_WORDS") {
            if let Ok(v) = val.parse() {
                config.chunking.overlap_words = v;
            }
        }

        // Ranking
        if let Ok(val) = std::env::var("RANK_TOP_K") {
            if let Ok(v) = val.parse() {
                config.ranking.top_k = v;
            }
        }
        if let Ok(val) = std::env::var("MAX_CONTEXT_CHUNKS") {
            if let Ok(v) = val.parse() {
                config.ranking.max_context_chunks = v;
            }
        }
        if let Ok(val) = std::env::var("SCORE_WHOLE_WORD_WEIGHT") {
            if let Ok(v) = val.parse() {
                config.ranking.weights.whole_word = v;
            }
        }
        if let Ok(val) = std::env::var("SCORE_SUBSTRING_WEIGHT") {
            if let Ok(v) = val.parse() {
                config.ranking.weights.substring = v;
            }
        }
        if let Ok(val) = std::env::var("SCORE_PHRASE_BONUS") {
            if let Ok(v) = val.parse() {
                config.ranking.weights.phrase_bonus = v;
            }
        }

        if let Ok(val) = std::env::var("MIN_ANSWER_CONFIDENCE") {
            if let Ok(v) = val.parse() {
                config.min_answer_confidence = v;
            }
        }

        config
    }
}
