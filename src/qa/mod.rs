//! Extractive question answering against remote models.

pub mod backend;
pub mod orchestrator;
pub mod registry;

use thiserror::Error;

pub use backend::{HttpQaBackend, QaBackend};
pub use registry::{ModelConfig, ModelId};

/// One model's answer for one chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAnswer {
    pub answer: String,
    /// Model-reported confidence in [0, 1].
    pub score: f64,
}

#[derive(Debug, Error)]
pub enum QaError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{model} returned {status}: {body}")]
    Status {
        model: String,
        status: u16,
        body: String,
    },

    #[error("{model} did not answer within {secs}s")]
    Timeout { model: String, secs: u64 },
}
