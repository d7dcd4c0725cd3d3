//! Static table of the extractive QA models the service can call.

use serde::Serialize;

/// Models that can be requested by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelId {
    Roberta,
    Distilbert,
    Albert,
    Electra,
    Tinyroberta,
    Bert,
}

/// Inference parameters for one model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelConfig {
    pub id: ModelId,
    /// Repository id on the inference API, also reported as `model_used`.
    #[serde(rename = "model")]
    pub repo: &'static str,
    pub max_seq_len: u32,
    pub doc_stride: u32,
    pub max_answer_len: u32,
}

static MODELS: [ModelConfig; 6] = [
    ModelConfig {
        id: ModelId::Roberta,
        repo: "deepset/roberta-base-squad2",
        max_seq_len: 384,
        doc_stride: 128,
        max_answer_len: 100,
    },
    ModelConfig {
        id: ModelId::Distilbert,
        repo: "distilbert-base-cased-distilled-squad",
        max_seq_len: 384,
        doc_stride: 128,
        max_answer_len: 100,
    },
    ModelConfig {
        id: ModelId::Albert,
        repo: "twmkn9/albert-base-v2-squad2",
        max_seq_len: 384,
        doc_stride: 128,
        max_answer_len: 100,
    },
    ModelConfig {
        id: ModelId::Electra,
        repo: "deepset/electra-base-squad2",
        max_seq_len: 512,
        doc_stride: 128,
        max_answer_len: 150,
    },
    ModelConfig {
        id: ModelId::Tinyroberta,
        repo: "deepset/tinyroberta-squad2",
        max_seq_len: 384,
        doc_stride: 64,
        max_answer_len: 100,
    },
    ModelConfig {
        id: ModelId::Bert,
        repo: "deepset/bert-base-cased-squad2",
        max_seq_len: 512,
        doc_stride: 128,
        max_answer_len: 150,
    },
];

/// Models tried after the preferred one, in order.
/// Albert and bert are only ever used when requested as the preferred model.
pub const FALLBACK_ORDER: [ModelId; 4] = [
    ModelId::Distilbert,
    ModelId::Tinyroberta,
    ModelId::Electra,
    ModelId::Roberta,
];

impl ModelId {
    pub const DEFAULT: ModelId = ModelId::Distilbert;

    /// Map a request name to a model, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "roberta" => Some(ModelId::Roberta),
            "distilbert" => Some(ModelId::Distilbert),
            "albert" => Some(ModelId::Albert),
            "electra" => Some(ModelId::Electra),
            "tinyroberta" => Some(ModelId::Tinyroberta),
            "bert" => Some(ModelId::Bert),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Roberta => "roberta",
            ModelId::Distilbert => "distilbert",
            ModelId::Albert => "albert",
            ModelId::Electra => "electra",
            ModelId::Tinyroberta => "tinyroberta",
            ModelId::Bert => "bert",
        }
    }

    pub fn config(&self) -> &'static ModelConfig {
        MODELS
            .iter()
            .find(|m| m.id == *self)
            .unwrap_or(&MODELS[1])
    }
}

/// Every registered model, in declaration order.
pub fn all_models() -> &'static [ModelConfig] {
    &MODELS
}

/// Model for a requested name. Absent or unknown names get the default model.
pub fn resolve(name: Option<&str>) -> ModelId {
    match name {
        None => ModelId::DEFAULT,
        Some(name) => ModelId::from_name(name).unwrap_or_else(|| {
            tracing::warn!("Unknown model '{name}', using {}", ModelId::DEFAULT.as_str());
            ModelId::DEFAULT
        }),
    }
}

/// Preferred model first, then the fallback order without duplicates.
pub fn fallback_sequence(preferred: ModelId) -> Vec<ModelId> {
    std::iter::once(preferred)
        .chain(FALLBACK_ORDER.into_iter().filter(|m| *m != preferred))
        .collect()
}
