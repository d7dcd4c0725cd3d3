//! Calls to the hosted inference API's question-answering pipeline.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ModelAnswer, ModelConfig, QaError};
use crate::config::QaConfig;

/// Answers a question against one context with one model.
#[async_trait]
pub trait QaBackend: Send + Sync {
    async fn answer(
        &self,
        model: &ModelConfig,
        question: &str,
        context: &str,
    ) -> Result<ModelAnswer, QaError>;
}

/// [`QaBackend`] over the inference HTTP API.
pub struct HttpQaBackend {
    client: reqwest::Client,
    config: QaConfig,
}

impl HttpQaBackend {
    pub fn new(client: reqwest::Client, config: QaConfig) -> Self {
        Self { client, config }
    }

    fn model_url(&self, model: &ModelConfig) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), model.repo)
    }
}

#[async_trait]
impl QaBackend for HttpQaBackend {
    async fn answer(
        &self,
        model: &ModelConfig,
        question: &str,
        context: &str,
    ) -> Result<ModelAnswer, QaError> {
        let req = QaRequest {
            inputs: QaInputs { question, context },
            parameters: QaParameters {
                max_seq_len: model.max_seq_len,
                doc_stride: model.doc_stride,
                max_answer_len: model.max_answer_len,
            },
        };

        let mut builder = self
            .client
            .post(self.model_url(model))
            .timeout(std::time::Duration::from_secs(self.config.timeout_secs));
        if let Some(key) = self.config.api_key.as_deref() {
            builder = builder.header("Authorization", format!("Bearer {key}"));
        }

        let resp = builder.json(&req).send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(QaError::Status {
                model: model.repo.to_string(),
                status,
                body,
            });
        }

        let body: QaResponse = resp.json().await?;
        Ok(body.into_answer())
    }
}

// ─── Request/Response types ────────────────────────────

#[derive(Serialize)]
struct QaRequest<'a> {
    inputs: QaInputs<'a>,
    parameters: QaParameters,
}

#[derive(Serialize)]
struct QaInputs<'a> {
    question: &'a str,
    context: &'a str,
}

#[derive(Serialize)]
struct QaParameters {
    max_seq_len: u32,
    doc_stride: u32,
    max_answer_len: u32,
}

/// The pipeline returns a bare object, or a list when `top_k` is in play.
#[derive(Deserialize)]
#[serde(untagged)]
enum QaResponse {
    List(Vec<RawAnswer>),
    Single(RawAnswer),
}

#[derive(Deserialize)]
struct RawAnswer {
    #[serde(default)]
    answer: String,
    #[serde(default)]
    score: f64,
}

impl QaResponse {
    fn into_answer(self) -> ModelAnswer {
        let raw = match self {
            QaResponse::Single(raw) => Some(raw),
            QaResponse::List(list) => list.into_iter().next(),
        };
        raw.map(|r| ModelAnswer {
            answer: r.answer,
            score: r.score,
        })
        .unwrap_or(ModelAnswer {
            answer: String::new(),
            score: 0.0,
        })
    }
}
