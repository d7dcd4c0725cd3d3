//! Multi-model fallback.
//!
//! Models are tried one after another. Within one attempt every context
//! chunk is sent to the model concurrently, and a single failed call throws
//! the whole attempt away: answers from different models are never mixed.

use std::time::Duration;

use futures_util::future::try_join_all;

use super::registry::{fallback_sequence, ModelId};
use super::{ModelAnswer, QaBackend, QaError};

/// The pipeline's sentinel for "nothing found" on some models.
const NO_ANSWER: &str = "no answer";

#[derive(Debug, Clone)]
pub struct FallbackOptions {
    /// Answers must be strictly above this confidence.
    pub min_confidence: f64,
    /// Upper bound on a single remote call.
    pub call_timeout: Duration,
}

impl Default for FallbackOptions {
    fn default() -> Self {
        Self {
            min_confidence: 0.01,
            call_timeout: Duration::from_secs(30),
        }
    }
}

/// A model that produced at least one usable answer.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelResult {
    pub model: ModelId,
    pub best: ModelAnswer,
    pub alternative: Option<ModelAnswer>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FallbackOutcome {
    Answered(ModelResult),
    /// Every model failed or produced nothing usable.
    Exhausted { attempted: Vec<ModelId> },
}

/// Try the preferred model, then the fallback order, until one answers.
pub async fn answer_with_fallback(
    backend: &dyn QaBackend,
    question: &str,
    preferred: ModelId,
    contexts: &[&str],
    options: &FallbackOptions,
) -> FallbackOutcome {
    let sequence = fallback_sequence(preferred);
    tracing::debug!(
        "Model sequence: {:?}",
        sequence.iter().map(|m| m.as_str()).collect::<Vec<_>>()
    );

    for &model in &sequence {
        let answers = match attempt_model(backend, model, question, contexts, options).await {
            Ok(answers) => answers,
            Err(e) => {
                tracing::warn!("Model {} abandoned: {e}", model.as_str());
                continue;
            }
        };

        match select_answers(answers, options.min_confidence) {
            Some((best, alternative)) => {
                tracing::info!(
                    "Model {} answered with confidence {:.3}",
                    model.as_str(),
                    best.score
                );
                return FallbackOutcome::Answered(ModelResult {
                    model,
                    best,
                    alternative,
                });
            }
            None => {
                tracing::info!("Model {} found no confident answer", model.as_str());
            }
        }
    }

    FallbackOutcome::Exhausted {
        attempted: sequence,
    }
}

/// One model over all contexts at once. The first failure fails the attempt.
async fn attempt_model(
    backend: &dyn QaBackend,
    model: ModelId,
    question: &str,
    contexts: &[&str],
    options: &FallbackOptions,
) -> Result<Vec<ModelAnswer>, QaError> {
    let config = model.config();

    let calls = contexts.iter().map(|context| async move {
        match tokio::time::timeout(
            options.call_timeout,
            backend.answer(config, question, context),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(QaError::Timeout {
                model: config.repo.to_string(),
                secs: options.call_timeout.as_secs(),
            }),
        }
    });

    try_join_all(calls).await
}

/// Drop degenerate answers, then return the most confident one and the runner-up.
pub fn select_answers(
    answers: Vec<ModelAnswer>,
    min_confidence: f64,
) -> Option<(ModelAnswer, Option<ModelAnswer>)> {
    let mut valid: Vec<ModelAnswer> = answers
        .into_iter()
        .filter(|a| is_usable(a, min_confidence))
        .collect();

    valid.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut ranked = valid.into_iter();
    let best = ranked.next()?;
    Some((best, ranked.next()))
}

fn is_usable(answer: &ModelAnswer, min_confidence: f64) -> bool {
    let text = answer.answer.trim();
    !text.is_empty() && !text.eq_ignore_ascii_case(NO_ANSWER) && answer.score > min_confidence
}
