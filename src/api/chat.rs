use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::chunking::chunk_document;
use crate::models::{
    AlternativeAnswer, AnswerResponse, ChatRequest, ChatResponse, ErrorResponse, NotFoundResponse,
};
use crate::qa::orchestrator::{answer_with_fallback, FallbackOptions, FallbackOutcome};
use crate::qa::registry;
use crate::search::lexical::{rank_chunks, select_context};
use crate::state::AppState;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

const MISSING_INPUT: &str = "Question and context are required";
const NO_CHUNKS: &str = "No valid text chunks found";
const PROCESSING_FAILED: &str = "Failed to process question";

const NOT_FOUND_ANSWER: &str =
    "I couldn't find a confident answer to that question in the document.";
const REPHRASE_SUGGESTION: &str =
    "Try rephrasing your question, or ask about a more specific detail from the document.";

/// POST /api/chat — answer a question against the posted document text.
///
///   1. Clean and chunk the document
///   2. Rank chunks lexically, keep the top few
///   3. Ask the preferred model, then the fallback models, until one answers
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let request_id = Uuid::new_v4();

    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!(%request_id, "Rejected chat body: {rejection}");
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            PROCESSING_FAILED,
            Some(rejection.body_text()),
        )
    })?;

    // ── Step 1: Validate input ────────────────────────────
    // Only absent or empty fields are missing. Blank ones go through: a blank
    // context yields no chunks, a blank question ranks nothing.
    let question = req.question.as_deref().unwrap_or_default();
    let context = req.context.as_deref().unwrap_or_default();
    if question.is_empty() || context.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, MISSING_INPUT, None));
    }
    let question = question.trim();

    let preferred = registry::resolve(req.preferred_model.as_deref());

    // ── Step 2: Chunk ─────────────────────────────────────
    let chunks = chunk_document(context, &state.config.chunking);
    if chunks.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, NO_CHUNKS, None));
    }

    // ── Step 3: Rank and pick context ─────────────────────
    let ranking = &state.config.ranking;
    let ranked = rank_chunks(&chunks, question, ranking.top_k, &ranking.weights);
    let selected = select_context(&chunks, &ranked, ranking.max_context_chunks);
    tracing::info!(
        %request_id,
        "Question over {} chunks, sending {} (top score {}), preferred model {}",
        chunks.len(),
        selected.len(),
        ranked.first().map(|s| s.score).unwrap_or(0),
        preferred.as_str()
    );

    // ── Step 4: Ask the models ────────────────────────────
    let contexts: Vec<&str> = selected.iter().map(|c| c.text.as_str()).collect();
    let options = FallbackOptions {
        min_confidence: state.config.min_answer_confidence,
        call_timeout: Duration::from_secs(state.config.qa.timeout_secs),
    };
    let outcome =
        answer_with_fallback(state.backend.as_ref(), question, preferred, &contexts, &options)
            .await;

    let response = match outcome {
        FallbackOutcome::Answered(result) => {
            tracing::info!(%request_id, "Answered by {}", result.model.as_str());
            ChatResponse::Answered(AnswerResponse {
                answer: result.best.answer,
                confidence: result.best.score,
                model_used: result.model.config().repo.to_string(),
                sources: describe_sources(contexts.len()),
                alternative_answers: result
                    .alternative
                    .into_iter()
                    .map(|a| AlternativeAnswer {
                        answer: a.answer,
                        confidence: a.score,
                    })
                    .collect(),
            })
        }
        FallbackOutcome::Exhausted { attempted } => {
            tracing::info!(
                %request_id,
                "No confident answer after {} models",
                attempted.len()
            );
            ChatResponse::NotFound(NotFoundResponse {
                answer: NOT_FOUND_ANSWER.to_string(),
                confidence: 0.0,
                sources: describe_searched(contexts.len()),
                suggestion: REPHRASE_SUGGESTION.to_string(),
            })
        }
    };

    Ok(Json(response))
}

// ─── Helper functions ────────────────────────────────────

fn api_error(status: StatusCode, error: &str, details: Option<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            details,
        }),
    )
}

fn describe_sources(n: usize) -> String {
    format!("Based on {n} relevant {} of the document", sections(n))
}

fn describe_searched(n: usize) -> String {
    format!("Searched {n} {} of the document", sections(n))
}

fn sections(n: usize) -> &'static str {
    if n == 1 {
        "section"
    } else {
        "sections"
    }
}
