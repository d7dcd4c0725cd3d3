//! Integration tests for the question-answering pipeline.
//!
//! These drive the `/api/chat` handler end to end with an in-process
//! backend standing in for the hosted inference API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::{FromRequest, State};
use axum::http::{Request, StatusCode};
use axum::Json;

use pdf_qa::api::chat::chat;
use pdf_qa::config::Config;
use pdf_qa::models::{ChatRequest, ChatResponse};
use pdf_qa::qa::{ModelAnswer, ModelConfig, ModelId, QaBackend, QaError};
use pdf_qa::state::AppState;

#[derive(Clone)]
enum Behavior {
    Fail,
    Answer(&'static str, f64),
}

/// Backend scripted per model. Unscripted models return an empty answer.
#[derive(Default)]
struct FakeBackend {
    behaviors: HashMap<ModelId, Behavior>,
    /// (model, context) for every call received
    calls: Mutex<Vec<(ModelId, String)>>,
}

impl FakeBackend {
    fn with(mut self, model: ModelId, behavior: Behavior) -> Self {
        self.behaviors.insert(model, behavior);
        self
    }

    fn models_called(&self) -> Vec<ModelId> {
        let mut seen = Vec::new();
        for (m, _) in self.calls.lock().unwrap().iter() {
            if !seen.contains(m) {
                seen.push(*m);
            }
        }
        seen
    }

    fn contexts_for(&self, model: ModelId) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| *m == model)
            .map(|(_, c)| c.clone())
            .collect()
    }
}

#[async_trait]
impl QaBackend for FakeBackend {
    async fn answer(
        &self,
        model: &ModelConfig,
        _question: &str,
        context: &str,
    ) -> Result<ModelAnswer, QaError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.id, context.to_string()));

        match self.behaviors.get(&model.id) {
            Some(Behavior::Fail) => Err(QaError::Status {
                model: model.repo.to_string(),
                status: 500,
                body: "simulated network error".to_string(),
            }),
            Some(Behavior::Answer(text, score)) => Ok(ModelAnswer {
                answer: text.to_string(),
                score: *score,
            }),
            None => Ok(ModelAnswer {
                answer: String::new(),
                score: 0.0,
            }),
        }
    }
}

fn state_with(backend: Arc<FakeBackend>) -> AppState {
    AppState::with_backend(Config::default(), backend)
}

fn request(question: &str, context: &str, preferred: Option<&str>) -> ChatRequest {
    ChatRequest {
        question: Some(question.to_string()),
        context: Some(context.to_string()),
        preferred_model: preferred.map(String::from),
    }
}

async fn ask(
    backend: Arc<FakeBackend>,
    req: ChatRequest,
) -> Result<ChatResponse, (StatusCode, pdf_qa::models::ErrorResponse)> {
    chat(State(state_with(backend)), Ok(Json(req)))
        .await
        .map(|Json(r)| r)
        .map_err(|(status, Json(e))| (status, e))
}

const CAT_DOC: &str = "The cat sat on the mat. The dog ran in the park. Birds fly in the sky.";

/// Many distinct paragraphs so the chunker produces several chunks.
fn long_manual() -> String {
    let mut parts = Vec::new();
    for i in 0..40 {
        parts.push(format!(
            "Section {i} describes routine cleaning steps for the housing in plain terms."
        ));
    }
    parts.push(
        "The turbine warranty lasts five years from the date of installation.".to_string(),
    );
    for i in 40..80 {
        parts.push(format!(
            "Section {i} describes routine cleaning steps for the housing in plain terms."
        ));
    }
    parts.join(" ")
}

#[tokio::test]
async fn test_cat_question_answered_by_default_model() {
    let backend = Arc::new(
        FakeBackend::default().with(ModelId::Distilbert, Behavior::Answer("on the mat", 0.87)),
    );
    let resp = ask(backend.clone(), request("Where did the cat sit?", CAT_DOC, None))
        .await
        .unwrap();

    let ChatResponse::Answered(answer) = resp else {
        panic!("expected an answer, got {resp:?}");
    };
    assert_eq!(answer.answer, "on the mat");
    assert_eq!(answer.model_used, "distilbert-base-cased-distilled-squad");
    assert_eq!(answer.sources, "Based on 1 relevant section of the document");
    // One chunk means one call, so there is no alternative.
    assert!(answer.alternative_answers.is_empty());
    assert_eq!(backend.contexts_for(ModelId::Distilbert), vec![CAT_DOC.to_string()]);
}

#[tokio::test]
async fn test_missing_question_or_context_is_400() {
    let backend = Arc::new(FakeBackend::default());

    let (status, err) = ask(
        backend.clone(),
        ChatRequest {
            question: None,
            context: Some(CAT_DOC.to_string()),
            preferred_model: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err.error, "Question and context are required");

    let (status, _) = ask(backend.clone(), request("Where?", "", None))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(backend.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_question_is_not_missing() {
    let backend = Arc::new(FakeBackend::default());
    let resp = ask(backend.clone(), request("   ", CAT_DOC, None))
        .await
        .unwrap();
    // Nothing to rank on, so the leading chunk is still sent to the models.
    assert!(matches!(resp, ChatResponse::NotFound(_)));
    assert_eq!(backend.contexts_for(ModelId::Distilbert), vec![CAT_DOC.to_string()]);
}

#[tokio::test]
async fn test_context_empty_after_cleaning_is_400() {
    let backend = Arc::new(FakeBackend::default());
    for context in ["   \n\t ", "# **\n| --- |", "Too short."] {
        let (status, err) = ask(backend.clone(), request("What is this?", context, None))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST, "context {context:?}");
        assert_eq!(err.error, "No valid text chunks found");
    }
    assert!(backend.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_all_models_unconfident_returns_suggestion() {
    let backend = Arc::new(
        FakeBackend::default()
            .with(ModelId::Distilbert, Behavior::Answer("maybe", 0.004))
            .with(ModelId::Roberta, Behavior::Answer("no answer", 0.9)),
    );
    let resp = ask(backend.clone(), request("Where did the cat sit?", CAT_DOC, None))
        .await
        .unwrap();

    let ChatResponse::NotFound(nf) = resp else {
        panic!("expected not-found, got {resp:?}");
    };
    assert_eq!(nf.confidence, 0.0);
    assert!(!nf.suggestion.is_empty());
    assert_eq!(
        backend.models_called(),
        vec![
            ModelId::Distilbert,
            ModelId::Tinyroberta,
            ModelId::Electra,
            ModelId::Roberta,
        ]
    );

    let json = serde_json::to_value(ChatResponse::NotFound(nf)).unwrap();
    assert_eq!(json["confidence"], 0.0);
    assert!(json["suggestion"].as_str().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn test_failed_preferred_model_falls_back_to_distilbert() {
    let backend = Arc::new(
        FakeBackend::default()
            .with(ModelId::Roberta, Behavior::Fail)
            .with(ModelId::Distilbert, Behavior::Answer("on the mat", 0.5)),
    );
    let resp = ask(
        backend.clone(),
        request("Where did the cat sit?", CAT_DOC, Some("roberta")),
    )
    .await
    .unwrap();

    let ChatResponse::Answered(answer) = resp else {
        panic!("expected an answer, got {resp:?}");
    };
    assert_eq!(answer.model_used, "distilbert-base-cased-distilled-squad");
    assert_ne!(answer.model_used, "deepset/roberta-base-squad2");
    assert_eq!(
        backend.models_called(),
        vec![ModelId::Roberta, ModelId::Distilbert]
    );
}

#[tokio::test]
async fn test_unknown_preferred_model_uses_distilbert() {
    let backend = Arc::new(
        FakeBackend::default().with(ModelId::Distilbert, Behavior::Answer("on the mat", 0.5)),
    );
    let resp = ask(
        backend.clone(),
        request("Where did the cat sit?", CAT_DOC, Some("gpt-9")),
    )
    .await
    .unwrap();
    assert!(matches!(resp, ChatResponse::Answered(_)));
    assert_eq!(backend.models_called()[0], ModelId::Distilbert);
}

#[tokio::test]
async fn test_relevant_chunk_is_sent_first_and_capped_at_three() {
    let backend = Arc::new(
        FakeBackend::default().with(ModelId::Electra, Behavior::Answer("five years", 0.7)),
    );
    let resp = ask(
        backend.clone(),
        request("How long is the turbine warranty?", &long_manual(), Some("electra")),
    )
    .await
    .unwrap();
    assert!(matches!(resp, ChatResponse::Answered(_)));

    let contexts = backend.contexts_for(ModelId::Electra);
    assert_eq!(contexts.len(), 3);
    assert!(contexts.iter().any(|c| c.contains("turbine warranty")));
}

#[tokio::test]
async fn test_zero_overlap_question_uses_leading_chunks() {
    let backend = Arc::new(FakeBackend::default());
    let manual = long_manual();
    let resp = ask(
        backend.clone(),
        request("Quel est le prix?", &manual, None),
    )
    .await
    .unwrap();
    assert!(matches!(resp, ChatResponse::NotFound(_)));

    let contexts = backend.contexts_for(ModelId::Distilbert);
    assert_eq!(contexts.len(), 3);
    // Leading chunks in document order: the first one opens the document.
    assert!(contexts.iter().any(|c| c.starts_with("Section 0 describes")));
}

#[tokio::test]
async fn test_alternative_answer_is_surfaced() {
    struct PerChunk;

    #[async_trait]
    impl QaBackend for PerChunk {
        async fn answer(
            &self,
            _model: &ModelConfig,
            _question: &str,
            context: &str,
        ) -> Result<ModelAnswer, QaError> {
            let score = if context.contains("turbine warranty") { 0.9 } else { 0.3 };
            Ok(ModelAnswer {
                answer: if score > 0.5 { "five years" } else { "routine cleaning" }.to_string(),
                score,
            })
        }
    }

    let state = AppState::with_backend(Config::default(), Arc::new(PerChunk));
    let Json(resp) = chat(
        State(state),
        Ok(Json(request("turbine warranty length", &long_manual(), None))),
    )
    .await
    .unwrap();

    let ChatResponse::Answered(answer) = resp else {
        panic!("expected an answer");
    };
    assert_eq!(answer.answer, "five years");
    assert_eq!(answer.alternative_answers.len(), 1);
    assert_eq!(answer.alternative_answers[0].answer, "routine cleaning");
    assert_eq!(answer.sources, "Based on 3 relevant sections of the document");
}

#[tokio::test]
async fn test_malformed_json_is_500_with_details() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from("{\"question\": \"unterminated"))
        .unwrap();
    let payload = Json::<ChatRequest>::from_request(req, &()).await;
    assert!(payload.is_err());

    let state = state_with(Arc::new(FakeBackend::default()));
    let (status, Json(err)) = chat(State(state), payload).await.unwrap_err();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.error, "Failed to process question");
    assert!(err.details.is_some_and(|d| !d.is_empty()));
}
