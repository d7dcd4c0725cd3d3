use serde::{Deserialize, Serialize};

/// Chat request: a question against the parsed document text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    pub question: Option<String>,
    /// Full document text (markdown from the PDF parser).
    pub context: Option<String>,
    /// Model name; missing or unknown means distilbert.
    #[serde(rename = "preferredModel")]
    pub preferred_model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatResponse {
    Answered(AnswerResponse),
    NotFound(NotFoundResponse),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
    pub confidence: f64,
    /// Repository id of the model that answered
    pub model_used: String,
    pub sources: String,
    #[serde(rename = "alternativeAnswers")]
    pub alternative_answers: Vec<AlternativeAnswer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeAnswer {
    pub answer: String,
    pub confidence: f64,
}

/// Returned with 200 when no model produced a usable answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotFoundResponse {
    pub answer: String,
    pub confidence: f64,
    pub sources: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
