//! # pdf-qa
//!
//! A Rust web service that answers natural-language questions against the
//! text of a parsed PDF, using hosted extractive question-answering models
//! with lexical chunk selection and multi-model fallback.
//!
//! ## Architecture
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │ question + document text │
//!                 └────────────┬─────────────┘
//!                              │
//!                              ▼
//!                 ┌──────────────────────────┐
//!                 │  Clean markdown          │
//!                 │  Sentence chunking       │
//!                 │  ~250 words, 2-sentence  │
//!                 │  overlap                 │
//!                 └────────────┬─────────────┘
//!                              │ chunks
//!                              ▼
//!                 ┌──────────────────────────┐
//!                 │  Lexical scoring         │
//!                 │  word ×3, substring +1,  │
//!                 │  full question +8        │
//!                 │  Keep top 4, send 3      │
//!                 └────────────┬─────────────┘
//!                              │
//!            ┌─────────────────┼─────────────────┐
//!            ▼                 ▼                 ▼
//!     ┌─────────────┐   ┌─────────────┐   ┌─────────────┐
//!     │  preferred  │──▶│ distilbert  │──▶│ tinyroberta │──▶ ...
//!     │ 3 chunks ∥  │   │ 3 chunks ∥  │   │ 3 chunks ∥  │
//!     └─────────────┘   └─────────────┘   └─────────────┘
//!            │   first model with a confident answer wins
//!            ▼
//!                 ┌──────────────────────────┐
//!                 │  Best answer + one       │
//!                 │  alternative             │
//!                 └──────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for the server, inference API, and heuristics
//! - [`models`] - Request/response types for the HTTP API
//! - [`chunking`] - Markdown cleanup and sentence-bounded chunking with overlap
//! - [`search::lexical`] - Lexical overlap scoring and context selection
//! - [`qa::registry`] - Static model table and fallback order
//! - [`qa::backend`] - `QaBackend` trait and the hosted inference client
//! - [`qa::orchestrator`] - Sequential model fallback with concurrent per-chunk calls
//! - [`api`] - Axum HTTP handlers
//! - [`state`] - Shared application state

pub mod api;
pub mod chunking;
pub mod config;
pub mod models;
pub mod qa;
pub mod search;
pub mod state;
