//! Google Gemini integration
//!
//! Gemini's `generateContent` endpoint accepts inline audio and can be
//! constrained to answer with a JSON document matching a schema.
//! API docs: https://ai.google.dev/api/generate-content

mod adapter;
mod client;
pub mod dto;

pub use adapter::{EXPECTED_ADVICE_COUNT, to_result};
pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient};
