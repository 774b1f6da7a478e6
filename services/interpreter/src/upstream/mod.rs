//! Upstream LLM collaborators.
//!
//! The lucky-number core never depends on these; handlers await the interpretation
//! first and append the deterministic block afterwards.

use futures::future::BoxFuture;
use std::time::Duration;
use thiserror::Error;

mod gemini;
mod openai;

pub use gemini::{GeminiInterpreter, GEMINI_FALLBACK_MODELS};
pub use openai::OpenAiInterpreter;

/// Prompt handed to an [`Interpreter`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterpretationPrompt {
    /// Optional system instruction.
    pub system: Option<String>,
    /// User-turn text, dream included.
    pub user: String,
}

/// Text returned by the model, with the model that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interpretation {
    pub text: String,
    pub model: String,
}

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("reqwest error: {0}")]
    Reqwest(reqwest::Error),
    #[error("upstream timed out")]
    Timeout,
    #[error("upstream {model} failed with {status}: {details}")]
    Status {
        status: u16,
        details: String,
        model: String,
    },
    #[error("upstream returned no text ({details})")]
    Empty { details: String, tried: Vec<String> },
    #[error("all models failed with {status}: {details}")]
    Exhausted {
        status: u16,
        details: String,
        tried: Vec<String>,
    },
}

impl UpstreamError {
    /// Classifies a transport error. The URL is stripped so nothing in it reaches
    /// logs or response bodies.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Reqwest(err.without_url())
        }
    }
}

/// A model that turns a dream prompt into text.
pub trait Interpreter: Send + Sync {
    fn interpret<'a>(
        &'a self,
        prompt: &'a InterpretationPrompt,
    ) -> BoxFuture<'a, Result<Interpretation, UpstreamError>>;
}

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(timeout).build()
}

/// Pulls `error.message` out of an upstream error body.
pub(crate) fn error_message(body: &serde_json::Value) -> Option<String> {
    body.get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
        .map(str::to_string)
}
