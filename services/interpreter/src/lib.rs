//! Dream interpretation proxy.
//!
//! Forwards dream text to an LLM provider and appends the deterministic lucky-number
//! block from `ecos-execution`. The block depends only on the dream text (and the
//! prompt, when the seed convention includes it), never on the model's answer.

use ecos_execution::Oracle;
use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod upstream;

pub use api::router;
pub use config::{build_config, Args, Config, Provider};
pub use error::ApiError;
pub use upstream::{
    GeminiInterpreter, Interpretation, InterpretationPrompt, Interpreter, OpenAiInterpreter,
    UpstreamError,
};

/// Shared, read-only handler state.
pub struct AppState {
    pub oracle: Oracle,
    pub interpreter: Arc<dyn Interpreter>,
    pub allowed_origins: Vec<String>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let interpreter: Arc<dyn Interpreter> = match config.provider {
            Provider::Gemini => Arc::new(GeminiInterpreter::new(
                config.api_key.clone(),
                config.model.clone(),
                config.upstream_url.clone(),
                config.timeout,
            )?),
            Provider::Openai => Arc::new(OpenAiInterpreter::new(
                config.api_key.clone(),
                config.model.clone(),
                config.upstream_url.clone(),
                config.timeout,
            )?),
        };
        Ok(Self {
            oracle: Oracle::new(config.oracle.clone()),
            interpreter,
            allowed_origins: config.allowed_origins.clone(),
        })
    }
}
