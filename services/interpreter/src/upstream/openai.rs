use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::info;

use super::{
    error_message, http_client, Interpretation, InterpretationPrompt, Interpreter, UpstreamError,
};

pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4.1-mini";

const MAX_OUTPUT_TOKENS: u32 = 600;
const TEMPERATURE: f64 = 0.7;

/// OpenAI Responses API client.
pub struct OpenAiInterpreter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiInterpreter {
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url
                .unwrap_or_else(|| OPENAI_DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key,
            model: model.unwrap_or_else(|| OPENAI_DEFAULT_MODEL.to_string()),
        })
    }

    fn body(&self, prompt: &InterpretationPrompt) -> Value {
        let mut input = Vec::with_capacity(2);
        if let Some(system) = &prompt.system {
            input.push(json!({ "role": "system", "content": system }));
        }
        input.push(json!({ "role": "user", "content": prompt.user }));
        json!({
            "model": self.model,
            "input": input,
            "max_output_tokens": MAX_OUTPUT_TOKENS,
            "temperature": TEMPERATURE,
        })
    }

    async fn respond(
        &self,
        prompt: &InterpretationPrompt,
    ) -> Result<Interpretation, UpstreamError> {
        let response = self
            .client
            .post(format!("{}/v1/responses", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&self.body(prompt))
            .send()
            .await
            .map_err(UpstreamError::from_reqwest)?;
        let status = response.status().as_u16();
        let body = response
            .json::<Value>()
            .await
            .map_err(UpstreamError::from_reqwest)?;

        if !(200..300).contains(&status) {
            return Err(UpstreamError::Status {
                status,
                details: error_message(&body).unwrap_or_else(|| "Sem detalhes.".to_string()),
                model: self.model.clone(),
            });
        }

        let text = extract_output_text(&body).ok_or_else(|| UpstreamError::Empty {
            details: "OpenAI respondeu sem texto.".to_string(),
            tried: vec![self.model.clone()],
        })?;
        info!(
            model = %self.model,
            chars = text.chars().count(),
            "openai interpretation received"
        );
        Ok(Interpretation {
            text,
            model: self.model.clone(),
        })
    }
}

impl Interpreter for OpenAiInterpreter {
    fn interpret<'a>(
        &'a self,
        prompt: &'a InterpretationPrompt,
    ) -> BoxFuture<'a, Result<Interpretation, UpstreamError>> {
        self.respond(prompt).boxed()
    }
}

/// Reads `output_text`, falling back to the text items of `output[].content[]`.
fn extract_output_text(body: &Value) -> Option<String> {
    if let Some(text) = body.get("output_text").and_then(Value::as_str) {
        let text = text.trim();
        if !text.is_empty() {
            return Some(text.to_string());
        }
    }
    let text = body
        .get("output")?
        .as_array()?
        .iter()
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter_map(|content| content.get("text").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join("\n");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
