use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{info, warn};

use super::{
    error_message, http_client, Interpretation, InterpretationPrompt, Interpreter, UpstreamError,
};

/// Header carrying the API key; the key never goes into the request URL.
const API_KEY_HEADER: &str = "x-goog-api-key";

pub const GEMINI_DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Models tried after the configured one, in order.
pub const GEMINI_FALLBACK_MODELS: [&str; 3] =
    ["gemini-2.0-flash", "gemini-1.5-flash-latest", "gemini-1.5-flash"];

/// Gemini `generateContent` client with model fallback.
pub struct GeminiInterpreter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    models: Vec<String>,
}

impl GeminiInterpreter {
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url
                .unwrap_or_else(|| GEMINI_DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key,
            models: model_order(model.as_deref()),
        })
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    async fn call(&self, model: &str, text: &str) -> Result<(u16, Value), UpstreamError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&json!({ "contents": [{ "parts": [{ "text": text }] }] }))
            .send()
            .await
            .map_err(UpstreamError::from_reqwest)?;
        let status = response.status().as_u16();
        // Body read failures (timeouts included) surface; only the parse is lenient.
        let bytes = response
            .bytes()
            .await
            .map_err(UpstreamError::from_reqwest)?;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Ok((status, body))
    }

    async fn interpret_with_fallback(
        &self,
        prompt: &InterpretationPrompt,
    ) -> Result<Interpretation, UpstreamError> {
        let text = match &prompt.system {
            Some(system) => format!("{system}\n\n{}", prompt.user),
            None => prompt.user.clone(),
        };

        let mut last: Option<(u16, String)> = None;
        for model in &self.models {
            let (status, body) = self.call(model, &text).await?;

            if !(200..300).contains(&status) {
                let details = error_message(&body).unwrap_or_else(|| "Sem detalhes.".to_string());
                let model_not_found =
                    status == 404 && details.to_lowercase().contains("not found");
                if model_not_found {
                    warn!(%model, "gemini model not found; trying next");
                    last = Some((status, details));
                    continue;
                }
                return Err(UpstreamError::Status {
                    status,
                    details,
                    model: model.clone(),
                });
            }

            match extract_text(&body) {
                Some(text) => {
                    info!(%model, chars = text.chars().count(), "gemini interpretation received");
                    return Ok(Interpretation {
                        text,
                        model: model.clone(),
                    });
                }
                None => {
                    warn!(%model, "gemini returned no text; trying next");
                    last = Some((
                        502,
                        "Gemini respondeu sem conteúdo interpretável.".to_string(),
                    ));
                }
            }
        }

        let (status, details) =
            last.unwrap_or((502, "Todos os modelos testados falharam.".to_string()));
        Err(UpstreamError::Exhausted {
            status,
            details,
            tried: self.models.clone(),
        })
    }
}

impl Interpreter for GeminiInterpreter {
    fn interpret<'a>(
        &'a self,
        prompt: &'a InterpretationPrompt,
    ) -> BoxFuture<'a, Result<Interpretation, UpstreamError>> {
        self.interpret_with_fallback(prompt).boxed()
    }
}

/// Configured model first, then the fallbacks without duplicates.
fn model_order(configured: Option<&str>) -> Vec<String> {
    let configured = configured
        .map(str::trim)
        .filter(|model| !model.is_empty())
        .unwrap_or(GEMINI_FALLBACK_MODELS[0]);
    std::iter::once(configured)
        .chain(
            GEMINI_FALLBACK_MODELS
                .iter()
                .copied()
                .filter(|model| *model != configured),
        )
        .map(str::to_string)
        .collect()
}

/// Joins the text parts of the first candidate.
fn extract_text(body: &Value) -> Option<String> {
    let parts = body
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let text = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
