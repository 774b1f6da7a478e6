//! JSON bodies exchanged between the mobile client and the interpreter service.

use serde::{Deserialize, Serialize};

use crate::draw::{DrawResult, Lang, Lottery};

/// Body of `POST /interpret-dream`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct InterpretRequest {
    #[serde(default)]
    pub dream: Option<String>,
    #[serde(default)]
    pub lang: Lang,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InterpretResponse {
    pub interpretation: String,
    pub model: String,
}

/// Body of `POST /api/interpretar-sonho`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct GeminiInterpretRequest {
    #[serde(default)]
    pub sonho: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GeminiInterpretResponse {
    pub significado: String,
    pub model: String,
}

/// Body of `POST /lucky-numbers`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct LuckyNumbersRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub lang: Lang,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DrawView {
    pub lottery: Lottery,
    pub numbers: DrawResult,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LuckyNumbersResponse {
    pub seed: u32,
    pub draws: Vec<DrawView>,
    pub block: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(rename = "triedModels", skip_serializing_if = "Vec::is_empty", default)]
    pub tried_models: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HealthzResponse {
    pub ok: bool,
}
