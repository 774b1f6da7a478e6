use axum::extract::rejection::JsonRejection;
use axum::extract::State as AxumState;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use ecos_execution::{append_block, strip_model_lucky_section, Reading};
use ecos_types::{
    DrawView, GeminiInterpretRequest, GeminiInterpretResponse, HealthzResponse, InterpretRequest,
    InterpretResponse, Lang, LuckyNumbersRequest, LuckyNumbersResponse, MAX_DREAM_CHARS,
    MIN_DREAM_CHARS,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::ApiError;
use crate::upstream::InterpretationPrompt;
use crate::AppState;

/// Default instruction for `/api/interpretar-sonho` when the client sends none.
pub const DEFAULT_PROMPT: &str = "Analise o seguinte sonho e me diga seu possível significado com base em interpretações comuns da simbologia dos sonhos. Seja objetivo e considere aspectos psicológicos e simbólicos tradicionais.";

const FALLBACK_INTERPRETATION: &str = "Não consegui interpretar agora.";

pub fn router(state: Arc<AppState>) -> Router {
    let cors = if state.allowed_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(AllowOrigin::any())
    } else {
        let origins = state
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Invalid origin in allowed origins: {}", origin);
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    }
    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
    .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/interpret-dream", post(interpret_dream))
        .route("/api/interpretar-sonho", post(interpretar_sonho))
        .route("/lucky-numbers", post(lucky_numbers))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> Json<HealthzResponse> {
    Json(HealthzResponse { ok: true })
}

/// Text length in UTF-16 code units, the unit browser clients count in.
fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Trims and bounds the dream text.
fn validate_dream(dream: Option<&str>, min_chars: usize) -> Result<&str, ApiError> {
    let dream = dream.map(str::trim).unwrap_or_default();
    let chars = text_len(dream);
    if chars == 0 {
        return Err(ApiError::InvalidInput(
            "O texto do sonho é obrigatório.".to_string(),
        ));
    }
    if chars < min_chars {
        return Err(ApiError::InvalidInput(format!(
            "Envie o texto do sonho (≥ {min_chars} chars)."
        )));
    }
    if chars > MAX_DREAM_CHARS {
        return Err(ApiError::InvalidInput(
            "O texto do sonho está muito longo.".to_string(),
        ));
    }
    Ok(dream)
}

fn invalid_body(rejection: JsonRejection) -> ApiError {
    ApiError::InvalidInput(format!("Corpo da requisição inválido: {}", rejection.body_text()))
}

fn reading_views(reading: &Reading) -> Vec<DrawView> {
    reading
        .numbers
        .draws()
        .iter()
        .map(|(lottery, numbers)| DrawView {
            lottery: *lottery,
            numbers: numbers.clone(),
        })
        .collect()
}

fn dream_prompt(dream: &str, lang: Lang) -> InterpretationPrompt {
    let (system, user) = match lang {
        Lang::Pt => (
            "Você é um sábio intérprete dos sonhos. Traga significados simbólicos inspirados em tradições espirituais e arquetípicas, com tom poético, acolhedor e enigmático",
            format!(
                "Texto do sonho: \"\"\"{dream}\"\"\"\n\nForneça os símbolos e possíveis significados do sonho;\ntema central e emoções.\nNo final coloque perguntas de auto reflexão.\nE uma ação simples pra hoje."
            ),
        ),
        Lang::En => (
            "You are a wise interpreter of dreams. You bring symbolic meanings inspired by spiritual and archetypal traditions, with a poetic, welcoming, and enigmatic tone.",
            format!(
                "Dream text: \"\"\"{dream}\"\"\"\n\nProvide the dream's symbols and possible meanings;\nthe central theme and emotions.\nAt the end, include reflection questions\nand one simple action for today."
            ),
        ),
    };
    InterpretationPrompt {
        system: Some(system.to_string()),
        user,
    }
}

async fn interpret_dream(
    AxumState(state): AxumState<Arc<AppState>>,
    payload: Result<Json<InterpretRequest>, JsonRejection>,
) -> Result<Json<InterpretResponse>, ApiError> {
    let Json(request) = payload.map_err(invalid_body)?;
    let dream = validate_dream(request.dream.as_deref(), MIN_DREAM_CHARS)?;

    let interpretation = state
        .interpreter
        .interpret(&dream_prompt(dream, request.lang))
        .await?;
    let text = match strip_model_lucky_section(&interpretation.text) {
        "" => FALLBACK_INTERPRETATION,
        text => text,
    };

    let reading = state.oracle.read(dream, None);
    info!(
        seed = %reading.seed,
        chars = dream.chars().count(),
        model = %interpretation.model,
        "interpretation served"
    );
    Ok(Json(InterpretResponse {
        interpretation: append_block(text, &reading.render(request.lang)),
        model: interpretation.model,
    }))
}

async fn interpretar_sonho(
    AxumState(state): AxumState<Arc<AppState>>,
    payload: Result<Json<GeminiInterpretRequest>, JsonRejection>,
) -> Result<Json<GeminiInterpretResponse>, ApiError> {
    let Json(request) = payload.map_err(invalid_body)?;
    let dream = validate_dream(request.sonho.as_deref(), 1)?;
    let prompt = request
        .prompt
        .as_deref()
        .map(str::trim)
        .filter(|prompt| !prompt.is_empty())
        .unwrap_or(DEFAULT_PROMPT);

    let interpretation = state
        .interpreter
        .interpret(&InterpretationPrompt {
            system: None,
            user: format!("{prompt}\n\nSonho: {dream}"),
        })
        .await?;
    let text = strip_model_lucky_section(&interpretation.text);

    let reading = state.oracle.read(dream, Some(prompt));
    info!(
        seed = %reading.seed,
        chars = dream.chars().count(),
        model = %interpretation.model,
        "significado served"
    );
    Ok(Json(GeminiInterpretResponse {
        significado: append_block(text, &reading.render(Lang::Pt)),
        model: interpretation.model,
    }))
}

async fn lucky_numbers(
    AxumState(state): AxumState<Arc<AppState>>,
    payload: Result<Json<LuckyNumbersRequest>, JsonRejection>,
) -> Result<Json<LuckyNumbersResponse>, ApiError> {
    let Json(request) = payload.map_err(invalid_body)?;
    let text = request.text.trim();
    if text_len(text) > MAX_DREAM_CHARS {
        return Err(ApiError::InvalidInput(
            "O texto do sonho está muito longo.".to_string(),
        ));
    }
    let reading = state.oracle.read(text, request.prompt.as_deref());
    Ok(Json(LuckyNumbersResponse {
        seed: reading.seed.value(),
        draws: reading_views(&reading),
        block: reading.render(request.lang),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_dream_bounds() {
        assert!(validate_dream(None, 1).is_err());
        assert!(validate_dream(Some("   "), 1).is_err());
        assert!(validate_dream(Some("curto"), MIN_DREAM_CHARS).is_err());
        assert_eq!(validate_dream(Some("  mar  "), 1).unwrap(), "mar");
        let long = "a".repeat(MAX_DREAM_CHARS + 1);
        assert!(validate_dream(Some(&long), 1).is_err());
        let limit = "ç".repeat(MAX_DREAM_CHARS);
        assert!(validate_dream(Some(&limit), 1).is_ok());
    }

    #[test]
    fn length_counts_utf16_units() {
        // Each emoji is one scalar but two UTF-16 units.
        let emoji = "🌊".repeat(MAX_DREAM_CHARS / 2 + 1);
        assert_eq!(text_len(&emoji), MAX_DREAM_CHARS + 2);
        assert!(validate_dream(Some(&emoji), 1).is_err());
        let fits = "🌊".repeat(MAX_DREAM_CHARS / 2);
        assert!(validate_dream(Some(&fits), 1).is_ok());
        assert!(validate_dream(Some("🌊🌊🌊🌊🌊"), MIN_DREAM_CHARS).is_ok());
    }

    #[test]
    fn prompt_follows_language() {
        let pt = dream_prompt("mar", Lang::Pt);
        assert!(pt.user.starts_with("Texto do sonho: \"\"\"mar\"\"\""));
        let en = dream_prompt("sea", Lang::En);
        assert!(en.system.unwrap().starts_with("You are a wise interpreter"));
    }
}
