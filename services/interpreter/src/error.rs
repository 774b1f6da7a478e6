use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ecos_types::ErrorResponse;
use thiserror::Error;
use tracing::{error, warn};

use crate::upstream::UpstreamError;

/// Error type for request handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("lucky numbers: {0}")]
    Draw(#[from] ecos_execution::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(UpstreamError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Upstream(UpstreamError::Reqwest(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Upstream(UpstreamError::Empty { .. }) => StatusCode::BAD_GATEWAY,
            ApiError::Upstream(
                UpstreamError::Status { status, .. } | UpstreamError::Exhausted { status, .. },
            ) => upstream_status(*status),
            ApiError::Draw(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorResponse {
        let (error, details, model, tried_models) = match self {
            ApiError::InvalidInput(message) => (message.clone(), None, None, Vec::new()),
            ApiError::Upstream(UpstreamError::Timeout) => (
                "Tempo limite atingido ao chamar a IA.".to_string(),
                None,
                None,
                Vec::new(),
            ),
            ApiError::Upstream(UpstreamError::Reqwest(err)) => (
                "Erro ao comunicar com a IA.".to_string(),
                Some(err.to_string()),
                None,
                Vec::new(),
            ),
            ApiError::Upstream(UpstreamError::Status {
                details, model, ..
            }) => (
                "Erro ao comunicar com a IA.".to_string(),
                Some(details.clone()),
                Some(model.clone()),
                Vec::new(),
            ),
            ApiError::Upstream(
                UpstreamError::Exhausted { details, tried, .. }
                | UpstreamError::Empty { details, tried },
            ) => (
                "Erro ao comunicar com a IA.".to_string(),
                Some(details.clone()),
                None,
                tried.clone(),
            ),
            ApiError::Draw(err) => (
                "Erro interno".to_string(),
                Some(err.to_string()),
                None,
                Vec::new(),
            ),
        };
        ErrorResponse {
            error,
            details,
            model,
            tried_models,
        }
    }
}

/// Passes upstream error statuses through, mapping nonsense to 502.
fn upstream_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status)
        .ok()
        .filter(|status| status.is_client_error() || status.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, err = %self, "request failed");
        } else {
            warn!(%status, err = %self, "request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}
