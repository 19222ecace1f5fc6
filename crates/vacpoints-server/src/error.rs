use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use vacpoints_app::error::AppError;
use vacpoints_core::error::DomainError;
use vacpoints_ports::error::PortError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::App(AppError::Port(PortError::NotFound)) => StatusCode::NOT_FOUND,
            Self::App(AppError::Port(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::App(AppError::Domain(e)) => match e {
                DomainError::UnknownYear(_)
                | DomainError::UnknownSeason(_)
                | DomainError::UnknownRateClass(_)
                | DomainError::UnknownHoliday(_)
                | DomainError::UnknownPeriod(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_REQUEST,
            },
            Self::App(AppError::Parse(_)) | Self::App(AppError::Navigation(_)) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self::App(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (
            status,
            Json(serde_json::json!({"error": self.to_string(), "success": false})),
        )
            .into_response()
    }
}

/// Success envelope shared by every JSON endpoint.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub data: T,
    pub success: bool,
}

pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        data,
        success: true,
    })
}

pub type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;
