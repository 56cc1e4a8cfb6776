use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rulesmith::generate::GenerateError;
use rulesmith::{CopilotError, HistoryError};
use serde::Serialize;

#[derive(Serialize)]
pub(crate) struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
pub(crate) struct ErrorDetail {
    /// Machine-readable error code (e.g. `RECORD_NOT_FOUND`).
    code: &'static str,
    /// Human-readable description of the error.
    message: String,
}

/// Standard API error type.
///
/// Most variants produce a JSON response matching:
/// `{"error":{"code":"SCREAMING_SNAKE","message":"human-readable"}}`.
///
/// [`ApiError::InvalidModelReply`] is the exception: it keeps the flat
/// `{"error":"AI returned invalid JSON.","raw":"..."}` shape so callers can
/// surface the undecodable model output verbatim.
#[derive(Debug)]
pub enum ApiError {
    NotFound { code: &'static str, message: String },
    BadRequest { code: &'static str, message: String },
    BadGateway { code: &'static str, message: String },
    Internal { message: String },
    InvalidModelReply { raw: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, code, message),
            Self::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            Self::BadGateway { code, message } => (StatusCode::BAD_GATEWAY, code, message),
            Self::Internal { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
            }
            Self::InvalidModelReply { raw } => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({
                        "error": "AI returned invalid JSON.",
                        "raw": raw,
                    })),
                )
                    .into_response();
            }
        };

        (
            status,
            Json(ErrorBody {
                error: ErrorDetail { code, message },
            }),
        )
            .into_response()
    }
}

impl From<GenerateError> for ApiError {
    fn from(err: GenerateError) -> Self {
        let message = err.to_string();
        match err {
            GenerateError::InputTooShort => Self::BadRequest {
                code: "INVALID_INPUT",
                message,
            },
            GenerateError::InvalidReply { raw } => Self::InvalidModelReply { raw },
            GenerateError::Transport(_) => Self::BadGateway {
                code: "MODEL_UNREACHABLE",
                message,
            },
            GenerateError::Endpoint { .. } => Self::BadGateway {
                code: "MODEL_ERROR",
                message,
            },
            GenerateError::EmptyReply => Self::BadGateway {
                code: "MODEL_EMPTY_REPLY",
                message,
            },
        }
    }
}

impl From<HistoryError> for ApiError {
    fn from(err: HistoryError) -> Self {
        let message = err.to_string();
        match err {
            HistoryError::InvalidDraft(_) => Self::BadRequest {
                code: "VALIDATION_ERROR",
                message,
            },
            HistoryError::Persistence(_) | HistoryError::Closed => Self::Internal { message },
        }
    }
}

impl From<CopilotError> for ApiError {
    fn from(err: CopilotError) -> Self {
        match err {
            CopilotError::Generate(e) => e.into(),
            CopilotError::History(e) => e.into(),
        }
    }
}
