use std::collections::BTreeMap;

use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::{BusinessCode, EngineError};
use serde::Serialize;

pub use server::{router, run, run_with_listener};

mod movements;
mod server;

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

/// JSON error body.
///
/// `code` is present for business conflicts, `fields` for validation
/// failures; everything else carries only `error`.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<BTreeMap<String, String>>,
}

impl ErrorBody {
    fn message(error: String) -> Self {
        Self {
            error,
            code: None,
            fields: None,
        }
    }
}

/// Maps an engine outcome to its HTTP shape.
///
/// Exhaustive on purpose: a new engine error variant must be given an
/// explicit status before this compiles again.
fn response_for_engine_error(err: EngineError) -> (StatusCode, ErrorBody) {
    match err {
        EngineError::NotFound(what) => (
            StatusCode::NOT_FOUND,
            ErrorBody::message(format!("{what} not found")),
        ),
        EngineError::Validation(fields) => (
            StatusCode::BAD_REQUEST,
            ErrorBody {
                error: "validation failed".to_string(),
                code: None,
                fields: Some(
                    fields
                        .iter()
                        .map(|(field, message)| (field.to_string(), message.to_string()))
                        .collect(),
                ),
            },
        ),
        EngineError::Business { code, message } => (
            match code {
                BusinessCode::DuplicateMovement => StatusCode::CONFLICT,
            },
            ErrorBody {
                error: message,
                code: Some(code.as_str()),
                fields: None,
            },
        ),
        EngineError::System(cause) => {
            // The cause stays in the logs; clients get a generic message.
            tracing::error!("system error: {cause}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::message("internal server error".to_string()),
            )
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ServerError::Engine(err) => response_for_engine_error(err),
            ServerError::Generic(error) => (StatusCode::BAD_REQUEST, ErrorBody::message(error)),
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use engine::{FieldErrors, SystemCause};

    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::NotFound("movement x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_validation_maps_to_400() {
        let mut fields = FieldErrors::new();
        fields.push("amount", "must be strictly positive");
        let res = ServerError::from(EngineError::Validation(fields)).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_duplicate_maps_to_409() {
        let res = ServerError::from(EngineError::duplicate_movement()).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_system_maps_to_500() {
        let err = EngineError::System(SystemCause::Timeout(Duration::from_secs(5)));
        let res = ServerError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
