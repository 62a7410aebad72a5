//! Error to HTTP response translation

use crate::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        use airdesk_records::Error as Records;

        match self {
            Error::Records(e) => match e {
                Records::InvalidId { .. } | Records::ImmutableId { .. } => StatusCode::BAD_REQUEST,
                Records::NotFound { .. } => StatusCode::NOT_FOUND,
                Records::DuplicateId { .. } => StatusCode::CONFLICT,
                Records::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                Records::Storage(_) | Records::Serialization(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Error::RouteNotFound(_) => StatusCode::NOT_FOUND,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorDetail {
        match self {
            Error::Records(e) if e.is_domain() => ErrorDetail {
                code: e.code(),
                message: e.to_string(),
                details: e.details().cloned(),
            },
            Error::RouteNotFound(_) => ErrorDetail {
                code: "NOT_FOUND",
                message: self.to_string(),
                details: None,
            },
            // Internal failures are logged, not echoed to the client.
            Error::Records(_) | Error::Internal(_) => ErrorDetail {
                code: "INTERNAL_ERROR",
                message: "Internal server error".to_string(),
                details: None,
            },
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(ErrorBody { error: self.body() })).into_response()
    }
}
