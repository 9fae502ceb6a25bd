//! JSON success/error envelopes
//!
//! Every response body is wrapped as
//! `{"is_success", "status_code", "data" | "error"}`.

use std::collections::{BTreeMap, HashMap};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use overlap_types::{CustomError, ErrorCode};

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    pub is_success: bool,
    pub status_code: u16,
    pub data: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub is_success: bool,
    pub status_code: u16,
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

/// Error code to HTTP status; codes missing from the map become 500
pub type CodeMapping = HashMap<ErrorCode, StatusCode>;

pub fn default_code_mapping() -> CodeMapping {
    HashMap::from([
        (ErrorCode::RequestInvalid, StatusCode::BAD_REQUEST),
        (ErrorCode::NotFound, StatusCode::BAD_REQUEST),
        (ErrorCode::RequestNotValid, StatusCode::FORBIDDEN),
        (ErrorCode::BadRequest, StatusCode::BAD_REQUEST),
        (ErrorCode::ParseIntError, StatusCode::BAD_REQUEST),
        (ErrorCode::Unauthorized, StatusCode::UNAUTHORIZED),
    ])
}

/// Client-facing text for a status
pub fn status_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::OK => "Success",
        StatusCode::NO_CONTENT => "No Content",
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => "Invalid Request",
        StatusCode::UNAUTHORIZED => "You don't have access to this action",
        StatusCode::FORBIDDEN => "Validation failed",
        StatusCode::REQUEST_TIMEOUT => "Request Timeout",
        StatusCode::INTERNAL_SERVER_ERROR => "Something went wrong",
        other => other.canonical_reason().unwrap_or("Unknown Status"),
    }
}

/// Builds envelopes; the code mapping is fixed at construction.
#[derive(Debug, Clone)]
pub struct ResponseFormatter {
    mapping: CodeMapping,
}

impl Default for ResponseFormatter {
    fn default() -> Self {
        Self::new(default_code_mapping())
    }
}

impl ResponseFormatter {
    pub fn new(mapping: CodeMapping) -> Self {
        Self { mapping }
    }

    pub fn status_for(&self, code: ErrorCode) -> StatusCode {
        self.mapping
            .get(&code)
            .copied()
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn success<T: Serialize>(&self, data: T) -> Response {
        let body = SuccessResponse {
            is_success: true,
            status_code: StatusCode::OK.as_u16(),
            data,
        };
        (StatusCode::OK, Json(body)).into_response()
    }

    /// `REQUEST_INVALID` errors show their own message; every other code
    /// shows the status text so internal detail stays out of the body.
    pub fn error(&self, err: &CustomError) -> Response {
        let status = self.status_for(err.code());
        let message = if err.code() == ErrorCode::RequestInvalid {
            err.message()
        } else {
            status_message(status)
        };
        self.error_with_message(err, message)
    }

    pub fn error_with_message(&self, err: &CustomError, message: &str) -> Response {
        let status = self.status_for(err.code());
        let body = ErrorBody {
            message: message.to_string(),
            data: err.data().cloned(),
            errors: err.errors().clone(),
        };
        envelope(status, body)
    }

    /// Bare error envelope for a status with no error descriptor behind it
    pub fn error_for_status(&self, status: StatusCode) -> Response {
        let body = ErrorBody {
            message: status_message(status).to_string(),
            data: None,
            errors: BTreeMap::new(),
        };
        envelope(status, body)
    }
}

fn envelope(status: StatusCode, error: ErrorBody) -> Response {
    let body = ErrorResponse {
        is_success: false,
        status_code: status.as_u16(),
        error,
    };
    (status, Json(body)).into_response()
}
