//! Application error codes and the error descriptor handed to the response formatter

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Machine-readable error code carried by a [`CustomError`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ErrorCode {
    #[serde(rename = "BAD_REQUEST")]
    BadRequest,
    #[serde(rename = "NOT_FOUND")]
    NotFound,
    #[serde(rename = "REQUEST_NOT_VALID")]
    RequestNotValid,
    #[serde(rename = "REQUEST_INVALID")]
    RequestInvalid,
    #[serde(rename = "UNMARSHAL_ERROR")]
    UnmarshalError,
    #[serde(rename = "MARSHAL_ERR")]
    MarshalError,
    #[serde(rename = "PARSE_INT_ERROR")]
    ParseIntError,
    #[serde(rename = "UNAUTHORIZED_ERROR")]
    Unauthorized,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::RequestNotValid => "REQUEST_NOT_VALID",
            ErrorCode::RequestInvalid => "REQUEST_INVALID",
            ErrorCode::UnmarshalError => "UNMARSHAL_ERROR",
            ErrorCode::MarshalError => "MARSHAL_ERR",
            ErrorCode::ParseIntError => "PARSE_INT_ERROR",
            ErrorCode::Unauthorized => "UNAUTHORIZED_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error descriptor: a code, a user-facing message and optional payload.
///
/// The HTTP status is not stored here; the response formatter derives it
/// from the code through its own mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomError {
    code: ErrorCode,
    message: String,
    data: Option<serde_json::Value>,
    errors: BTreeMap<String, String>,
    params: BTreeMap<String, String>,
}

impl CustomError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
            errors: BTreeMap::new(),
            params: BTreeMap::new(),
        }
    }

    /// Validation failure whose message is shown to the client verbatim
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RequestInvalid, message)
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_error(mut self, field: impl Into<String>, reason: impl Into<String>) -> Self {
        self.errors.insert(field.into(), reason.into());
        self
    }

    /// Attach a key/value that only shows up in logs
    pub fn with_param(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref()
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Single-line rendering including log params
    pub fn log_line(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|(key, value)| format!("{}: {{{}}}", key.to_uppercase(), value))
            .collect();
        format!(
            "Code: {}, Msg: {}, Params: [{}]",
            self.code,
            self.message,
            params.join(" | ")
        )
    }
}

impl fmt::Display for CustomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code: {} | {}", self.code, self.message)
    }
}

impl std::error::Error for CustomError {}
