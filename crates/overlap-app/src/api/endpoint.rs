//! The overlap-check endpoint
//!
//! Decodes the request body, runs the checker and answers with an envelope.
//! Each request is handled on its own: decode, compute, respond.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;

use overlap_domain::service::OverlapChecker;
use overlap_infra::Logger;
use overlap_types::{CustomError, ErrorCode};

use super::dto::OverlapRequest;
use super::response::ResponseFormatter;

pub struct OverlapEndpoint {
    checker: Arc<dyn OverlapChecker>,
    logger: Arc<dyn Logger>,
    formatter: ResponseFormatter,
}

impl OverlapEndpoint {
    pub fn new(
        checker: Arc<dyn OverlapChecker>,
        logger: Arc<dyn Logger>,
        formatter: ResponseFormatter,
    ) -> Self {
        Self {
            checker,
            logger,
            formatter,
        }
    }

    pub fn formatter(&self) -> &ResponseFormatter {
        &self.formatter
    }

    /// Respond to an already-decoded request. The checker is only called
    /// when decoding succeeded.
    pub fn handle(&self, decoded: Result<OverlapRequest, CustomError>) -> Response {
        match decoded {
            Ok(request) => {
                let is_overlap = self.checker.check(&request.range1, &request.range2);
                self.logger
                    .info(format_args!("isOverlap the time range {}", is_overlap));
                self.formatter.success(is_overlap)
            }
            Err(err) => {
                self.logger
                    .error(format_args!("Unable to bind with json body: {}", err.log_line()));
                self.formatter.error(&err)
            }
        }
    }
}

/// Turn an axum body rejection into a `BAD_REQUEST` descriptor
pub fn decode_error(rejection: &JsonRejection) -> CustomError {
    let reason = rejection.body_text();
    CustomError::new(ErrorCode::BadRequest, reason.clone())
        .with_error("body", reason)
        .with_param("status", rejection.status().as_u16())
}

/// `POST /api/v1/overlap-check`
pub async fn check_overlap(
    State(endpoint): State<Arc<OverlapEndpoint>>,
    payload: Result<Json<OverlapRequest>, JsonRejection>,
) -> Response {
    let decoded = payload
        .map(|Json(request)| request)
        .map_err(|rejection| decode_error(&rejection));
    endpoint.handle(decoded)
}

/// Router fallback for unknown paths
pub async fn not_found(State(endpoint): State<Arc<OverlapEndpoint>>) -> Response {
    endpoint.formatter().error_for_status(StatusCode::NOT_FOUND)
}
