//! Central error-to-response translation.
//!
//! Handlers never build error bodies themselves; they hand the error to one of
//! the functions here. Every error body has the same shape:
//!
//! ```json
//! {"status": 400, "error": "validation_error", "message": "Validation failed",
//!  "errors": {"productId": "Product ID is required"}, "timestamp": "..."}
//! ```
//!
//! `errors` is only present for validation failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde_json::json;

use pricewise_core::{DomainError, FieldErrors};
use pricewise_infra::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> Response {
    match err {
        ServiceError::Domain(e) => domain_error_to_response(e),
        ServiceError::Store(e) => {
            tracing::error!(error = %e, "unexpected error occurred");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An unexpected error occurred.",
            )
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    match err {
        DomainError::ProductNotFound(_) => {
            tracing::error!(error = %err, "product not found");
            json_error(StatusCode::NOT_FOUND, "product_not_found", err.to_string())
        }
        DomainError::ProductOutOfStock(_) => {
            tracing::warn!(error = %err, "product out of stock");
            json_error(StatusCode::BAD_REQUEST, "product_out_of_stock", err.to_string())
        }
        DomainError::InvalidDiscountType(_) => {
            tracing::error!(error = %err, "invalid discount type");
            json_error(StatusCode::BAD_REQUEST, "invalid_discount_type", err.to_string())
        }
        DomainError::Validation(errors) => validation_error(errors),
        DomainError::InvalidId(msg) => {
            tracing::warn!(error = %msg, "invalid identifier");
            json_error(StatusCode::BAD_REQUEST, "invalid_id", msg)
        }
    }
}

pub fn validation_error(errors: FieldErrors) -> Response {
    tracing::warn!(?errors, "validation error");
    error_body(
        StatusCode::BAD_REQUEST,
        "validation_error",
        "Validation failed".to_string(),
        Some(errors),
    )
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    error_body(status, code, message.into(), None)
}

fn error_body(
    status: StatusCode,
    code: &'static str,
    message: String,
    errors: Option<FieldErrors>,
) -> Response {
    let mut body = json!({
        "status": status.as_u16(),
        "error": code,
        "message": message,
        "timestamp": Utc::now().to_rfc3339(),
    });
    if let Some(errors) = errors {
        body["errors"] = json!(errors);
    }
    (status, axum::Json(body)).into_response()
}
