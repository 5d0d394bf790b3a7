use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use pricewise_core::ProductId;

use crate::app::dto::DiscountRequestBody;
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/discount", post(apply_discount))
        .route("/:id", get(get_product))
}

pub async fn apply_discount(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<DiscountRequestBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "malformed discount request");
            return errors::json_error(StatusCode::BAD_REQUEST, "malformed_request", rejection.body_text());
        }
    };

    let request = match body.validate() {
        Ok(request) => request,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.discounts.apply_discount(&request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id = match id.parse::<ProductId>() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.discounts.get_product(id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
