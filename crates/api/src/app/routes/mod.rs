use axum::{routing::get, Router};

pub mod products;
pub mod system;

/// Router for all product endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/product", products::router())
}
