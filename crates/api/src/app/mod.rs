//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store, clock and season picker wiring
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and validation
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use anyhow::Context;
use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::config::AppConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let services = services::build_services(config)
        .await
        .context("failed to initialise stores")?;
    Ok(build_app_with_services(Arc::new(services)))
}

/// Router over already-wired services.
pub fn build_app_with_services(services: Arc<services::AppServices>) -> Router {
    routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(middleware::request_logging))
            .layer(Extension(services)),
    )
}
