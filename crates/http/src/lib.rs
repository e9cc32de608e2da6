//! HTTP server facade for Bookstall with Axum, error handling, and OpenAPI
//! document merging.

use anyhow::Context;
use axum::{extract::Request, http::HeaderValue, routing::get, Router};
use surrealdb::engine::any::Any;
use surrealdb::Surreal;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::{Timestamp, Uuid};

use bookstall_kernel::settings::Settings;
use bookstall_kernel::ModuleRegistry;

pub mod error;
pub mod router;

use router::RouterBuilder;

/// Start the HTTP server with the given module registry.
///
/// The datastore handle is injected into every handler as an `Extension`;
/// it is a clone of the process-wide cached connection.
pub async fn start_server(
    registry: &ModuleRegistry,
    settings: &Settings,
    db: Surreal<Any>,
) -> anyhow::Result<()> {
    let app = build_router(registry, settings, db);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", settings.server.host, settings.server.port))
            .await
            .context("failed to bind to address")?;

    tracing::info!(
        "HTTP server listening on http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Build the main HTTP router with all module routes mounted.
///
/// Routes first, middleware after: `Router::layer` only wraps routes that
/// already exist, so the extension and middleware layers must come last.
pub fn build_router(registry: &ModuleRegistry, settings: &Settings, db: Surreal<Any>) -> Router {
    let mut router_builder = RouterBuilder::new().route("/healthz", get(health_check));

    for module in registry.modules() {
        tracing::info!(
            module = module.name(),
            "mounting module routes under /api/{}",
            module.name()
        );
        router_builder = router_builder.mount_module(module.name(), module.routes());
    }

    router_builder
        .with_openapi(registry)
        .with_extension(db)
        .with_timeout(settings.server.request_timeout_ms)
        .with_request_id()
        .with_cors()
        .with_tracing()
        .build()
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

/// Request ID generator producing sortable UUIDv7 ids.
#[derive(Clone, Copy)]
pub(crate) struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let timestamp = Timestamp::now(uuid::NoContext);
        let request_id = Uuid::new_v7(timestamp)
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}
