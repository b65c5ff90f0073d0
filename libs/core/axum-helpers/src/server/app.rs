use super::shutdown::{ShutdownCoordinator, coordinated_shutdown, shutdown_signal};
use crate::errors::handlers::not_found;
use crate::http::security::security_headers;
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

const CORS_ORIGIN_VAR: &str = "CORS_ALLOWED_ORIGIN";

async fn bind(server_config: &ServerConfig) -> io::Result<TcpListener> {
    let listener = TcpListener::bind(server_config.address()).await?;
    info!("listening on {}", listener.local_addr()?);
    Ok(listener)
}

/// Serve `router` until SIGINT/SIGTERM, draining in-flight requests.
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = bind(server_config).await?;

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| tracing::error!(error = ?e, "server terminated with an error"))
}

/// Parse the mandatory comma-separated origin list in `CORS_ALLOWED_ORIGIN`.
/// Startup fails when the variable is unset, empty, or holds a malformed
/// origin; there is deliberately no permissive default.
fn cors_from_env() -> io::Result<CorsLayer> {
    let bad_config = |msg: String| io::Error::new(io::ErrorKind::InvalidInput, msg);

    let raw = std::env::var(CORS_ORIGIN_VAR).map_err(|_| {
        bad_config(format!(
            "{CORS_ORIGIN_VAR} must be set, e.g. {CORS_ORIGIN_VAR}=http://localhost:3000,https://example.com"
        ))
    })?;

    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::parse::<HeaderValue>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| bad_config(format!("{CORS_ORIGIN_VAR} holds a malformed origin: {e}")))?;

    if origins.is_empty() {
        return Err(bad_config(format!("{CORS_ORIGIN_VAR} must not be empty")));
    }

    info!(origins = %raw, "cors origins configured");

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static("x-csrf-token"),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600)))
}

/// Routes serving the OpenAPI document plus the four documentation viewers.
fn docs_routes<T: OpenApi>() -> Router {
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
}

/// Wrap API routes with the workspace-standard outer layers.
///
/// The API lands under `/api`, documentation viewers at `/swagger-ui`,
/// `/redoc`, `/rapidoc`, and `/scalar`, and unmatched paths answer with the
/// JSON 404 body. Middleware, outermost first: compression, CORS, security
/// headers, request tracing.
///
/// Health endpoints stay out on purpose; merge `health_router()` and a
/// readiness route in the application.
///
/// # Errors
/// Fails when [`cors_from_env`] rejects the CORS configuration.
pub async fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors = cors_from_env()?;

    Ok(docs_routes::<T>()
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        .layer(CompressionLayer::new()))
}

fn spawn_cleanup<F>(
    coordinator: ShutdownCoordinator,
    deadline: Duration,
    cleanup: F,
) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        coordinator.wait_for_signal().await;

        info!(?deadline, "running shutdown cleanup");
        if tokio::time::timeout(deadline, cleanup).await.is_err() {
            warn!(?deadline, "cleanup missed its deadline, shutting down anyway");
        }
    })
}

/// Serve with coordinated shutdown and a bounded cleanup phase.
///
/// On SIGINT/SIGTERM the listener stops accepting, in-flight requests drain,
/// and `cleanup` gets at most `shutdown_timeout` to release resources before
/// the process exits regardless.
///
/// ```ignore
/// create_production_app(router, &config.server, Duration::from_secs(30), async move {
///     drop(mongo_client);
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = bind(server_config).await?;

    let (coordinator, _rx) = ShutdownCoordinator::new();
    let cleanup_task = spawn_cleanup(coordinator.clone(), shutdown_timeout, cleanup);
    let served = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(coordinated_shutdown(coordinator))
        .await
        .inspect_err(|e| tracing::error!(error = ?e, "server terminated with an error"));

    // Do not return before cleanup has had its chance
    cleanup_task.await.ok();

    served
}
