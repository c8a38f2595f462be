use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::{create_cors_layer, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::io;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Wrap API routes with docs and the cross-cutting layers.
///
/// - `apis` is nested under `/api`
/// - OpenAPI JSON at `/api-docs/openapi.json`, UIs at `/swagger-ui`,
///   `/redoc`, `/rapidoc` and `/scalar`
/// - unknown paths fall back to a JSON 404
/// - request tracing, security headers and response compression
/// - CORS only when `server_config.cors_allowed_origins` is non-empty
///
/// Health and metrics endpoints are merged in by the binary.
///
/// ```ignore
/// #[derive(OpenApi)]
/// #[openapi(paths(/* ... */))]
/// struct ApiDoc;
///
/// let api_routes = Router::new().nest("/employee", employees_router);
/// let router = create_router::<ApiDoc>(api_routes, &config.server)?;
/// ```
pub fn create_router<T>(apis: Router, server_config: &ServerConfig) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers));

    let router = if server_config.cors_allowed_origins.is_empty() {
        info!("CORS disabled (CORS_ALLOWED_ORIGIN not set)");
        router
    } else {
        info!(
            origins = ?server_config.cors_allowed_origins,
            "CORS configured with allowed origins"
        );
        router.layer(create_cors_layer(&server_config.cors_allowed_origins)?)
    };

    Ok(router.layer(CompressionLayer::new()))
}

/// Serve `router` with graceful shutdown, then run `cleanup`.
///
/// Cleanup gets at most `server_config.shutdown_timeout`; past that it is
/// abandoned with a warning.
///
/// ```ignore
/// let cleanup = async move { close_postgres(db, "main").await };
/// create_production_app(router, &config.server, cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let shutdown_timeout = server_config.shutdown_timeout;
    let coordinator = ShutdownCoordinator::default();
    let cleanup_signal = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        cleanup_signal.wait_for_signal().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(_) => info!("Cleanup completed successfully"),
            Err(_) => tracing::warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            ),
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { coordinator.wait_for_signal().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    cleanup_handle.await.ok();

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        routing::get,
    };
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "test"))]
    struct TestDoc;

    fn api() -> Router {
        Router::new().route("/ping", get(|| async { "pong" }))
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8_lossy(&bytes).into_owned())
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_routes_are_nested_under_api() {
        let router = create_router::<TestDoc>(api(), &ServerConfig::default()).unwrap();
        let (status, headers, body) = send(router, get_req("/api/ping")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "pong");
        assert_eq!(headers["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_unknown_path_returns_json_404() {
        let router = create_router::<TestDoc>(api(), &ServerConfig::default()).unwrap();
        let (status, _, body) = send(router, get_req("/nope")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_openapi_json_is_served() {
        let router = create_router::<TestDoc>(api(), &ServerConfig::default()).unwrap();
        let (status, _, body) = send(router, get_req("/api-docs/openapi.json")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"title\":\"test\""));
    }

    #[tokio::test]
    async fn test_cors_headers_only_when_configured() {
        let preflight = || {
            Request::builder()
                .method("OPTIONS")
                .uri("/api/ping")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap()
        };

        let mut config = ServerConfig::default();
        config.cors_allowed_origins = vec!["http://localhost:3000".to_string()];
        let router = create_router::<TestDoc>(api(), &config).unwrap();
        let (_, headers, _) = send(router, preflight()).await;
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );

        let router = create_router::<TestDoc>(api(), &ServerConfig::default()).unwrap();
        let (_, headers, _) = send(router, preflight()).await;
        assert!(!headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[test]
    fn test_invalid_cors_origin_fails() {
        let mut config = ServerConfig::default();
        config.cors_allowed_origins = vec!["bad\norigin".to_string()];
        assert!(create_router::<TestDoc>(api(), &config).is_err());
    }
}
