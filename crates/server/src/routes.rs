pub mod auth;
pub mod catalog;
pub mod entrepreneurs;
pub mod memes;
pub mod organizations;
pub mod owners;
pub mod suggest;

use std::time::Instant;

use axum::{
    extract::{DefaultBodyLimit, Request},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::{metrics, types::Health};

use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "ops",
    responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[utoipa::path(get, path = "/metrics", tag = "ops",
    responses((status = 200, description = "Prometheus text format")))]
pub async fn metrics_text() -> impl IntoResponse {
    metrics::encode_metrics()
}

async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let resp = next.run(req).await;
    metrics::REQUESTS_TOTAL.inc();
    metrics::REQUEST_DURATION.observe(start.elapsed().as_secs_f64());
    resp
}

/// Build the full application router. Everything outside the auth
/// allowlist sits behind the bearer guard.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .route("/api/refresh", post(auth::refresh))
        .route("/api/logout", post(auth::logout))
        .route(
            "/api/owners/me",
            get(owners::me).put(owners::update_me).delete(owners::delete_me),
        )
        .route("/api/organizations", post(organizations::create).get(organizations::list))
        .route("/api/organizations/mine", get(organizations::mine))
        .route(
            "/api/organizations/:id",
            get(organizations::get).put(organizations::update).delete(organizations::delete),
        )
        .route("/api/organizations/:id/services", get(catalog::organization_services))
        .route("/api/organizations/:id/products", get(catalog::organization_products))
        .route("/api/entrepreneurs", post(entrepreneurs::create).get(entrepreneurs::list))
        .route(
            "/api/entrepreneurs/:id",
            get(entrepreneurs::get).put(entrepreneurs::update).delete(entrepreneurs::delete),
        )
        .route("/api/entrepreneurs/:id/services", get(catalog::entrepreneur_services))
        .route("/api/entrepreneurs/:id/products", get(catalog::entrepreneur_products))
        .route("/api/service-categories", get(catalog::service_categories))
        .route("/api/product-categories", get(catalog::product_categories))
        .route("/api/services", post(catalog::create_service))
        .route("/api/products", post(catalog::create_product))
        .route("/api/suggest/address", get(suggest::address));

    // Image uploads need more room than the default body limit
    let meme_routes = Router::new()
        .route("/memes", get(memes::list).post(memes::create))
        .route("/memes/:id", get(memes::get).put(memes::update).delete(memes::delete))
        .route("/memes/:id/download", get(memes::download))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024));

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/", get(|| async { Redirect::temporary("/docs") }));

    api.merge(meme_routes)
        .merge(ops)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_owner))
        .with_state(state)
        .layer(middleware::from_fn(track_metrics))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 请求到达时打点
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
