use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::auth::repo::seaorm::SeaOrmPrincipalRepository;
use service::auth::AuthService;
use service::storage::{FsObjectStore, ObjectStore};
use service::suggest::{DaDataProvider, SuggestionCache};

use crate::routes;
use crate::state::ServerState;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn auth_config(cfg: &configs::AuthConfig) -> anyhow::Result<service::auth::AuthConfig> {
    let algorithm = match cfg.algorithm.as_str() {
        "HS256" => jsonwebtoken::Algorithm::HS256,
        "HS384" => jsonwebtoken::Algorithm::HS384,
        "HS512" => jsonwebtoken::Algorithm::HS512,
        other => anyhow::bail!("unsupported signing algorithm {other}"),
    };
    Ok(service::auth::AuthConfig {
        secret: cfg.secret.clone(),
        algorithm,
        access_ttl: Duration::from_secs(cfg.access_ttl_minutes * 60),
        refresh_ttl: Duration::from_secs(cfg.refresh_ttl_days * 24 * 60 * 60),
    })
}

/// Wire the application state from validated config.
pub async fn build_state(cfg: &configs::AppConfig) -> anyhow::Result<ServerState> {
    let db = models::db::connect_with(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;

    let repo = Arc::new(SeaOrmPrincipalRepository { db: db.clone() });
    let auth = Arc::new(AuthService::new(repo, auth_config(&cfg.auth)?));

    let provider = Arc::new(DaDataProvider::new(
        cfg.suggest.api_url.clone(),
        cfg.suggest.api_key.clone(),
        Duration::from_secs(cfg.suggest.timeout_secs),
    )?);
    let suggestions = Arc::new(SuggestionCache::new(
        provider,
        Duration::from_secs(cfg.suggest.cache_ttl_secs),
        cfg.suggest.cache_capacity,
        cfg.suggest.count,
    ));

    let store: Arc<dyn ObjectStore> = Arc::new(FsObjectStore::new(cfg.storage.media_dir.clone()));

    Ok(ServerState { db, auth, suggestions, store })
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    // Fails fast on a missing signing secret or database URL
    let cfg = configs::AppConfig::load_and_validate()?;

    common::env::ensure_media_dir(&cfg.storage.media_dir).await?;

    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
