//! 커피숍 메뉴 API 서버.
//!
//! 설정을 로드하고 저장소와 토큰 검증기를 준비한 뒤 Axum 서버를 시작합니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{http::StatusCode, middleware, Router};
use coffee_core::{init_logging, AppConfig, CorsConfig, LogConfig};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use coffee_api::auth::TokenVerifier;
use coffee_api::error::json_timeout_response;
use coffee_api::repository::PgDrinkRepository;
use coffee_api::routes::create_api_router;
use coffee_api::state::AppState;

/// CORS 레이어 생성.
///
/// `cors.allowed_origins`가 비어 있으면 모든 origin을 허용합니다.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .allowed_origins
        .iter()
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    let restricted = !origins.is_empty();
    let allow_origin = if restricted {
        info!("CORS configured with {} allowed origins", origins.len());
        AllowOrigin::list(origins)
    } else {
        if !config.allowed_origins.is_empty() {
            warn!("cors.allowed_origins contains no valid origins, allowing any");
        }
        AllowOrigin::any()
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
        // 자격 증명 포함 허용 (origin 목록 설정 시에만)
        .allow_credentials(restricted)
        .max_age(Duration::from_secs(3600))
}

fn create_router(state: Arc<AppState>, config: &AppConfig) -> Router {
    create_api_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.request_timeout_secs),
        ))
        .layer(middleware::map_response(json_timeout_response))
        .layer(cors_layer(&config.cors))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config = AppConfig::load_default().context("failed to load configuration")?;

    init_logging(LogConfig::from(&config.logging)).map_err(|e| anyhow::anyhow!(e))?;

    info!("Starting Coffee Shop API server...");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.connection_timeout_secs))
        .connect(&config.database.url)
        .await
        .context("failed to connect to database")?;
    info!("Connected to PostgreSQL successfully");

    let drinks = PgDrinkRepository::new(pool);
    drinks
        .setup_schema(config.database.reset_on_boot)
        .await
        .context("failed to prepare drinks table")?;

    let verifier =
        TokenVerifier::from_config(&config.auth).context("failed to build token verifier")?;
    info!(
        issuer = verifier.issuer(),
        audience = verifier.audience(),
        jwks_cache_ttl_secs = config.auth.jwks_cache_ttl_secs,
        "Token verifier configured"
    );

    let state = Arc::new(AppState::new(Arc::new(drinks), Arc::new(verifier)));
    let app = create_router(state, &config);

    info!(%addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
