use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue};
use behindwords_backend::analysis::color::{ColorRamp, Rgb};
use behindwords_backend::config::Config;
use behindwords_backend::logging::{init_tracing, LogConfig};
use behindwords_backend::routes::build_router;
use behindwords_backend::services::evaluator::EvaluatorClient;
use behindwords_backend::state::AppState;
use tokio::sync::broadcast;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    init_tracing(&LogConfig {
        log_level: config.log_level.clone(),
        enable_file_logs: config.enable_file_logs,
        log_dir: config.log_dir.clone(),
    });
    tracing::info!("Starting behindwords-backend");

    // Validate evaluator config at startup (panics on real mode without a URL)
    EvaluatorClient::validate_config(&config.evaluator);

    let ramp = Arc::new(build_ramp(&config));
    let evaluator = Arc::new(EvaluatorClient::new(&config.evaluator));

    let (shutdown_tx, _) = broadcast::channel::<()>(8);

    let state = AppState::new(evaluator, ramp, &config, shutdown_tx.clone());

    let cors_layer = build_cors_layer(&config);

    let app = build_router(state)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    let addr = SocketAddr::new(config.host, config.port);
    tracing::info!(%addr, "Listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");

    let server_future = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(shutdown_tx.clone()));

    if let Err(e) = server_future.await {
        tracing::error!(error = %e, "HTTP server crashed");
    }

    tracing::info!("Shutdown complete");
}

fn build_ramp(config: &Config) -> ColorRamp {
    let low = Rgb::parse(&config.ramp.low).unwrap_or_else(|e| {
        panic!(
            "FATAL: Invalid RAMP_COLOR_LOW '{}': {}. \
             Fix the RAMP_COLOR_LOW environment variable.",
            config.ramp.low, e
        );
    });
    let high = Rgb::parse(&config.ramp.high).unwrap_or_else(|e| {
        panic!(
            "FATAL: Invalid RAMP_COLOR_HIGH '{}': {}. \
             Fix the RAMP_COLOR_HIGH environment variable.",
            config.ramp.high, e
        );
    });
    ColorRamp::build(config.ramp.stops, low, high).unwrap_or_else(|e| {
        panic!(
            "FATAL: Invalid ramp configuration (RAMP_STOPS={}): {}",
            config.ramp.stops, e
        );
    })
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors_origin.trim() == "*" {
        // Wildcard is for development only; wildcard and credentials are mutually exclusive
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_credentials(false)
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .allow_methods(Any);
    }

    match config.cors_origin.parse::<axum::http::HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .allow_methods(Any),
        Err(e) => {
            panic!(
                "FATAL: Invalid CORS_ORIGIN '{}': {}. \
                 Fix the CORS_ORIGIN environment variable.",
                config.cors_origin, e
            );
        }
    }
}

async fn shutdown_signal(shutdown_tx: broadcast::Sender<()>) {
    #[cfg(unix)]
    {
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = sigterm.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("Shutdown signal received");
    let _ = shutdown_tx.send(());
}
