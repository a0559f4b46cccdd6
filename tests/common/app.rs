use std::sync::Arc;

use axum::Router;
use tokio::sync::broadcast;

use behindwords_backend::analysis::color::{ColorRamp, Rgb};
use behindwords_backend::config::{Config, EvaluatorConfig, RampConfig};
use behindwords_backend::routes::build_router;
use behindwords_backend::services::evaluator::EvaluatorClient;
use behindwords_backend::state::AppState;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub config: Config,
}

// Construct Config directly instead of via set_var: integration tests run on
// multiple threads and mutating the process environment would race.
fn test_config(evaluator: EvaluatorConfig) -> Config {
    Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 3000,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        cors_origin: "http://localhost:5173".to_string(),
        evaluator,
        ramp: RampConfig {
            stops: 101,
            low: "#2d2c2c".to_string(),
            high: "#e82c07".to_string(),
        },
    }
}

fn spawn_with_config(config: Config) -> TestApp {
    let evaluator = Arc::new(EvaluatorClient::new(&config.evaluator));
    let ramp = Arc::new(
        ColorRamp::build(
            config.ramp.stops,
            Rgb::parse(&config.ramp.low).expect("low ramp color"),
            Rgb::parse(&config.ramp.high).expect("high ramp color"),
        )
        .expect("build ramp"),
    );
    let (shutdown_tx, _) = broadcast::channel::<()>(8);

    let state = AppState::new(evaluator, ramp, &config, shutdown_tx);
    let app = build_router(state.clone());

    TestApp { app, state, config }
}

pub fn spawn_test_app() -> TestApp {
    spawn_with_config(test_config(EvaluatorConfig {
        enabled: true,
        mock: true,
        api_url: String::new(),
        timeout_secs: 5,
    }))
}

pub fn spawn_test_app_evaluator_disabled() -> TestApp {
    spawn_with_config(test_config(EvaluatorConfig {
        enabled: false,
        mock: true,
        api_url: String::new(),
        timeout_secs: 5,
    }))
}
