use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::analysis::report::build_report;
use crate::response::{ok, AppError};
use crate::state::AppState;
use crate::validation::validate_essay;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(analyze_essay))
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    essay: String,
}

async fn analyze_essay(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    validate_essay(&req.essay).map_err(|msg| AppError::bad_request("INVALID_ESSAY", msg))?;

    let response = state.evaluator().evaluate(&req.essay).await?;

    tracing::debug!(
        words = response.words.len(),
        forward_windows = response.heat_map.front_to_back.len(),
        backward_windows = response.heat_map.back_to_front.len(),
        "Evaluator response received"
    );

    let report = build_report(&response, state.ramp())?;

    Ok(ok(report))
}
