//! Client for the remote essay scoring service.
//!
//! The evaluator receives the raw essay and replies with the tokenized word
//! list, the two directional window-probability sequences, the shared window
//! parameters, a document-level `probability_llm`, and display statistics.
//! In mock mode the client synthesizes a deterministic response from the
//! essay text so the whole pipeline runs without a network dependency.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::EvaluatorConfig;

/// Window size and stride used by the mock evaluator.
const MOCK_WINDOW_SIZE: usize = 3;
const MOCK_STRIDE: usize = 2;

#[derive(Debug, Clone)]
pub struct EvaluatorClient {
    config: EvaluatorConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct EvaluateRequest<'a> {
    essay: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatMap {
    #[serde(rename = "front-to-back")]
    pub front_to_back: Vec<f64>,
    #[serde(rename = "back-to-front")]
    pub back_to_front: Vec<f64>,
}

/// One display statistic, passed through to the report unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistic {
    pub label: String,
    #[serde(default)]
    pub description: String,
    pub value: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatorResponse {
    pub words: Vec<String>,
    pub heat_map: HeatMap,
    pub step: usize,
    pub n: usize,
    pub probability_llm: f64,
    #[serde(default)]
    pub statistics: BTreeMap<String, Statistic>,
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluatorError {
    #[error("evaluator is disabled")]
    Disabled,
    #[error("evaluator request timed out")]
    Timeout,
    #[error("evaluator network error: {0}")]
    Network(String),
    #[error("evaluator api error: status={status}, message={message}")]
    Api { status: u16, message: String },
    #[error("evaluator response could not be decoded: {0}")]
    Decode(String),
}

impl EvaluatorClient {
    pub fn new(config: &EvaluatorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            config: config.clone(),
            client,
        }
    }

    /// Validate evaluator configuration at startup.
    /// Panics when real mode is selected without an API URL to call.
    pub fn validate_config(config: &EvaluatorConfig) {
        if config.enabled && !config.mock && config.api_url.trim().is_empty() {
            panic!(
                "Invalid evaluator configuration: enabled=true and mock=false \
                 but EVALUATOR_API_URL is empty. Set EVALUATOR_API_URL or \
                 enable EVALUATOR_MOCK."
            );
        }
    }

    pub async fn evaluate(&self, essay: &str) -> Result<EvaluatorResponse, EvaluatorError> {
        if !self.config.enabled {
            return Err(EvaluatorError::Disabled);
        }
        if self.config.mock {
            return Ok(mock_response(essay));
        }

        let response = self
            .client
            .post(&self.config.api_url)
            .json(&EvaluateRequest { essay })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EvaluatorError::Timeout
                } else {
                    EvaluatorError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EvaluatorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<EvaluatorResponse>()
            .await
            .map_err(|e| EvaluatorError::Decode(e.to_string()))
    }
}

/// Deterministic stand-in response derived from the essay text alone.
fn mock_response(essay: &str) -> EvaluatorResponse {
    let words: Vec<String> = essay.split_whitespace().map(str::to_string).collect();
    let n = MOCK_WINDOW_SIZE;
    let step = MOCK_STRIDE;

    let front_to_back: Vec<f64> = (0..words.len())
        .step_by(step)
        .map(|start| {
            let end = (start + n).min(words.len());
            mock_window_score(&words[start..end])
        })
        .collect();

    let last = words.len().saturating_sub(1);
    let back_to_front: Vec<f64> = (0..words.len())
        .step_by(step)
        .map(|offset| {
            let start = last - offset;
            let lo = (start + 1).saturating_sub(n);
            mock_window_score(&words[lo..=start])
        })
        .collect();

    let window_count = front_to_back.len() + back_to_front.len();
    let probability_llm = if window_count == 0 {
        0.0
    } else {
        let sum: f64 = front_to_back.iter().chain(back_to_front.iter()).sum();
        sum / window_count as f64
    };

    let mean_word_len = if words.is_empty() {
        0.0
    } else {
        words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / words.len() as f64
    };

    let mut statistics = BTreeMap::new();
    statistics.insert(
        "mean_word_length".to_string(),
        Statistic {
            label: "Mean word length".to_string(),
            description: "Average number of characters per word".to_string(),
            value: mean_word_len,
            max: 20.0,
        },
    );
    statistics.insert(
        "window_coverage".to_string(),
        Statistic {
            label: "Window coverage".to_string(),
            description: "Scored windows across both directions".to_string(),
            value: window_count as f64,
            max: words.len().max(1) as f64,
        },
    );

    EvaluatorResponse {
        words,
        heat_map: HeatMap {
            front_to_back,
            back_to_front,
        },
        step,
        n,
        probability_llm,
        statistics,
    }
}

/// Pseudo-probability in [0, 1] from the character lengths of a window.
fn mock_window_score(window: &[String]) -> f64 {
    let total: usize = window.iter().map(|w| w.chars().count()).sum();
    ((total * 31 + 7) % 101) as f64 / 100.0
}
