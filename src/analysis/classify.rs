//! Document-level authorship verdict.
//!
//! `probability_llm` is a single scalar reported by the evaluator for the
//! whole document. It is an independent signal, not the mean of the per-word
//! probabilities, and the two are kept as separate named outputs.

use serde::{Deserialize, Serialize};

use crate::constants::LLM_VERDICT_THRESHOLD_PERCENT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorshipLabel {
    #[serde(rename = "LLM")]
    Llm,
    #[serde(rename = "Human")]
    Human,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Likelihood {
    /// Document LLM-likelihood as a percentage, rounded to 2 decimals.
    pub percent: f64,
    pub label: AuthorshipLabel,
}

/// Classify the evaluator's document-level `probability_llm`.
/// The "LLM" verdict is inclusive of the 50% boundary.
pub fn classify(probability_llm: f64) -> Likelihood {
    let percent = (probability_llm * 10_000.0).round() / 100.0;
    let label = if percent >= LLM_VERDICT_THRESHOLD_PERCENT {
        AuthorshipLabel::Llm
    } else {
        AuthorshipLabel::Human
    };
    Likelihood { percent, label }
}
