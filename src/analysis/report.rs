//! Assembles the full analysis report from an evaluator response.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::aggregate::{aggregate, AggregateError};
use crate::analysis::classify::{classify, Likelihood};
use crate::analysis::color::ColorRamp;
use crate::services::evaluator::{EvaluatorResponse, Statistic};

/// One word of the essay with its aggregated probability and display color.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordHighlight {
    pub word: String,
    pub probability: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Aligned one-to-one with the evaluator's word list.
    pub words: Vec<WordHighlight>,
    /// Document verdict from the evaluator's own `probability_llm`; this is
    /// an independent signal, not the mean of the per-word probabilities.
    pub likelihood: Likelihood,
    pub probability_llm: f64,
    /// Evaluator statistics, passed through unmodified.
    pub statistics: BTreeMap<String, Statistic>,
    pub generated_at: DateTime<Utc>,
}

/// Run the aggregation over an evaluator response and attach colors, the
/// document verdict, and the pass-through statistics.
pub fn build_report(
    response: &EvaluatorResponse,
    ramp: &ColorRamp,
) -> Result<AnalysisReport, AggregateError> {
    let scores = aggregate(
        &response.words,
        &response.heat_map.front_to_back,
        &response.heat_map.back_to_front,
        response.n,
        response.step,
    )?;

    let words = scores
        .into_iter()
        .map(|score| WordHighlight {
            color: ramp.hex_for(score.probability),
            word: score.word,
            probability: score.probability,
        })
        .collect();

    Ok(AnalysisReport {
        words,
        likelihood: classify(response.probability_llm),
        probability_llm: response.probability_llm,
        statistics: response.statistics.clone(),
        generated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classify::AuthorshipLabel;
    use crate::analysis::color::Rgb;
    use crate::constants::{DEFAULT_RAMP_HIGH, DEFAULT_RAMP_LOW, DEFAULT_RAMP_STOPS};
    use crate::services::evaluator::HeatMap;

    fn ramp() -> ColorRamp {
        ColorRamp::build(
            DEFAULT_RAMP_STOPS,
            Rgb::parse(DEFAULT_RAMP_LOW).unwrap(),
            Rgb::parse(DEFAULT_RAMP_HIGH).unwrap(),
        )
        .unwrap()
    }

    fn sample_response() -> EvaluatorResponse {
        let mut statistics = BTreeMap::new();
        statistics.insert(
            "perplexity".to_string(),
            Statistic {
                label: "Perplexity".to_string(),
                description: "Model surprise".to_string(),
                value: 41.5,
                max: 100.0,
            },
        );
        EvaluatorResponse {
            words: vec!["a", "b", "c", "d"].into_iter().map(String::from).collect(),
            heat_map: HeatMap {
                front_to_back: vec![0.2, 0.8],
                back_to_front: vec![0.6, 0.1],
            },
            step: 2,
            n: 2,
            probability_llm: 0.91,
            statistics,
        }
    }

    #[test]
    fn report_aligns_with_word_list() {
        let report = build_report(&sample_response(), &ramp()).unwrap();
        assert_eq!(report.words.len(), 4);
        let words: Vec<&str> = report.words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["a", "b", "c", "d"]);
        assert!((report.words[0].probability - 0.15).abs() < 1e-12);
        assert!((report.words[2].probability - 0.70).abs() < 1e-12);
    }

    #[test]
    fn colors_come_from_the_ramp() {
        let r = ramp();
        let report = build_report(&sample_response(), &r).unwrap();
        for highlight in &report.words {
            assert_eq!(highlight.color, r.hex_for(highlight.probability));
            assert!(highlight.color.starts_with('#'));
            assert_eq!(highlight.color.len(), 7);
        }
    }

    #[test]
    fn likelihood_is_independent_of_word_means() {
        let report = build_report(&sample_response(), &ramp()).unwrap();
        // Mean of per-word probabilities is 0.425; the verdict tracks the
        // evaluator's own 0.91 instead.
        assert!((report.likelihood.percent - 91.0).abs() < 1e-9);
        assert_eq!(report.likelihood.label, AuthorshipLabel::Llm);
        let word_mean: f64 = report.words.iter().map(|w| w.probability).sum::<f64>()
            / report.words.len() as f64;
        assert!((word_mean - report.probability_llm).abs() > 0.1);
    }

    #[test]
    fn statistics_pass_through_unmodified() {
        let response = sample_response();
        let report = build_report(&response, &ramp()).unwrap();
        assert_eq!(report.statistics, response.statistics);
    }

    #[test]
    fn inconsistent_window_params_propagate() {
        let mut response = sample_response();
        response.n = 0;
        assert_eq!(
            build_report(&response, &ramp()).unwrap_err(),
            AggregateError::WindowSize(0)
        );
    }

    #[test]
    fn report_serializes_camel_case() {
        let report = build_report(&sample_response(), &ramp()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("probabilityLlm").is_some());
        assert!(json.get("generatedAt").is_some());
        assert_eq!(json["likelihood"]["label"], "LLM");
    }
}
