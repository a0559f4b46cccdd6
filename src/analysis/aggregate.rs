//! Word-level probability aggregation.
//!
//! The evaluator scores the essay with two directional sliding-window passes:
//! "front-to-back" windows start at word 0 and advance by `step`, while
//! "back-to-front" windows start at the last word and retreat by `step`. Each
//! window reports one probability for the `n` words it covers. A word's score
//! is the mean of every window probability that covers it, from either
//! direction; a word no window covers scores exactly 0.

use serde::Serialize;

/// One word of the essay paired with its aggregated LLM probability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordScore {
    pub word: String,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    #[error("word list is empty")]
    EmptyWords,
    #[error("window size must be at least 1, got {0}")]
    WindowSize(usize),
    #[error("stride must be at least 1, got {0}")]
    Stride(usize),
}

/// Fold the two directional window sequences into one probability per word.
///
/// Windows whose index range extends past either end of the word list are
/// clipped to the valid range rather than rejected; the evaluator and this
/// service may disagree about exact window counts without invalidating the
/// whole analysis. Output length and order always match `words`.
pub fn aggregate(
    words: &[String],
    front_to_back: &[f64],
    back_to_front: &[f64],
    n: usize,
    step: usize,
) -> Result<Vec<WordScore>, AggregateError> {
    if words.is_empty() {
        return Err(AggregateError::EmptyWords);
    }
    if n < 1 {
        return Err(AggregateError::WindowSize(n));
    }
    if step < 1 {
        return Err(AggregateError::Stride(step));
    }

    let mut sums = vec![0.0_f64; words.len()];
    let mut counts = vec![0_u32; words.len()];

    // Forward pass: window i covers [step*i, step*i + n), clipped.
    for (i, &p) in front_to_back.iter().enumerate() {
        let start = step.saturating_mul(i);
        if start >= words.len() {
            continue;
        }
        let end = start.saturating_add(n).min(words.len());
        for j in start..end {
            sums[j] += p;
            counts[j] += 1;
        }
    }

    // Backward pass: window i covers (start - n, start] descending, where
    // start = len-1 - step*i, clipped at index 0.
    for (i, &p) in back_to_front.iter().enumerate() {
        let Some(start) = (words.len() - 1).checked_sub(step.saturating_mul(i)) else {
            continue;
        };
        let lo = (start + 1).saturating_sub(n);
        for j in lo..=start {
            sums[j] += p;
            counts[j] += 1;
        }
    }

    Ok(words
        .iter()
        .zip(sums.iter().zip(counts.iter()))
        .map(|(word, (&sum, &count))| WordScore {
            word: word.clone(),
            // max(1, count) keeps an uncovered word at exactly 0.
            probability: sum / count.max(1) as f64,
        })
        .collect())
}
