/// Maximum accepted essay size in bytes.
pub const MAX_ESSAY_BYTES: usize = 100 * 1024;

/// Number of discrete stops in the probability color ramp.
/// 101 stops so that `floor(probability * 100)` lands on a stop for every
/// probability in [0, 1], inclusive of 1.0 itself.
pub const DEFAULT_RAMP_STOPS: usize = 101;

/// Default ramp endpoint for probability 0 (page background gray).
pub const DEFAULT_RAMP_LOW: &str = "#2d2c2c";

/// Default ramp endpoint for probability 1 (alert red).
pub const DEFAULT_RAMP_HIGH: &str = "#e82c07";

/// Likelihood percentage at or above which the document verdict is "LLM".
pub const LLM_VERDICT_THRESHOLD_PERCENT: f64 = 50.0;
