//! Discrete color ramp for rendering word probabilities.
//!
//! The ramp is built once at startup from configured endpoint colors and held
//! in application state; lookups index it by `floor(probability * 100)`,
//! clamped to the valid range so probability 1.0 (and any floating-point
//! overshoot) resolves to the last stop instead of panicking.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("invalid hex color '{0}': expected #rrggbb")]
    InvalidHex(String),
    #[error("color ramp needs at least 2 stops, got {0}")]
    TooFewStops(usize),
}

impl Rgb {
    /// Parse a `#rrggbb` hex string (leading `#` optional).
    pub fn parse(raw: &str) -> Result<Self, ColorError> {
        let digits = raw.strip_prefix('#').unwrap_or(raw);
        if digits.len() != 6 {
            return Err(ColorError::InvalidHex(raw.to_string()));
        }
        let bytes =
            hex::decode(digits).map_err(|_| ColorError::InvalidHex(raw.to_string()))?;
        Ok(Self {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
    Rgb {
        r: lerp_channel(a.r, b.r, t),
        g: lerp_channel(a.g, b.g, t),
        b: lerp_channel(a.b, b.b, t),
    }
}

#[derive(Debug, Clone)]
pub struct ColorRamp {
    stops: Vec<Rgb>,
}

impl ColorRamp {
    /// Build a ramp of `stop_count` colors from `low` to `high`, inclusive of
    /// both endpoints, interpolating linearly through the channel midpoint.
    pub fn build(stop_count: usize, low: Rgb, high: Rgb) -> Result<Self, ColorError> {
        if stop_count < 2 {
            return Err(ColorError::TooFewStops(stop_count));
        }
        let mid = lerp(low, high, 0.5);
        let stops = (0..stop_count)
            .map(|i| {
                let t = i as f64 / (stop_count - 1) as f64;
                if t <= 0.5 {
                    lerp(low, mid, t * 2.0)
                } else {
                    lerp(mid, high, (t - 0.5) * 2.0)
                }
            })
            .collect();
        Ok(Self { stops })
    }

    /// Ramp stop for a probability. Total over all inputs: indices are
    /// clamped, and NaN falls through to the first stop.
    pub fn color_for(&self, probability: f64) -> Rgb {
        let max = (self.stops.len() - 1) as f64;
        let idx = (probability * 100.0).floor().clamp(0.0, max) as usize;
        self.stops[idx]
    }

    pub fn hex_for(&self, probability: f64) -> String {
        self.color_for(probability).to_hex()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
