//! Run Colors
//!
//! Each run gets a stable pseudo-random color derived only from its index,
//! so the same run keeps its color across plots and sessions.

use serde::{Deserialize, Serialize};

const CHANNEL_SEEDS: [f64; 3] = [12.9898, 78.233, 53.128];
const SCRAMBLE: f64 = 43758.5453;

/// RGB color with channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: f64,
    /// Green channel
    pub g: f64,
    /// Blue channel
    pub b: f64,
}

impl Rgb {
    /// `#rrggbb` form
    pub fn to_hex(self) -> String {
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

/// Color of the run with external index `index`.
///
/// Per channel: `|frac(sin((index + 3) * seed) * 43758.5453)|`.
pub fn run_color(index: u32) -> Rgb {
    let channel = |seed: f64| (((f64::from(index) + 3.0) * seed).sin() * SCRAMBLE).fract().abs();
    Rgb {
        r: channel(CHANNEL_SEEDS[0]),
        g: channel(CHANNEL_SEEDS[1]),
        b: channel(CHANNEL_SEEDS[2]),
    }
}
