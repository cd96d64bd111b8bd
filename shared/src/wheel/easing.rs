use serde::{Deserialize, Serialize};

/// Time-to-progress curve for the spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    OutCubic,
    ThreePhase,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::OutCubic => ease_out_cubic(t),
            Self::ThreePhase => ease_three_phase(t),
        }
    }
}

// Easing function for smooth deceleration
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

const FAST_END: f64 = 0.25;
const FAST_PROGRESS: f64 = 0.5;
const DECEL_END: f64 = 0.85;
const DECEL_PROGRESS: f64 = 0.95;

/// Constant-speed burst, cubic deceleration, then a quadratic creep onto the
/// target. Continuous and non-decreasing on `[0, 1]`.
pub fn ease_three_phase(t: f64) -> f64 {
    if t < FAST_END {
        t / FAST_END * FAST_PROGRESS
    } else if t < DECEL_END {
        let u = (t - FAST_END) / (DECEL_END - FAST_END);
        FAST_PROGRESS + (DECEL_PROGRESS - FAST_PROGRESS) * (1.0 - (1.0 - u).powi(3))
    } else {
        let u = (t - DECEL_END) / (1.0 - DECEL_END);
        DECEL_PROGRESS + (1.0 - DECEL_PROGRESS) * (1.0 - (1.0 - u).powi(2))
    }
}
