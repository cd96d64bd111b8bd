use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use super::easing::Easing;
use super::geometry::TextOrientation;
use crate::shared_wheel_game::{
    ALIGNMENT_TOLERANCE, CELEBRATION_TICKS, CORRECTION_DURATION_MS, EXTRA_TURNS, SPIN_DURATION_MS,
};

/// Two-stop radial gradient used for one sector colour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStops {
    pub inner: String,
    pub outer: String,
}

impl GradientStops {
    pub fn new(inner: &str, outer: &str) -> Self {
        Self {
            inner: inner.to_string(),
            outer: outer.to_string(),
        }
    }
}

pub fn default_palette() -> Vec<GradientStops> {
    vec![
        GradientStops::new("#fdba74", "#f97316"), // Orange
        GradientStops::new("#67e8f9", "#06b6d4"), // Cyan
        GradientStops::new("#c4b5fd", "#8b5cf6"), // Violet
        GradientStops::new("#f9a8d4", "#ec4899"), // Pink
    ]
}

/// Everything that distinguishes one wheel variant from another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Screen angle of the stationary pointer.
    pub pointer_angle: f64,
    pub palette: Vec<GradientStops>,
    pub text_orientation: TextOrientation,
    pub duration_ms: f64,
    pub easing: Easing,
    pub extra_turns: u32,
    pub alignment_tolerance: f64,
    pub correction_ms: f64,
    /// Progress below which the wheel wobbles in 3-D.
    pub tilt_until: f64,
    pub tilt_amplitude: f64,
    /// Progress below which trailing particles may be emitted.
    pub trail_until: f64,
    pub trail_probability: f64,
    pub celebration_ticks: u32,
    pub celebration_particles: usize,
    /// Whether a resolved wheel may be spun again on the same instance.
    pub allow_respin: bool,
    pub medallion_ratio: f64,
    pub label_ratio: f64,
}

impl WheelConfig {
    /// Pointer on the right edge, radial labels, plain cubic ease-out.
    pub fn right_pointer() -> Self {
        Self {
            pointer_angle: 0.0,
            palette: default_palette(),
            text_orientation: TextOrientation::Radial,
            duration_ms: SPIN_DURATION_MS,
            easing: Easing::OutCubic,
            extra_turns: EXTRA_TURNS,
            alignment_tolerance: ALIGNMENT_TOLERANCE,
            correction_ms: CORRECTION_DURATION_MS,
            tilt_until: 0.0,
            tilt_amplitude: 0.0,
            trail_until: 0.0,
            trail_probability: 0.0,
            celebration_ticks: CELEBRATION_TICKS,
            celebration_particles: 6,
            allow_respin: true,
            medallion_ratio: 0.2,
            label_ratio: 0.62,
        }
    }

    /// Pointer at the bottom, upright labels, three-phase curve with tilt and
    /// trails. Single-use: one ticket, one spin.
    pub fn bottom_pointer() -> Self {
        Self {
            pointer_angle: FRAC_PI_2,
            text_orientation: TextOrientation::Upright,
            easing: Easing::ThreePhase,
            tilt_until: 0.85,
            tilt_amplitude: 0.12,
            trail_until: 0.9,
            trail_probability: 0.35,
            allow_respin: false,
            ..Self::right_pointer()
        }
    }

    pub fn gradient_for(&self, index: usize) -> Option<&GradientStops> {
        if self.palette.is_empty() {
            None
        } else {
            self.palette.get(index % self.palette.len())
        }
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self::right_pointer()
    }
}
