//! Spin-and-reveal engine shared by every wheel variant.
//!
//! The pieces run in a fixed order per spin: the session asks for a winner
//! ([`outcome`]), plans and plays the rotation ([`animator`]), counts down the
//! highlight ([`celebration`]) and finally exposes the result. Drawing is kept
//! apart in [`render`] so any surface can show any frame.

pub mod animator;
pub mod celebration;
pub mod config;
pub mod easing;
pub mod geometry;
pub mod option;
pub mod outcome;
pub mod particles;
pub mod render;
pub mod session;

pub use animator::{plan_spin, SpinAnimation, SpinFrame, SpinPlan};
pub use celebration::{Celebration, CelebrationFrame};
pub use config::{GradientStops, WheelConfig};
pub use easing::Easing;
pub use geometry::{normalize_angle, TextOrientation, WheelGeometry};
pub use option::{resolve_options, OptionId, OptionSet, WheelOption};
pub use outcome::{resolve_outcome, Outcome, OutcomeError, OutcomeResolver};
pub use particles::Particle;
pub use render::WheelSurface;
pub use session::{SpinRejected, SpinResult, SpinState, WheelSession};
