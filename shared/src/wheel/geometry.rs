//! Angle arithmetic for an N-sector wheel.
//!
//! Angles are radians in screen space with the y axis pointing down, so `0`
//! points right and `π/2` points to the bottom of the canvas. Sector `i` of a
//! wheel rotated by `rotation` spans `[rotation + i·arc, rotation + (i+1)·arc)`.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

/// Maps any angle into `[0, 2π)`.
pub fn normalize_angle(theta: f64) -> f64 {
    let r = theta.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if r >= TAU {
        0.0
    } else {
        r
    }
}

/// Shortest unsigned distance between two angles, in `[0, π]`.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let d = normalize_angle(a - b);
    d.min(TAU - d)
}

pub fn arc_size(count: usize) -> f64 {
    debug_assert!(count > 0);
    TAU / count as f64
}

/// Center of sector `index` in the wheel's own, un-rotated frame.
pub fn sector_center(index: usize, count: usize) -> f64 {
    let arc = arc_size(count);
    index as f64 * arc + arc / 2.0
}

/// Screen-space span of sector `index` at the given rotation.
pub fn sector_span(index: usize, count: usize, rotation: f64) -> (f64, f64) {
    let arc = arc_size(count);
    let start = rotation + index as f64 * arc;
    (start, start + arc)
}

/// Index of the sector currently under the pointer.
pub fn sector_at_pointer(rotation: f64, pointer_angle: f64, count: usize) -> usize {
    let relative = normalize_angle(pointer_angle - rotation);
    let index = (relative / arc_size(count)).floor() as usize;
    index.min(count - 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextOrientation {
    /// Labels follow the radius all the way round.
    #[default]
    Radial,
    /// Labels in the lower half-plane are turned by π to stay readable.
    Upright,
}

/// Rotation applied to a sector label drawn at `mid_angle`.
pub fn label_rotation(mid_angle: f64, orientation: TextOrientation) -> f64 {
    match orientation {
        TextOrientation::Radial => mid_angle,
        TextOrientation::Upright => {
            let screen = normalize_angle(mid_angle);
            if screen > 0.0 && screen < PI {
                mid_angle + PI
            } else {
                mid_angle
            }
        }
    }
}

/// Pixel placement of the wheel on a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl WheelGeometry {
    pub const MARGIN: f64 = 20.0;

    pub fn fit(width: f64, height: f64) -> Self {
        let radius = (width.min(height) / 2.0 - Self::MARGIN).max(1.0);
        Self {
            center_x: width / 2.0,
            center_y: height / 2.0,
            radius,
        }
    }

    /// Pixel position at `angle`, `fraction` of the radius away from the center.
    pub fn point_at(&self, angle: f64, fraction: f64) -> (f64, f64) {
        let distance = self.radius * fraction;
        (
            self.center_x + distance * angle.cos(),
            self.center_y + distance * angle.sin(),
        )
    }
}
