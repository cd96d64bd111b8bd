//! Drawing the wheel onto anything that implements [`WheelSurface`].
//!
//! Rendering is a pure function of (options, rotation, config) plus whatever
//! decoration the current frame carries; the surface owns pixels and assets.

use super::celebration::CelebrationFrame;
use super::config::{GradientStops, WheelConfig};
use super::geometry::{label_rotation, sector_span, WheelGeometry};
use super::option::OptionSet;
use super::particles::Particle;
use crate::constants::NO_OPTIONS_MESSAGE;

pub trait WheelSurface {
    fn size(&self) -> (f64, f64);
    fn clear(&mut self);
    /// Tilt (radians) and uniform scale about the wheel center for the draws
    /// that follow, until `reset_transform`.
    fn set_transform(&mut self, geometry: &WheelGeometry, tilt: f64, scale: f64);
    fn reset_transform(&mut self);
    fn fill_sector(&mut self, geometry: &WheelGeometry, start: f64, end: f64, fill: &GradientStops);
    fn stroke_divider(&mut self, geometry: &WheelGeometry, angle: f64);
    fn draw_label(&mut self, text: &str, x: f64, y: f64, rotation: f64, max_width: f64);
    fn fill_medallion(&mut self, geometry: &WheelGeometry, radius: f64, fill: &GradientStops);
    /// Draws the center image clipped to a disc. Returns `false` when no image
    /// is set or it has not finished loading.
    fn draw_center_image(&mut self, geometry: &WheelGeometry, radius: f64) -> bool;
    fn draw_pointer(&mut self, geometry: &WheelGeometry, angle: f64);
    fn fill_particle(&mut self, x: f64, y: f64, size: f64, alpha: f64, color: &str);
    fn fill_overlay(&mut self, geometry: &WheelGeometry, alpha: f64);
    fn draw_placeholder(&mut self, geometry: &WheelGeometry, message: &str);
}

const MEDALLION_INNER: &str = "#fde68a";
const MEDALLION_OUTER: &str = "#b45309";
const EMPTY_WHEEL: (&str, &str) = ("#e5e7eb", "#9ca3af");

pub fn geometry_of<S: WheelSurface + ?Sized>(surface: &S) -> WheelGeometry {
    let (width, height) = surface.size();
    WheelGeometry::fit(width, height)
}

/// Draws sectors, dividers, labels, the medallion and the pointer at `rotation`.
pub fn render_wheel<S: WheelSurface + ?Sized>(
    surface: &mut S,
    options: &OptionSet,
    rotation: f64,
    config: &WheelConfig,
) {
    let geometry = geometry_of(surface);

    if options.is_empty() {
        let (inner, outer) = EMPTY_WHEEL;
        surface.fill_sector(&geometry, 0.0, std::f64::consts::TAU, &GradientStops::new(inner, outer));
        surface.draw_placeholder(&geometry, NO_OPTIONS_MESSAGE);
        surface.draw_pointer(&geometry, config.pointer_angle);
        return;
    }

    let count = options.len();
    let fallback = GradientStops::new(EMPTY_WHEEL.0, EMPTY_WHEEL.1);
    for index in 0..count {
        let (start, end) = sector_span(index, count, rotation);
        let fill = config.gradient_for(index).unwrap_or(&fallback);
        surface.fill_sector(&geometry, start, end, fill);
    }

    if count > 1 {
        for index in 0..count {
            let (start, _) = sector_span(index, count, rotation);
            surface.stroke_divider(&geometry, start);
        }
    }

    let label_width = geometry.radius * (1.0 - config.medallion_ratio) * 0.8;
    for (index, option) in options.iter().enumerate() {
        let (start, end) = sector_span(index, count, rotation);
        let mid = (start + end) / 2.0;
        let (x, y) = geometry.point_at(mid, config.label_ratio);
        surface.draw_label(
            &option.label,
            x,
            y,
            label_rotation(mid, config.text_orientation),
            label_width,
        );
    }

    let medallion_radius = geometry.radius * config.medallion_ratio;
    if !surface.draw_center_image(&geometry, medallion_radius) {
        surface.fill_medallion(
            &geometry,
            medallion_radius,
            &GradientStops::new(MEDALLION_INNER, MEDALLION_OUTER),
        );
    }

    surface.draw_pointer(&geometry, config.pointer_angle);
}

pub fn render_particles<S: WheelSurface + ?Sized>(surface: &mut S, particles: &[Particle]) {
    let geometry = geometry_of(surface);
    for particle in particles {
        let (x, y) = particle.position(&geometry);
        surface.fill_particle(x, y, particle.size, particle.alpha, particle.color);
    }
}

/// One frame of the live spin: wobble, wheel, then trailing sparks.
pub fn render_spin_frame<S: WheelSurface + ?Sized>(
    surface: &mut S,
    options: &OptionSet,
    config: &WheelConfig,
    angle: f64,
    tilt: f64,
    trail: &[Particle],
) {
    let geometry = geometry_of(surface);
    surface.clear();
    surface.set_transform(&geometry, tilt, 1.0);
    render_wheel(surface, options, angle, config);
    surface.reset_transform();
    render_particles(surface, trail);
}

/// One celebration tick: breathing wheel at its resting angle, flash, sparks.
pub fn render_celebration_frame<S: WheelSurface + ?Sized>(
    surface: &mut S,
    options: &OptionSet,
    config: &WheelConfig,
    resting_angle: f64,
    frame: &CelebrationFrame,
) {
    let geometry = geometry_of(surface);
    surface.clear();
    surface.set_transform(&geometry, 0.0, frame.scale);
    render_wheel(surface, options, resting_angle, config);
    surface.fill_overlay(&geometry, frame.overlay_alpha);
    surface.reset_transform();
    render_particles(surface, &frame.burst);
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Clear,
        Transform { tilt: f64, scale: f64 },
        ResetTransform,
        Sector { start: f64, end: f64, outer: String },
        Divider(f64),
        Label { text: String, rotation: f64 },
        Medallion,
        CenterImage,
        Pointer(f64),
        Particle,
        Overlay(f64),
        Placeholder(String),
    }

    pub struct RecordingSurface {
        pub width: f64,
        pub height: f64,
        pub image_ready: bool,
        pub ops: Vec<Op>,
    }

    impl RecordingSurface {
        pub fn new() -> Self {
            Self { width: 400.0, height: 400.0, image_ready: false, ops: Vec::new() }
        }

        pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
            self.ops.iter().filter(|op| pred(op)).count()
        }
    }

    impl WheelSurface for RecordingSurface {
        fn size(&self) -> (f64, f64) {
            (self.width, self.height)
        }
        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }
        fn set_transform(&mut self, _geometry: &WheelGeometry, tilt: f64, scale: f64) {
            self.ops.push(Op::Transform { tilt, scale });
        }
        fn reset_transform(&mut self) {
            self.ops.push(Op::ResetTransform);
        }
        fn fill_sector(&mut self, _g: &WheelGeometry, start: f64, end: f64, fill: &GradientStops) {
            self.ops.push(Op::Sector { start, end, outer: fill.outer.clone() });
        }
        fn stroke_divider(&mut self, _g: &WheelGeometry, angle: f64) {
            self.ops.push(Op::Divider(angle));
        }
        fn draw_label(&mut self, text: &str, _x: f64, _y: f64, rotation: f64, _max_width: f64) {
            self.ops.push(Op::Label { text: text.to_string(), rotation });
        }
        fn fill_medallion(&mut self, _g: &WheelGeometry, _radius: f64, _fill: &GradientStops) {
            self.ops.push(Op::Medallion);
        }
        fn draw_center_image(&mut self, _g: &WheelGeometry, _radius: f64) -> bool {
            if self.image_ready {
                self.ops.push(Op::CenterImage);
            }
            self.image_ready
        }
        fn draw_pointer(&mut self, _g: &WheelGeometry, angle: f64) {
            self.ops.push(Op::Pointer(angle));
        }
        fn fill_particle(&mut self, _x: f64, _y: f64, _size: f64, _alpha: f64, _color: &str) {
            self.ops.push(Op::Particle);
        }
        fn fill_overlay(&mut self, _g: &WheelGeometry, alpha: f64) {
            self.ops.push(Op::Overlay(alpha));
        }
        fn draw_placeholder(&mut self, _g: &WheelGeometry, message: &str) {
            self.ops.push(Op::Placeholder(message.to_string()));
        }
    }
}
