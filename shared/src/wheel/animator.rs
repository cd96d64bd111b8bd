//! Target-angle computation and the frame-by-frame spin.

use std::f64::consts::TAU;

use rand::Rng;

use super::config::WheelConfig;
use super::easing::Easing;
use super::geometry::{angular_distance, normalize_angle, sector_center};

/// Start and end of one spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub initial_angle: f64,
    pub final_angle: f64,
    pub winning_index: usize,
    pub option_count: usize,
}

impl SpinPlan {
    pub fn travel(&self) -> f64 {
        self.final_angle - self.initial_angle
    }
}

/// Rotation that leaves the winning sector's center under the pointer after
/// `extra_turns` full turns. Always moves forward.
pub fn plan_spin(
    initial_angle: f64,
    winning_index: usize,
    option_count: usize,
    pointer_angle: f64,
    extra_turns: u32,
) -> SpinPlan {
    let target = normalize_angle(pointer_angle - sector_center(winning_index, option_count));
    let delta = normalize_angle(target - normalize_angle(initial_angle));
    let final_angle = initial_angle + extra_turns as f64 * TAU + delta;
    SpinPlan {
        initial_angle,
        final_angle,
        winning_index,
        option_count,
    }
}

/// How far the winner's center sits from the pointer at `rotation`.
pub fn misalignment(rotation: f64, winning_index: usize, option_count: usize, pointer_angle: f64) -> f64 {
    angular_distance(rotation + sector_center(winning_index, option_count), pointer_angle)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinFrame {
    pub angle: f64,
    /// Main-phase progress in `[0, 1]`.
    pub progress: f64,
    /// Wobble in radians, zero once the wheel settles.
    pub tilt: f64,
    pub emit_trail: bool,
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Main,
    Correction { from: f64, to: f64, started_at: f64 },
    Done,
}

/// Drives one spin. Feed it timestamps, get angles back.
#[derive(Debug, Clone)]
pub struct SpinAnimation {
    plan: SpinPlan,
    started_at: f64,
    duration_ms: f64,
    easing: Easing,
    pointer_angle: f64,
    tolerance: f64,
    correction_ms: f64,
    tilt_until: f64,
    tilt_amplitude: f64,
    trail_until: f64,
    trail_probability: f64,
    phase: Phase,
    last_angle: f64,
}

impl SpinAnimation {
    pub fn new(plan: SpinPlan, config: &WheelConfig, started_at: f64) -> Self {
        Self {
            plan,
            started_at,
            duration_ms: config.duration_ms.max(1.0),
            easing: config.easing,
            pointer_angle: config.pointer_angle,
            tolerance: config.alignment_tolerance,
            correction_ms: config.correction_ms.max(1.0),
            tilt_until: config.tilt_until,
            tilt_amplitude: config.tilt_amplitude,
            trail_until: config.trail_until,
            trail_probability: config.trail_probability.clamp(0.0, 1.0),
            phase: Phase::Main,
            last_angle: plan.initial_angle,
        }
    }

    pub fn plan(&self) -> &SpinPlan {
        &self.plan
    }

    pub fn frame<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> SpinFrame {
        match self.phase {
            Phase::Main => self.main_frame(now, rng),
            Phase::Correction { from, to, started_at } => {
                let t = ((now - started_at) / self.correction_ms).clamp(0.0, 1.0);
                let angle = if t >= 1.0 {
                    self.phase = Phase::Done;
                    to
                } else {
                    from + (to - from) * Easing::OutCubic.apply(t)
                };
                self.emit(angle, 1.0, 0.0, false)
            }
            Phase::Done => self.emit(self.last_angle, 1.0, 0.0, false),
        }
    }

    fn main_frame<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> SpinFrame {
        let progress = ((now - self.started_at) / self.duration_ms).clamp(0.0, 1.0);

        if progress >= 1.0 {
            let snapped = self.plan.final_angle;
            self.phase = self.settle(snapped, now);
            return self.emit(snapped, 1.0, 0.0, false);
        }

        let eased = self.easing.apply(progress);
        let angle = self.plan.initial_angle + eased * self.plan.travel();

        let tilt = if progress < self.tilt_until {
            self.tilt_amplitude * (progress * 6.0 * std::f64::consts::PI).sin() * (1.0 - progress)
        } else {
            0.0
        };
        let emit_trail = progress < self.trail_until
            && self.trail_probability > 0.0
            && rng.gen_bool(self.trail_probability);

        self.emit(angle, progress, tilt, emit_trail)
    }

    /// Checks the snapped angle against an independently recomputed one and
    /// schedules a short forward correction when they disagree.
    fn settle(&self, snapped: f64, now: f64) -> Phase {
        let plan = &self.plan;
        let error = misalignment(snapped, plan.winning_index, plan.option_count, self.pointer_angle);
        if error <= self.tolerance {
            return Phase::Done;
        }

        let perfect = normalize_angle(
            self.pointer_angle - sector_center(plan.winning_index, plan.option_count),
        );
        let forward = normalize_angle(perfect - normalize_angle(snapped));
        log::warn!("Wheel off by {:.4} rad after spin, correcting", error);
        Phase::Correction {
            from: snapped,
            to: snapped + forward,
            started_at: now,
        }
    }

    fn emit(&mut self, angle: f64, progress: f64, tilt: f64, emit_trail: bool) -> SpinFrame {
        // frame timestamps can jitter backwards; the wheel never does
        let angle = angle.max(self.last_angle);
        self.last_angle = angle;
        SpinFrame {
            angle,
            progress,
            tilt,
            emit_trail,
            finished: self.phase == Phase::Done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_every_winner_lands_under_pointer() {
        for pointer in [0.0, FRAC_PI_2] {
            for n in 1..=24 {
                for k in 0..n {
                    for initial in [0.0, 1.234, 57.0] {
                        let plan = plan_spin(initial, k, n, pointer, 5);
                        assert!(
                            misalignment(plan.final_angle, k, n, pointer) < 1e-6,
                            "pointer={pointer} n={n} k={k} initial={initial}"
                        );
                        assert!(plan.travel() >= 5.0 * TAU - EPS);
                        assert!(plan.travel() <= 6.0 * TAU + EPS);
                    }
                }
            }
        }
    }

    #[test]
    fn test_three_options_second_wins() {
        let plan = plan_spin(0.0, 1, 3, 0.0, 5);
        let arc = TAU / 3.0;
        let residual = normalize_angle(plan.final_angle + arc + arc / 2.0);
        assert!(residual < 1e-9 || TAU - residual < 1e-9, "residual {residual}");
    }

    #[test]
    fn test_frames_never_go_backwards_and_end_on_target() {
        let config = WheelConfig::bottom_pointer();
        let plan = plan_spin(2.0, 4, 7, config.pointer_angle, config.extra_turns);
        let mut animation = SpinAnimation::new(plan, &config, 1_000.0);
        let mut rng = SmallRng::seed_from_u64(1);

        let mut last = f64::MIN;
        let mut now = 1_000.0;
        let mut frame = animation.frame(now, &mut rng);
        while !frame.finished {
            assert!(frame.angle >= last);
            last = frame.angle;
            now += 16.0;
            frame = animation.frame(now, &mut rng);
        }
        assert_eq!(frame.angle, plan.final_angle);
        assert!(now <= 1_000.0 + config.duration_ms + 16.0);
    }

    #[test]
    fn test_late_timestamps_do_not_rewind() {
        let config = WheelConfig::right_pointer();
        let plan = plan_spin(0.0, 0, 4, 0.0, 5);
        let mut animation = SpinAnimation::new(plan, &config, 0.0);
        let mut rng = SmallRng::seed_from_u64(2);
        let ahead = animation.frame(1_500.0, &mut rng).angle;
        let behind = animation.frame(1_000.0, &mut rng).angle;
        assert_eq!(ahead, behind);
    }

    #[test]
    fn test_misaligned_plan_gets_corrected() {
        let config = WheelConfig::right_pointer();
        let mut plan = plan_spin(0.0, 2, 5, 0.0, 5);
        plan.final_angle += 0.2;
        let mut animation = SpinAnimation::new(plan, &config, 0.0);
        let mut rng = SmallRng::seed_from_u64(3);

        let snapped = animation.frame(config.duration_ms, &mut rng);
        assert!(!snapped.finished);
        assert_eq!(snapped.angle, plan.final_angle);

        let done = animation.frame(config.duration_ms + config.correction_ms, &mut rng);
        assert!(done.finished);
        assert!(done.angle > snapped.angle);
        assert!(misalignment(done.angle, 2, 5, 0.0) < 1e-6);
    }

    #[test]
    fn test_tilt_and_trail_only_early() {
        let mut config = WheelConfig::bottom_pointer();
        config.trail_probability = 1.0;
        let plan = plan_spin(0.0, 0, 3, config.pointer_angle, 5);
        let mut animation = SpinAnimation::new(plan, &config, 0.0);
        let mut rng = SmallRng::seed_from_u64(4);

        let early = animation.frame(config.duration_ms * 0.2, &mut rng);
        assert!(early.emit_trail);
        let late = animation.frame(config.duration_ms * 0.95, &mut rng);
        assert!(!late.emit_trail);
        assert_eq!(late.tilt, 0.0);
    }
}
