//! One wheel instance: its sectors, its angle, and where it is in the
//! spin → celebrate → reveal pipeline.

use rand::Rng;
use thiserror::Error;

use super::animator::{plan_spin, SpinAnimation, SpinFrame, SpinPlan};
use super::celebration::{Celebration, CelebrationFrame};
use super::config::WheelConfig;
use super::geometry::sector_at_pointer;
use super::option::{OptionSet, WheelOption};
use super::outcome::{Outcome, OutcomeError};
use crate::shared_wheel_game::SpinRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinState {
    Idle,
    /// Waiting for the decision service, then animating.
    Spinning,
    Celebrating,
    Resolved,
    /// The attempt was consumed; this instance never spins again.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpinRejected {
    #[error("a spin is already in progress")]
    AlreadySpinning,
    #[error("the wheel has no options")]
    NoOptions,
    #[error("this attempt has already been used")]
    Exhausted,
    #[error("the wheel has already been spun")]
    AlreadyResolved,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpinResult {
    pub index: usize,
    pub option: WheelOption,
    pub coupon: Option<String>,
}

#[derive(Debug)]
pub struct WheelSession {
    options: OptionSet,
    /// Sectors that arrived mid-spin; swapped in once the wheel stops.
    pending_options: Option<OptionSet>,
    config: WheelConfig,
    state: SpinState,
    angle: f64,
    awaiting_outcome: bool,
    winning_index: Option<usize>,
    pending_coupon: Option<String>,
    animation: Option<SpinAnimation>,
    celebration: Option<Celebration>,
    result: Option<SpinResult>,
}

impl WheelSession {
    pub fn new(options: OptionSet, config: WheelConfig) -> Self {
        Self {
            options,
            pending_options: None,
            config,
            state: SpinState::Idle,
            angle: 0.0,
            awaiting_outcome: false,
            winning_index: None,
            pending_coupon: None,
            animation: None,
            celebration: None,
            result: None,
        }
    }

    pub fn state(&self) -> SpinState {
        self.state
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn result(&self) -> Option<&SpinResult> {
        self.result.as_ref()
    }

    pub fn can_spin(&self) -> bool {
        self.check_spin().is_ok()
    }

    fn check_spin(&self) -> Result<(), SpinRejected> {
        match self.state {
            SpinState::Spinning | SpinState::Celebrating => Err(SpinRejected::AlreadySpinning),
            SpinState::Exhausted => Err(SpinRejected::Exhausted),
            SpinState::Resolved if !self.config.allow_respin => Err(SpinRejected::AlreadyResolved),
            _ if self.options.is_empty() => Err(SpinRejected::NoOptions),
            _ => Ok(()),
        }
    }

    /// Replaces the sectors. Mid-spin the swap waits until the wheel comes to
    /// rest; returns whether it happened now.
    pub fn set_options(&mut self, options: OptionSet) -> bool {
        if matches!(self.state, SpinState::Spinning | SpinState::Celebrating) {
            self.pending_options = Some(options);
            return false;
        }
        self.options = options;
        self.pending_options = None;
        true
    }

    fn apply_pending_options(&mut self) {
        if let Some(options) = self.pending_options.take() {
            log::debug!("Applying {} sectors deferred during the spin", options.len());
            self.options = options;
        }
    }

    /// Moves to `Spinning` and returns the request to send. Any animation or
    /// celebration left over from an earlier spin is dropped first.
    pub fn begin_spin(&mut self, user_id: &str, ticket_id: &str) -> Result<SpinRequest, SpinRejected> {
        self.check_spin()?;

        self.animation = None;
        self.celebration = None;
        self.result = None;
        self.winning_index = None;
        self.pending_coupon = None;
        self.awaiting_outcome = true;
        self.state = SpinState::Spinning;
        log::debug!("Spin requested for ticket {}", ticket_id);

        Ok(SpinRequest::new(user_id, ticket_id))
    }

    /// Feeds the decision service's answer back in. On success the spin
    /// animation is armed starting at `now`; on failure the angle is left
    /// untouched.
    pub fn apply_outcome(
        &mut self,
        outcome: Result<Outcome, OutcomeError>,
        now: f64,
    ) -> Result<SpinPlan, OutcomeError> {
        if self.state != SpinState::Spinning || !self.awaiting_outcome {
            log::warn!("Ignoring outcome that arrived outside a pending spin");
            return Err(OutcomeError::Rejected("no pending spin".to_string()));
        }
        self.awaiting_outcome = false;

        let outcome = match outcome {
            Ok(outcome) if outcome.index < self.options.len() => outcome,
            Ok(outcome) => {
                let err = OutcomeError::OutOfRange {
                    index: outcome.index as i64,
                    count: self.options.len(),
                };
                return Err(self.abort(err));
            }
            Err(err) => return Err(self.abort(err)),
        };

        let plan = plan_spin(
            self.angle,
            outcome.index,
            self.options.len(),
            self.config.pointer_angle,
            self.config.extra_turns,
        );
        self.winning_index = Some(outcome.index);
        self.pending_coupon = outcome.coupon;
        self.animation = Some(SpinAnimation::new(plan, &self.config, now));
        Ok(plan)
    }

    fn abort(&mut self, err: OutcomeError) -> OutcomeError {
        self.state = if err.is_terminal() {
            SpinState::Exhausted
        } else {
            SpinState::Idle
        };
        log::error!("Spin aborted: {}", err);
        self.apply_pending_options();
        err
    }

    /// Advances the spin animation. `None` when nothing is animating.
    pub fn advance<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> Option<SpinFrame> {
        let animation = self.animation.as_mut()?;
        let frame = animation.frame(now, rng);
        self.angle = frame.angle;

        if frame.finished {
            let plan = *animation.plan();
            self.animation = None;
            self.celebration = Some(Celebration::new(
                self.config.celebration_ticks,
                plan.winning_index,
                plan.option_count,
                self.angle,
                self.config.celebration_particles,
            ));
            self.state = SpinState::Celebrating;
            if self.config.celebration_ticks == 0 {
                self.finish(plan.winning_index);
            }
        }
        Some(frame)
    }

    /// Runs one celebration tick. Reaching zero reveals the result.
    pub fn celebrate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<CelebrationFrame> {
        let celebration = self.celebration.as_mut()?;
        let frame = celebration.tick(rng)?;
        if frame.finished {
            if let Some(index) = self.winning_index {
                self.finish(index);
            }
        }
        Some(frame)
    }

    fn finish(&mut self, index: usize) {
        self.celebration = None;
        self.state = SpinState::Resolved;

        if !self.options.is_empty() {
            let landed = sector_at_pointer(self.angle, self.config.pointer_angle, self.options.len());
            if landed != index {
                log::warn!("Wheel stopped on sector {} but sector {} won", landed, index);
            }
        }

        self.result = self.options.get(index).map(|option| SpinResult {
            index,
            option: option.clone(),
            coupon: self.pending_coupon.take(),
        });
        if let Some(result) = &self.result {
            log::info!("Wheel resolved on '{}'", result.option.label);
        }
        self.apply_pending_options();
    }

    /// Drops any in-flight animation or celebration, e.g. when the surface
    /// goes away. The wheel keeps whatever angle it reached.
    pub fn cancel(&mut self) {
        let was_running = self.animation.take().is_some() | self.celebration.take().is_some();
        if matches!(self.state, SpinState::Spinning | SpinState::Celebrating) {
            self.state = SpinState::Idle;
            self.awaiting_outcome = false;
        }
        self.apply_pending_options();
        if was_running {
            log::debug!("Wheel animation cancelled");
        }
    }

    /// Back to a freshly mounted wheel with the same options and config.
    pub fn reset(&mut self) {
        *self = Self::new(std::mem::take(&mut self.options), self.config.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::animator::misalignment;
    use crate::wheel::render::recording::RecordingSurface;
    use crate::wheel::render::render_spin_frame;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn abc() -> OptionSet {
        OptionSet::new(vec![
            WheelOption::new("A", 1),
            WheelOption::new("B", 2),
            WheelOption::new("C", 3),
        ])
    }

    fn run_to_rest(session: &mut WheelSession, rng: &mut SmallRng) -> Vec<f64> {
        let mut angles = Vec::new();
        let mut now = 0.0;
        while let Some(frame) = session.advance(now, rng) {
            angles.push(frame.angle);
            if frame.finished {
                break;
            }
            now += 16.0;
        }
        while session.celebrate(rng).is_some() {}
        angles
    }

    #[test]
    fn test_full_spin_reveals_backend_choice() {
        let mut rng = SmallRng::seed_from_u64(21);
        let mut session = WheelSession::new(abc(), WheelConfig::right_pointer());

        let request = session.begin_spin("user-1", "ticket-1").unwrap();
        assert_eq!(request.ticket_id, "ticket-1");
        assert_eq!(session.state(), SpinState::Spinning);

        let plan = session
            .apply_outcome(Ok(Outcome { index: 1, coupon: Some("B-50".to_string()) }), 0.0)
            .unwrap();
        let angles = run_to_rest(&mut session, &mut rng);

        assert!(angles.windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(session.angle(), plan.final_angle);
        assert!(misalignment(session.angle(), 1, 3, 0.0) < 1e-9);
        assert_eq!(session.state(), SpinState::Resolved);

        let result = session.result().unwrap();
        assert_eq!(result.option.label, "B");
        assert_eq!(result.coupon.as_deref(), Some("B-50"));
    }

    #[test]
    fn test_second_trigger_while_spinning_is_ignored() {
        let mut session = WheelSession::new(abc(), WheelConfig::default());
        session.begin_spin("u", "t").unwrap();
        let angle = session.angle();

        assert_eq!(session.begin_spin("u", "t"), Err(SpinRejected::AlreadySpinning));
        assert_eq!(session.state(), SpinState::Spinning);
        assert_eq!(session.angle(), angle);
    }

    #[test]
    fn test_out_of_range_index_aborts_without_moving() {
        let mut session = WheelSession::new(abc(), WheelConfig::default());
        session.begin_spin("u", "t").unwrap();

        let err = session
            .apply_outcome(Err(OutcomeError::OutOfRange { index: 5, count: 3 }), 0.0)
            .unwrap_err();
        assert!(matches!(err, OutcomeError::OutOfRange { index: 5, .. }));
        assert_eq!(session.state(), SpinState::Idle);
        assert_eq!(session.angle(), 0.0);

        let mut rng = SmallRng::seed_from_u64(1);
        assert!(session.advance(100.0, &mut rng).is_none());
        assert!(session.can_spin());
    }

    #[test]
    fn test_unvalidated_index_is_still_range_checked() {
        let mut session = WheelSession::new(abc(), WheelConfig::default());
        session.begin_spin("u", "t").unwrap();
        let err = session.apply_outcome(Ok(Outcome { index: 3, coupon: None }), 0.0).unwrap_err();
        assert_eq!(err, OutcomeError::OutOfRange { index: 3, count: 3 });
        assert_eq!(session.state(), SpinState::Idle);
    }

    #[test]
    fn test_ticket_used_disables_the_wheel_for_good() {
        let mut session = WheelSession::new(abc(), WheelConfig::right_pointer());
        session.begin_spin("u", "t").unwrap();
        session.apply_outcome(Err(OutcomeError::AlreadyUsed), 0.0).unwrap_err();

        assert_eq!(session.state(), SpinState::Exhausted);
        assert!(!session.can_spin());
        assert_eq!(session.begin_spin("u", "t"), Err(SpinRejected::Exhausted));
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(session.advance(10.0, &mut rng).is_none());
    }

    #[test]
    fn test_network_error_allows_retry() {
        let mut session = WheelSession::new(abc(), WheelConfig::default());
        session.begin_spin("u", "t").unwrap();
        session
            .apply_outcome(Err(OutcomeError::Network("down".to_string())), 0.0)
            .unwrap_err();
        assert_eq!(session.state(), SpinState::Idle);
        assert!(session.begin_spin("u", "t").is_ok());
    }

    #[test]
    fn test_respin_follows_config() {
        let mut rng = SmallRng::seed_from_u64(5);

        let mut repeatable = WheelSession::new(abc(), WheelConfig::right_pointer());
        repeatable.begin_spin("u", "t1").unwrap();
        repeatable.apply_outcome(Ok(Outcome { index: 0, coupon: None }), 0.0).unwrap();
        run_to_rest(&mut repeatable, &mut rng);
        assert!(repeatable.begin_spin("u", "t2").is_ok());

        let mut single = WheelSession::new(abc(), WheelConfig::bottom_pointer());
        single.begin_spin("u", "t1").unwrap();
        single.apply_outcome(Ok(Outcome { index: 2, coupon: None }), 0.0).unwrap();
        run_to_rest(&mut single, &mut rng);
        assert_eq!(single.result().unwrap().option.label, "C");
        assert_eq!(single.begin_spin("u", "t2"), Err(SpinRejected::AlreadyResolved));

        single.reset();
        assert_eq!(single.state(), SpinState::Idle);
        assert!(single.can_spin());
    }

    #[test]
    fn test_empty_wheel_cannot_spin() {
        let mut session = WheelSession::new(OptionSet::default(), WheelConfig::default());
        assert_eq!(session.begin_spin("u", "t"), Err(SpinRejected::NoOptions));
        assert!(session.set_options(abc()));
        assert!(session.can_spin());
    }

    #[test]
    fn test_options_arriving_mid_spin_apply_after_reveal() {
        let mut rng = SmallRng::seed_from_u64(17);
        let mut session = WheelSession::new(abc(), WheelConfig::right_pointer());
        session.begin_spin("u", "t").unwrap();
        session.apply_outcome(Ok(Outcome { index: 2, coupon: None }), 0.0).unwrap();

        let fresh = OptionSet::new(vec![WheelOption::new("X", 10), WheelOption::new("Y", 11)]);
        assert!(!session.set_options(fresh));
        assert_eq!(session.options().len(), 3);

        run_to_rest(&mut session, &mut rng);
        assert_eq!(session.result().unwrap().option.label, "C");
        let labels: Vec<_> = session.options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["X", "Y"]);
    }

    #[test]
    fn test_options_arriving_mid_spin_apply_after_failure() {
        let mut session = WheelSession::new(abc(), WheelConfig::default());
        session.begin_spin("u", "t").unwrap();
        assert!(!session.set_options(OptionSet::new(vec![WheelOption::new("X", 10)])));

        session
            .apply_outcome(Err(OutcomeError::Timeout(10_000)), 0.0)
            .unwrap_err();
        assert_eq!(session.state(), SpinState::Idle);
        assert_eq!(session.options().len(), 1);
    }

    #[test]
    fn test_resting_wheel_shows_the_winner_under_the_pointer() {
        let mut rng = SmallRng::seed_from_u64(4);
        for config in [WheelConfig::right_pointer(), WheelConfig::bottom_pointer()] {
            for winner in 0..3 {
                let mut session = WheelSession::new(abc(), config.clone());
                session.begin_spin("u", "t").unwrap();
                session.apply_outcome(Ok(Outcome { index: winner, coupon: None }), 0.0).unwrap();
                run_to_rest(&mut session, &mut rng);
                assert_eq!(
                    sector_at_pointer(session.angle(), config.pointer_angle, 3),
                    session.result().unwrap().index
                );
            }
        }
    }

    #[test]
    fn test_cancel_mid_spin_stops_frames() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut session = WheelSession::new(abc(), WheelConfig::default());
        session.begin_spin("u", "t").unwrap();
        session.apply_outcome(Ok(Outcome { index: 0, coupon: None }), 0.0).unwrap();
        let mid = session.advance(500.0, &mut rng).unwrap().angle;

        session.cancel();
        assert_eq!(session.state(), SpinState::Idle);
        assert!(session.advance(600.0, &mut rng).is_none());
        assert_eq!(session.angle(), mid);
    }

    #[test]
    fn test_frames_render_with_live_angle() {
        let mut rng = SmallRng::seed_from_u64(3);
        let config = WheelConfig::bottom_pointer();
        let mut session = WheelSession::new(abc(), config.clone());
        session.begin_spin("u", "t").unwrap();
        session.apply_outcome(Ok(Outcome { index: 1, coupon: None }), 0.0).unwrap();

        let frame = session.advance(1_000.0, &mut rng).unwrap();
        let mut surface = RecordingSurface::new();
        render_spin_frame(&mut surface, session.options(), &config, frame.angle, frame.tilt, &[]);
        assert!(!surface.ops.is_empty());
        assert_eq!(frame.angle, session.angle());
    }
}
