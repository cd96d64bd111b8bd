use rand::Rng;

use super::geometry::sector_span;
use super::particles::{scatter_in_sector, Particle};

/// What one celebration tick should draw on top of the settled wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct CelebrationFrame {
    pub tick: u32,
    pub overlay_alpha: f64,
    pub scale: f64,
    pub burst: Vec<Particle>,
    pub finished: bool,
}

/// Fixed-length highlight countdown over the winning sector.
#[derive(Debug, Clone)]
pub struct Celebration {
    total: u32,
    remaining: u32,
    winning_index: usize,
    option_count: usize,
    final_angle: f64,
    particles_per_burst: usize,
}

impl Celebration {
    pub fn new(
        ticks: u32,
        winning_index: usize,
        option_count: usize,
        final_angle: f64,
        particles_per_burst: usize,
    ) -> Self {
        Self {
            total: ticks,
            remaining: ticks,
            winning_index,
            option_count,
            final_angle,
            particles_per_burst,
        }
    }

    /// Counts down one tick; `None` once the countdown is already over.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<CelebrationFrame> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let tick = self.total - self.remaining;

        let overlay_alpha = if tick % 2 == 1 { 0.22 } else { 0.08 };
        let scale = 1.0 + 0.012 * (tick as f64 * std::f64::consts::FRAC_PI_2).sin();
        let burst = if tick % 2 == 0 {
            let (start, end) = sector_span(self.winning_index, self.option_count, self.final_angle);
            scatter_in_sector(rng, start, end, self.particles_per_burst)
        } else {
            Vec::new()
        };

        Some(CelebrationFrame {
            tick,
            overlay_alpha,
            scale,
            burst,
            finished: self.remaining == 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::particles::{BURST_INNER, BURST_OUTER};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_runs_exactly_the_configured_ticks() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut celebration = Celebration::new(10, 1, 3, 40.0, 6);
        let mut frames = Vec::new();
        while let Some(frame) = celebration.tick(&mut rng) {
            frames.push(frame);
        }
        assert_eq!(frames.len(), 10);
        assert!(frames.last().unwrap().finished);
        assert!(frames[..9].iter().all(|f| !f.finished));
        assert!(celebration.tick(&mut rng).is_none());
    }

    #[test]
    fn test_bursts_on_even_ticks_inside_winning_sector() {
        let mut rng = SmallRng::seed_from_u64(12);
        let mut celebration = Celebration::new(10, 2, 4, 3.0, 6);
        let (start, end) = sector_span(2, 4, 3.0);
        while let Some(frame) = celebration.tick(&mut rng) {
            if frame.tick % 2 == 0 {
                assert_eq!(frame.burst.len(), 6);
            } else {
                assert!(frame.burst.is_empty());
            }
            for spark in &frame.burst {
                assert!(spark.angle >= start && spark.angle < end);
                assert!(spark.distance >= BURST_INNER && spark.distance < BURST_OUTER);
            }
        }
    }
}
