use rand::Rng;

use super::geometry::WheelGeometry;

/// A decorative dot placed in polar coordinates relative to the wheel, so it
/// can be emitted without knowing the surface size.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Screen angle, radians.
    pub angle: f64,
    /// Distance from the center as a fraction of the wheel radius.
    pub distance: f64,
    pub size: f64,
    pub alpha: f64,
    pub color: &'static str,
}

impl Particle {
    pub fn position(&self, geometry: &WheelGeometry) -> (f64, f64) {
        geometry.point_at(self.angle, self.distance)
    }
}

const SPARK_COLORS: [&str; 4] = ["#ffd700", "#fff7ae", "#ffffff", "#fbbf24"];

pub const BURST_INNER: f64 = 0.4;
pub const BURST_OUTER: f64 = 0.9;

/// Scatters `count` sparks inside the angular span `[start, end)` and within
/// the 40–90% radius band.
pub fn scatter_in_sector<R: Rng + ?Sized>(
    rng: &mut R,
    start: f64,
    end: f64,
    count: usize,
) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            angle: rng.gen_range(start..end),
            distance: rng.gen_range(BURST_INNER..BURST_OUTER),
            size: rng.gen_range(2.0..5.0),
            alpha: rng.gen_range(0.6..1.0),
            color: SPARK_COLORS[rng.gen_range(0..SPARK_COLORS.len())],
        })
        .collect()
}

/// Sparks trailing the rim while the wheel is still moving fast.
pub fn trail_behind<R: Rng + ?Sized>(rng: &mut R, pointer_angle: f64, count: usize) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            angle: pointer_angle + rng.gen_range(-0.35..0.35),
            distance: rng.gen_range(0.95..1.08),
            size: rng.gen_range(1.0..3.0),
            alpha: rng.gen_range(0.3..0.8),
            color: SPARK_COLORS[rng.gen_range(0..SPARK_COLORS.len())],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_sector_burst_stays_inside_span_and_band() {
        let mut rng = SmallRng::seed_from_u64(7);
        let sparks = scatter_in_sector(&mut rng, 1.0, 1.5, 200);
        assert_eq!(sparks.len(), 200);
        for spark in sparks {
            assert!(spark.angle >= 1.0 && spark.angle < 1.5);
            assert!(spark.distance >= BURST_INNER && spark.distance < BURST_OUTER);
        }
    }

    #[test]
    fn test_position_uses_geometry() {
        let geometry = WheelGeometry { center_x: 100.0, center_y: 100.0, radius: 50.0 };
        let spark = Particle { angle: 0.0, distance: 0.5, size: 1.0, alpha: 1.0, color: "#fff" };
        assert_eq!(spark.position(&geometry), (125.0, 100.0));
    }
}
