//! Spawn-position generation.

use crate::config::Bounds;
use crate::rng::SimRng;
use crate::vec2::Vec2;

/// Attempts per point before giving up on the separation constraint.
const MAX_ATTEMPTS: u32 = 1_000;

/// Generate `count` positions inside `area`, each at least `min_separation`
/// from all previously placed positions.
///
/// Rejection-sampled; when an area is too crowded to honour the separation
/// within the attempt budget, the constraint is dropped for the remaining
/// points rather than failing the run.  `min_separation <= 0` disables the
/// constraint entirely.
pub fn scatter(count: usize, area: Bounds, min_separation: f32, rng: &mut SimRng) -> Vec<Vec2> {
    let mut placed: Vec<Vec2> = Vec::with_capacity(count);
    let sep_sq = min_separation * min_separation;

    for _ in 0..count {
        let mut candidate = random_point(area, rng);
        if min_separation > 0.0 {
            let mut attempts = 0;
            while placed
                .iter()
                .any(|p| p.distance_squared(candidate) < sep_sq)
                && attempts < MAX_ATTEMPTS
            {
                candidate = random_point(area, rng);
                attempts += 1;
            }
        }
        placed.push(candidate);
    }
    placed
}

/// A single uniform point inside `area`.
pub fn random_point(area: Bounds, rng: &mut SimRng) -> Vec2 {
    Vec2::new(
        rng.gen_range(area.min.x..=area.max.x),
        rng.gen_range(area.min.y..=area.max.y),
    )
}
