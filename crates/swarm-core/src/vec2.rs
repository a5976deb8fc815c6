//! Planar vector type used for positions, velocities, and forces.
//!
//! Single-precision is deliberate: the simulation area is a few thousand
//! units across and per-tick displacements are small, so `f32` keeps agent
//! state compact without visible drift over a run.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A 2-D vector in world space (screen-style coordinates, +y down or up —
/// the framework does not care; only the rendering boundary does).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    #[inline]
    pub fn distance_squared(self, other: Vec2) -> f32 {
        (other - self).length_squared()
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    ///
    /// Degenerate geometry must be guarded, not faulted: callers steer by
    /// zero when there is no direction to steer in.
    #[inline]
    pub fn normalized(self) -> Option<Vec2> {
        let len = self.length();
        if len > f32::EPSILON {
            Some(Vec2::new(self.x / len, self.y / len))
        } else {
            None
        }
    }

    /// Clamp the magnitude to `max`, preserving direction.
    ///
    /// The zero vector and non-positive `max` both yield zero.
    pub fn limit(self, max: f32) -> Vec2 {
        if max <= 0.0 {
            return Vec2::ZERO;
        }
        let len_sq = self.length_squared();
        if len_sq > max * max {
            let scale = max / len_sq.sqrt();
            Vec2::new(self.x * scale, self.y * scale)
        } else {
            self
        }
    }

    /// Angle of this vector in radians (`atan2(y, x)`).  Zero for the zero
    /// vector.
    #[inline]
    pub fn angle(self) -> f32 {
        if self == Vec2::ZERO {
            0.0
        } else {
            self.y.atan2(self.x)
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
