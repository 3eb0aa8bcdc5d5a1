//! 2D vector type for directions, offsets and per-axis factors.

use num_traits::Float;
use std::ops::{Add, Div, Mul, Neg, Sub};

use super::Point2;

/// A 2D vector representing a direction, offset or per-axis factor.
///
/// Generic over floating-point types (`f32` or `f64`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Creates a new vector.
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// Creates a zero vector.
    #[inline]
    pub fn zero() -> Self {
        Self {
            x: F::zero(),
            y: F::zero(),
        }
    }

    /// Overwrites both components in place.
    #[inline]
    pub fn set(&mut self, x: F, y: F) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Multiplies component-wise by `other` in place.
    #[inline]
    pub fn scale_v(&mut self, other: Self) -> &mut Self {
        self.x = self.x * other.x;
        self.y = self.y * other.y;
        self
    }

    /// Rotates the vector counter-clockwise by `angle` radians about `pivot`.
    ///
    /// The vector is treated as a position; with `pivot = None` it turns
    /// around the origin.
    pub fn rotate(&mut self, angle: F, pivot: Option<Point2<F>>) -> &mut Self {
        let (cx, cy) = pivot.map_or((F::zero(), F::zero()), |p| (p.x, p.y));
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - cx;
        let dy = self.y - cy;
        self.x = cx + dx * cos - dy * sin;
        self.y = cy + dx * sin + dy * cos;
        self
    }

    /// Returns `true` if both components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl<F: Float> Mul<F> for Vec2<F> {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: F) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl<F: Float> Div<F> for Vec2<F> {
    type Output = Self;

    #[inline]
    fn div(self, scalar: F) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl<F: Float> Neg for Vec2<F> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl<F: Float> Default for Vec2<F> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<F: Float> From<(F, F)> for Vec2<F> {
    #[inline]
    fn from((x, y): (F, F)) -> Self {
        Self { x, y }
    }
}

impl<F: Float> From<Point2<F>> for Vec2<F> {
    #[inline]
    fn from(p: Point2<F>) -> Self {
        Self { x: p.x, y: p.y }
    }
}
