//! 2D affine transformation matrix.

use super::{Point2, Vec2};
use num_traits::Float;
use std::ops::Mul;

/// A 2x3 affine matrix in row-major order:
///
/// ```text
/// | a  b  tx |
/// | c  d  ty |
/// ```
///
/// Shapes accept it through their `transform` hook.
///
/// # Example
///
/// ```
/// use shapekit::primitives::{Affine2, Point2};
/// use std::f64::consts::FRAC_PI_2;
///
/// let m: Affine2<f64> = Affine2::rotation_around(FRAC_PI_2, Point2::new(1.0, 0.0));
/// let p = m.apply_point(Point2::new(2.0, 0.0));
/// assert!((p.x - 1.0).abs() < 1e-12);
/// assert!((p.y - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2<F> {
    pub a: F,
    pub b: F,
    pub c: F,
    pub d: F,
    pub tx: F,
    pub ty: F,
}

impl<F: Float> Affine2<F> {
    #[inline]
    pub fn new(a: F, b: F, c: F, d: F, tx: F, ty: F) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// The identity transform.
    #[inline]
    pub fn identity() -> Self {
        Self::scale_xy(F::one(), F::one())
    }

    /// A pure translation by `offset`.
    #[inline]
    pub fn translation(offset: Vec2<F>) -> Self {
        Self {
            tx: offset.x,
            ty: offset.y,
            ..Self::identity()
        }
    }

    /// Counter-clockwise rotation by `angle` radians around the origin.
    #[inline]
    pub fn rotation(angle: F) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, -sin, sin, cos, F::zero(), F::zero())
    }

    /// Counter-clockwise rotation by `angle` radians around `pivot`.
    pub fn rotation_around(angle: F, pivot: Point2<F>) -> Self {
        Self::translation(-pivot.to_vec())
            .then(Self::rotation(angle))
            .then(Self::translation(pivot.to_vec()))
    }

    /// Per-axis scale around the origin.
    #[inline]
    pub fn scale_xy(sx: F, sy: F) -> Self {
        Self::new(sx, F::zero(), F::zero(), sy, F::zero(), F::zero())
    }

    /// Returns `self * other`: applies `other` first, then `self`.
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            tx: self.a * other.tx + self.b * other.ty + self.tx,
            ty: self.c * other.tx + self.d * other.ty + self.ty,
        }
    }

    /// Returns a transform that applies `self` first, then `next`.
    #[inline]
    pub fn then(&self, next: Self) -> Self {
        next.compose(self)
    }

    #[inline]
    pub fn apply_point(&self, p: Point2<F>) -> Point2<F> {
        Point2::new(
            self.a * p.x + self.b * p.y + self.tx,
            self.c * p.x + self.d * p.y + self.ty,
        )
    }

    /// Applies the linear part only.
    #[inline]
    pub fn apply_vec(&self, v: Vec2<F>) -> Vec2<F> {
        Vec2::new(self.a * v.x + self.b * v.y, self.c * v.x + self.d * v.y)
    }

    pub fn is_identity(&self, epsilon: F) -> bool {
        (self.a - F::one()).abs() < epsilon
            && self.b.abs() < epsilon
            && self.c.abs() < epsilon
            && (self.d - F::one()).abs() < epsilon
            && self.tx.abs() < epsilon
            && self.ty.abs() < epsilon
    }
}

impl<F: Float> Default for Affine2<F> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<F: Float> Mul for Affine2<F> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.compose(&rhs)
    }
}
