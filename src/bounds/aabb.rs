//! Axis-aligned bounding box.

use crate::primitives::{Point2, Vec2};
use num_traits::Float;

/// A 2D axis-aligned bounding box.
///
/// Defined by minimum and maximum corners. With y growing downwards (screen
/// space) `min` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2<F> {
    /// Minimum corner (smallest x and y values).
    pub min: Point2<F>,
    /// Maximum corner (largest x and y values).
    pub max: Point2<F>,
}

impl<F: Float> Aabb2<F> {
    /// Creates a new AABB from min and max corners.
    ///
    /// Does not validate that min <= max.
    #[inline]
    pub fn new(min: Point2<F>, max: Point2<F>) -> Self {
        Self { min, max }
    }

    /// Creates an inverted, empty AABB (min = +inf, max = -inf).
    ///
    /// This is the state of a freshly pooled box before a shape writes to it.
    #[inline]
    pub fn empty() -> Self {
        Self {
            min: Point2::new(F::infinity(), F::infinity()),
            max: Point2::new(F::neg_infinity(), F::neg_infinity()),
        }
    }

    /// Returns `true` while the box still has its inverted, empty extents.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Resets the box to the empty state.
    #[inline]
    pub fn clear(&mut self) -> &mut Self {
        *self = Self::empty();
        self
    }

    /// Overwrites both corners in place.
    #[inline]
    pub fn set_min_max(&mut self, min_x: F, min_y: F, max_x: F, max_y: F) -> &mut Self {
        self.min.set(min_x, min_y);
        self.max.set(max_x, max_y);
        self
    }

    /// Moves both corners by `delta`.
    ///
    /// Accepts a `Vec2` or an `(dx, dy)` pair.
    #[inline]
    pub fn translate(&mut self, delta: impl Into<Vec2<F>>) -> &mut Self {
        let delta = delta.into();
        self.min = self.min + delta;
        self.max = self.max + delta;
        self
    }

    /// Moves the box so its top-left corner sits at `to`, keeping its size.
    #[inline]
    pub fn shift(&mut self, to: impl Into<Point2<F>>) -> &mut Self {
        let to = to.into();
        let size = self.size();
        self.min = to;
        self.max = to + size;
        self
    }

    #[inline]
    pub fn left(self) -> F {
        self.min.x
    }

    #[inline]
    pub fn top(self) -> F {
        self.min.y
    }

    #[inline]
    pub fn right(self) -> F {
        self.max.x
    }

    #[inline]
    pub fn bottom(self) -> F {
        self.max.y
    }

    /// Returns the width of the AABB.
    #[inline]
    pub fn width(self) -> F {
        self.max.x - self.min.x
    }

    /// Returns the height of the AABB.
    #[inline]
    pub fn height(self) -> F {
        self.max.y - self.min.y
    }

    /// Returns the size as a vector (width, height).
    #[inline]
    pub fn size(self) -> Vec2<F> {
        Vec2::new(self.width(), self.height())
    }

    /// Returns the center point of the AABB.
    #[inline]
    pub fn center(self) -> Point2<F> {
        self.min.midpoint(self.max)
    }

    /// Returns `true` if this AABB contains the given point.
    #[inline]
    pub fn contains_point(self, p: Point2<F>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Returns `true` if this AABB intersects another AABB.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

impl<F: Float> Default for Aabb2<F> {
    fn default() -> Self {
        Self::empty()
    }
}
