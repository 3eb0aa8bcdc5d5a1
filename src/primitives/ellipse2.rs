//! 2D axis-aligned ellipse shape.

use log::trace;
use num_traits::Float;

use super::{Affine2, Point2, Vec2};
use crate::bounds::Aabb2;
use crate::error::ShapeError;
use crate::pool::{BoundsFactory, Unpooled};

/// An axis-aligned ellipse (a circle when width equals height) used as a
/// collision and bounding region.
///
/// The shape is stored as a center plus four quantities derived together by
/// [`set_shape`](Self::set_shape):
/// - `radius`: the larger semi-axis, `max(w / 2, h / 2)`
/// - `ratio`: each semi-axis divided by `radius`; one component is exactly 1
/// - `radius_v`: the semi-axes themselves, `radius * ratio`
/// - `radius_sq`: `radius² * ratio`, the normalization used by
///   [`contains`](Self::contains)
///
/// `radius_sq` is *not* the squared semi-axes. For an elongated ellipse the
/// containment test is exact along the major axis and reaches further than
/// the true outline along the minor axis. Collision code built on this shape
/// depends on that behavior, so it is kept.
///
/// The bounding box is pulled from the shape's [`BoundsFactory`] the first
/// time it is needed and is then updated in place.
///
/// # Example
///
/// ```
/// use shapekit::primitives::Ellipse2;
///
/// let mut e: Ellipse2<f64> = Ellipse2::new(0.0, 0.0, 4.0, 2.0);
/// assert_eq!(e.radius(), 2.0);
/// assert!(e.contains((1.0, 0.0)));
/// assert!(!e.contains((2.5, 0.0)));
///
/// e.translate((10.0, 5.0)).scale_uniform(2.0);
/// assert_eq!(e.bounds().min.x, 6.0);
/// assert_eq!(e.bounds().min.y, 3.0);
/// ```
#[derive(Debug)]
pub struct Ellipse2<F, P = Unpooled> {
    pos: Point2<F>,
    radius: F,
    ratio: Vec2<F>,
    radius_v: Vec2<F>,
    radius_sq: Vec2<F>,
    bounds: Option<Aabb2<F>>,
    pool: P,
}

impl<F: Float> Ellipse2<F> {
    /// Creates an ellipse centered at `(x, y)` with full width `w` and full
    /// height `h`. Bounds come from the [`Unpooled`] factory.
    pub fn new(x: F, y: F, w: F, h: F) -> Self {
        Self::with_pool(x, y, w, h, Unpooled)
    }
}

impl<F: Float> Default for Ellipse2<F> {
    fn default() -> Self {
        Self::unshaped(Unpooled)
    }
}

impl<F: Float, P: BoundsFactory<F>> Ellipse2<F, P> {
    /// Tag used by collision dispatch to identify this shape kind.
    pub const SHAPE_TYPE: &'static str = "Ellipse";

    /// Creates an ellipse whose bounds will be pulled from `pool`.
    pub fn with_pool(x: F, y: F, w: F, h: F, pool: P) -> Self {
        let mut ellipse = Self::unshaped(pool);
        ellipse.set_shape(x, y, w, h);
        ellipse
    }

    /// Creates an ellipse that has not been shaped yet.
    ///
    /// `radius` is `NaN`, the derived vectors are zero and no bounds have
    /// been pulled. Intended for shapes that live in a pool themselves and are
    /// configured later through [`on_reset`](Self::on_reset).
    pub fn unshaped(pool: P) -> Self {
        Self {
            pos: Point2::origin(),
            radius: F::nan(),
            ratio: Vec2::zero(),
            radius_v: Vec2::zero(),
            radius_sq: Vec2::zero(),
            bounds: None,
            pool,
        }
    }

    /// Sets the center and full size of the ellipse and recomputes every
    /// derived field and the bounds.
    ///
    /// No validation is done: zero, negative or `NaN` sizes flow straight
    /// into the derived fields.
    pub fn set_shape(&mut self, x: F, y: F, w: F, h: F) -> &mut Self {
        let two = F::one() + F::one();
        let half_w = w / two;
        let half_h = h / two;

        self.pos.set(x, y);
        self.radius = if half_w.is_nan() || half_h.is_nan() {
            F::nan()
        } else {
            half_w.max(half_h)
        };
        self.ratio.set(half_w / self.radius, half_h / self.radius);
        self.radius_v
            .set(self.radius, self.radius)
            .scale_v(self.ratio);
        let r = self.radius * self.radius;
        self.radius_sq.set(r, r).scale_v(self.ratio);

        let radius_v = self.radius_v;
        self.bounds_mut()
            .set_min_max(x, y, x + w, y + h)
            .translate(-radius_v);
        self
    }

    /// Reuse hook for ellipses handed out by an object pool.
    #[inline]
    pub fn on_reset(&mut self, x: F, y: F, w: F, h: F) -> &mut Self {
        self.set_shape(x, y, w, h)
    }

    /// Rotates the center counter-clockwise by `angle` radians around
    /// `pivot` (the origin when `None`) and moves the bounds along.
    ///
    /// Only the position turns; the semi-axes stay aligned with x and y. This
    /// is exact for circles only.
    pub fn rotate(&mut self, angle: F, pivot: Option<Point2<F>>) -> &mut Self {
        self.pos.rotate(angle, pivot);

        let (pos, radius_v) = (self.pos, self.radius_v);
        self.bounds_mut().shift(pos).translate(-radius_v);
        self
    }

    /// Scales the semi-axes by `sx` and `sy`, keeping the center.
    ///
    /// Factors apply to the current size, not the size at construction.
    pub fn scale(&mut self, sx: F, sy: F) -> &mut Self {
        let two = F::one() + F::one();
        let w = self.radius_v.x * two * sx;
        let h = self.radius_v.y * two * sy;
        self.set_shape(self.pos.x, self.pos.y, w, h)
    }

    #[inline]
    pub fn scale_uniform(&mut self, s: F) -> &mut Self {
        self.scale(s, s)
    }

    #[inline]
    pub fn scale_v(&mut self, v: Vec2<F>) -> &mut Self {
        self.scale(v.x, v.y)
    }

    /// Accepts an affine transform and leaves the shape unchanged.
    ///
    /// The axis-aligned parametrization cannot represent shear or rotation of
    /// the axes.
    #[inline]
    pub fn transform(&mut self, _matrix: &Affine2<F>) -> &mut Self {
        self
    }

    /// Moves the ellipse and its bounds by `delta`, given as a [`Vec2`] or an
    /// `(dx, dy)` pair.
    #[inline]
    pub fn translate(&mut self, delta: impl Into<Vec2<F>>) -> &mut Self {
        let delta = delta.into();
        self.translate_xy(delta.x, delta.y)
    }

    pub fn translate_xy(&mut self, dx: F, dy: F) -> &mut Self {
        self.pos.x = self.pos.x + dx;
        self.pos.y = self.pos.y + dy;
        self.bounds_mut().translate((dx, dy));
        self
    }

    /// Returns `true` if the point, given as a [`Point2`] or an `(x, y)`
    /// pair, lies inside or on the ellipse.
    #[inline]
    pub fn contains(&self, point: impl Into<Point2<F>>) -> bool {
        let point = point.into();
        self.contains_xy(point.x, point.y)
    }

    /// Evaluates `dx² / radius_sq.x + dy² / radius_sq.y <= 1` relative to the
    /// center.
    pub fn contains_xy(&self, x: F, y: F) -> bool {
        let dx = x - self.pos.x;
        let dy = y - self.pos.y;
        dx * dx / self.radius_sq.x + dy * dy / self.radius_sq.y <= F::one()
    }

    /// Returns the bounding box, pulling it from the pool on first access.
    ///
    /// The same instance is updated in place by later mutations; copy it to
    /// keep a snapshot.
    #[inline]
    pub fn bounds(&mut self) -> &Aabb2<F> {
        self.bounds_mut()
    }

    pub fn bounds_mut(&mut self) -> &mut Aabb2<F> {
        let pool = &self.pool;
        self.bounds.get_or_insert_with(|| {
            trace!("Pulling bounds for ellipse");
            pool.pull()
        })
    }

    /// Returns `true` once the bounds have been pulled from the pool.
    #[inline]
    pub fn has_bounds(&self) -> bool {
        self.bounds.is_some()
    }

    /// Detaches the bounds so the owner can hand them back to a pool.
    ///
    /// The next access pulls a fresh instance.
    #[inline]
    pub fn take_bounds(&mut self) -> Option<Aabb2<F>> {
        self.bounds.take()
    }

    /// Strict check for hosts that reject degenerate shapes.
    ///
    /// Never called by the shape itself.
    pub fn validate(&self) -> Result<(), ShapeError> {
        if !self.pos.is_finite() {
            return Err(ShapeError::NonFinite("center"));
        }
        if !self.radius.is_finite() || !self.radius_v.is_finite() {
            return Err(ShapeError::NonFinite("radius"));
        }
        if self.radius_v.x <= F::zero() || self.radius_v.y <= F::zero() {
            return Err(ShapeError::DegenerateShape {
                half_width: self.radius_v.x.to_f64().unwrap_or(f64::NAN),
                half_height: self.radius_v.y.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn shape_type(&self) -> &'static str {
        Self::SHAPE_TYPE
    }

    #[inline]
    pub fn pos(&self) -> Point2<F> {
        self.pos
    }

    /// The larger semi-axis.
    #[inline]
    pub fn radius(&self) -> F {
        self.radius
    }

    #[inline]
    pub fn ratio(&self) -> Vec2<F> {
        self.ratio
    }

    /// The semi-axes `(w / 2, h / 2)`.
    #[inline]
    pub fn radius_v(&self) -> Vec2<F> {
        self.radius_v
    }

    /// `radius² * ratio`, see the type-level docs.
    #[inline]
    pub fn radius_sq(&self) -> Vec2<F> {
        self.radius_sq
    }

    /// Full width.
    #[inline]
    pub fn width(&self) -> F {
        self.radius_v.x + self.radius_v.x
    }

    /// Full height.
    #[inline]
    pub fn height(&self) -> F {
        self.radius_v.y + self.radius_v.y
    }

    #[inline]
    pub fn is_circle(&self) -> bool {
        self.radius_v.x == self.radius_v.y
    }

    #[inline]
    pub fn pool(&self) -> &P {
        &self.pool
    }
}

/// Clones the center and size into a new ellipse with its own bounds,
/// pulled from a clone of the factory.
impl<F: Float, P: BoundsFactory<F> + Clone> Clone for Ellipse2<F, P> {
    fn clone(&self) -> Self {
        Self::with_pool(
            self.pos.x,
            self.pos.y,
            self.width(),
            self.height(),
            self.pool.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{BoundsPool, PoolConfig};
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};
    use std::rc::Rc;

    #[test]
    fn test_derived_fields() {
        let e: Ellipse2<f64> = Ellipse2::new(0.0, 0.0, 4.0, 2.0);
        assert_eq!(e.pos(), Point2::origin());
        assert_eq!(e.radius(), 2.0);
        assert_eq!(e.ratio(), Vec2::new(1.0, 0.5));
        assert_eq!(e.radius_v(), Vec2::new(2.0, 1.0));
        // radius² * ratio, not the squared semi-axes (4, 1)
        assert_eq!(e.radius_sq(), Vec2::new(4.0, 2.0));
        assert_eq!(e.width(), 4.0);
        assert_eq!(e.height(), 2.0);
        assert!(!e.is_circle());
    }

    #[test]
    fn test_initial_bounds() {
        let mut e: Ellipse2<f64> = Ellipse2::new(0.0, 0.0, 4.0, 2.0);
        let b = *e.bounds();
        assert_eq!(b.min, Point2::new(-2.0, -1.0));
        assert_eq!(b.size(), Vec2::new(4.0, 2.0));
        assert_eq!(b.center(), e.pos());
    }

    #[test]
    fn test_contains() {
        let e: Ellipse2<f64> = Ellipse2::new(0.0, 0.0, 4.0, 2.0);

        assert!(e.contains((0.0, 0.0)));
        assert!(e.contains((1.0, 0.0)));
        assert!(e.contains(Point2::new(2.0, 0.0))); // On boundary (major)
        assert!(!e.contains(Point2::new(2.0001, 0.0)));
        assert!(!e.contains_xy(3.0, 0.0));
    }

    #[test]
    fn test_contains_reaches_past_minor_axis() {
        // With radius_sq.y = 2 the test accepts |dy| <= sqrt(2) on the minor
        // axis instead of 1.
        let e: Ellipse2<f64> = Ellipse2::new(0.0, 0.0, 4.0, 2.0);
        assert!(e.contains((0.0, 1.0001)));
        assert!(e.contains((0.0, 1.414)));
        assert!(!e.contains((0.0, 1.415)));
        assert!(!e.contains((0.0, -1.5)));
    }

    #[test]
    fn test_circle_contains_is_exact() {
        let e: Ellipse2<f64> = Ellipse2::new(5.0, 5.0, 2.0, 2.0);
        assert!(e.is_circle());
        assert_eq!(e.radius_sq(), Vec2::new(1.0, 1.0));
        assert!(e.contains((6.0, 5.0)));
        assert!(e.contains((5.0, 4.0)));
        assert!(!e.contains((5.8, 5.8)));
    }

    #[test]
    fn test_tall_ellipse_ratio() {
        let e: Ellipse2<f64> = Ellipse2::new(1.0, 1.0, 2.0, 8.0);
        assert_eq!(e.radius(), 4.0);
        assert_eq!(e.ratio(), Vec2::new(0.25, 1.0));
        assert_eq!(e.radius_v(), Vec2::new(1.0, 4.0));
        assert_eq!(e.radius_sq(), Vec2::new(4.0, 16.0));
    }

    #[test]
    fn test_scale() {
        let mut e: Ellipse2<f64> = Ellipse2::new(0.0, 0.0, 4.0, 2.0);
        e.scale_uniform(2.0);

        assert_eq!(e.width(), 8.0);
        assert_eq!(e.height(), 4.0);
        assert_eq!(e.pos(), Point2::origin());
        let b = *e.bounds();
        assert_eq!(b.min, Point2::new(-4.0, -2.0));
        assert_eq!(b.size(), Vec2::new(8.0, 4.0));
    }

    #[test]
    fn test_scale_is_relative_to_current_size() {
        let mut e: Ellipse2<f64> = Ellipse2::new(3.0, -1.0, 4.0, 2.0);
        e.scale(2.0, 1.0).scale(0.5, 3.0);

        assert_eq!(e.width(), 4.0);
        assert_eq!(e.height(), 6.0);
        assert_eq!(e.radius(), 3.0);
        assert_eq!(e.pos(), Point2::new(3.0, -1.0));
    }

    #[test]
    fn test_scale_v() {
        let mut a: Ellipse2<f64> = Ellipse2::new(1.0, 2.0, 4.0, 2.0);
        let mut b: Ellipse2<f64> = Ellipse2::new(1.0, 2.0, 4.0, 2.0);
        a.scale_v(Vec2::new(0.5, 4.0));
        b.scale(0.5, 4.0);

        assert_eq!(a.radius_v(), b.radius_v());
        assert_eq!(a.radius_sq(), b.radius_sq());
        assert_eq!(*a.bounds(), *b.bounds());
        assert_eq!(a.radius_v(), Vec2::new(1.0, 4.0));
    }

    #[test]
    fn test_translate() {
        let mut e: Ellipse2<f64> = Ellipse2::new(0.0, 0.0, 4.0, 2.0);
        e.translate((3.0, -2.0));
        assert_eq!(e.pos(), Point2::new(3.0, -2.0));
        assert_eq!(e.bounds().min, Point2::new(1.0, -3.0));

        e.translate(Vec2::new(-1.0, 1.0));
        assert_eq!(e.pos(), Point2::new(2.0, -1.0));
        assert_eq!(e.bounds().min, Point2::new(0.0, -2.0));

        e.translate_xy(1.0, 1.0);
        assert_eq!(e.pos(), Point2::new(3.0, 0.0));

        // Derived radii stay untouched
        assert_eq!(e.radius_v(), Vec2::new(2.0, 1.0));
        assert_eq!(e.radius_sq(), Vec2::new(4.0, 2.0));
        assert!(e.contains((4.0, 0.0)));
    }

    #[test]
    fn test_rotate_circle_about_origin() {
        let mut e: Ellipse2<f64> = Ellipse2::new(2.0, 0.0, 2.0, 2.0);
        e.rotate(FRAC_PI_2, None);

        assert_relative_eq!(e.pos().x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(e.pos().y, 2.0, epsilon = 1e-12);
        let b = *e.bounds();
        assert_relative_eq!(b.min.x, -1.0, epsilon = 1e-12);
        assert_relative_eq!(b.min.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(b.width(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(b.height(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_about_pivot() {
        let mut e: Ellipse2<f64> = Ellipse2::new(3.0, 1.0, 2.0, 2.0);
        e.rotate(PI, Some(Point2::new(2.0, 1.0)));

        assert_relative_eq!(e.pos().x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(e.pos().y, 1.0, epsilon = 1e-12);
        let center = e.bounds().center();
        assert_relative_eq!(center.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(center.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_keeps_ellipse_axis_aligned() {
        let mut e: Ellipse2<f64> = Ellipse2::new(0.0, 0.0, 4.0, 2.0);
        e.rotate(FRAC_PI_2, None);

        // A true rotation would swap the extents; the shape keeps them.
        assert_eq!(e.radius_v(), Vec2::new(2.0, 1.0));
        let b = *e.bounds();
        assert_relative_eq!(b.width(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(b.height(), 2.0, epsilon = 1e-12);
        assert!(e.contains((1.9, 0.0)));
        assert!(!e.contains((0.0, 1.9)));
    }

    #[test]
    fn test_transform_is_noop() {
        let mut e: Ellipse2<f64> = Ellipse2::new(1.0, 2.0, 4.0, 2.0);
        let before = (e.pos(), e.radius_v(), e.radius_sq(), *e.bounds());

        let m = Affine2::rotation(0.3).then(Affine2::translation(Vec2::new(5.0, 5.0)));
        e.transform(&m);

        assert_eq!((e.pos(), e.radius_v(), e.radius_sq(), *e.bounds()), before);
    }

    #[test]
    fn test_unshaped() {
        let mut e: Ellipse2<f64> = Ellipse2::default();
        assert!(e.radius().is_nan());
        assert_eq!(e.radius_v(), Vec2::zero());
        assert!(!e.has_bounds());
        assert!(!e.contains((0.0, 0.0)));

        assert!(e.bounds().is_empty());
        assert!(e.has_bounds());

        e.on_reset(1.0, 1.0, 2.0, 2.0);
        assert_eq!(e.radius(), 1.0);
        assert_eq!(e.bounds().min, Point2::new(0.0, 0.0));
    }

    #[test]
    fn test_bounds_pulled_once() {
        let pool: BoundsPool<f64> = BoundsPool::default();
        let mut e = Ellipse2::with_pool(0.0, 0.0, 4.0, 2.0, &pool);
        assert_eq!(pool.stats().pulled, 1);

        e.translate((1.0, 1.0)).scale_uniform(2.0).rotate(0.5, None);
        let _ = e.bounds();
        let _ = e.bounds();
        assert_eq!(pool.stats().pulled, 1);
    }

    #[test]
    fn test_unshaped_pulls_lazily() {
        let pool: BoundsPool<f64> = BoundsPool::default();
        let mut e = Ellipse2::unshaped(&pool);
        assert_eq!(pool.stats().pulled, 0);

        let _ = e.bounds();
        assert_eq!(pool.stats().pulled, 1);
    }

    #[test]
    fn test_take_bounds_and_recycle() {
        let pool = Rc::new(BoundsPool::<f64>::new(PoolConfig::default()));
        let mut e = Ellipse2::with_pool(0.0, 0.0, 2.0, 2.0, Rc::clone(&pool));

        let bounds = e.take_bounds().unwrap();
        assert!(!e.has_bounds());
        pool.push(bounds).unwrap();

        let mut other = Ellipse2::with_pool(10.0, 10.0, 4.0, 4.0, Rc::clone(&pool));
        assert_eq!(pool.stats().recycled, 1);
        assert_eq!(other.bounds().min, Point2::new(8.0, 8.0));
    }

    #[test]
    fn test_clone_is_independent() {
        let pool: BoundsPool<f64> = BoundsPool::default();
        let mut original = Ellipse2::with_pool(1.0, 2.0, 6.0, 3.0, &pool);
        let mut copy = original.clone();
        assert_eq!(pool.stats().pulled, 2);

        assert_eq!(copy.pos(), original.pos());
        assert_eq!(copy.radius_v(), original.radius_v());
        assert_eq!(copy.radius_sq(), original.radius_sq());
        assert_eq!(*copy.bounds(), *original.bounds());

        copy.translate((5.0, 5.0)).scale_uniform(3.0);
        assert_eq!(original.pos(), Point2::new(1.0, 2.0));
        assert_eq!(original.bounds().min, Point2::new(-2.0, 0.5));
        assert_eq!(original.width(), 6.0);
    }

    #[test]
    fn test_degenerate_input_propagates() {
        let e: Ellipse2<f64> = Ellipse2::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(e.radius(), 0.0);
        assert!(e.ratio().x.is_nan());
        assert!(e.ratio().y.is_nan());

        let e: Ellipse2<f64> = Ellipse2::new(0.0, 0.0, 4.0, 0.0);
        assert_eq!(e.ratio(), Vec2::new(1.0, 0.0));
        assert_eq!(e.radius_sq(), Vec2::new(4.0, 0.0));

        let e: Ellipse2<f64> = Ellipse2::new(0.0, 0.0, f64::NAN, 2.0);
        assert!(e.radius().is_nan());
    }

    #[test]
    fn test_negative_size_accepted() {
        let mut e: Ellipse2<f64> = Ellipse2::new(0.0, 0.0, -4.0, -2.0);
        assert_eq!(e.radius(), -1.0);
        assert_eq!(e.ratio(), Vec2::new(2.0, 1.0));
        assert_eq!(e.radius_v(), Vec2::new(-2.0, -1.0));
        assert_eq!(e.bounds().min, Point2::new(2.0, 1.0));
    }

    #[test]
    fn test_validate() {
        let ok: Ellipse2<f64> = Ellipse2::new(0.0, 0.0, 4.0, 2.0);
        assert!(ok.validate().is_ok());

        let flat: Ellipse2<f64> = Ellipse2::new(0.0, 0.0, 4.0, 0.0);
        assert_eq!(
            flat.validate(),
            Err(ShapeError::DegenerateShape {
                half_width: 2.0,
                half_height: 0.0,
            })
        );

        let nan: Ellipse2<f64> = Ellipse2::new(f64::NAN, 0.0, 4.0, 2.0);
        assert_eq!(nan.validate(), Err(ShapeError::NonFinite("center")));

        let unshaped: Ellipse2<f64> = Ellipse2::default();
        assert_eq!(unshaped.validate(), Err(ShapeError::NonFinite("radius")));
    }

    #[test]
    fn test_shape_type() {
        let e: Ellipse2<f64> = Ellipse2::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(e.shape_type(), "Ellipse");
    }

    #[test]
    fn test_f32_support() {
        let mut e: Ellipse2<f32> = Ellipse2::new(0.0, 0.0, 4.0, 2.0);
        assert_eq!(e.radius_sq(), Vec2::new(4.0_f32, 2.0));
        assert!(e.contains((1.0_f32, 0.0)));
        assert_eq!(e.bounds().min, Point2::new(-2.0_f32, -1.0));
    }
}
