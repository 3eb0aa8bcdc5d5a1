//! Pooling of bounds instances.
//!
//! Shapes never construct their bounding box directly. They pull one from a
//! [`BoundsFactory`] the first time it is needed, so a host that churns
//! through many short-lived shapes can recycle boxes through a
//! [`BoundsPool`]. Handing a box back is the owner's job: shapes only pull.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, trace, warn};
use num_traits::Float;

use crate::bounds::Aabb2;
use crate::error::ShapeError;

/// Source of bounds instances for shapes.
///
/// Every pulled instance is in the [`Aabb2::empty`] state.
pub trait BoundsFactory<F> {
    /// Returns a ready-to-use bounds instance.
    fn pull(&self) -> Aabb2<F>;
}

impl<F, T: BoundsFactory<F> + ?Sized> BoundsFactory<F> for &T {
    #[inline]
    fn pull(&self) -> Aabb2<F> {
        (**self).pull()
    }
}

impl<F, T: BoundsFactory<F> + ?Sized> BoundsFactory<F> for Rc<T> {
    #[inline]
    fn pull(&self) -> Aabb2<F> {
        (**self).pull()
    }
}

/// Factory that hands out a fresh box on every pull.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unpooled;

impl<F: Float> BoundsFactory<F> for Unpooled {
    #[inline]
    fn pull(&self) -> Aabb2<F> {
        Aabb2::empty()
    }
}

/// Sizing of a [`BoundsPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Maximum number of released instances kept for reuse.
    pub capacity: usize,
    /// Number of instances allocated up front. Clamped to `capacity`.
    pub prewarm: usize,
}

impl PoolConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_prewarm(mut self, prewarm: usize) -> Self {
        self.prewarm = prewarm;
        self
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: 256,
            prewarm: 0,
        }
    }
}

/// Counters describing how a pool has been used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Total number of pulls.
    pub pulled: u64,
    /// Pulls that had to allocate (plus prewarmed instances).
    pub allocated: u64,
    /// Pulls served from the free list.
    pub recycled: u64,
}

/// Free-list pool of bounds instances.
///
/// Uses interior mutability so one pool can be shared by many shapes through
/// `&BoundsPool` or `Rc<BoundsPool>`. Not thread-safe.
///
/// # Example
///
/// ```
/// use shapekit::pool::{BoundsFactory, BoundsPool, PoolConfig};
///
/// let pool: BoundsPool<f64> = BoundsPool::new(PoolConfig::default().with_prewarm(4));
/// assert_eq!(pool.available(), 4);
///
/// let bounds = pool.pull();
/// assert!(bounds.is_empty());
/// pool.push(bounds).unwrap();
/// assert_eq!(pool.available(), 4);
/// ```
#[derive(Debug)]
pub struct BoundsPool<F> {
    config: PoolConfig,
    free: RefCell<Vec<Aabb2<F>>>,
    stats: Cell<PoolStats>,
}

impl<F: Float> BoundsPool<F> {
    /// Creates a pool, allocating `config.prewarm` instances up front.
    pub fn new(config: PoolConfig) -> Self {
        let prewarm = config.prewarm.min(config.capacity);
        let mut free = Vec::with_capacity(prewarm);
        free.resize(prewarm, Aabb2::empty());
        if prewarm > 0 {
            debug!(
                "Prewarmed bounds pool with {} of {} instances",
                prewarm, config.capacity
            );
        }

        Self {
            config,
            free: RefCell::new(free),
            stats: Cell::new(PoolStats {
                allocated: prewarm as u64,
                ..PoolStats::default()
            }),
        }
    }

    /// Returns a released instance to the pool.
    ///
    /// The instance is reset to the empty state. Fails with
    /// [`ShapeError::PoolFull`] when the free list is at capacity, in which
    /// case the instance is dropped.
    pub fn push(&self, mut bounds: Aabb2<F>) -> Result<(), ShapeError> {
        let mut free = self.free.borrow_mut();
        if free.len() >= self.config.capacity {
            warn!(
                "Bounds pool full ({} instances), dropping released bounds",
                self.config.capacity
            );
            return Err(ShapeError::PoolFull {
                capacity: self.config.capacity,
            });
        }

        bounds.clear();
        free.push(bounds);
        Ok(())
    }

    /// Number of instances waiting on the free list.
    pub fn available(&self) -> usize {
        self.free.borrow().len()
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn config(&self) -> PoolConfig {
        self.config
    }

    pub fn stats(&self) -> PoolStats {
        self.stats.get()
    }

    /// Drops every instance on the free list. Counters are kept.
    pub fn clear(&self) {
        let mut free = self.free.borrow_mut();
        debug!("Clearing {} pooled bounds", free.len());
        free.clear();
    }
}

impl<F: Float> Default for BoundsPool<F> {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

impl<F: Float> BoundsFactory<F> for BoundsPool<F> {
    fn pull(&self) -> Aabb2<F> {
        let mut stats = self.stats.get();
        stats.pulled += 1;

        let bounds = match self.free.borrow_mut().pop() {
            Some(bounds) => {
                stats.recycled += 1;
                trace!("Recycled pooled bounds ({} pulls)", stats.pulled);
                bounds
            }
            None => {
                stats.allocated += 1;
                debug!(
                    "Bounds pool empty, allocating instance #{}",
                    stats.allocated
                );
                Aabb2::empty()
            }
        };

        self.stats.set(stats);
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Point2;

    #[test]
    fn test_unpooled_pull_is_empty() {
        let bounds: Aabb2<f64> = Unpooled.pull();
        assert!(bounds.is_empty());
    }

    #[test]
    fn test_pull_allocates_when_empty() {
        let pool: BoundsPool<f64> = BoundsPool::default();
        let _ = pool.pull();
        let _ = pool.pull();

        let stats = pool.stats();
        assert_eq!(stats.pulled, 2);
        assert_eq!(stats.allocated, 2);
        assert_eq!(stats.recycled, 0);
    }

    #[test]
    fn test_push_then_pull_recycles_reset_instance() {
        let pool: BoundsPool<f64> = BoundsPool::default();
        let mut bounds = pool.pull();
        bounds.set_min_max(0.0, 0.0, 3.0, 3.0);

        pool.push(bounds).unwrap();
        assert_eq!(pool.available(), 1);

        let again = pool.pull();
        assert!(again.is_empty());
        assert_eq!(pool.available(), 0);
        assert_eq!(pool.stats().recycled, 1);
        assert_eq!(pool.stats().allocated, 1);
    }

    #[test]
    fn test_push_respects_capacity() {
        let pool: BoundsPool<f64> = BoundsPool::new(PoolConfig::default().with_capacity(1));
        pool.push(Aabb2::new(Point2::origin(), Point2::origin())).unwrap();

        let err = pool.push(Aabb2::empty()).unwrap_err();
        assert_eq!(err, ShapeError::PoolFull { capacity: 1 });
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn test_prewarm_clamped_to_capacity() {
        let config = PoolConfig::default().with_capacity(3).with_prewarm(10);
        let pool: BoundsPool<f32> = BoundsPool::new(config);

        assert_eq!(pool.available(), 3);
        assert_eq!(pool.stats().allocated, 3);

        let _ = pool.pull();
        assert_eq!(pool.stats().recycled, 1);
        assert_eq!(pool.stats().allocated, 3);
    }

    #[test]
    fn test_clear() {
        let pool: BoundsPool<f64> = BoundsPool::new(PoolConfig::default().with_prewarm(5));
        pool.clear();
        assert_eq!(pool.available(), 0);
        assert_eq!(pool.stats().allocated, 5);
    }

    #[test]
    fn test_shared_through_rc() {
        let pool = Rc::new(BoundsPool::<f64>::default());
        let handle = Rc::clone(&pool);

        let _ = handle.pull();
        let _ = (&*pool).pull();
        assert_eq!(pool.stats().pulled, 2);
    }
}
