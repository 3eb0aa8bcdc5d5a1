//! shapekit - Pooled 2D collision shapes
//!
//! An axis-aligned ellipse (or circle) shape that keeps its bounding box up to
//! date as it is moved, scaled and rotated, and answers point-containment
//! queries. Bounding boxes are pulled lazily from a [`pool::BoundsFactory`],
//! which lets a host recycle them through a [`pool::BoundsPool`].
//!
//! ```
//! use std::rc::Rc;
//! use shapekit::pool::{BoundsPool, PoolConfig};
//! use shapekit::Ellipse2;
//!
//! let pool = Rc::new(BoundsPool::<f64>::new(PoolConfig::default()));
//! let mut hitbox = Ellipse2::with_pool(0.0, 0.0, 4.0, 4.0, Rc::clone(&pool));
//!
//! hitbox.translate((10.0, 0.0));
//! assert!(hitbox.contains((11.0, 1.0)));
//! assert_eq!(hitbox.bounds().min.x, 8.0);
//! ```

pub mod bounds;
pub mod error;
pub mod pool;
pub mod primitives;

pub use bounds::Aabb2;
pub use error::ShapeError;
pub use pool::{BoundsFactory, BoundsPool, PoolConfig, PoolStats, Unpooled};
pub use primitives::{Affine2, Ellipse2, Point2, Vec2};
