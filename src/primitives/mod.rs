//! Floating-point geometric primitives and the ellipse shape.

mod affine2;
mod ellipse2;
mod point2;
mod vec2;

pub use affine2::Affine2;
pub use ellipse2::Ellipse2;
pub use point2::Point2;
pub use vec2::Vec2;
