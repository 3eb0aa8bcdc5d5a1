//! Walks a pooled ellipse through its mutations and prints the results.
//!
//! Run with: RUST_LOG=trace cargo run --example ellipse_demo

use std::f64::consts::FRAC_PI_2;
use std::rc::Rc;

use env_logger::Env;
use shapekit::pool::{BoundsPool, PoolConfig};
use shapekit::{Aabb2, Ellipse2, Point2, ShapeError};

fn init_log(level: &str) {
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn describe(label: &str, bounds: &Aabb2<f64>) {
    println!(
        "{label:>10}: top-left ({:.2}, {:.2}) size ({:.2} x {:.2})",
        bounds.left(),
        bounds.top(),
        bounds.width(),
        bounds.height()
    );
}

fn main() -> Result<(), ShapeError> {
    init_log("info");

    let pool = Rc::new(BoundsPool::<f64>::new(
        PoolConfig::default().with_capacity(8).with_prewarm(2),
    ));

    let mut hitbox = Ellipse2::with_pool(0.0, 0.0, 4.0, 2.0, Rc::clone(&pool));
    hitbox.validate()?;
    describe("created", hitbox.bounds());

    for p in [(1.0, 0.0), (0.0, 1.2), (0.0, 1.5), (2.5, 0.0)] {
        println!("  contains {p:?}: {}", hitbox.contains(p));
    }

    hitbox.scale_uniform(2.0);
    describe("scaled", hitbox.bounds());

    hitbox.translate((10.0, 5.0));
    describe("moved", hitbox.bounds());

    let mut wheel = Ellipse2::with_pool(4.0, 0.0, 2.0, 2.0, Rc::clone(&pool));
    wheel.rotate(FRAC_PI_2, Some(Point2::new(2.0, 0.0)));
    describe("rotated", wheel.bounds());

    let copy = hitbox.clone();
    println!(
        "clone at ({:.2}, {:.2}) agrees: {}",
        copy.pos().x,
        copy.pos().y,
        copy.contains((11.0, 5.0)) == hitbox.contains((11.0, 5.0))
    );

    for shape in [&mut hitbox, &mut wheel] {
        if let Some(bounds) = shape.take_bounds() {
            pool.push(bounds)?;
        }
    }

    let stats = pool.stats();
    println!(
        "pool: {} pulled, {} allocated, {} recycled, {} available",
        stats.pulled,
        stats.allocated,
        stats.recycled,
        pool.available()
    );
    Ok(())
}
