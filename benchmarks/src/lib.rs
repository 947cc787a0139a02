//! Scene builders shared by the benchmarks.

use glam::Vec2;
use impact2d::{Body, Shape, World, WorldConfig, WorldSize};

pub const WORLD_WIDTH: f32 = 1600.0;
pub const WORLD_HEIGHT: f32 = 1200.0;

/// Cheap deterministic scatter so runs are comparable without pulling in an RNG.
fn scatter(i: usize, spread: f32) -> Vec2 {
    let x = ((i as f32) * 37.17).rem_euclid(spread);
    let y = ((i as f32) * 91.73).rem_euclid(spread * 0.75);
    Vec2::new(x, y)
}

fn drift(i: usize) -> Vec2 {
    let angle = i as f32 * 0.618;
    Vec2::new(angle.cos(), angle.sin()) * 2.0
}

/// `n` small circles packed into the world. Plenty of overlapping AABBs.
pub fn setup_circles(n: usize) -> Vec<Body> {
    (0..n)
        .filter_map(|i| {
            let shape = Shape::circle(scatter(i, WORLD_WIDTH), 8.0).ok()?;
            Some(Body::new(shape).with_velocity(drift(i)))
        })
        .collect()
}

/// Alternating circles and boxes, every tenth body static.
pub fn setup_mixed(n: usize) -> Vec<Body> {
    (0..n)
        .filter_map(|i| {
            let pos = scatter(i, WORLD_WIDTH);
            let shape = if i % 2 == 0 {
                Shape::circle(pos, 8.0).ok()?
            } else {
                Shape::rect(pos, 14.0, 10.0).ok()?
            };
            let body = if i % 10 == 0 {
                Body::fixed(shape)
            } else {
                Body::new(shape).with_velocity(drift(i))
            };
            Some(body)
        })
        .collect()
}

/// Bodies spread thinly over a large area, so few pairs survive the broadphase.
pub fn setup_sparse(n: usize) -> Vec<Body> {
    (0..n)
        .filter_map(|i| {
            let shape = Shape::circle(scatter(i, WORLD_WIDTH * 8.0), 4.0).ok()?;
            Some(Body::new(shape))
        })
        .collect()
}

pub fn config(gravity: Vec2) -> WorldConfig {
    WorldConfig {
        gravity,
        size: WorldSize {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        },
        ..WorldConfig::default()
    }
}

/// A world over `setup_mixed(n)` with the given configuration.
pub fn setup_world(n: usize, config: WorldConfig) -> World {
    match World::new(setup_mixed(n), config) {
        Ok(world) => world,
        Err(e) => panic!("benchmark world setup: {e}"),
    }
}
