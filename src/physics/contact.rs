//! Contact data flowing from the narrowphase into a solver.

use glam::Vec2;

use super::broadphase::BodyPair;
use super::rigid_body::Body;

/// An actual contact between two bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub pair: BodyPair,
    /// Contact normal (from body A to body B).
    pub normal: Vec2,
    /// Penetration depth.
    pub overlap: f32,
}

/// Borrow both bodies of a pair mutably.
///
/// Returns `None` when an index is out of range or both indices are equal.
pub fn pair_mut(bodies: &mut [Body], pair: BodyPair) -> Option<(&mut Body, &mut Body)> {
    let BodyPair { a, b } = pair;
    if a == b || a.max(b) >= bodies.len() {
        return None;
    }
    if a < b {
        let (head, tail) = bodies.split_at_mut(b);
        Some((&mut head[a], &mut tail[0]))
    } else {
        let (head, tail) = bodies.split_at_mut(a);
        Some((&mut tail[0], &mut head[b]))
    }
}
