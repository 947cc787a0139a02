//! Narrowphase collision detection.
//!
//! This is the only exact test in the pipeline; broadphase output is never
//! trusted for resolution.

use crate::geometry::sat;

use super::broadphase::BodyPair;
use super::contact::Contact;
use super::rigid_body::Body;

/// Exact intersection test for one candidate pair.
pub trait Detector {
    /// Return the contact between `bodies[pair.a]` and `bodies[pair.b]`, or
    /// `None` if they do not intersect. The normal points from A to B.
    fn intersects(&self, bodies: &[Body], pair: BodyPair) -> Option<Contact>;
}

/// Separating Axis Theorem detector.
#[derive(Debug, Default, Clone, Copy)]
pub struct SatDetector;

impl Detector for SatDetector {
    fn intersects(&self, bodies: &[Body], pair: BodyPair) -> Option<Contact> {
        let a = bodies.get(pair.a)?;
        let b = bodies.get(pair.b)?;
        let collision = sat::intersects(&a.shape, &b.shape)?;
        Some(Contact {
            pair,
            normal: collision.normal,
            overlap: collision.overlap,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Shape;
    use glam::Vec2;

    #[test]
    fn test_sat_detector_contact() {
        let bodies = vec![
            Body::new(Shape::circle(Vec2::new(0.0, 0.0), 1.0).unwrap()),
            Body::new(Shape::circle(Vec2::new(0.0, 1.5), 1.0).unwrap()),
        ];
        let contact = SatDetector
            .intersects(&bodies, BodyPair { a: 0, b: 1 })
            .unwrap();
        assert_eq!(contact.pair, BodyPair { a: 0, b: 1 });
        assert!((contact.normal - Vec2::Y).length() < 1e-5);
        assert!((contact.overlap - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_sat_detector_overlapping_aabbs_but_no_contact() {
        // Bounding boxes overlap at the corner, the circles do not
        let bodies = vec![
            Body::new(Shape::circle(Vec2::new(0.0, 0.0), 1.0).unwrap()),
            Body::new(Shape::circle(Vec2::new(1.8, 1.8), 1.0).unwrap()),
        ];
        assert!(bodies[0].aabb().intersects(&bodies[1].aabb()));
        assert!(SatDetector
            .intersects(&bodies, BodyPair { a: 0, b: 1 })
            .is_none());
    }

    #[test]
    fn test_out_of_range_pair_is_no_contact() {
        let bodies = vec![Body::new(Shape::circle(Vec2::ZERO, 1.0).unwrap())];
        assert!(SatDetector
            .intersects(&bodies, BodyPair { a: 0, b: 4 })
            .is_none());
    }
}
