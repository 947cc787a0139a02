//! Separating Axis Theorem tests for circles and convex polygons.
//!
//! Two convex shapes are disjoint iff some axis exists onto which their
//! projections do not overlap. Otherwise the axis with the smallest overlap
//! gives the contact normal and penetration depth.

use glam::Vec2;

use super::{Circle, Polygon, Shape};

/// Result of a positive intersection test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Unit normal pointing from shape A toward shape B.
    pub normal: Vec2,
    /// Penetration depth along `normal`. Always positive.
    pub overlap: f32,
}

impl Collision {
    /// Same collision seen from the other shape.
    #[inline]
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            overlap: self.overlap,
        }
    }
}

/// Projection of a shape onto an axis.
#[derive(Debug, Clone, Copy)]
struct Interval {
    min: f32,
    max: f32,
}

impl Interval {
    fn of_points(points: impl Iterator<Item = Vec2>, axis: Vec2) -> Self {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for p in points {
            let d = p.dot(axis);
            min = min.min(d);
            max = max.max(d);
        }
        Self { min, max }
    }

    fn of_circle(circle: &Circle, axis: Vec2) -> Self {
        let center = circle.pos.dot(axis);
        Self {
            min: center - circle.radius(),
            max: center + circle.radius(),
        }
    }

    /// Overlap with `other`, or `None` when separated or only touching.
    ///
    /// When one interval contains the other, the overlap grows to the
    /// distance needed to push the inner one fully out.
    fn overlap(&self, other: &Interval) -> Option<f32> {
        let mut overlap = self.max.min(other.max) - self.min.max(other.min);
        if overlap <= 0.0 {
            return None;
        }

        let contains = self.min <= other.min && self.max >= other.max;
        let contained = other.min <= self.min && other.max >= self.max;
        if contains || contained {
            let to_min = (self.min - other.min).abs();
            let to_max = (self.max - other.max).abs();
            overlap += to_min.min(to_max);
        }
        Some(overlap)
    }
}

/// Test two shapes for intersection.
///
/// The returned normal points from `a` toward `b`.
pub fn intersects(a: &Shape, b: &Shape) -> Option<Collision> {
    match (a, b) {
        (Shape::Circle(a), Shape::Circle(b)) => circle_circle(a, b),
        (Shape::Circle(c), Shape::Polygon(p)) => circle_polygon(c, p),
        (Shape::Polygon(p), Shape::Circle(c)) => circle_polygon(c, p).map(Collision::flipped),
        (Shape::Polygon(a), Shape::Polygon(b)) => polygon_polygon(a, b),
    }
}

/// Circle-circle test. The only axis is the line between the centres.
pub fn circle_circle(a: &Circle, b: &Circle) -> Option<Collision> {
    let diff = b.pos - a.pos;
    let dist_sq = diff.length_squared();
    let min_dist = a.radius() + b.radius();

    if dist_sq >= min_dist * min_dist {
        return None;
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > 1e-6 { diff / dist } else { Vec2::Y };

    Some(Collision {
        normal,
        overlap: min_dist - dist,
    })
}

/// Circle-polygon test. Normal points from the circle toward the polygon.
pub fn circle_polygon(circle: &Circle, polygon: &Polygon) -> Option<Collision> {
    // Voronoi axis: circle centre toward the nearest vertex
    let nearest = polygon.vertices().min_by(|a, b| {
        let da = a.distance_squared(circle.pos);
        let db = b.distance_squared(circle.pos);
        da.total_cmp(&db)
    })?;
    let vertex_axis = (nearest - circle.pos).normalize_or_zero();

    let axes = polygon
        .edge_normals()
        .chain((vertex_axis != Vec2::ZERO).then_some(vertex_axis));

    minimum_overlap(
        axes,
        |axis| Interval::of_circle(circle, axis),
        |axis| Interval::of_points(polygon.vertices(), axis),
        polygon.center() - circle.pos,
    )
}

/// Polygon-polygon test over the edge normals of both polygons.
pub fn polygon_polygon(a: &Polygon, b: &Polygon) -> Option<Collision> {
    minimum_overlap(
        a.edge_normals().chain(b.edge_normals()),
        |axis| Interval::of_points(a.vertices(), axis),
        |axis| Interval::of_points(b.vertices(), axis),
        b.center() - a.center(),
    )
}

/// Run the axis loop: bail on the first separating axis, keep the smallest
/// overlap otherwise, then orient the normal along `a_to_b`.
fn minimum_overlap(
    axes: impl Iterator<Item = Vec2>,
    project_a: impl Fn(Vec2) -> Interval,
    project_b: impl Fn(Vec2) -> Interval,
    a_to_b: Vec2,
) -> Option<Collision> {
    let mut best: Option<Collision> = None;

    for axis in axes {
        let overlap = project_a(axis).overlap(&project_b(axis))?;
        if best.map_or(true, |c| overlap < c.overlap) {
            best = Some(Collision {
                normal: axis,
                overlap,
            });
        }
    }

    let mut collision = best?;
    if collision.normal.dot(a_to_b) < 0.0 {
        collision.normal = -collision.normal;
    }
    Some(collision)
}
