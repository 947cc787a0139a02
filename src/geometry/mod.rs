//! Shapes and the separating axis primitive.
//!
//! A shape owns its position: the position of a body *is* the position of its
//! shape. Polygons store their vertices as offsets from that position.

pub mod sat;

use glam::Vec2;

use crate::error::{PhysicsError, Result};

pub use sat::Collision;

/// A circle centred on `pos`.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub pos: Vec2,
    radius: f32,
}

impl Circle {
    /// Create a circle. Fails on a negative or non-finite radius.
    pub fn new(pos: Vec2, radius: f32) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(PhysicsError::InvalidRadius(radius));
        }
        Ok(Self { pos, radius })
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

/// A convex polygon anchored at `pos`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub pos: Vec2,
    /// Vertex offsets from `pos`, in winding order.
    points: Vec<Vec2>,
}

impl Polygon {
    /// Create a polygon from vertex offsets relative to `pos`.
    ///
    /// Vertices must describe a convex outline, in either winding.
    pub fn new(pos: Vec2, points: Vec<Vec2>) -> Result<Self> {
        if points.len() < 3 {
            return Err(PhysicsError::DegeneratePolygon(points.len()));
        }
        Ok(Self { pos, points })
    }

    /// Vertex offsets relative to the polygon position.
    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// World-space vertices.
    pub fn vertices(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().map(move |p| self.pos + *p)
    }

    /// Average of the world-space vertices.
    pub fn center(&self) -> Vec2 {
        let sum: Vec2 = self.vertices().sum();
        sum / self.points.len() as f32
    }

    /// Unit normals of every edge, skipping zero-length edges.
    pub fn edge_normals(&self) -> impl Iterator<Item = Vec2> + '_ {
        let n = self.points.len();
        (0..n).filter_map(move |i| {
            let edge = self.points[(i + 1) % n] - self.points[i];
            let normal = edge.perp().normalize_or_zero();
            (normal != Vec2::ZERO).then_some(normal)
        })
    }
}

/// Geometry of a body. Closed set: every consumer matches exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Polygon(Polygon),
}

impl Shape {
    pub fn circle(pos: Vec2, radius: f32) -> Result<Self> {
        Circle::new(pos, radius).map(Shape::Circle)
    }

    pub fn polygon(pos: Vec2, points: Vec<Vec2>) -> Result<Self> {
        Polygon::new(pos, points).map(Shape::Polygon)
    }

    /// An axis-aligned box with `pos` at its top-left (minimum) corner.
    pub fn rect(pos: Vec2, width: f32, height: f32) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(PhysicsError::InvalidRectSize { width, height });
        }
        let points = vec![
            Vec2::ZERO,
            Vec2::new(width, 0.0),
            Vec2::new(width, height),
            Vec2::new(0.0, height),
        ];
        Polygon::new(pos, points).map(Shape::Polygon)
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        match self {
            Shape::Circle(c) => c.pos,
            Shape::Polygon(p) => p.pos,
        }
    }

    #[inline]
    pub fn set_pos(&mut self, pos: Vec2) {
        match self {
            Shape::Circle(c) => c.pos = pos,
            Shape::Polygon(p) => p.pos = pos,
        }
    }

    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        let pos = self.pos();
        self.set_pos(pos + delta);
    }

    /// Geometric centre: circle centre or polygon vertex average.
    pub fn center(&self) -> Vec2 {
        match self {
            Shape::Circle(c) => c.pos,
            Shape::Polygon(p) => p.center(),
        }
    }
}
