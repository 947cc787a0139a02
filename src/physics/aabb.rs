//! Axis-aligned bounding boxes for broadphase rejection.

use glam::Vec2;

use crate::geometry::Shape;

/// Axis-aligned bounding box. Invariant: `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Build a box from two corners in any order.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Compute the bounding box of a shape.
    ///
    /// Circles expand their centre by the radius on both axes. Polygons take
    /// the component-wise extremes of their vertices. Polygon construction
    /// guarantees at least three vertices, so every shape has bounds.
    pub fn from_shape(shape: &Shape) -> Self {
        match shape {
            Shape::Circle(circle) => {
                let radius = Vec2::splat(circle.radius());
                Self {
                    min: circle.pos - radius,
                    max: circle.pos + radius,
                }
            }
            Shape::Polygon(polygon) => {
                let mut min = Vec2::splat(f32::MAX);
                let mut max = Vec2::splat(f32::MIN);
                for v in polygon.vertices() {
                    min = min.min(v);
                    max = max.max(v);
                }
                Self { min, max }
            }
        }
    }

    /// Test whether two boxes overlap. Touching boxes count as overlapping.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(self.min.x > other.max.x
            || self.max.x < other.min.x
            || self.min.y > other.max.y
            || self.max.y < other.min.y)
    }

    /// Smallest box containing both boxes.
    #[inline]
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Split into four equal cells: top-left, top-right, bottom-left,
    /// bottom-right (y grows downward).
    pub fn quadrants(&self) -> [Aabb; 4] {
        let c = self.center();
        [
            Aabb::new(self.min, c),
            Aabb::new(Vec2::new(c.x, self.min.y), Vec2::new(self.max.x, c.y)),
            Aabb::new(Vec2::new(self.min.x, c.y), Vec2::new(c.x, self.max.y)),
            Aabb::new(c, self.max),
        ]
    }
}
