//! Rigid bodies and the per-sub-step integration functions.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::error::{PhysicsError, Result};
use crate::geometry::Shape;

use super::aabb::Aabb;
use super::DecelerationOrder;

/// How a body reacts to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyBehavior {
    /// Moved by velocity, gravity, deceleration and collisions.
    #[default]
    Dynamic,
    /// Immovable obstacle. Still collides.
    Static,
}

/// Host-side tags (name, color, ...). The physics core never reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyData(BTreeMap<String, String>);

impl BodyData {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A simulated body. Its position is the position of its shape.
#[derive(Debug, Clone)]
pub struct Body {
    pub shape: Shape,
    /// Current velocity.
    pub vel: Vec2,
    /// Velocity snapshot taken by the world at the start of each sub-step.
    step_vel: Vec2,
    pub behavior: BodyBehavior,
    mass: f32,
    /// Coefficient of restitution (0.0 - 1.0).
    restitution: f32,
    pub data: BodyData,
}

impl Body {
    /// Create a dynamic body with unit mass and full restitution.
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            vel: Vec2::ZERO,
            step_vel: Vec2::ZERO,
            behavior: BodyBehavior::Dynamic,
            mass: 1.0,
            restitution: 1.0,
            data: BodyData::default(),
        }
    }

    /// Create a static body.
    pub fn fixed(shape: Shape) -> Self {
        Self::new(shape).with_behavior(BodyBehavior::Static)
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self.step_vel = vel;
        self
    }

    /// Set the mass. Fails unless `mass` is finite and positive.
    pub fn with_mass(mut self, mass: f32) -> Result<Self> {
        self.set_mass(mass)?;
        Ok(self)
    }

    /// Set the coefficient of restitution. Fails outside `[0, 1]`.
    pub fn with_restitution(mut self, restitution: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&restitution) {
            return Err(PhysicsError::InvalidRestitution(restitution));
        }
        self.restitution = restitution;
        Ok(self)
    }

    pub fn with_behavior(mut self, behavior: BodyBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key, value);
        self
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.shape.pos()
    }

    #[inline]
    pub fn set_pos(&mut self, pos: Vec2) {
        self.shape.set_pos(pos);
    }

    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.shape.translate(delta);
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.behavior == BodyBehavior::Dynamic
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f32) -> Result<()> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(PhysicsError::InvalidMass(mass));
        }
        self.mass = mass;
        Ok(())
    }

    #[inline]
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    /// Inverse mass; zero for static bodies.
    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        if self.is_dynamic() {
            1.0 / self.mass
        } else {
            0.0
        }
    }

    /// Velocity snapshot of the current sub-step.
    #[inline]
    pub fn step_vel(&self) -> Vec2 {
        self.step_vel
    }

    /// Bounding box recomputed from the current shape.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_shape(&self.shape)
    }
}

/// Snapshot `vel` into `step_vel` for every dynamic body.
pub fn snapshot_velocities(bodies: &mut [Body]) {
    for body in bodies.iter_mut().filter(|b| b.is_dynamic()) {
        body.step_vel = body.vel;
    }
}

/// Multiply every dynamic body's step velocity by `factor`.
pub fn apply_deceleration(bodies: &mut [Body], factor: f32) {
    for body in bodies.iter_mut().filter(|b| b.is_dynamic()) {
        body.step_vel *= factor;
    }
}

/// Move every dynamic body by `step_vel * fraction`.
pub fn integrate_positions(bodies: &mut [Body], fraction: f32) {
    for body in bodies.iter_mut().filter(|b| b.is_dynamic()) {
        let delta = body.step_vel * fraction;
        body.translate(delta);
    }
}

/// Rebuild `vel` from the step velocity plus gravity.
pub fn apply_gravity(bodies: &mut [Body], gravity: Vec2) {
    for body in bodies.iter_mut().filter(|b| b.is_dynamic()) {
        body.vel = body.step_vel + gravity;
    }
}

/// Run the whole integration half of one sub-step.
///
/// `fraction` is `time_scale / iterations`: across all sub-steps of a world
/// step a body moves by one full velocity unit.
pub fn integrate(
    bodies: &mut [Body],
    gravity: Vec2,
    order: DecelerationOrder,
    factor: f32,
    fraction: f32,
) {
    snapshot_velocities(bodies);
    if order == DecelerationOrder::BeforeTranslate {
        apply_deceleration(bodies, factor);
    }
    integrate_positions(bodies, fraction);
    if order == DecelerationOrder::AfterTranslate {
        apply_deceleration(bodies, factor);
    }
    apply_gravity(bodies, gravity);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(x: f32, y: f32) -> Body {
        Body::new(Shape::circle(Vec2::new(x, y), 1.0).unwrap())
    }

    #[test]
    fn test_free_fall() {
        let mut bodies = vec![ball(0.0, 0.0)];
        let gravity = Vec2::new(0.0, 1.0);

        for _ in 0..10 {
            integrate(&mut bodies, gravity, DecelerationOrder::Disabled, 1.0, 1.0);
        }

        // Velocity picked up gravity each sub-step; positions lag one sub-step
        assert_eq!(bodies[0].vel, Vec2::new(0.0, 10.0));
        assert_eq!(bodies[0].pos(), Vec2::new(0.0, 45.0));
    }

    #[test]
    fn test_static_body_unaffected() {
        let mut bodies = vec![Body::fixed(Shape::circle(Vec2::new(5.0, 5.0), 1.0).unwrap())
            .with_velocity(Vec2::new(3.0, 3.0))];

        for _ in 0..60 {
            integrate(&mut bodies, Vec2::new(0.0, 9.81), DecelerationOrder::AfterTranslate, 0.5, 1.0);
        }

        assert_eq!(bodies[0].pos(), Vec2::new(5.0, 5.0));
        assert_eq!(bodies[0].vel, Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_fractional_translation_sums_to_one_velocity_unit() {
        let mut bodies = vec![ball(0.0, 0.0).with_velocity(Vec2::new(6.0, -3.0))];
        for _ in 0..3 {
            integrate(&mut bodies, Vec2::ZERO, DecelerationOrder::Disabled, 1.0, 1.0 / 3.0);
        }
        assert!((bodies[0].pos() - Vec2::new(6.0, -3.0)).length() < 1e-5);
    }

    #[test]
    fn test_deceleration_order() {
        let mut before = vec![ball(0.0, 0.0).with_velocity(Vec2::new(10.0, 0.0))];
        let mut after = before.clone();

        integrate(&mut before, Vec2::ZERO, DecelerationOrder::BeforeTranslate, 0.5, 1.0);
        integrate(&mut after, Vec2::ZERO, DecelerationOrder::AfterTranslate, 0.5, 1.0);

        assert_eq!(before[0].pos(), Vec2::new(5.0, 0.0));
        assert_eq!(after[0].pos(), Vec2::new(10.0, 0.0));
        assert_eq!(before[0].vel, Vec2::new(5.0, 0.0));
        assert_eq!(after[0].vel, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_inverse_mass() {
        let shape = Shape::circle(Vec2::ZERO, 1.0).unwrap();
        assert_eq!(Body::new(shape.clone()).with_mass(4.0).unwrap().inverse_mass(), 0.25);
        assert_eq!(Body::fixed(shape).with_mass(4.0).unwrap().inverse_mass(), 0.0);
    }

    #[test]
    fn test_mass_must_be_finite_and_positive() {
        let shape = Shape::circle(Vec2::ZERO, 1.0).unwrap();
        for mass in [0.0, -2.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                Body::new(shape.clone()).with_mass(mass),
                Err(PhysicsError::InvalidMass(_))
            ));
        }

        let mut body = Body::new(shape);
        assert!(body.set_mass(-1.0).is_err());
        assert_eq!(body.mass(), 1.0);
        body.set_mass(2.0).unwrap();
        assert_eq!(body.inverse_mass(), 0.5);
    }

    #[test]
    fn test_restitution_must_lie_in_unit_range() {
        let body = ball(0.0, 0.0);
        assert_eq!(body.restitution(), 1.0);
        assert_eq!(
            body.clone().with_restitution(-3.0).err(),
            Some(PhysicsError::InvalidRestitution(-3.0))
        );
        assert!(body.clone().with_restitution(1.5).is_err());
        assert!(body.clone().with_restitution(f32::NAN).is_err());
        assert_eq!(body.with_restitution(0.0).unwrap().restitution(), 0.0);
    }

    #[test]
    fn test_body_data_tags() {
        let body = ball(0.0, 0.0).with_tag("name", "player").with_tag("color", "red");
        assert_eq!(body.data.get("name"), Some("player"));
        assert_eq!(body.data.iter().count(), 2);
        assert_eq!(body.data.get("missing"), None);

        let mut data = body.data;
        assert_eq!(data.remove("color").as_deref(), Some("red"));
        assert_eq!(data.remove("color"), None);
        assert_eq!(data.iter().collect::<Vec<_>>(), vec![("name", "player")]);
    }
}
