//! Pre-solve / post-solve notifications.
//!
//! Solvers emit one event before touching a contact and one after both the
//! position and velocity corrections are applied. The world owns the
//! listener registry and hands it to the solver for every contact.

use std::fmt;

use glam::Vec2;

use super::broadphase::BodyPair;
use super::contact::Contact;
use super::rigid_body::Body;

/// When an event fires relative to the solver's corrections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolvePhase {
    PreSolve,
    PostSolve,
}

/// Payload handed to listeners.
#[derive(Debug, Clone, Copy)]
pub struct CollisionEvent<'a> {
    pub phase: SolvePhase,
    pub pair: BodyPair,
    pub body_a: &'a Body,
    pub body_b: &'a Body,
    /// Contact normal (from body A to body B).
    pub normal: Vec2,
    pub overlap: f32,
}

impl<'a> CollisionEvent<'a> {
    pub fn new(phase: SolvePhase, contact: &Contact, body_a: &'a Body, body_b: &'a Body) -> Self {
        Self {
            phase,
            pair: contact.pair,
            body_a,
            body_b,
            normal: contact.normal,
            overlap: contact.overlap,
        }
    }
}

type Listener = Box<dyn FnMut(&CollisionEvent<'_>)>;

/// Listener registry for both solve phases.
#[derive(Default)]
pub struct SolveEvents {
    pre_solve: Vec<Listener>,
    post_solve: Vec<Listener>,
}

impl SolveEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_pre_solve(&mut self, listener: impl FnMut(&CollisionEvent<'_>) + 'static) {
        self.pre_solve.push(Box::new(listener));
    }

    pub fn on_post_solve(&mut self, listener: impl FnMut(&CollisionEvent<'_>) + 'static) {
        self.post_solve.push(Box::new(listener));
    }

    /// Deliver `event` to every listener of its phase, in registration order.
    pub fn emit(&mut self, event: &CollisionEvent<'_>) {
        let listeners = match event.phase {
            SolvePhase::PreSolve => &mut self.pre_solve,
            SolvePhase::PostSolve => &mut self.post_solve,
        };
        for listener in listeners.iter_mut() {
            listener(event);
        }
    }

    pub fn clear(&mut self) {
        self.pre_solve.clear();
        self.post_solve.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pre_solve.is_empty() && self.post_solve.is_empty()
    }
}

impl fmt::Debug for SolveEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolveEvents")
            .field("pre_solve", &self.pre_solve.len())
            .field("post_solve", &self.post_solve.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Shape;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_routes_by_phase() {
        let a = Body::new(Shape::circle(Vec2::ZERO, 1.0).unwrap());
        let b = Body::new(Shape::circle(Vec2::X, 1.0).unwrap());
        let contact = Contact {
            pair: BodyPair { a: 0, b: 1 },
            normal: Vec2::X,
            overlap: 1.0,
        };

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut events = SolveEvents::new();
        let pre_log = Rc::clone(&log);
        events.on_pre_solve(move |e| pre_log.borrow_mut().push(("pre", e.overlap)));
        let post_log = Rc::clone(&log);
        events.on_post_solve(move |e| post_log.borrow_mut().push(("post", e.overlap)));

        events.emit(&CollisionEvent::new(SolvePhase::PostSolve, &contact, &a, &b));
        events.emit(&CollisionEvent::new(SolvePhase::PreSolve, &contact, &a, &b));

        assert_eq!(*log.borrow(), vec![("post", 1.0), ("pre", 1.0)]);

        events.clear();
        assert!(events.is_empty());
    }
}
