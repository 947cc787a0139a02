//! Contact solvers.
//!
//! Contacts are resolved one at a time, in the order the detector produced
//! them. Every solver shares the same position correction and differs only
//! in how velocities respond.

use glam::Vec2;
use tracing::{trace, warn};

use super::contact::{pair_mut, Contact};
use super::events::{CollisionEvent, SolveEvents, SolvePhase};
use super::rigid_body::Body;

/// Extra separation added on top of the overlap so that floating-point
/// residue does not register as a new contact immediately.
pub const DEBOUNCE: f32 = 0.01;

/// Resolves one contact at a time.
pub trait Solver {
    /// Adjust the velocities of a contact's bodies. Positions are already
    /// separated when this runs.
    fn resolve_velocity(&self, contact: &Contact, a: &mut Body, b: &mut Body);

    /// Separation added on top of the overlap during position correction.
    fn debounce(&self) -> f32 {
        DEBOUNCE
    }

    /// Resolve `contact`: fire pre-solve, separate the bodies, adjust their
    /// velocities, fire post-solve.
    ///
    /// Contacts where neither body is dynamic are skipped without events.
    fn solve(&self, contact: &Contact, bodies: &mut [Body], events: &mut SolveEvents) {
        let Some((a, b)) = pair_mut(bodies, contact.pair) else {
            warn!(pair = ?contact.pair, "contact refers to missing bodies");
            return;
        };

        if !a.is_dynamic() && !b.is_dynamic() {
            warn!(pair = ?contact.pair, "skipping contact between two static bodies");
            return;
        }

        events.emit(&CollisionEvent::new(SolvePhase::PreSolve, contact, a, b));
        correct_positions(contact, a, b, self.debounce());
        self.resolve_velocity(contact, a, b);
        events.emit(&CollisionEvent::new(SolvePhase::PostSolve, contact, a, b));

        trace!(
            a = contact.pair.a,
            b = contact.pair.b,
            overlap = contact.overlap,
            "contact solved"
        );
    }
}

/// Push the bodies apart along the contact normal.
///
/// Two dynamic bodies split the correction; a dynamic body facing a static
/// one takes all of it. Static bodies never move.
pub fn correct_positions(contact: &Contact, a: &mut Body, b: &mut Body, debounce: f32) {
    let depth = if a.is_dynamic() && b.is_dynamic() {
        contact.overlap * 0.5 + debounce
    } else {
        contact.overlap + debounce
    };
    let mtv = contact.normal * depth;

    if a.is_dynamic() {
        a.translate(-mtv);
    }
    if b.is_dynamic() {
        b.translate(mtv);
    }
}

/// Reflect `v` about the plane with unit normal `n`.
#[inline]
fn reflect(v: Vec2, n: Vec2) -> Vec2 {
    v - n * (2.0 * v.dot(n))
}

/// Position correction plus velocity reflection, ignoring mass.
///
/// Each dynamic body moving into the other has its step velocity reflected
/// about the contact normal. Simple and stable for games, not physically
/// accurate once gravity and stacking combine.
#[derive(Debug, Clone, Copy)]
pub struct ArcadeSolver {
    pub debounce: f32,
}

impl Default for ArcadeSolver {
    fn default() -> Self {
        Self { debounce: DEBOUNCE }
    }
}

impl Solver for ArcadeSolver {
    fn resolve_velocity(&self, contact: &Contact, a: &mut Body, b: &mut Body) {
        let n = contact.normal;

        if a.is_dynamic() {
            let v = a.step_vel();
            if v.dot(n) > 0.0 {
                a.vel = reflect(v, n);
            }
        }
        if b.is_dynamic() {
            let v = b.step_vel();
            if v.dot(n) < 0.0 {
                b.vel = reflect(v, n);
            }
        }
    }

    fn debounce(&self) -> f32 {
        self.debounce
    }
}

/// Momentum-conserving impulse response.
///
/// `j = -(1 + e) * (vA - vB)·n / (1/mA + 1/mB)` with `e` the smaller
/// restitution; A receives `+j·n/mA`, B receives `-j·n/mB`.
#[derive(Debug, Clone, Copy)]
pub struct ImpulseSolver {
    pub debounce: f32,
}

impl Default for ImpulseSolver {
    fn default() -> Self {
        Self { debounce: DEBOUNCE }
    }
}

impl Solver for ImpulseSolver {
    fn resolve_velocity(&self, contact: &Contact, a: &mut Body, b: &mut Body) {
        let inv_mass_a = a.inverse_mass();
        let inv_mass_b = b.inverse_mass();
        let inv_mass_sum = inv_mass_a + inv_mass_b;
        if inv_mass_sum <= 0.0 {
            return;
        }

        let normal = contact.normal;
        let elasticity = a.restitution().min(b.restitution());
        let relative_velocity = a.vel - b.vel;
        let contact_velocity = relative_velocity.dot(normal);

        // Already separating
        if contact_velocity <= 0.0 {
            return;
        }

        let impulse_magnitude = -(1.0 + elasticity) * contact_velocity / inv_mass_sum;
        let impulse = normal * impulse_magnitude;

        a.vel += impulse * inv_mass_a;
        b.vel -= impulse * inv_mass_b;
    }

    fn debounce(&self) -> f32 {
        self.debounce
    }
}
