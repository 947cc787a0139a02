//! Rigid body simulation and collision handling.
//!
//! # Architecture
//!
//! Each call to [`World::step`] runs `iterations` sub-steps:
//!
//! 1. Snapshot every dynamic body's velocity into its step velocity
//! 2. Apply deceleration (before or after translation, or not at all)
//! 3. Translate by `step_vel / iterations`
//! 4. Rebuild velocity as step velocity plus gravity
//! 5. Broadphase collision detection (AABB overlap)
//! 6. Narrowphase collision detection (SAT)
//! 7. Solve each contact in detection order
//!
//! Static bodies skip 1-4 but still collide.

pub mod aabb;
pub mod broadphase;
pub mod contact;
pub mod events;
pub mod narrowphase;
pub mod rigid_body;
pub mod solver;
pub mod time;

use std::cell::OnceCell;
use std::time::Duration;

use glam::Vec2;
use tracing::{debug, trace};

use crate::error::{PhysicsError, Result};

use self::aabb::Aabb;
use self::broadphase::{Broadphase, BruteForceBroadphase, NaiveBroadphase, SpatialBroadphase};
use self::events::{CollisionEvent, SolveEvents};
use self::narrowphase::{Detector, SatDetector};
use self::rigid_body::Body;
use self::solver::{ArcadeSolver, ImpulseSolver, Solver};
use self::time::{FrameClock, TimeScale};

/// Where deceleration is applied inside a sub-step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecelerationOrder {
    /// Velocities are never damped.
    Disabled,
    /// Damp the step velocity before translating, so it shortens this sub-step.
    BeforeTranslate,
    /// Damp after translating; the damping shows from the next sub-step on.
    #[default]
    AfterTranslate,
}

/// Built-in broadphase strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BroadphaseKind {
    /// Every pair, no bounding box test.
    Naive,
    /// Pair-wise AABB test over all bodies.
    #[default]
    BruteForce,
    /// Pair-wise AABB test inside each world quadrant.
    Spatial,
}

impl BroadphaseKind {
    fn build(self) -> Box<dyn Broadphase> {
        match self {
            BroadphaseKind::Naive => Box::new(NaiveBroadphase),
            BroadphaseKind::BruteForce => Box::new(BruteForceBroadphase),
            BroadphaseKind::Spatial => Box::new(SpatialBroadphase::new()),
        }
    }
}

/// Built-in solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverKind {
    /// Position correction plus velocity reflection.
    #[default]
    Arcade,
    /// Momentum-conserving impulses.
    Impulse,
}

impl SolverKind {
    fn build(self) -> Box<dyn Solver> {
        match self {
            SolverKind::Arcade => Box::new(ArcadeSolver::default()),
            SolverKind::Impulse => Box::new(ImpulseSolver::default()),
        }
    }
}

/// World extent. Bounds run from `(0, 0)` to `(width, height)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldSize {
    pub width: f32,
    pub height: f32,
}

/// Configuration for the simulation.
#[derive(Debug, Clone)]
pub struct WorldConfig {
    /// Added to every dynamic body's velocity each sub-step. Default: (0, 0).
    pub gravity: Vec2,
    /// Multiplicative damping factor in (0, 1]. Default: 0.97.
    pub deceleration: f32,
    /// Where damping is applied. Default: after translation.
    pub deceleration_order: DecelerationOrder,
    /// Sub-steps per world step. Default: 3.
    pub iterations: u32,
    /// Default: 800 x 600.
    pub size: WorldSize,
    /// Default: unit scale (frame delta ignored).
    pub time_scale: TimeScale,
    /// Default: brute force.
    pub broadphase: BroadphaseKind,
    /// Default: arcade.
    pub solver: SolverKind,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::ZERO,
            deceleration: 0.97,
            deceleration_order: DecelerationOrder::AfterTranslate,
            iterations: 3,
            size: WorldSize {
                width: 800.0,
                height: 600.0,
            },
            time_scale: TimeScale::Unit,
            broadphase: BroadphaseKind::BruteForce,
            solver: SolverKind::Arcade,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(PhysicsError::ZeroIterations);
        }
        let WorldSize { width, height } = self.size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(PhysicsError::InvalidWorldSize { width, height });
        }
        if !(self.deceleration > 0.0 && self.deceleration <= 1.0) {
            return Err(PhysicsError::InvalidDeceleration(self.deceleration));
        }
        self.time_scale.validate()
    }
}

/// Pipeline load of one world step, summed over all sub-steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Candidate pairs proposed by the broadphase.
    pub pairs: usize,
    /// Contacts confirmed by the detector and handed to the solver.
    pub contacts: usize,
}

/// The simulation: bodies plus the strategies that move and resolve them.
///
/// Not reentrant: a host sharing a world between threads must lock the
/// whole world around each `step`.
pub struct World {
    config: WorldConfig,
    bodies: Vec<Body>,
    broadphase: Box<dyn Broadphase>,
    detector: Box<dyn Detector>,
    solver: Box<dyn Solver>,
    events: SolveEvents,
    clock: FrameClock,
    bounds: OnceCell<Aabb>,
}

impl World {
    /// Create a world from a body collection and a configuration.
    pub fn new(bodies: Vec<Body>, config: WorldConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            bodies = bodies.len(),
            iterations = config.iterations,
            broadphase = ?config.broadphase,
            solver = ?config.solver,
            "world created"
        );
        Ok(Self {
            broadphase: config.broadphase.build(),
            detector: Box::new(SatDetector),
            solver: config.solver.build(),
            config,
            bodies,
            events: SolveEvents::new(),
            clock: FrameClock::new(),
            bounds: OnceCell::new(),
        })
    }

    /// Replace the broadphase strategy.
    pub fn with_broadphase(mut self, broadphase: impl Broadphase + 'static) -> Self {
        debug!("custom broadphase installed");
        self.broadphase = Box::new(broadphase);
        self
    }

    /// Replace the narrowphase detector.
    pub fn with_detector(mut self, detector: impl Detector + 'static) -> Self {
        debug!("custom detector installed");
        self.detector = Box::new(detector);
        self
    }

    /// Replace the contact solver.
    pub fn with_solver(mut self, solver: impl Solver + 'static) -> Self {
        debug!("custom solver installed");
        self.solver = Box::new(solver);
        self
    }

    #[inline]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable access for hosts steering bodies between steps.
    #[inline]
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn body_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    /// Append a body and return its index.
    pub fn add_body(&mut self, body: Body) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    pub fn pop_body(&mut self) -> Option<Body> {
        self.bodies.pop()
    }

    /// Remove the body at `index`, shifting later bodies down.
    pub fn remove_body(&mut self, index: usize) -> Result<Body> {
        if index >= self.bodies.len() {
            return Err(PhysicsError::BodyOutOfRange {
                index,
                len: self.bodies.len(),
            });
        }
        Ok(self.bodies.remove(index))
    }

    /// World bounds, computed once from the configured size.
    pub fn bounds(&self) -> Aabb {
        *self.bounds.get_or_init(|| {
            let WorldSize { width, height } = self.config.size;
            Aabb::new(Vec2::ZERO, Vec2::new(width, height))
        })
    }

    /// Register a listener called before each contact is resolved.
    pub fn on_pre_solve(&mut self, listener: impl FnMut(&CollisionEvent<'_>) + 'static) {
        self.events.on_pre_solve(listener);
    }

    /// Register a listener called after each contact is resolved.
    pub fn on_post_solve(&mut self, listener: impl FnMut(&CollisionEvent<'_>) + 'static) {
        self.events.on_post_solve(listener);
    }

    /// Frame timing of the last step.
    #[inline]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Advance the simulation by one frame. `now` is the host's timestamp
    /// for this frame.
    pub fn step(&mut self, now: Duration) -> StepStats {
        let delta = self.clock.tick(now);
        let scale = self.config.time_scale.factor(delta);
        let iterations = self.config.iterations;
        let fraction = scale / iterations as f32;
        let bounds = self.bounds();

        let mut stats = StepStats::default();
        for _ in 0..iterations {
            rigid_body::integrate(
                &mut self.bodies,
                self.config.gravity,
                self.config.deceleration_order,
                self.config.deceleration,
                fraction,
            );

            let pairs = self.broadphase.pair(&self.bodies, &bounds);
            stats.pairs += pairs.len();

            for pair in pairs {
                let inert = match (self.bodies.get(pair.a), self.bodies.get(pair.b)) {
                    (Some(a), Some(b)) => !a.is_dynamic() && !b.is_dynamic(),
                    _ => true,
                };
                if inert {
                    continue;
                }

                if let Some(contact) = self.detector.intersects(&self.bodies, pair) {
                    stats.contacts += 1;
                    self.solver
                        .solve(&contact, &mut self.bodies, &mut self.events);
                }
            }
        }

        trace!(
            delta_ms = delta.as_secs_f32() * 1000.0,
            pairs = stats.pairs,
            contacts = stats.contacts,
            "world step"
        );
        stats
    }
}
