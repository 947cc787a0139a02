//! impact2d
//!
//! A 2D rigid-body collision core: bodies are moved each step, candidate pairs
//! are found with bounding boxes, exact contacts come from the separating axis
//! theorem, and contacts are resolved by a swappable solver.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **geometry** - Shapes (circle, polygon, rect) and the SAT intersection primitive
//! 2. **physics** - Bodies, bounding boxes, broadphase, narrowphase, solvers and the world
//! 3. **error** - The crate error type
//!
//! Rendering, input and frame timing stay with the host: the host owns the
//! clock and calls [`World::step`] once per frame.

pub mod error;
pub mod geometry;
pub mod physics;

pub use error::{PhysicsError, Result};

pub use geometry::{Circle, Collision, Polygon, Shape};

pub use physics::{
    aabb::Aabb,
    broadphase::{BodyPair, Broadphase, BruteForceBroadphase, NaiveBroadphase, SpatialBroadphase},
    contact::Contact,
    events::{CollisionEvent, SolveEvents, SolvePhase},
    narrowphase::{Detector, SatDetector},
    rigid_body::{Body, BodyBehavior, BodyData},
    solver::{ArcadeSolver, ImpulseSolver, Solver},
    time::{FrameClock, TimeScale},
    BroadphaseKind, DecelerationOrder, SolverKind, StepStats, World, WorldConfig, WorldSize,
};

// Re-export glam for convenience
pub use glam;
