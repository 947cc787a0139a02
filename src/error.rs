//! Error type shared by every fallible constructor in the crate.

use thiserror::Error;

/// Errors raised while building shapes, bodies or worlds.
///
/// The step loop itself never fails: everything it depends on is validated
/// when the value is constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// A polygon cannot bound an area with fewer than three vertices.
    #[error("polygon needs at least 3 vertices, got {0}")]
    DegeneratePolygon(usize),

    #[error("circle radius must be finite and non-negative, got {0}")]
    InvalidRadius(f32),

    #[error("rect size must be finite and positive, got {width}x{height}")]
    InvalidRectSize { width: f32, height: f32 },

    #[error("mass must be finite and positive, got {0}")]
    InvalidMass(f32),

    #[error("restitution must be within [0, 1], got {0}")]
    InvalidRestitution(f32),

    #[error("iteration count must be at least 1")]
    ZeroIterations,

    /// Deceleration is a multiplicative factor and must lie within (0, 1].
    #[error("deceleration must be within (0, 1], got {0}")]
    InvalidDeceleration(f32),

    #[error("world size must be finite and positive, got {width}x{height}")]
    InvalidWorldSize { width: f32, height: f32 },

    #[error("frame rate must be finite and positive, got {0}")]
    InvalidFrameRate(f32),

    #[error("body index {index} out of range for {len} bodies")]
    BodyOutOfRange { index: usize, len: usize },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PhysicsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PhysicsError::DegeneratePolygon(2).to_string(),
            "polygon needs at least 3 vertices, got 2"
        );
        assert_eq!(
            PhysicsError::BodyOutOfRange { index: 4, len: 2 }.to_string(),
            "body index 4 out of range for 2 bodies"
        );
    }
}
