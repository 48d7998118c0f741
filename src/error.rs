//! Error types for condensate.
//!
//! The engine itself is pure in-memory geometry and never fails at runtime.
//! The only recoverable failure is rejecting a configuration at construction.

use std::fmt;

/// Errors produced when validating a [`CondensationConfig`](crate::CondensationConfig).
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Enclosure minimum is not strictly below its maximum on some axis.
    InvalidBounds { axis: char, min: f32, max: f32 },
    /// Spawn clearance fraction must lie in `[0, 0.5)`.
    InvalidClearance(f32),
    /// Collinearity threshold must lie in `(0, 1]`.
    InvalidCollinearThreshold(f32),
    /// Plane distance threshold must be finite and non-negative.
    InvalidPlaneDistance(f32),
    /// Per-tick speed must be finite and positive.
    InvalidSpeed(f32),
    /// Atom edge length must be finite and positive.
    InvalidAtomSize(f32),
    /// Rotation increment has a non-finite component.
    InvalidRotationIncrement,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBounds { axis, min, max } => write!(
                f,
                "Invalid enclosure bounds on {} axis: min {} must be finite and below max {}",
                axis, min, max
            ),
            ConfigError::InvalidClearance(c) => {
                write!(f, "Invalid spawn clearance {}: expected a fraction in [0, 0.5)", c)
            }
            ConfigError::InvalidCollinearThreshold(t) => {
                write!(f, "Invalid collinear threshold {}: expected a value in (0, 1]", t)
            }
            ConfigError::InvalidPlaneDistance(d) => {
                write!(f, "Invalid plane distance threshold {}: expected a finite value >= 0", d)
            }
            ConfigError::InvalidSpeed(s) => {
                write!(f, "Invalid speed {}: expected a finite value > 0", s)
            }
            ConfigError::InvalidAtomSize(s) => {
                write!(f, "Invalid atom size {}: expected a finite value > 0", s)
            }
            ConfigError::InvalidRotationIncrement => {
                write!(f, "Invalid rotation increment: all components must be finite")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_axis() {
        let e = ConfigError::InvalidBounds {
            axis: 'y',
            min: 5.0,
            max: -5.0,
        };
        let msg = e.to_string();
        assert!(msg.contains("y axis"));
        assert!(msg.contains("-5"));
    }
}
