//! Errors reported by the simulation API
//!
//! Every failure is local: a rejected call leaves the simulation exactly as
//! it was.

use crate::body::BodyId;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// A configuration value (time step, constant) is out of range
    InvalidConfiguration { parameter: &'static str, value: f64 },
    /// A body property is out of range: mass and radius must be positive,
    /// position and velocity finite
    InvalidBody { parameter: &'static str, value: f64 },
    /// No body with this handle is in the simulation
    BodyNotFound(BodyId),
    /// Integration method name not recognised
    UnknownMethod(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidConfiguration { parameter, value } => {
                write!(f, "invalid configuration: {parameter} must be positive and finite, got {value}")
            }
            SimulationError::InvalidBody { parameter, value } => {
                write!(f, "invalid body {parameter}: {value}")
            }
            SimulationError::BodyNotFound(id) => write!(f, "body {id} not found"),
            SimulationError::UnknownMethod(name) => {
                write!(f, "unknown integration method '{name}' (expected 'euler' or 'rk4')")
            }
        }
    }
}

impl std::error::Error for SimulationError {}

/// Checks that `value` is finite and strictly positive
pub(crate) fn require_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
