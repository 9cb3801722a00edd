//! Two-dimensional gravitational N-body simulation
//!
//! Bodies attract each other pairwise, are advanced with explicit Euler or
//! classical fourth-order Runge-Kutta steps, and merge when they touch.
//! [`engine::Simulation`] is the entry point; the other modules expose the
//! pieces it is built from.

pub mod body;
pub mod collisions;
pub mod engine;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod presets;
pub mod state;

pub use body::{Body, BodyId, BodySpec};
pub use engine::{Simulation, TickReport};
pub use error::SimulationError;
pub use integrator::Method;
pub use presets::Preset;

#[cfg(test)]
mod presets_test;
