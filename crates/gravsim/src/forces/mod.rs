//! Force models for N-body simulations
//!
//! A force model turns a set of (possibly hypothetical) body positions into
//! per-body velocity increments over one time step. The same pairwise loop
//! optionally feeds a [`ContactGraph`] so collision detection costs no
//! extra pass.

use crate::body::Body;
use crate::collisions::ContactGraph;
use nalgebra::{Point2, Vector2};

pub mod gravity;


pub use gravity::DirectGravity;

/// Gravitational constant in simulation units
pub const G: f64 = 6673.85;

/// Separation at or below which a pair exerts no force on each other
///
/// Bodies spawned on top of one another would otherwise receive huge
/// velocity kicks from the r⁻² singularity.
pub const PROXIMITY_DEAD_ZONE: f64 = 0.03;

/// A source of velocity increments on bodies in an N-body system
///
/// # Examples
///
/// ```
/// use gravsim::body::Body;
/// use gravsim::forces::{DirectGravity, ForceModel};
/// use nalgebra::Vector2;
///
/// let bodies = [
///     Body::new(1.0, 0.1, [0.0, 0.0], [0.0, 0.0]),
///     Body::new(1.0, 0.1, [10.0, 0.0], [0.0, 0.0]),
/// ];
/// let positions: Vec<_> = bodies.iter().map(|b| b.position).collect();
/// let mut dv = vec![Vector2::zeros(); bodies.len()];
///
/// DirectGravity::new().accumulate(&bodies, &positions, 0.01, &mut dv, None);
///
/// // Bodies are pulled toward each other
/// assert!(dv[0].x > 0.0);
/// assert!(dv[1].x < 0.0);
/// ```
pub trait ForceModel: Send + Sync {
    /// Add the velocity increment each body receives over `dt` to `dv`
    ///
    /// # Arguments
    ///
    /// * `bodies` - Bodies supplying mass and radius
    /// * `positions` - Positions to evaluate at, one per body (may differ
    ///   from `bodies[i].position` for intermediate stages)
    /// * `dt` - Time step
    /// * `dv` - Accumulator, one entry per body; not cleared
    /// * `contacts` - When given, every evaluated pair is also checked for
    ///   contact at the same separation
    fn accumulate(
        &self,
        bodies: &[Body],
        positions: &[Point2<f64>],
        dt: f64,
        dv: &mut [Vector2<f64>],
        contacts: Option<&mut ContactGraph>,
    );

    /// Potential energy of the configuration
    ///
    /// Default implementation returns 0.0.
    fn potential_energy(&self, _bodies: &[Body]) -> f64 {
        0.0
    }
}
