//! Collision resolution through conserving mergers
//!
//! When bodies collide, the whole group collapses into one body that keeps:
//! - Total mass
//! - Total momentum
//! - Total volume (sum of r³)
//! - Center of mass

use crate::body::{Body, BodyId};
use crate::collisions::CollisionGroup;
use crate::state::SystemState;
use nalgebra::{Point2, Vector2};
use tracing::debug;

/// Outcome of merging one collision group
#[derive(Debug, Clone, PartialEq)]
pub struct MergeEvent {
    /// Body that absorbed the group and remains in the system
    pub survivor: BodyId,
    /// Bodies removed from the system
    pub absorbed: Vec<BodyId>,
    pub mass: f64,
    pub radius: f64,
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
}

/// Merge a group of bodies into the first one
///
/// The result keeps the first body's ID and has:
/// - mass: Σm
/// - radius: cbrt(Σr³)
/// - velocity: Σ(m·v) / Σm
/// - position: Σ(m·x) / Σm
///
/// # Panics
///
/// If `group` is empty or its total mass is not positive. Masses are kept
/// positive by every entry point, so either case is a broken invariant.
///
/// # Examples
///
/// ```
/// use gravsim::body::Body;
/// use gravsim::collisions::merge_bodies;
///
/// let a = Body::new(1.0, 1.0, [0.0, 0.0], [0.0, 5.0]);
/// let b = Body::new(3.0, 1.0, [4.0, 0.0], [0.0, 1.0]);
///
/// let merged = merge_bodies(&[a, b]);
///
/// assert_eq!(merged.mass, 4.0);
/// assert!((merged.position.x - 3.0).abs() < 1e-12);
/// assert!((merged.velocity.y - 2.0).abs() < 1e-12);
/// assert!((merged.radius - 2.0_f64.cbrt()).abs() < 1e-12);
/// ```
pub fn merge_bodies(group: &[Body]) -> Body {
    let total_mass: f64 = group.iter().map(|b| b.mass).sum();
    assert!(
        total_mass > 0.0,
        "collision group has non-positive total mass {total_mass}"
    );

    let total_volume: f64 = group.iter().map(|b| b.volume()).sum();
    let momentum = group
        .iter()
        .map(|b| b.momentum())
        .fold(Vector2::zeros(), |acc, p| acc + p);
    let weighted_position = group
        .iter()
        .map(|b| b.position.coords * b.mass)
        .fold(Vector2::zeros(), |acc, p| acc + p);

    Body {
        id: group[0].id,
        mass: total_mass,
        radius: total_volume.cbrt(),
        position: Point2::from(weighted_position / total_mass),
        velocity: momentum / total_mass,
    }
}

/// Merge every collision group and remove the absorbed bodies
///
/// Group indices refer to `state.bodies` as it was when the contacts were
/// recorded. Survivors are updated in place first; absorbed bodies are
/// removed afterwards in one pass, so indices stay valid across groups.
/// Groups must be disjoint, which [`ContactGraph::groups`](crate::collisions::ContactGraph::groups)
/// guarantees.
///
/// # Returns
///
/// One event per group, in group order
pub fn resolve_collisions(state: &mut SystemState, groups: &[CollisionGroup]) -> Vec<MergeEvent> {
    let mut events = Vec::with_capacity(groups.len());
    let mut absorbed_ids = Vec::new();

    for group in groups.iter().filter(|g| g.len() > 1) {
        let members: Vec<Body> = group.members.iter().map(|&idx| state.bodies[idx]).collect();
        let merged = merge_bodies(&members);
        let absorbed: Vec<BodyId> = members[1..].iter().map(|b| b.id).collect();

        debug!(
            survivor = %merged.id,
            absorbed = absorbed.len(),
            mass = merged.mass,
            radius = merged.radius,
            "merged collision group"
        );

        state.bodies[group.survivor()] = merged;
        absorbed_ids.extend_from_slice(&absorbed);
        events.push(MergeEvent {
            survivor: merged.id,
            absorbed,
            mass: merged.mass,
            radius: merged.radius,
            position: merged.position,
            velocity: merged.velocity,
        });
    }

    if !absorbed_ids.is_empty() {
        state.remove_bodies(&absorbed_ids);
    }

    events
}
