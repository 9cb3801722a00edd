//! Collision detection and resolution for N-body systems
//!
//! Contacts are recorded into a tick-scoped [`ContactGraph`] while forces
//! are being evaluated, grouped by connectivity, and each group is merged
//! into its first member.

pub mod detection;
pub mod resolution;

#[cfg(test)]
mod resolution_test;

pub use detection::{CollisionGroup, ContactGraph, detect_contacts};
pub use resolution::{MergeEvent, merge_bodies, resolve_collisions};
