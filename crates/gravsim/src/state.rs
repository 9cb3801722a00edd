use crate::body::{Body, BodyId};
use nalgebra::{Point2, Vector2};

/// Ordered collection of bodies plus the simulated clock
///
/// Bodies keep insertion order. Handles are never reused, so a handle held
/// by a caller becomes dangling (lookups return `None`) once its body is
/// removed or absorbed by a merge.
#[derive(Debug, Clone, Default)]
pub struct SystemState {
    /// Simulated time elapsed, in time units
    pub time: f64,
    /// Bodies in insertion order
    pub bodies: Vec<Body>,
    /// Next available body ID
    next_id: u32,
}

impl SystemState {
    /// Creates an empty system at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new body to the system and returns its ID
    ///
    /// No validation happens here; [`Simulation::add_body`](crate::engine::Simulation::add_body)
    /// is the checked entry point.
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::state::SystemState;
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let mut system = SystemState::new();
    /// let id = system.add_body(10.0, 1.0, Point2::new(0.0, 0.0), Vector2::new(0.0, 0.0));
    ///
    /// assert_eq!(system.body_count(), 1);
    /// assert_eq!(system.get_body(id).map(|b| b.mass), Some(10.0));
    /// ```
    pub fn add_body(
        &mut self,
        mass: f64,
        radius: f64,
        position: Point2<f64>,
        velocity: Vector2<f64>,
    ) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body {
            id,
            mass,
            radius,
            position,
            velocity,
        });
        id
    }

    /// Removes a body from the system, keeping the order of the rest
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        self.index_of(id).map(|idx| self.bodies.remove(idx))
    }

    /// Removes every body whose ID is in `ids`, in a single pass
    pub fn remove_bodies(&mut self, ids: &[BodyId]) -> usize {
        let before = self.bodies.len();
        self.bodies.retain(|b| !ids.contains(&b.id));
        before - self.bodies.len()
    }

    /// Removes all bodies; the clock and ID counter are left alone
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    /// Current index of a body in `bodies`
    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.id == id)
    }

    pub fn get_body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    /// Returns the total momentum of all bodies
    ///
    /// Gravity and merges both conserve it, so drift here measures
    /// integration error.
    pub fn total_momentum(&self) -> Vector2<f64> {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(Vector2::zeros(), |acc, p| acc + p)
    }

    /// Mass-weighted mean position, or `None` for an empty system
    pub fn center_of_mass(&self) -> Option<Point2<f64>> {
        let total = self.total_mass();
        if self.bodies.is_empty() || total <= 0.0 {
            return None;
        }

        let weighted = self
            .bodies
            .iter()
            .map(|b| b.position.coords * b.mass)
            .fold(Vector2::zeros(), |acc, p| acc + p);
        Some(Point2::from(weighted / total))
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }

    /// Total angular momentum about the origin (z-component)
    pub fn total_angular_momentum(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| b.mass * (b.position.x * b.velocity.y - b.position.y * b.velocity.x))
            .sum()
    }
}
