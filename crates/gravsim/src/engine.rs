//! The simulation engine
//!
//! [`Simulation`] owns the body store together with the force model, both
//! integrators and the per-tick contact graph. Callers add and remove
//! bodies or change the configuration between ticks; everything inside
//! [`Simulation::advance_tick`] runs to completion before control returns.

use crate::body::{Body, BodyId, BodySpec};
use crate::collisions::{ContactGraph, MergeEvent, resolve_collisions};
use crate::error::{SimulationError, require_positive};
use crate::forces::{DirectGravity, ForceModel};
use crate::integrator::{Euler, Integrator, Method, RungeKutta4};
use crate::state::SystemState;
use nalgebra::{Point2, Vector2};
use tracing::{debug, info, warn};

/// Time step used when none is configured
pub const DEFAULT_TIME_STEP: f64 = 0.01;

/// What happened during one call to [`Simulation::advance_tick`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Ticks completed so far, including this one
    pub tick: u64,
    /// Simulated time after the tick
    pub time: f64,
    /// One entry per merged collision group
    pub merges: Vec<MergeEvent>,
}

impl TickReport {
    /// Handles that stopped existing during this tick
    pub fn absorbed(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.merges.iter().flat_map(|m| m.absorbed.iter().copied())
    }
}

/// A 2D gravitational N-body simulation with collision merging
///
/// # Examples
///
/// ```
/// use gravsim::engine::Simulation;
/// use gravsim::integrator::Method;
/// use nalgebra::{Point2, Vector2};
///
/// let mut sim = Simulation::new();
/// sim.set_method(Method::RungeKutta4);
///
/// let sun = sim.add_body(1.0e6, 10.0, Vector2::zeros(), Point2::origin()).unwrap();
/// let rock = sim
///     .add_body(1.0, 1.0, Vector2::new(0.0, 2583.0), Point2::new(1000.0, 0.0))
///     .unwrap();
///
/// let report = sim.advance_tick();
///
/// assert!(report.merges.is_empty());
/// assert_eq!(sim.tick_count(), 1);
/// assert!(sim.body(rock).unwrap().position.y > 0.0);
/// assert!(sim.body(sun).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    state: SystemState,
    force: DirectGravity,
    euler: Euler,
    rk4: RungeKutta4,
    contacts: ContactGraph,
    method: Method,
    time_step: f64,
    tick_count: u64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    /// Empty simulation using Euler steps of [`DEFAULT_TIME_STEP`]
    pub fn new() -> Self {
        Self {
            state: SystemState::new(),
            force: DirectGravity::new(),
            euler: Euler::new(),
            rk4: RungeKutta4::new(),
            contacts: ContactGraph::default(),
            method: Method::default(),
            time_step: DEFAULT_TIME_STEP,
            tick_count: 0,
        }
    }

    /// Empty simulation with the given method and time step
    pub fn with_config(method: Method, time_step: f64) -> Result<Self, SimulationError> {
        let mut sim = Self::new();
        sim.set_method(method);
        sim.set_time_step(time_step)?;
        Ok(sim)
    }

    /// Replace the force model, e.g. to use a different gravitational constant
    pub fn with_force(mut self, force: DirectGravity) -> Self {
        self.force = force;
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Select the integration method used from the next tick on
    pub fn set_method(&mut self, method: Method) {
        if method != self.method {
            info!(from = %self.method, to = %method, "integration method changed");
        }
        self.method = method;
    }

    /// Set the time step used from the next tick on
    ///
    /// Rejects zero, negative and non-finite values, keeping the previous
    /// time step.
    pub fn set_time_step(&mut self, dt: f64) -> Result<(), SimulationError> {
        if !require_positive(dt) {
            warn!(time_step = dt, kept = self.time_step, "rejected time step");
            return Err(SimulationError::InvalidConfiguration {
                parameter: "time_step",
                value: dt,
            });
        }

        if dt != self.time_step {
            info!(from = self.time_step, to = dt, "time step changed");
        }
        self.time_step = dt;
        Ok(())
    }

    /// Add a body and return its handle
    ///
    /// Mass and radius must be positive and finite; position and velocity
    /// components must be finite.
    pub fn add_body(
        &mut self,
        mass: f64,
        radius: f64,
        velocity: Vector2<f64>,
        position: Point2<f64>,
    ) -> Result<BodyId, SimulationError> {
        validate_body(mass, radius, velocity, position)?;
        Ok(self.state.add_body(mass, radius, position, velocity))
    }

    /// Add a body described by a [`BodySpec`]
    pub fn add_spec(&mut self, spec: &BodySpec) -> Result<BodyId, SimulationError> {
        self.add_body(spec.mass, spec.radius, spec.velocity(), spec.position())
    }

    /// Add every spec in order
    ///
    /// The specs are checked up front, so a rejected entry leaves the
    /// simulation untouched.
    pub fn load(&mut self, specs: &[BodySpec]) -> Result<Vec<BodyId>, SimulationError> {
        for spec in specs {
            validate_body(spec.mass, spec.radius, spec.velocity(), spec.position())?;
        }

        let ids: Vec<BodyId> = specs
            .iter()
            .map(|s| self.state.add_body(s.mass, s.radius, s.position(), s.velocity()))
            .collect();
        info!(bodies = ids.len(), total = self.state.body_count(), "loaded bodies");
        Ok(ids)
    }

    /// Remove a body, returning it if it was present
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        self.state.remove_body(id)
    }

    /// Remove every body. Handles are not reused afterwards.
    pub fn clear(&mut self) {
        self.state.clear();
    }

    pub fn set_body_mass(&mut self, id: BodyId, mass: f64) -> Result<(), SimulationError> {
        if !require_positive(mass) {
            return Err(SimulationError::InvalidBody {
                parameter: "mass",
                value: mass,
            });
        }
        let body = self
            .state
            .get_body_mut(id)
            .ok_or(SimulationError::BodyNotFound(id))?;
        body.mass = mass;
        Ok(())
    }

    /// Change a body's radius; the mass is left alone
    pub fn set_body_radius(&mut self, id: BodyId, radius: f64) -> Result<(), SimulationError> {
        if !require_positive(radius) {
            return Err(SimulationError::InvalidBody {
                parameter: "radius",
                value: radius,
            });
        }
        let body = self
            .state
            .get_body_mut(id)
            .ok_or(SimulationError::BodyNotFound(id))?;
        body.radius = radius;
        Ok(())
    }

    /// Advance the simulation by one time step
    ///
    /// Runs one integration step with the current method, recording
    /// contacts in the same pairwise pass as the forces, then merges every
    /// connected group of touching bodies. An empty simulation is left
    /// unchanged.
    pub fn advance_tick(&mut self) -> TickReport {
        if self.state.is_empty() {
            return TickReport {
                tick: self.tick_count,
                time: self.state.time,
                merges: Vec::new(),
            };
        }

        let dt = self.time_step;
        self.contacts.reset(self.state.body_count());

        let integrator: &mut dyn Integrator = match self.method {
            Method::Euler => &mut self.euler,
            Method::RungeKutta4 => &mut self.rk4,
        };
        integrator.step(&mut self.state, dt, &self.force, Some(&mut self.contacts));

        let groups = self.contacts.groups();
        let merges = resolve_collisions(&mut self.state, &groups);
        self.tick_count += 1;

        debug!(
            tick = self.tick_count,
            time = self.state.time,
            bodies = self.state.body_count(),
            merges = merges.len(),
            "tick complete"
        );

        TickReport {
            tick: self.tick_count,
            time: self.state.time,
            merges,
        }
    }

    /// Look up a body by handle
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.state.get_body(id)
    }

    /// All bodies in insertion order
    pub fn bodies(&self) -> &[Body] {
        &self.state.bodies
    }

    pub fn body_count(&self) -> usize {
        self.state.body_count()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Simulated time elapsed
    pub fn time(&self) -> f64 {
        self.state.time
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn state(&self) -> &SystemState {
        &self.state
    }

    pub fn total_mass(&self) -> f64 {
        self.state.total_mass()
    }

    pub fn total_momentum(&self) -> Vector2<f64> {
        self.state.total_momentum()
    }

    pub fn center_of_mass(&self) -> Option<Point2<f64>> {
        self.state.center_of_mass()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.state.kinetic_energy()
    }

    pub fn potential_energy(&self) -> f64 {
        self.force.potential_energy(&self.state.bodies)
    }

    /// Kinetic plus potential energy
    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }
}

fn validate_body(
    mass: f64,
    radius: f64,
    velocity: Vector2<f64>,
    position: Point2<f64>,
) -> Result<(), SimulationError> {
    if !require_positive(mass) {
        return Err(SimulationError::InvalidBody {
            parameter: "mass",
            value: mass,
        });
    }
    if !require_positive(radius) {
        return Err(SimulationError::InvalidBody {
            parameter: "radius",
            value: radius,
        });
    }
    if let Some(&v) = velocity.iter().find(|v| !v.is_finite()) {
        return Err(SimulationError::InvalidBody {
            parameter: "velocity",
            value: v,
        });
    }
    if let Some(&p) = position.coords.iter().find(|p| !p.is_finite()) {
        return Err(SimulationError::InvalidBody {
            parameter: "position",
            value: p,
        });
    }
    Ok(())
}
