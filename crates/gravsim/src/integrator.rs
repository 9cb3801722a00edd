//! Time integration for N-body systems
//!
//! Two fixed-step schemes share the same pairwise force kernel:
//! - [`Euler`]: one force pass, first order
//! - [`RungeKutta4`]: four staged force passes, classical fourth order
//!
//! Both own their scratch buffers so repeated steps do not reallocate, and
//! neither stores per-stage state on [`Body`](crate::body::Body).

use crate::collisions::ContactGraph;
use crate::error::SimulationError;
use crate::forces::ForceModel;
use crate::state::SystemState;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A time integrator for N-body systems
///
/// Integrators advance positions and velocities in place using increments
/// from a force model. When `contacts` is given, contacts are recorded
/// during exactly one of the force passes of the step.
pub trait Integrator: Send + Sync {
    /// Advance the system by one timestep
    ///
    /// # Arguments
    ///
    /// * `state` - Current system state (modified in place)
    /// * `dt` - Timestep
    /// * `force` - Force model supplying velocity increments
    /// * `contacts` - Contact graph to fill, sized for `state.bodies`
    fn step(
        &mut self,
        state: &mut SystemState,
        dt: f64,
        force: &dyn ForceModel,
        contacts: Option<&mut ContactGraph>,
    );

    /// Get the name of this integrator
    fn name(&self) -> &'static str;

    /// Get the order of accuracy of this integrator
    fn order(&self) -> usize;
}

/// Which integration scheme a simulation uses
///
/// # Examples
///
/// ```
/// use gravsim::integrator::Method;
///
/// let method: Method = "rk4".parse().unwrap();
/// assert_eq!(method, Method::RungeKutta4);
/// assert_eq!(method.to_string(), "rk4");
/// assert_eq!(Method::default(), Method::Euler);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Method {
    #[default]
    #[serde(rename = "euler")]
    Euler,
    #[serde(rename = "rk4", alias = "runge-kutta-4")]
    RungeKutta4,
}

impl Method {
    pub const ALL: [Method; 2] = [Method::Euler, Method::RungeKutta4];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Euler => "euler",
            Method::RungeKutta4 => "rk4",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euler" | "explicit-euler" => Ok(Method::Euler),
            "rk4" | "runge-kutta-4" | "runge-kutta" => Ok(Method::RungeKutta4),
            _ => Err(SimulationError::UnknownMethod(s.to_string())),
        }
    }
}

/// Resize `buf` to `n` zero vectors, keeping its allocation
fn zero_fill(buf: &mut Vec<Vector2<f64>>, n: usize) {
    buf.clear();
    buf.resize(n, Vector2::zeros());
}

/// Fill `positions` with each body's position displaced by `scale * offset[i]`
fn displaced_positions(
    positions: &mut Vec<Point2<f64>>,
    state: &SystemState,
    offset: &[Vector2<f64>],
    scale: f64,
) {
    positions.clear();
    positions.extend(
        state
            .bodies
            .iter()
            .zip(offset)
            .map(|(body, d)| body.position + d * scale),
    );
}

/// Explicit Euler integrator (1st order)
///
/// One force pass over the current positions accumulates every body's
/// velocity increment; only after the pass are velocities applied and
/// positions advanced with the new velocity. Positions are never written
/// during the force loop.
///
/// # Examples
///
/// ```
/// use gravsim::forces::DirectGravity;
/// use gravsim::integrator::{Euler, Integrator};
/// use gravsim::state::SystemState;
/// use nalgebra::{Point2, Vector2};
///
/// let mut system = SystemState::new();
/// system.add_body(1.0, 0.1, Point2::new(0.0, 0.0), Vector2::new(1.0, 0.0));
///
/// let mut euler = Euler::new();
/// euler.step(&mut system, 0.5, &DirectGravity::new(), None);
///
/// assert_eq!(system.bodies[0].position, Point2::new(0.5, 0.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Euler {
    positions: Vec<Point2<f64>>,
    dv: Vec<Vector2<f64>>,
}

impl Euler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Integrator for Euler {
    fn step(
        &mut self,
        state: &mut SystemState,
        dt: f64,
        force: &dyn ForceModel,
        contacts: Option<&mut ContactGraph>,
    ) {
        let n = state.bodies.len();

        self.positions.clear();
        self.positions.extend(state.bodies.iter().map(|b| b.position));
        zero_fill(&mut self.dv, n);

        force.accumulate(&state.bodies, &self.positions, dt, &mut self.dv, contacts);

        state
            .bodies
            .iter_mut()
            .zip(self.dv.iter())
            .for_each(|(body, dv)| {
                body.velocity += *dv;
                body.position += body.velocity * dt;
            });

        state.time += dt;
    }

    fn name(&self) -> &'static str {
        "euler"
    }

    fn order(&self) -> usize {
        1
    }
}

/// Classical fourth-order Runge-Kutta integrator
///
/// Per body, with `kNdv` the velocity increment from force pass N and
/// `kNdx` the matching position increment:
///
/// 1. k1dv at x;              k1dx = Δt·v
/// 2. k2dv at x + k1dx/2;     k2dx = Δt·(v + k1dv/2)
/// 3. k3dv at x + k2dx/2;     k3dx = Δt·(v + k2dv/2)
/// 4. k4dv at x + k3dx;       k4dx = Δt·(v + k3dv)
/// 5. v += (k1dv + 2·k2dv + 2·k3dv + k4dv)/6,
///    x += (k1dx + 2·k2dx + 2·k3dx + k4dx)/6
///
/// Contacts are recorded during pass 4, against the stage-4 positions.
/// Stage buffers are zeroed at the start of every step.
#[derive(Debug, Clone, Default)]
pub struct RungeKutta4 {
    positions: Vec<Point2<f64>>,
    k_dx: [Vec<Vector2<f64>>; 4],
    k_dv: [Vec<Vector2<f64>>; 4],
}

impl RungeKutta4 {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Integrator for RungeKutta4 {
    fn step(
        &mut self,
        state: &mut SystemState,
        dt: f64,
        force: &dyn ForceModel,
        contacts: Option<&mut ContactGraph>,
    ) {
        let n = state.bodies.len();
        let Self {
            positions,
            k_dx,
            k_dv,
        } = self;

        k_dx.iter_mut().for_each(|k| zero_fill(k, n));
        k_dv.iter_mut().for_each(|k| zero_fill(k, n));

        // Stage 1
        positions.clear();
        positions.extend(state.bodies.iter().map(|b| b.position));
        force.accumulate(&state.bodies, &positions[..], dt, &mut k_dv[0], None);
        for (i, body) in state.bodies.iter().enumerate() {
            k_dx[0][i] = body.velocity * dt;
        }

        // Stage 2
        displaced_positions(positions, state, &k_dx[0], 0.5);
        force.accumulate(&state.bodies, &positions[..], dt, &mut k_dv[1], None);
        for (i, body) in state.bodies.iter().enumerate() {
            k_dx[1][i] = (body.velocity + k_dv[0][i] * 0.5) * dt;
        }

        // Stage 3
        displaced_positions(positions, state, &k_dx[1], 0.5);
        force.accumulate(&state.bodies, &positions[..], dt, &mut k_dv[2], None);
        for (i, body) in state.bodies.iter().enumerate() {
            k_dx[2][i] = (body.velocity + k_dv[1][i] * 0.5) * dt;
        }

        // Stage 4, which also records contacts
        displaced_positions(positions, state, &k_dx[2], 1.0);
        force.accumulate(&state.bodies, &positions[..], dt, &mut k_dv[3], contacts);
        for (i, body) in state.bodies.iter().enumerate() {
            k_dx[3][i] = (body.velocity + k_dv[2][i]) * dt;
        }

        for (i, body) in state.bodies.iter_mut().enumerate() {
            let dv = (k_dv[0][i] + k_dv[1][i] * 2.0 + k_dv[2][i] * 2.0 + k_dv[3][i]) / 6.0;
            let dx = (k_dx[0][i] + k_dx[1][i] * 2.0 + k_dx[2][i] * 2.0 + k_dx[3][i]) / 6.0;
            body.velocity += dv;
            body.position += dx;
        }

        state.time += dt;
    }

    fn name(&self) -> &'static str {
        "rk4"
    }

    fn order(&self) -> usize {
        4
    }
}
