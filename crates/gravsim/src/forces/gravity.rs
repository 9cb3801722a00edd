//! Direct N-body gravity (O(N²) implementation)

use crate::body::Body;
use crate::collisions::ContactGraph;
use crate::forces::{ForceModel, G, PROXIMITY_DEAD_ZONE};
use nalgebra::{Point2, Vector2};

/// Direct O(N²) pairwise gravity
///
/// Every unordered pair is visited once. The increment applied to A is
/// `G·Δt·r⁻³·d·m_B` and B receives exactly the opposite scaled by `m_A`,
/// so the kernel conserves momentum up to summation order. Pairs at or
/// inside `dead_zone` contribute nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectGravity {
    /// Gravitational constant
    pub g: f64,
    /// Separation at or below which the pair force is skipped
    pub dead_zone: f64,
}

impl DirectGravity {
    /// Creates the standard kernel: [`G`] with the [`PROXIMITY_DEAD_ZONE`]
    pub fn new() -> Self {
        Self {
            g: G,
            dead_zone: PROXIMITY_DEAD_ZONE,
        }
    }

    /// Creates a kernel with a custom gravitational constant
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::forces::DirectGravity;
    ///
    /// let gravity = DirectGravity::with_constant(1.0);
    /// assert_eq!(gravity.g, 1.0);
    /// ```
    pub fn with_constant(g: f64) -> Self {
        Self {
            g,
            dead_zone: PROXIMITY_DEAD_ZONE,
        }
    }

    /// Velocity increment per unit of the other body's mass
    ///
    /// `delta` points from A to B. Returns `None` inside the dead zone.
    /// The distance is raised to -3 rather than -2 because `delta` is not
    /// normalised.
    pub fn pair_increment(&self, delta: Vector2<f64>, distance: f64, dt: f64) -> Option<Vector2<f64>> {
        if distance > self.dead_zone {
            Some(delta * (self.g * dt * distance.powi(-3)))
        } else {
            None
        }
    }

    /// Velocity increments `(on a, on b)` for one pair at their stored positions
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::body::Body;
    /// use gravsim::forces::DirectGravity;
    ///
    /// let a = Body::new(2.0, 0.1, [0.0, 0.0], [0.0, 0.0]);
    /// let b = Body::new(6.0, 0.1, [1.0, 0.0], [0.0, 0.0]);
    /// let (dv_a, dv_b) = DirectGravity::new().pair_impulses(&a, &b, 0.01);
    ///
    /// // Momentum change cancels
    /// assert!((dv_a * a.mass + dv_b * b.mass).magnitude() < 1e-9);
    /// ```
    pub fn pair_impulses(&self, a: &Body, b: &Body, dt: f64) -> (Vector2<f64>, Vector2<f64>) {
        let delta = b.position - a.position;
        match self.pair_increment(delta, delta.magnitude(), dt) {
            Some(accel) => (accel * b.mass, -accel * a.mass),
            None => (Vector2::zeros(), Vector2::zeros()),
        }
    }
}

impl Default for DirectGravity {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceModel for DirectGravity {
    fn accumulate(
        &self,
        bodies: &[Body],
        positions: &[Point2<f64>],
        dt: f64,
        dv: &mut [Vector2<f64>],
        mut contacts: Option<&mut ContactGraph>,
    ) {
        let n = bodies.len();
        debug_assert_eq!(positions.len(), n);
        debug_assert_eq!(dv.len(), n);

        for i in 0..n {
            for j in (i + 1)..n {
                let delta = positions[j] - positions[i];
                let distance = delta.magnitude();

                if let Some(accel) = self.pair_increment(delta, distance, dt) {
                    dv[i] += accel * bodies[j].mass;
                    dv[j] -= accel * bodies[i].mass;
                }

                if let Some(graph) = contacts.as_deref_mut() {
                    graph.check_pair(i, j, distance, bodies[i].radius + bodies[j].radius);
                }
            }
        }
    }

    fn potential_energy(&self, bodies: &[Body]) -> f64 {
        // Each pair counted once; dead-zone pairs exert no force so they
        // carry no potential either
        bodies
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                bodies[i + 1..].iter().filter_map(move |b| {
                    let r = a.distance_to(b);
                    (r > self.dead_zone).then(|| -self.g * a.mass * b.mass / r)
                })
            })
            .sum()
    }
}
