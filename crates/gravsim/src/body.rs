use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Stable handle for a body, valid until the body is removed or absorbed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub id: BodyId,
    pub mass: f64,              // simulation mass units
    pub radius: f64,            // collision radius, independent of mass
    pub position: Point2<f64>,  // simulation length units
    pub velocity: Vector2<f64>, // length units per time unit
}

impl Body {
    /// Creates a body without an assigned handle
    ///
    /// Handles are issued by [`SystemState::add_body`](crate::state::SystemState::add_body);
    /// this constructor is for building bodies outside a store (tests, merges).
    pub fn new(mass: f64, radius: f64, position: [f64; 2], velocity: [f64; 2]) -> Self {
        Body {
            id: BodyId(0),
            mass,
            radius,
            position: Point2::new(position[0], position[1]),
            velocity: Vector2::new(velocity[0], velocity[1]),
        }
    }

    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (other.position - self.position).magnitude()
    }

    /// Radius cubed, the quantity summed when bodies merge
    pub fn volume(&self) -> f64 {
        self.radius.powi(3)
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }
}

/// Initial conditions for a body, as loaded from presets or scenario files
///
/// # Examples
///
/// ```
/// use gravsim::body::BodySpec;
///
/// let spec = BodySpec::new(5.0, 1.0, [10.0, 0.0], [0.0, 2.0]);
/// assert_eq!(spec.position, [10.0, 0.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub mass: f64,
    pub radius: f64,
    pub position: [f64; 2],
    #[serde(default)]
    pub velocity: [f64; 2],
}

impl BodySpec {
    pub fn new(mass: f64, radius: f64, position: [f64; 2], velocity: [f64; 2]) -> Self {
        Self {
            mass,
            radius,
            position,
            velocity,
        }
    }

    pub fn position(&self) -> Point2<f64> {
        Point2::new(self.position[0], self.position[1])
    }

    pub fn velocity(&self) -> Vector2<f64> {
        Vector2::new(self.velocity[0], self.velocity[1])
    }
}

impl From<&Body> for BodySpec {
    fn from(body: &Body) -> Self {
        Self {
            mass: body.mass,
            radius: body.radius,
            position: [body.position.x, body.position.y],
            velocity: [body.velocity.x, body.velocity.y],
        }
    }
}
