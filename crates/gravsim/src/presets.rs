//! Ready-made initial conditions
//!
//! Presets only produce [`BodySpec`]s; feed them to
//! [`Simulation::load`](crate::engine::Simulation::load) to run them.
//!
//! Distances are in simulation units where 100 units correspond to one
//! million kilometres, and masses are in units of 10²⁴ kg.

use crate::body::BodySpec;
use crate::forces::G;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Radius scale for bodies created in the disk or by hand
pub const CREATION_RADIUS_SCALE: f64 = 100.0;

/// Radius scale for the solar system, which would not fit on screen otherwise
pub const SOLAR_SYSTEM_RADIUS_SCALE: f64 = 10.0;

/// Approximation of 4π/3 used when converting density to radius
const SPHERE_FACTOR: f64 = 4.189;

/// Semi-major axes in the tables below are in millions of km
const DISTANCE_SCALE: f64 = 100.0;

pub const SUN_MASS: f64 = 1_989_100.0;
const SUN_DENSITY: f64 = 1409.0;

pub const PROTOSTAR_MASS: f64 = 1.0e6;
const PROTOSTAR_DENSITY: f64 = 6000.0;
const DISK_BODY_MASS: f64 = 1.0;
const DISK_BODY_DENSITY: f64 = 500.0;
pub const DISK_INNER_RADIUS: f64 = 500.0;
pub const DISK_OUTER_RADIUS: f64 = 1500.0;
pub const DEFAULT_DISK_BODIES: usize = 1000;

/// Radius of a sphere of the given mass and density, multiplied by `scale`
///
/// # Examples
///
/// ```
/// use gravsim::presets::radius_for_density;
///
/// let r = radius_for_density(4.189, 1.0, 100.0);
/// assert!((r - 100.0).abs() < 1e-9);
/// ```
pub fn radius_for_density(mass: f64, density: f64, scale: f64) -> f64 {
    scale * (mass / (SPHERE_FACTOR * density)).cbrt()
}

/// Orbital elements of one body in the solar system table
#[derive(Debug, Clone, Copy)]
struct Orbit {
    mass: f64,
    density: f64,
    semi_major_axis: f64,
    eccentricity: f64,
    angle_deg: f64,
}

const fn orbit(mass: f64, density: f64, semi_major_axis: f64, eccentricity: f64, angle_deg: f64) -> Orbit {
    Orbit {
        mass,
        density,
        semi_major_axis,
        eccentricity,
        angle_deg,
    }
}

struct Planet {
    orbit: Orbit,
    moons: &'static [Orbit],
}

const PLANETS: [Planet; 8] = [
    // Mercury
    Planet {
        orbit: orbit(0.3301, 5427.0, 57.909227, 0.20563593, 48.331),
        moons: &[],
    },
    // Venus
    Planet {
        orbit: orbit(4.8673, 5243.0, 108.20948, 0.00677672, 76.678),
        moons: &[],
    },
    // Earth
    Planet {
        orbit: orbit(5.9722, 5513.0, 149.59826, 0.01671123, 348.73936),
        moons: &[orbit(0.073477, 3346.0, 0.384399, 0.0549, 125.08)],
    },
    // Mars
    Planet {
        orbit: orbit(0.64169, 3934.0, 227.94382, 0.0933941, 49.562),
        moons: &[],
    },
    // Jupiter: Io, Europa, Ganymede, Callisto
    Planet {
        orbit: orbit(1898.1, 1326.0, 778.34082, 0.04838624, 100.492),
        moons: &[
            orbit(0.0894, 3528.0, 0.4216, 0.0041, 0.0),
            orbit(0.048, 3010.0, 0.6709, 0.009, 0.0),
            orbit(0.14819, 1936.0, 1.0704, 0.0013, 0.0),
            orbit(0.10758, 1830.0, 1.8827, 0.0074, 0.0),
        ],
    },
    // Saturn: Mimas, Enceladus, Tethys, Dione, Rhea, Titan, Iapetus
    Planet {
        orbit: orbit(568.32, 687.0, 1426.6664, 0.05386179, 113.643),
        moons: &[
            orbit(0.0000375, 1150.0, 0.18552, 0.0202, 0.0),
            orbit(0.000108, 1610.0, 0.237948, 0.0047, 0.0),
            orbit(0.0006174, 980.0, 0.294619, 0.02, 0.0),
            orbit(0.001095, 1480.0, 0.377396, 0.002, 0.0),
            orbit(0.002306, 1230.0, 0.527108, 0.001, 0.0),
            orbit(0.13452, 1880.0, 1.22187, 0.0288, 0.0),
            orbit(0.0018053, 1080.0, 3.56082, 0.0286, 0.0),
        ],
    },
    // Uranus: Miranda, Ariel, Umbriel, Titania, Oberon
    Planet {
        orbit: orbit(86.81, 1270.0, 2870.6582, 0.04725744, 73.99),
        moons: &[
            orbit(0.0000659, 1200.0, 0.12939, 0.0013, 0.0),
            orbit(0.00135, 1670.0, 0.1909, 0.0012, 0.0),
            orbit(0.0012, 1400.0, 0.2662, 0.005, 0.0),
            orbit(0.0035, 1720.0, 0.4363, 0.0011, 0.0),
            orbit(0.003014, 1630.0, 0.583519, 0.0014, 0.0),
        ],
    },
    // Neptune: Triton
    Planet {
        orbit: orbit(102.41, 1638.0, 4498.3964, 0.00859048, 131.794),
        moons: &[orbit(0.0214, 2061.0, 0.354759, 0.00002, 0.0)],
    },
];

/// Place `orbit` at periapsis around a parent of mass `parent_mass`
/// sitting at `parent`, moving perpendicular to the radius vector
fn place_at_periapsis(orbit: &Orbit, parent_mass: f64, parent: &BodySpec) -> BodySpec {
    let periapsis = orbit.semi_major_axis * DISTANCE_SCALE * (1.0 - orbit.eccentricity);
    let speed = (G * parent_mass * (1.0 + orbit.eccentricity) / periapsis).sqrt();
    let (sin, cos) = orbit.angle_deg.to_radians().sin_cos();

    BodySpec::new(
        orbit.mass,
        radius_for_density(orbit.mass, orbit.density, SOLAR_SYSTEM_RADIUS_SCALE),
        [
            parent.position[0] + periapsis * cos,
            parent.position[1] + periapsis * sin,
        ],
        [
            parent.velocity[0] - speed * sin,
            parent.velocity[1] + speed * cos,
        ],
    )
}

/// The Sun, the eight planets and their major moons
///
/// The Sun sits at rest at the origin and comes first. Planets follow in
/// order from Mercury, each one directly followed by its moons.
pub fn solar_system() -> Vec<BodySpec> {
    let sun = BodySpec::new(
        SUN_MASS,
        radius_for_density(SUN_MASS, SUN_DENSITY, SOLAR_SYSTEM_RADIUS_SCALE),
        [0.0, 0.0],
        [0.0, 0.0],
    );

    let mut specs = vec![sun];
    for planet in &PLANETS {
        let planet_spec = place_at_periapsis(&planet.orbit, SUN_MASS, &sun);
        specs.push(planet_spec);
        specs.extend(
            planet
                .moons
                .iter()
                .map(|moon| place_at_periapsis(moon, planet.orbit.mass, &planet_spec)),
        );
    }
    specs
}

/// A heavy protostar surrounded by `count` light bodies on circular orbits
///
/// Bodies are spread uniformly in area over the annulus between
/// [`DISK_INNER_RADIUS`] and [`DISK_OUTER_RADIUS`], with radius fractions in
/// steps of 0.001 and angles in steps of 0.1°. The same seed always gives the
/// same disk.
///
/// # Examples
///
/// ```
/// use gravsim::presets::protoplanetary_disk;
///
/// let disk = protoplanetary_disk(7, 50);
/// assert_eq!(disk.len(), 51);
/// assert_eq!(disk, protoplanetary_disk(7, 50));
/// ```
pub fn protoplanetary_disk(seed: u64, count: usize) -> Vec<BodySpec> {
    let mut rng = ChaChaRng::seed_from_u64(seed);

    let protostar = BodySpec::new(
        PROTOSTAR_MASS,
        radius_for_density(PROTOSTAR_MASS, PROTOSTAR_DENSITY, CREATION_RADIUS_SCALE),
        [0.0, 0.0],
        [0.0, 0.0],
    );
    let body_radius = radius_for_density(DISK_BODY_MASS, DISK_BODY_DENSITY, CREATION_RADIUS_SCALE);
    let inner_sq = DISK_INNER_RADIUS * DISK_INNER_RADIUS;
    let outer_sq = DISK_OUTER_RADIUS * DISK_OUTER_RADIUS;

    let mut specs = Vec::with_capacity(count + 1);
    specs.push(protostar);
    for _ in 0..count {
        let fraction = rng.random_range(0..=1000u32) as f64 * 0.001;
        let r = (inner_sq + fraction * (outer_sq - inner_sq)).sqrt();
        let angle = (rng.random_range(0..=3600u32) as f64 * 0.1).to_radians();
        let (sin, cos) = angle.sin_cos();
        let speed = (G * PROTOSTAR_MASS / r).sqrt();

        specs.push(BodySpec::new(
            DISK_BODY_MASS,
            body_radius,
            [r * cos, r * sin],
            [-speed * sin, speed * cos],
        ));
    }
    specs
}

/// Named starting scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    #[default]
    Empty,
    SolarSystem,
    ProtoplanetaryDisk,
}

impl Preset {
    /// Bodies of this preset; `seed` and `disk_bodies` only affect the disk
    pub fn bodies(&self, seed: u64, disk_bodies: usize) -> Vec<BodySpec> {
        match self {
            Preset::Empty => Vec::new(),
            Preset::SolarSystem => solar_system(),
            Preset::ProtoplanetaryDisk => protoplanetary_disk(seed, disk_bodies),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Empty => "empty",
            Preset::SolarSystem => "solar-system",
            Preset::ProtoplanetaryDisk => "protoplanetary-disk",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised preset name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPreset(pub String);

impl fmt::Display for UnknownPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown preset '{}' (expected 'empty', 'solar-system' or 'protoplanetary-disk')",
            self.0
        )
    }
}

impl std::error::Error for UnknownPreset {}

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empty" | "none" => Ok(Preset::Empty),
            "solar-system" | "solar" => Ok(Preset::SolarSystem),
            "protoplanetary-disk" | "protodisk" | "disk" => Ok(Preset::ProtoplanetaryDisk),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}
