use approx::assert_relative_eq;

use crate::collisions::detect_contacts;
use crate::engine::Simulation;
use crate::forces::G;
use crate::presets::*;

fn norm(v: [f64; 2]) -> f64 {
    v[0].hypot(v[1])
}

fn dot(a: [f64; 2], b: [f64; 2]) -> f64 {
    a[0] * b[0] + a[1] * b[1]
}

#[test]
fn test_radius_for_density() {
    // Mass 4.189 at density 1 is a unit sphere
    assert_relative_eq!(radius_for_density(4.189, 1.0, 1.0), 1.0, epsilon = 1e-12);
    // Eight times the mass doubles the radius
    assert_relative_eq!(
        radius_for_density(8.0 * 4.189, 1.0, 10.0),
        20.0,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        radius_for_density(4.189 * 1000.0, 1000.0, CREATION_RADIUS_SCALE),
        100.0,
        epsilon = 1e-9
    );
}

#[test]
fn test_solar_system_layout() {
    let bodies = solar_system();

    // Sun, 8 planets and 18 moons
    assert_eq!(bodies.len(), 27);

    let sun = &bodies[0];
    assert_eq!(sun.mass, SUN_MASS);
    assert_eq!(sun.position, [0.0, 0.0]);
    assert_eq!(sun.velocity, [0.0, 0.0]);
    assert_relative_eq!(
        sun.radius,
        radius_for_density(SUN_MASS, 1409.0, SOLAR_SYSTEM_RADIUS_SCALE)
    );
}

#[test]
fn test_earth_starts_at_perihelion() {
    let bodies = solar_system();
    // Sun, Mercury, Venus, Earth
    let earth = &bodies[3];
    let e = 0.01671123;
    let perihelion = 149.59826 * 100.0 * (1.0 - e);

    assert_eq!(earth.mass, 5.9722);
    assert_relative_eq!(norm(earth.position), perihelion, epsilon = 1e-9);
    assert_relative_eq!(
        norm(earth.velocity),
        (G * SUN_MASS * (1.0 + e) / perihelion).sqrt(),
        epsilon = 1e-9
    );
    // Moving perpendicular to the radius, counter-clockwise
    assert!(dot(earth.position, earth.velocity).abs() < 1e-6);
    let cross = earth.position[0] * earth.velocity[1] - earth.position[1] * earth.velocity[0];
    assert!(cross > 0.0);
}

#[test]
fn test_moon_orbits_its_planet() {
    let bodies = solar_system();
    let earth = &bodies[3];
    let moon = &bodies[4];
    let e = 0.0549;
    let periapsis = 0.384399 * 100.0 * (1.0 - e);

    let offset = [
        moon.position[0] - earth.position[0],
        moon.position[1] - earth.position[1],
    ];
    let relative_velocity = [
        moon.velocity[0] - earth.velocity[0],
        moon.velocity[1] - earth.velocity[1],
    ];

    assert_relative_eq!(norm(offset), periapsis, epsilon = 1e-9);
    assert_relative_eq!(
        norm(relative_velocity),
        (G * earth.mass * (1.0 + e) / periapsis).sqrt(),
        epsilon = 1e-9
    );
}

#[test]
fn test_solar_system_starts_without_contacts() {
    let mut sim = Simulation::new();
    sim.load(&solar_system()).unwrap();

    assert!(detect_contacts(sim.bodies()).is_empty());
}

#[test]
fn test_disk_is_reproducible() {
    assert_eq!(protoplanetary_disk(42, 100), protoplanetary_disk(42, 100));
    assert_ne!(protoplanetary_disk(42, 100), protoplanetary_disk(43, 100));
}

#[test]
fn test_disk_bodies_on_circular_orbits_in_annulus() {
    let disk = protoplanetary_disk(1, 500);

    assert_eq!(disk.len(), 501);
    assert_eq!(disk[0].mass, PROTOSTAR_MASS);
    assert_eq!(disk[0].position, [0.0, 0.0]);

    for body in &disk[1..] {
        let r = norm(body.position);
        assert!(r >= DISK_INNER_RADIUS - 1e-9 && r <= DISK_OUTER_RADIUS + 1e-9, "r = {r}");
        assert_eq!(body.mass, 1.0);
        assert_relative_eq!(norm(body.velocity), (G * PROTOSTAR_MASS / r).sqrt(), epsilon = 1e-9);
        assert!(dot(body.position, body.velocity).abs() < 1e-6);
    }
}

#[test]
fn test_empty_disk_is_just_the_protostar() {
    let disk = protoplanetary_disk(9, 0);

    assert_eq!(disk.len(), 1);
    assert_eq!(disk[0].mass, PROTOSTAR_MASS);
}

#[test]
fn test_preset_bodies() {
    assert!(Preset::Empty.bodies(0, 10).is_empty());
    assert_eq!(Preset::SolarSystem.bodies(0, 10), solar_system());
    assert_eq!(Preset::ProtoplanetaryDisk.bodies(5, 10).len(), 11);
}

#[test]
fn test_preset_parsing() {
    assert_eq!("solar-system".parse::<Preset>(), Ok(Preset::SolarSystem));
    assert_eq!("Protodisk".parse::<Preset>(), Ok(Preset::ProtoplanetaryDisk));
    assert_eq!("empty".parse::<Preset>(), Ok(Preset::Empty));
    assert!("andromeda".parse::<Preset>().is_err());

    for preset in [Preset::Empty, Preset::SolarSystem, Preset::ProtoplanetaryDisk] {
        assert_eq!(preset.to_string().parse::<Preset>(), Ok(preset));
    }
}
