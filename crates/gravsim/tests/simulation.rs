//! Integration tests driving the engine through its public API.

use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use gravsim::collisions::detect_contacts;
use gravsim::presets::{self, Preset};
use gravsim::{BodyId, Method, Simulation, SimulationError};

#[test]
fn solar_system_stays_bound() {
    let mut sim = Simulation::with_config(Method::RungeKutta4, 0.01).unwrap();
    let ids = sim.load(&presets::solar_system()).unwrap();
    let sun = ids[0];
    let earth = ids[3];
    let initial_distance = sim.body(earth).unwrap().position.coords.magnitude();
    let initial_count = sim.body_count();

    for _ in 0..200 {
        sim.advance_tick();
    }

    // Nothing collides and Earth stays close to its orbit
    assert_eq!(sim.body_count(), initial_count);
    let sun_pos = sim.body(sun).unwrap().position;
    let distance = (sim.body(earth).unwrap().position - sun_pos).magnitude();
    assert!(
        (distance - initial_distance).abs() / initial_distance < 0.01,
        "earth moved from {initial_distance} to {distance}"
    );
}

#[test]
fn disk_conserves_mass_through_merges() {
    let mut sim = Simulation::new();
    sim.load(&Preset::ProtoplanetaryDisk.bodies(11, 200)).unwrap();
    let initial_mass = sim.total_mass();
    let initial_count = sim.body_count();

    let mut absorbed: Vec<BodyId> = Vec::new();
    for _ in 0..50 {
        let report = sim.advance_tick();
        absorbed.extend(report.absorbed());
    }

    assert_relative_eq!(sim.total_mass(), initial_mass, max_relative = 1e-12);
    assert_eq!(sim.body_count() + absorbed.len(), initial_count);
    for id in absorbed {
        assert!(sim.body(id).is_none());
    }
}

#[test]
fn merges_leave_no_touching_pairs_behind() {
    // A tight cluster of bodies at rest collapses in one tick
    let mut sim = Simulation::new();
    for i in 0..5 {
        for j in 0..5 {
            sim.add_body(
                1.0,
                0.6,
                Vector2::zeros(),
                Point2::new(i as f64, j as f64),
            )
            .unwrap();
        }
    }
    let momentum = sim.total_momentum();

    let report = sim.advance_tick();

    assert_eq!(report.merges.len(), 1);
    assert_eq!(sim.body_count(), 1);
    assert_relative_eq!(sim.total_mass(), 25.0);
    assert_relative_eq!(sim.total_momentum().x, momentum.x, epsilon = 1e-9);
    assert_relative_eq!(sim.total_momentum().y, momentum.y, epsilon = 1e-9);
    assert!(detect_contacts(sim.bodies()).is_empty());
}

#[test]
fn configuration_errors_are_recoverable() {
    let mut sim = Simulation::new();
    sim.set_method(Method::RungeKutta4);

    assert!(matches!(
        sim.set_time_step(0.0),
        Err(SimulationError::InvalidConfiguration { .. })
    ));
    assert_eq!(sim.time_step(), 0.01);
    assert_eq!(sim.method(), Method::RungeKutta4);

    let err = "velocity-verlet".parse::<Method>().unwrap_err();
    assert_eq!(err, SimulationError::UnknownMethod("velocity-verlet".to_string()));
}

#[test]
fn removed_bodies_stop_attracting() {
    let mut sim = Simulation::new();
    let a = sim
        .add_body(1.0, 0.1, Vector2::zeros(), Point2::new(0.0, 0.0))
        .unwrap();
    let b = sim
        .add_body(1.0e3, 0.1, Vector2::zeros(), Point2::new(50.0, 0.0))
        .unwrap();

    sim.remove_body(b).unwrap();
    sim.advance_tick();

    assert_eq!(sim.body(a).unwrap().velocity, Vector2::zeros());
}
