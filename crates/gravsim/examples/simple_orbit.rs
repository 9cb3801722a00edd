//! Circular orbit with both integration methods
//!
//! Puts a light body on a circular orbit around a heavy one and compares
//! how far Euler and RK4 wander from the starting radius.
//!
//! Run with: cargo run --package gravsim --example simple_orbit

use gravsim::forces::G;
use gravsim::{Method, Simulation};
use nalgebra::{Point2, Vector2};

const CENTRAL_MASS: f64 = 1.0e6;
const RADIUS: f64 = 1000.0;
const TIME_STEP: f64 = 0.001;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Circular orbit: Euler vs RK4\n");
    println!("{}", "=".repeat(60));

    let v_circular = (G * CENTRAL_MASS / RADIUS).sqrt();
    let period = 2.0 * std::f64::consts::PI * RADIUS / v_circular;
    let ticks = (period / TIME_STEP).ceil() as usize;

    println!("  Central mass:   {CENTRAL_MASS:.1e}");
    println!("  Orbit radius:   {RADIUS:.1}");
    println!("  Circular speed: {v_circular:.3}");
    println!("  Period:         {period:.4} ({ticks} ticks of {TIME_STEP})");

    for method in Method::ALL {
        let mut sim = Simulation::with_config(method, TIME_STEP)?;
        sim.add_body(CENTRAL_MASS, 10.0, Vector2::zeros(), Point2::origin())?;
        sim.add_body(1.0e-3, 1.0, Vector2::new(0.0, v_circular), Point2::new(RADIUS, 0.0))?;

        let initial_energy = sim.total_energy();
        let mut max_drift: f64 = 0.0;

        for _ in 0..ticks {
            sim.advance_tick();
            let bodies = sim.bodies();
            let r = (bodies[1].position - bodies[0].position).magnitude();
            max_drift = max_drift.max((r - RADIUS).abs());
        }

        let energy_error = ((sim.total_energy() - initial_energy) / initial_energy).abs();
        println!("\n{method}:");
        println!("  Max radius drift:      {max_drift:.3e}");
        println!("  Relative energy error: {energy_error:.3e}");
    }

    Ok(())
}
