//! Accretion in a protoplanetary disk
//!
//! Loads the disk preset and reports every merge as bodies collide and
//! grow.
//!
//! Run with: cargo run --package gravsim --example collision_demo

use gravsim::presets::protoplanetary_disk;
use gravsim::{Method, Simulation};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Protoplanetary disk accretion\n");
    println!("{}", "=".repeat(60));

    let mut sim = Simulation::with_config(Method::Euler, 0.01)?;
    sim.load(&protoplanetary_disk(2024, 1000))?;

    let initial_mass = sim.total_mass();
    let initial_count = sim.body_count();
    println!("  Bodies: {initial_count}, total mass {initial_mass:.1}");

    for _ in 0..2_000 {
        let report = sim.advance_tick();
        for merge in &report.merges {
            println!(
                "  t={:8.2}  {} absorbed {} bodies -> mass {:.2}, radius {:.2}",
                report.time,
                merge.survivor,
                merge.absorbed.len(),
                merge.mass,
                merge.radius
            );
        }
    }

    println!("\nAfter {} ticks:", sim.tick_count());
    println!("  Bodies: {} (was {initial_count})", sim.body_count());
    println!(
        "  Mass error: {:.3e}",
        (sim.total_mass() - initial_mass).abs() / initial_mass
    );

    let mut largest: Vec<_> = sim.bodies().iter().skip(1).collect();
    largest.sort_by(|a, b| b.mass.total_cmp(&a.mass));
    println!("\nLargest bodies besides the protostar:");
    for body in largest.iter().take(5) {
        println!(
            "  {}  mass {:.2}  orbit radius {:.1}",
            body.id,
            body.mass,
            body.position.coords.magnitude()
        );
    }

    Ok(())
}
