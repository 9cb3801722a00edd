use anyhow::Result;
use clap::Parser;
use gravsim::Simulation;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;


use cli::{Args, load_and_apply_config};
use config::RunConfig;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn report(sim: &Simulation) {
    let momentum = sim.total_momentum();
    info!(
        tick = sim.tick_count(),
        time = sim.time(),
        bodies = sim.body_count(),
        mass = sim.total_mass(),
        energy = sim.total_energy(),
        px = momentum.x,
        py = momentum.y,
        "progress"
    );
}

fn run(config: &RunConfig) -> Result<Simulation> {
    let mut sim = config.build_simulation()?;
    info!(
        method = %config.method,
        time_step = config.time_step,
        preset = %config.preset,
        bodies = sim.body_count(),
        ticks = config.ticks,
        "starting simulation"
    );
    report(&sim);

    let mut merges = 0usize;
    for _ in 0..config.ticks {
        let tick = sim.advance_tick();
        for merge in &tick.merges {
            debug!(
                tick = tick.tick,
                survivor = %merge.survivor,
                absorbed = merge.absorbed.len(),
                mass = merge.mass,
                "bodies merged"
            );
        }
        merges += tick.merges.len();

        if config.report_every > 0 && sim.tick_count() % config.report_every == 0 {
            report(&sim);
        }
    }

    info!(ticks = sim.tick_count(), merges, "simulation finished");
    Ok(sim)
}

fn print_bodies(sim: &Simulation) {
    println!(
        "{:>6} {:>14} {:>10} {:>14} {:>14} {:>12} {:>12}",
        "id", "mass", "radius", "x", "y", "vx", "vy"
    );
    for body in sim.bodies() {
        println!(
            "{:>6} {:>14.6} {:>10.4} {:>14.3} {:>14.3} {:>12.4} {:>12.4}",
            body.id.to_string(),
            body.mass,
            body.radius,
            body.position.x,
            body.position.y,
            body.velocity.x,
            body.velocity.y
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = load_and_apply_config(&args)?;
    let sim = run(&config)?;
    print_bodies(&sim);

    Ok(())
}
