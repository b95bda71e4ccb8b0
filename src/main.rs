//! Headless demo driver for the charge simulation.
//!
//! Stands in for a graphical front end: builds a scene, exercises the full
//! command surface (add, remove-closest, pause, reset), and drives the
//! engine through the fixed-timestep loop while logging snapshots.

use std::time::{Duration, Instant};

use charge_physics::{Charge, ChargeKind};
use charge_simulation::{ChargeSim, FixedTimestep, SimParams};
use glam::DVec2;
use rand::Rng;

const SCATTER_COUNT: usize = 8;
const SCATTER_RADIUS: f64 = 150.0;
const SIMULATED_SECONDS: f64 = 5.0;
const FRAME_BUDGET: Duration = Duration::from_millis(4);

/// Scatter a handful of moving charges around the scene center, alternating
/// signs so the cloud actually does something.
fn scatter_charges(sim: &mut ChargeSim, center: DVec2) {
    let mut rng = rand::rng();

    for i in 0..SCATTER_COUNT {
        let angle = rng.random::<f64>() * std::f64::consts::TAU;
        let radius = rng.random::<f64>().sqrt() * SCATTER_RADIUS;
        let x = center.x + radius * angle.cos();
        let y = center.y + radius * angle.sin();
        let q = if i % 2 == 0 { 1e-6 } else { -1e-6 };

        match sim.add_charge_at(x, y, q, ChargeKind::Moving) {
            Ok(index) => log::debug!("added charge {index} at ({x:.1}, {y:.1}), q = {q:e}"),
            Err(error) => log::warn!("scatter: {error}"),
        }
    }
}

fn log_snapshot(sim: &ChargeSim) {
    log::info!("{} charges ({} moving):", sim.len(), sim.moving_indices().len());
    for (index, charge) in sim.charges().iter().enumerate() {
        log::info!(
            "  [{index}] {:?} at ({:.2}, {:.2}), q = {:e}, |v| = {:.3}",
            charge.kind(),
            charge.position.x,
            charge.position.y,
            charge.q,
            charge.velocity().length()
        );
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let params = SimParams::default();
    let mut sim = ChargeSim::new(params);
    let mut driver = FixedTimestep::new(params.timestep);

    // Anchor the scene on two stationary poles, then scatter movers.
    sim.add_charge(Charge::stationary(-200.0, 0.0, 5e-6))?;
    sim.add_charge(Charge::stationary(200.0, 0.0, -5e-6))?;
    scatter_charges(&mut sim, DVec2::ZERO);
    log_snapshot(&sim);

    // The front end's remove-closest command, aimed near the origin.
    if let Some(index) = sim.find_closest_charge(DVec2::ZERO) {
        let position = sim.charges()[index].position;
        log::info!("removing closest charge to origin: index {index} at {position:?}");
        sim.remove_charge(index)?;
    }

    log::info!(
        "running {SIMULATED_SECONDS} simulated seconds at a {} s step",
        driver.step()
    );

    let start = Instant::now();
    let mut last_frame = start;
    let mut simulated = 0.0;
    let mut paused_demo_done = false;

    while simulated < SIMULATED_SECONDS {
        let now = Instant::now();
        let frame_time = (now - last_frame).as_secs_f64();
        last_frame = now;

        let steps = driver.advance(&mut sim, frame_time);
        simulated += steps as f64 * driver.step();

        // Midway through, prove a paused engine holds still.
        if !paused_demo_done && simulated >= SIMULATED_SECONDS / 2.0 {
            paused_demo_done = true;
            sim.toggle_pause();
            let held = sim.charges().to_vec();
            driver.advance(&mut sim, 10.0 * driver.step());
            if sim.charges() == held.as_slice() {
                log::info!("pause held {} charges still; resuming", held.len());
            } else {
                log::error!("charges moved while paused");
            }
            sim.toggle_pause();
        }

        std::thread::sleep(FRAME_BUDGET);
    }

    log::info!(
        "done: {SIMULATED_SECONDS} simulated seconds in {:.2} wall seconds",
        start.elapsed().as_secs_f64()
    );
    log_snapshot(&sim);

    sim.reset_charges();
    log::info!("reset: {} charges remain", sim.len());

    Ok(())
}
