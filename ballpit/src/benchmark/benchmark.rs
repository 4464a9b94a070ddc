use std::time::Instant;

use crate::configuration::config::SimulationConfig;
use crate::error::Result;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{NVec2, Surface};

/// Time `Scenario::step` for growing body counts on a fixed surface.
///
/// The collision sweep is O(N^2), so doubling N should roughly quadruple
/// the per-tick time once N is past a few dozen.
pub fn bench_tick(cfg: &SimulationConfig) -> Result<()> {
    let ns = [25, 50, 100, 200, 400, 800];
    let warmup = 20;
    let steps = 200; // ticks timed per body count

    for n in ns {
        let bench_cfg = SimulationConfig {
            count: n,
            seed: Some(cfg.seed.unwrap_or(42)),
            ..cfg.clone()
        };
        let mut scenario = Scenario::build_scenario(&bench_cfg)?;
        scenario.attach(Surface::new(1920.0, 1080.0));

        // Keep the pointer and one click burst in play so every term runs
        scenario.pointer_moved(NVec2::new(960.0, 540.0));
        scenario.clicked(NVec2::new(480.0, 270.0));

        for _ in 0..warmup {
            scenario.step();
        }

        let t0 = Instant::now();
        for _ in 0..steps {
            scenario.step();
        }
        let dt = t0.elapsed().as_secs_f64();

        println!(
            "N = {n:4}, {steps} ticks = {:8.6} s, per tick = {:9.3} us",
            dt,
            dt / steps as f64 * 1.0e6
        );
    }

    Ok(())
}
