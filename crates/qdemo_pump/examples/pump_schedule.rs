//! Pump scheduling with simulated annealing
//!
//! Usage:
//! ```bash
//! cargo run -p qdemo_pump --example pump_schedule
//! RUST_LOG=debug cargo run -p qdemo_pump --example pump_schedule
//! ```

use anyhow::Result;
use qdemo_pump::prelude::*;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let problem = PumpProblem::default();
    let sampler = SimulatedAnnealingSampler::new();

    let schedule = solve(&problem, &sampler)?;
    print!("{}", schedule);

    Ok(())
}
