//! Interaction Boost Example
//!
//! Replays a short host session: init, a burst of touch events, a vsync,
//! then screen off. Needs write access to the cpufreq tunables.
//!
//! Run with: RUST_LOG=powerhint=debug cargo run --example `interaction_boost`

use powerhint::hal::{PowerHint, PowerModule};
use powerhint::{BoostHandleState, GovernorController};
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), powerhint::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let controller = GovernorController::from_env()?;
    let module: &dyn PowerModule = &controller;
    println!("Loaded {}", module.info());

    module.init();

    for _ in 0..5 {
        module.power_hint(PowerHint::Interaction, None);
        thread::sleep(Duration::from_millis(20));
    }
    module.power_hint(PowerHint::CpuBoost, Some(500_000));
    module.power_hint(PowerHint::Vsync, Some(1));

    match controller.boost_state() {
        BoostHandleState::Open => println!("✓ boostpulse interface open"),
        BoostHandleState::Absent => println!("✗ no boostpulse interface (see logs)"),
    }

    module.set_interactive(false);
    println!("Screen off: idle sampling rate requested");

    Ok(())
}
