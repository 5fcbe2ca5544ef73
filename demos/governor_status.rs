//! Governor Status Example
//!
//! Reports the active cpufreq governor and which tunables powerhint can drive.
//!
//! Run with: cargo run --example `governor_status`
//! Set `POWERHINT_SYSFS_ROOT` to inspect a sysfs tree mounted elsewhere.

use powerhint::{Governor, GovernorController, ModuleInfo};

fn main() -> Result<(), powerhint::Error> {
    let controller = GovernorController::from_env()?;
    let paths = &controller.config().paths;

    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║          POWERHINT - Governor Status                       ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();
    println!("Module: {}", ModuleInfo::DEFAULT);
    println!("powerhint Version: {}", powerhint::VERSION);
    println!("Platform: {}", if powerhint::is_linux() { "Linux" } else { "Other" });
    println!();

    let name = match controller.read_governor_name() {
        Ok(name) => name,
        Err(e) => {
            println!("✗ Cannot read scaling governor: {e}");
            return Ok(());
        }
    };

    let governor = Governor::parse(&name);
    println!("Governor: {name} ({governor:?})");
    println!(
        "  Boost pulses:  {}",
        if governor.supports_boost() { "✓ supported" } else { "✗ not supported" }
    );
    println!(
        "  Sampling rate: {}",
        if governor.has_sampling_rate() { "✓ supported" } else { "✗ not supported" }
    );
    println!();

    for path in paths.iter() {
        let mark = if path.exists() { "✓" } else { "✗" };
        println!("{mark} {}", path.display());
    }

    Ok(())
}
