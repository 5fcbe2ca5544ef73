//! powerhint: CPU governor boost pulses and sampling-rate control.
//!
//! powerhint drives the Linux cpufreq governors through sysfs on behalf of a
//! device power-management framework. It translates three host calls into
//! sysfs writes:
//!
//! | Host call | Effect |
//! |-----------|--------|
//! | `init()` | ondemand sampling rate set to the interactive value |
//! | `set_interactive(on)` | ondemand sampling rate set to 50 ms (on) or 500 ms (off) |
//! | `hint(INTERACTION \| CPU_BOOST, n)` | `n` (default 1) written to the governor's `boostpulse` |
//!
//! Only the `ondemand` and `interactive` governors are supported. Under any
//! other governor every call is a no-op.
//!
//! # Quick Start
//!
//! ```no_run
//! use powerhint::{GovernorController, PowerHint};
//!
//! let controller = GovernorController::new();
//! controller.init();
//!
//! // user touched the screen
//! controller.hint(PowerHint::Interaction, None);
//!
//! // screen off
//! controller.set_interactive(false);
//! ```
//!
//! # Error Handling
//!
//! The host-facing calls never fail: errors are logged through `tracing` and
//! swallowed. The fallible building blocks ([`GovernorController::boost`],
//! [`GovernorController::apply_sampling_rate`],
//! [`GovernorController::read_governor`]) return [`Result<T, Error>`].
//!
//! # Thread Safety
//!
//! [`GovernorController`] is `Send + Sync` and meant to be shared between the
//! threads the host delivers hints on.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)] // sysfs file names without backticks

pub mod config;
pub mod controller;
pub mod error;
pub mod governor;
pub mod hal;
pub mod sysfs;

// Re-export main types for convenience
pub use config::{GovernorConfig, SysfsPaths};
pub use controller::{BoostHandleState, GovernorController};
pub use error::{Error, Result};
pub use governor::Governor;
pub use hal::{ModuleInfo, PowerHint, PowerModule};
pub use sysfs::{FsBackend, PulseSink, SysfsBackend};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Check if we're running on Linux.
#[must_use]
pub const fn is_linux() -> bool {
    cfg!(target_os = "linux")
}

/// Check if the cpufreq scaling governor is readable on this system.
#[must_use]
pub fn is_available() -> bool {
    is_linux() && GovernorController::new().read_governor().is_ok()
}
