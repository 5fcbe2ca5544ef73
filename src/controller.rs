//! Governor control: boost pulses and ondemand sampling rate.
//!
//! [`GovernorController`] owns the only mutable state of the crate: a lazily
//! opened, cached boostpulse handle and a warned-flag that rate-limits open
//! failure logs.
//!
//! # Boost handle lifecycle
//!
//! ```text
//! ABSENT --open success--> OPEN --write failure--> ABSENT
//! OPEN   --open / hint---> OPEN
//! ```
//!
//! The handle starts absent and is opened on the first boost hint. A failed
//! pulse drops the handle; the next hint reads the governor again and reopens
//! the interface that matches it. Pulses are never retried.
//!
//! # Example
//!
//! ```no_run
//! use powerhint::{GovernorController, PowerHint};
//!
//! let controller = GovernorController::new();
//! controller.init();
//! controller.hint(PowerHint::Interaction, None);
//! controller.set_interactive(false);
//! ```
//!
//! # Thread Safety
//!
//! The controller is `Send + Sync`. A mutex guards the cached handle and the
//! warned-flag only; pulse writes and sampling-rate writes happen outside it.

use crate::config::GovernorConfig;
use crate::error::Result;
use crate::governor::Governor;
use crate::hal::PowerHint;
use crate::sysfs::{trim_newlines, FsBackend, PulseSink, SysfsBackend};
use parking_lot::Mutex;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, instrument, trace};

/// Observable state of the cached boostpulse handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoostHandleState {
    /// No handle is cached; the next boost opens one.
    Absent,
    /// A handle is cached and reused by every boost.
    Open,
}

impl fmt::Display for BoostHandleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Open => write!(f, "open"),
        }
    }
}

struct BoostSlot<H> {
    handle: Option<Arc<H>>,
    warned: bool,
}

/// Controls the active CPU frequency governor through sysfs.
pub struct GovernorController<B: SysfsBackend = FsBackend> {
    backend: B,
    config: GovernorConfig,
    boost: Mutex<BoostSlot<B::Handle>>,
}

impl GovernorController<FsBackend> {
    /// Controller over the real sysfs with the default paths.
    #[must_use]
    pub fn new() -> Self {
        Self::build(FsBackend, GovernorConfig::default())
    }

    /// Controller over the real filesystem with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the configuration does not validate.
    pub fn with_config(config: GovernorConfig) -> Result<Self> {
        Self::with_backend(FsBackend, config)
    }

    /// Controller configured from the environment.
    ///
    /// See [`GovernorConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the resulting configuration does not validate.
    pub fn from_env() -> Result<Self> {
        Self::with_config(GovernorConfig::from_env())
    }
}

impl Default for GovernorController<FsBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: SysfsBackend> GovernorController<B> {
    /// Controller over an arbitrary backend.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the configuration does not validate.
    pub fn with_backend(backend: B, config: GovernorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(backend, config))
    }

    fn build(backend: B, config: GovernorConfig) -> Self {
        Self {
            backend,
            config,
            boost: Mutex::new(BoostSlot {
                handle: None,
                warned: false,
            }),
        }
    }

    /// The backend in use.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// The active configuration.
    pub const fn config(&self) -> &GovernorConfig {
        &self.config
    }

    /// Read the active governor name, trailing newlines stripped.
    ///
    /// Never cached: the governor can be switched at runtime.
    ///
    /// # Errors
    ///
    /// `Open` or `Read` if `scaling_governor` is not accessible.
    pub fn read_governor_name(&self) -> Result<String> {
        let raw = self
            .backend
            .read_to_string(&self.config.paths.scaling_governor)?;
        Ok(trim_newlines(&raw).to_string())
    }

    /// Read and classify the active governor.
    ///
    /// # Errors
    ///
    /// `Open` or `Read` if `scaling_governor` is not accessible.
    pub fn read_governor(&self) -> Result<Governor> {
        self.read_governor_name().map(|name| Governor::parse(&name))
    }

    fn boostpulse_path(&self, governor: &Governor) -> Option<&Path> {
        match governor {
            Governor::Ondemand => Some(&self.config.paths.boostpulse_ondemand),
            Governor::Interactive => Some(&self.config.paths.boostpulse_interactive),
            Governor::Other(_) => None,
        }
    }

    /// Return the cached boostpulse handle, opening it if needed.
    ///
    /// Returns `Ok(None)` when the active governor has no boostpulse
    /// interface. Open failures are logged once until the flag is reset by a
    /// successful open or a failed pulse.
    ///
    /// # Errors
    ///
    /// Returns the governor read error or the boostpulse open error.
    #[instrument(level = "debug", skip(self))]
    pub fn open_boost_handle(&self) -> Result<Option<Arc<B::Handle>>> {
        let mut slot = self.boost.lock();

        if let Some(handle) = &slot.handle {
            return Ok(Some(Arc::clone(handle)));
        }

        let name = match self.read_governor_name() {
            Ok(name) => name,
            Err(err) => {
                error!("Can't read scaling governor: {err}");
                slot.warned = true;
                return Err(err);
            }
        };
        let governor = Governor::parse(&name);

        let Some(path) = self.boostpulse_path(&governor) else {
            debug!(governor = %name, "No boostpulse interface for governor");
            return Ok(None);
        };

        match self.backend.open_write_only(path) {
            Ok(handle) => {
                let handle = Arc::new(handle);
                slot.handle = Some(Arc::clone(&handle));
                slot.warned = false;
                debug!(kind = ?governor, "Opened {name} boostpulse interface");
                Ok(Some(handle))
            }
            Err(err) => {
                if !slot.warned {
                    error!("Boostpulse open failed: {err}");
                    slot.warned = true;
                }
                Err(err)
            }
        }
    }

    // Only forget the handle if it is still the one that failed; another
    // thread may already have replaced it.
    fn release_boost_handle(&self, failed: &Arc<B::Handle>) {
        let mut slot = self.boost.lock();
        if slot
            .handle
            .as_ref()
            .is_some_and(|cached| Arc::ptr_eq(cached, failed))
        {
            slot.handle = None;
        }
        slot.warned = false;
    }

    /// Send one boost pulse of `duration`.
    ///
    /// Returns `Ok(false)` if the active governor has no boostpulse
    /// interface. A failed write drops the cached handle and is not retried.
    ///
    /// # Errors
    ///
    /// Returns the open error or the pulse write error.
    pub fn boost(&self, duration: i32) -> Result<bool> {
        let Some(handle) = self.open_boost_handle()? else {
            return Ok(false);
        };

        if let Err(err) = handle.write_pulse(&duration.to_string()) {
            self.release_boost_handle(&handle);
            return Err(err);
        }
        Ok(true)
    }

    /// Deliver a power hint.
    ///
    /// `Interaction` and `CpuBoost` send a boost pulse of `payload` (or the
    /// configured default). All other hints are ignored.
    #[instrument(level = "debug", skip(self))]
    pub fn hint(&self, hint: PowerHint, payload: Option<i32>) {
        match hint {
            PowerHint::Interaction | PowerHint::CpuBoost => {
                let duration = payload.unwrap_or(self.config.default_boost_duration);
                match self.boost(duration) {
                    Err(err) if err.is_write() => error!("Boost pulse dropped: {err}"),
                    // open failures are logged by open_boost_handle
                    Ok(_) | Err(_) => {}
                }
            }
            _ => trace!("Ignoring {hint} hint"),
        }
    }

    /// Write the sampling rate for the given interactivity state.
    ///
    /// Returns `Ok(false)` without writing unless `ondemand` is active.
    ///
    /// # Errors
    ///
    /// Returns the governor read error or the sampling rate write error.
    pub fn apply_sampling_rate(&self, on: bool) -> Result<bool> {
        let governor = self.read_governor()?;
        if !governor.has_sampling_rate() {
            trace!(%governor, "Skipping sysfs write to sampling_rate, not using ondemand");
            return Ok(false);
        }

        let rate = self.config.sampling_rate(on);
        self.backend
            .write_str(&self.config.paths.sampling_rate_ondemand, &rate.to_string())?;
        debug!(rate, "Set ondemand sampling rate");
        Ok(true)
    }

    /// Switch between the interactive and idle sampling rate.
    ///
    /// Failures are logged.
    #[instrument(level = "debug", skip(self))]
    pub fn set_interactive(&self, on: bool) {
        if let Err(err) = self.apply_sampling_rate(on) {
            error!("Failed to set sampling rate: {err}");
        }
    }

    /// Establish the interactive sampling rate at startup.
    #[instrument(level = "debug", skip(self))]
    pub fn init(&self) {
        self.set_interactive(true);
    }

    /// Current state of the cached boostpulse handle.
    pub fn boost_state(&self) -> BoostHandleState {
        if self.boost.lock().handle.is_some() {
            BoostHandleState::Open
        } else {
            BoostHandleState::Absent
        }
    }

    /// Whether boostpulse open failures are currently suppressed.
    pub fn is_warned(&self) -> bool {
        self.boost.lock().warned
    }
}

impl<B: SysfsBackend> fmt::Debug for GovernorController<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.boost.lock();
        f.debug_struct("GovernorController")
            .field("config", &self.config)
            .field("boost_handle_open", &slot.handle.is_some())
            .field("warned", &slot.warned)
            .finish_non_exhaustive()
    }
}
