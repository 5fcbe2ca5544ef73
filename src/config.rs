//! Controller configuration: sysfs locations and tunable values.
//!
//! The defaults match a stock Linux cpufreq layout. Every path can be moved
//! below another root with [`SysfsPaths::under_root`], which is how tests
//! point a controller at a temporary directory tree.
//!
//! # Example
//!
//! ```
//! use powerhint::config::{GovernorConfig, SysfsPaths};
//!
//! let config = GovernorConfig::default()
//!     .with_paths(SysfsPaths::under_root("/tmp/fake-sysfs"))
//!     .with_default_boost_duration(2);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Current scaling governor of cpu0.
pub const SCALING_GOVERNOR_PATH: &str = "/sys/devices/system/cpu/cpu0/cpufreq/scaling_governor";
/// Boost pulse interface of the ondemand governor.
pub const BOOSTPULSE_ONDEMAND_PATH: &str = "/sys/devices/system/cpu/cpufreq/ondemand/boostpulse";
/// Boost pulse interface of the interactive governor.
pub const BOOSTPULSE_INTERACTIVE_PATH: &str =
    "/sys/devices/system/cpu/cpufreq/interactive/boostpulse";
/// Sampling rate tunable of the ondemand governor.
pub const SAMPLING_RATE_ONDEMAND_PATH: &str =
    "/sys/devices/system/cpu/cpufreq/ondemand/sampling_rate";

/// Sampling rate (µs) while the device is interactive.
pub const SAMPLING_RATE_SCREEN_ON: u32 = 50_000;
/// Sampling rate (µs) while the device is idle.
pub const SAMPLING_RATE_SCREEN_OFF: u32 = 500_000;
/// Boost pulse duration written when a hint carries no payload.
pub const DEFAULT_BOOST_DURATION: i32 = 1;

/// Environment variable that re-roots all sysfs paths.
pub const SYSFS_ROOT_ENV: &str = "POWERHINT_SYSFS_ROOT";

/// Locations of the sysfs files the controller touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysfsPaths {
    /// File holding the active governor name.
    pub scaling_governor: PathBuf,
    /// Boostpulse file used while `ondemand` is active.
    pub boostpulse_ondemand: PathBuf,
    /// Boostpulse file used while `interactive` is active.
    pub boostpulse_interactive: PathBuf,
    /// Sampling rate file of the `ondemand` governor.
    pub sampling_rate_ondemand: PathBuf,
}

impl Default for SysfsPaths {
    fn default() -> Self {
        Self {
            scaling_governor: PathBuf::from(SCALING_GOVERNOR_PATH),
            boostpulse_ondemand: PathBuf::from(BOOSTPULSE_ONDEMAND_PATH),
            boostpulse_interactive: PathBuf::from(BOOSTPULSE_INTERACTIVE_PATH),
            sampling_rate_ondemand: PathBuf::from(SAMPLING_RATE_ONDEMAND_PATH),
        }
    }
}

impl SysfsPaths {
    /// Default layout placed below `root` instead of `/`.
    ///
    /// `under_root("/mnt/target")` maps the governor file to
    /// `/mnt/target/sys/devices/system/cpu/cpu0/cpufreq/scaling_governor`.
    #[must_use]
    pub fn under_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let rebase = |p: &str| root.join(p.trim_start_matches('/'));
        Self {
            scaling_governor: rebase(SCALING_GOVERNOR_PATH),
            boostpulse_ondemand: rebase(BOOSTPULSE_ONDEMAND_PATH),
            boostpulse_interactive: rebase(BOOSTPULSE_INTERACTIVE_PATH),
            sampling_rate_ondemand: rebase(SAMPLING_RATE_ONDEMAND_PATH),
        }
    }

    /// Iterate over every configured path.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [
            self.scaling_governor.as_path(),
            self.boostpulse_ondemand.as_path(),
            self.boostpulse_interactive.as_path(),
            self.sampling_rate_ondemand.as_path(),
        ]
        .into_iter()
    }
}

/// Full configuration of a [`GovernorController`](crate::GovernorController).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernorConfig {
    /// Sysfs file locations.
    pub paths: SysfsPaths,
    /// Sampling rate (µs) written by `set_interactive(true)`.
    pub sampling_rate_screen_on: u32,
    /// Sampling rate (µs) written by `set_interactive(false)`.
    pub sampling_rate_screen_off: u32,
    /// Pulse duration used when a boost hint has no payload.
    pub default_boost_duration: i32,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            paths: SysfsPaths::default(),
            sampling_rate_screen_on: SAMPLING_RATE_SCREEN_ON,
            sampling_rate_screen_off: SAMPLING_RATE_SCREEN_OFF,
            default_boost_duration: DEFAULT_BOOST_DURATION,
        }
    }
}

impl GovernorConfig {
    /// Default configuration, re-rooted when `POWERHINT_SYSFS_ROOT` is set.
    #[must_use]
    pub fn from_env() -> Self {
        match env::var_os(SYSFS_ROOT_ENV) {
            Some(root) if !root.is_empty() => {
                Self::default().with_paths(SysfsPaths::under_root(root))
            }
            _ => Self::default(),
        }
    }

    /// Replace the sysfs paths.
    #[must_use]
    pub fn with_paths(mut self, paths: SysfsPaths) -> Self {
        self.paths = paths;
        self
    }

    /// Set the screen-on and screen-off sampling rates.
    #[must_use]
    pub const fn with_sampling_rates(mut self, screen_on: u32, screen_off: u32) -> Self {
        self.sampling_rate_screen_on = screen_on;
        self.sampling_rate_screen_off = screen_off;
        self
    }

    /// Set the pulse duration used for boost hints without payload.
    #[must_use]
    pub const fn with_default_boost_duration(mut self, duration: i32) -> Self {
        self.default_boost_duration = duration;
        self
    }

    /// Sampling rate for the given interactivity state.
    #[must_use]
    pub const fn sampling_rate(&self, interactive: bool) -> u32 {
        if interactive {
            self.sampling_rate_screen_on
        } else {
            self.sampling_rate_screen_off
        }
    }

    /// Check the configuration for values the kernel would reject.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a sampling rate is zero, the default boost
    /// duration is not positive, or a path is empty.
    pub fn validate(&self) -> Result<()> {
        if self.sampling_rate_screen_on == 0 || self.sampling_rate_screen_off == 0 {
            return Err(Error::invalid_input("sampling rate cannot be zero"));
        }

        if self.default_boost_duration <= 0 {
            return Err(Error::invalid_input(format!(
                "default boost duration must be positive, got {}",
                self.default_boost_duration
            )));
        }

        if self.paths.iter().any(|p| p.as_os_str().is_empty()) {
            return Err(Error::invalid_input("sysfs path cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let paths = SysfsPaths::default();
        assert_eq!(
            paths.scaling_governor,
            Path::new("/sys/devices/system/cpu/cpu0/cpufreq/scaling_governor")
        );
        assert_eq!(
            paths.boostpulse_ondemand,
            Path::new("/sys/devices/system/cpu/cpufreq/ondemand/boostpulse")
        );
        assert_eq!(
            paths.boostpulse_interactive,
            Path::new("/sys/devices/system/cpu/cpufreq/interactive/boostpulse")
        );
        assert_eq!(
            paths.sampling_rate_ondemand,
            Path::new("/sys/devices/system/cpu/cpufreq/ondemand/sampling_rate")
        );
    }

    #[test]
    fn test_under_root_rebases_every_path() {
        let paths = SysfsPaths::under_root("/tmp/root");
        for path in paths.iter() {
            assert!(path.starts_with("/tmp/root/sys/devices/system/cpu"), "{}", path.display());
        }
        assert_eq!(
            paths.sampling_rate_ondemand,
            Path::new("/tmp/root/sys/devices/system/cpu/cpufreq/ondemand/sampling_rate")
        );
    }

    #[test]
    fn test_default_constants() {
        let config = GovernorConfig::default();
        assert_eq!(config.sampling_rate_screen_on, 50_000);
        assert_eq!(config.sampling_rate_screen_off, 500_000);
        assert_eq!(config.default_boost_duration, 1);
        assert_eq!(config.sampling_rate(true), 50_000);
        assert_eq!(config.sampling_rate(false), 500_000);
    }

    #[test]
    fn test_builder_methods() {
        let config = GovernorConfig::default()
            .with_sampling_rates(20_000, 200_000)
            .with_default_boost_duration(3);
        assert_eq!(config.sampling_rate(true), 20_000);
        assert_eq!(config.sampling_rate(false), 200_000);
        assert_eq!(config.default_boost_duration, 3);
    }

    #[test]
    fn test_validate_default_ok() {
        assert!(GovernorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_rate() {
        let err = GovernorConfig::default()
            .with_sampling_rates(0, 500_000)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn test_validate_rejects_non_positive_duration() {
        for duration in [0, -1] {
            let result = GovernorConfig::default()
                .with_default_boost_duration(duration)
                .validate();
            assert!(result.is_err(), "duration {duration} accepted");
        }
    }

    #[test]
    fn test_validate_rejects_empty_path() {
        let mut paths = SysfsPaths::default();
        paths.boostpulse_interactive = PathBuf::new();
        let result = GovernorConfig::default().with_paths(paths).validate();
        assert!(result.is_err());
    }
}
