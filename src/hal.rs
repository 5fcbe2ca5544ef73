//! Host-facing power module surface.
//!
//! A device power-management framework drives a power module through three
//! entry points: `init`, `set_interactive` and `power_hint`. None of them
//! report a status; every outcome is a sysfs side effect or a log line.
//! [`PowerModule`] is that capability set, implemented by
//! [`GovernorController`].
//!
//! # Example
//!
//! ```no_run
//! use powerhint::hal::{PowerHint, PowerModule};
//! use powerhint::GovernorController;
//!
//! let module: Box<dyn PowerModule> = Box::new(GovernorController::new());
//! module.init();
//! module.power_hint(PowerHint::from_raw(0x02), None);
//! ```

use crate::controller::GovernorController;
use crate::sysfs::SysfsBackend;
use std::fmt;

/// Power hint kinds sent by the host, with their raw host codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerHint {
    /// Display vsync activity changed (`0x01`).
    Vsync,
    /// User interaction with the device (`0x02`).
    Interaction,
    /// Video encoding started or stopped (`0x03`).
    VideoEncode,
    /// Video decoding started or stopped (`0x04`).
    VideoDecode,
    /// Low power mode toggled (`0x05`).
    LowPower,
    /// Explicit CPU boost request (`0x10`).
    CpuBoost,
    /// Application launch (`0x11`).
    LaunchBoost,
    /// Audio playback state (`0x12`).
    Audio,
    /// Power profile selection (`0x13`).
    SetProfile,
    /// Any code this module does not know.
    Unknown(u32),
}

impl PowerHint {
    /// Decode a raw host hint code.
    #[must_use]
    pub const fn from_raw(code: u32) -> Self {
        match code {
            0x01 => Self::Vsync,
            0x02 => Self::Interaction,
            0x03 => Self::VideoEncode,
            0x04 => Self::VideoDecode,
            0x05 => Self::LowPower,
            0x10 => Self::CpuBoost,
            0x11 => Self::LaunchBoost,
            0x12 => Self::Audio,
            0x13 => Self::SetProfile,
            other => Self::Unknown(other),
        }
    }

    /// Raw host hint code.
    #[must_use]
    pub const fn as_raw(self) -> u32 {
        match self {
            Self::Vsync => 0x01,
            Self::Interaction => 0x02,
            Self::VideoEncode => 0x03,
            Self::VideoDecode => 0x04,
            Self::LowPower => 0x05,
            Self::CpuBoost => 0x10,
            Self::LaunchBoost => 0x11,
            Self::Audio => 0x12,
            Self::SetProfile => 0x13,
            Self::Unknown(code) => code,
        }
    }

    /// Whether this hint triggers a boost pulse.
    #[must_use]
    pub const fn is_boost(self) -> bool {
        matches!(self, Self::Interaction | Self::CpuBoost)
    }
}

impl From<u32> for PowerHint {
    fn from(code: u32) -> Self {
        Self::from_raw(code)
    }
}

impl fmt::Display for PowerHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vsync => write!(f, "VSYNC"),
            Self::Interaction => write!(f, "INTERACTION"),
            Self::VideoEncode => write!(f, "VIDEO_ENCODE"),
            Self::VideoDecode => write!(f, "VIDEO_DECODE"),
            Self::LowPower => write!(f, "LOW_POWER"),
            Self::CpuBoost => write!(f, "CPU_BOOST"),
            Self::LaunchBoost => write!(f, "LAUNCH_BOOST"),
            Self::Audio => write!(f, "AUDIO"),
            Self::SetProfile => write!(f, "SET_PROFILE"),
            Self::Unknown(code) => write!(f, "UNKNOWN({code:#x})"),
        }
    }
}

/// Registration metadata reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleInfo {
    /// Module identifier the host looks up.
    pub id: &'static str,
    /// Human-readable module name.
    pub name: &'static str,
    /// Module author.
    pub author: &'static str,
    /// Module API major version.
    pub version_major: u16,
    /// Module API minor version.
    pub version_minor: u16,
}

impl ModuleInfo {
    /// Metadata of the governor power module.
    pub const DEFAULT: Self = Self {
        id: "power",
        name: "CPU Governor Power HAL",
        author: "powerhint contributors",
        version_major: 1,
        version_minor: 0,
    };
}

impl Default for ModuleInfo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ModuleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) v{}.{}",
            self.name, self.id, self.version_major, self.version_minor
        )
    }
}

/// Capability set a host calls into.
pub trait PowerModule: Send + Sync {
    /// Registration metadata.
    fn info(&self) -> ModuleInfo {
        ModuleInfo::DEFAULT
    }

    /// Called once when the host starts the module.
    fn init(&self);

    /// Called when the device becomes interactive (`true`) or idle (`false`).
    fn set_interactive(&self, on: bool);

    /// Called for each power hint, with an optional integer payload.
    fn power_hint(&self, hint: PowerHint, data: Option<i32>);
}

impl<B: SysfsBackend> PowerModule for GovernorController<B> {
    fn init(&self) {
        Self::init(self);
    }

    fn set_interactive(&self, on: bool) {
        Self::set_interactive(self, on);
    }

    fn power_hint(&self, hint: PowerHint, data: Option<i32>) {
        self.hint(hint, data);
    }
}
