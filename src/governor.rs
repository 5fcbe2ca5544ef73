//! CPU frequency governors the controller knows how to talk to.

use std::fmt;
use std::str::FromStr;

pub(crate) mod strings {
    pub const ONDEMAND: &str = "ondemand";
    pub const INTERACTIVE: &str = "interactive";
}

/// Scaling governor as read from `scaling_governor`.
///
/// Only `ondemand` and `interactive` expose a boostpulse interface; everything
/// else (`performance`, `schedutil`, ...) is carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Governor {
    /// The `ondemand` governor (boostpulse and sampling_rate tunables).
    Ondemand,
    /// The `interactive` governor (boostpulse tunable).
    Interactive,
    /// Any other governor name.
    Other(String),
}

impl Governor {
    /// Classify a trimmed governor name.
    ///
    /// Matching is by prefix, so vendor variants such as `ondemand_x` are
    /// treated like their base governor.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name.starts_with(strings::ONDEMAND) {
            Self::Ondemand
        } else if name.starts_with(strings::INTERACTIVE) {
            Self::Interactive
        } else {
            Self::Other(name.to_string())
        }
    }

    /// Whether this governor accepts boost pulses.
    #[must_use]
    pub const fn supports_boost(&self) -> bool {
        matches!(self, Self::Ondemand | Self::Interactive)
    }

    /// Whether this governor exposes the ondemand sampling rate.
    #[must_use]
    pub const fn has_sampling_rate(&self) -> bool {
        matches!(self, Self::Ondemand)
    }

    /// Governor name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ondemand => strings::ONDEMAND,
            Self::Interactive => strings::INTERACTIVE,
            Self::Other(name) => name,
        }
    }
}

impl FromStr for Governor {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Governor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
