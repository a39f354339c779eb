//! Travel modes
//!
//! A travel mode selects the routing engine profile. Some modes are known to
//! the crate but never sent to the engine; paths in those modes are always
//! drawn as straight lines.

use std::fmt;
use std::str::FromStr;

use crate::core::error::{suggest_mode, Error, Result};

/// Routing profile requested for a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TravelMode {
    #[default]
    Car,
    Truck,
    Foot,
    Bike,
    /// Rail has no engine profile; always resolved as a direct path
    Train,
}

/// Modes that bypass the routing engine entirely
const DIRECT_ONLY: &[TravelMode] = &[TravelMode::Train];

impl TravelMode {
    pub fn all() -> &'static [TravelMode] {
        &[
            TravelMode::Car,
            TravelMode::Truck,
            TravelMode::Foot,
            TravelMode::Bike,
            TravelMode::Train,
        ]
    }

    /// Profile name as used in the engine URL
    pub fn name(&self) -> &'static str {
        match self {
            TravelMode::Car => "car",
            TravelMode::Truck => "truck",
            TravelMode::Foot => "foot",
            TravelMode::Bike => "bike",
            TravelMode::Train => "train",
        }
    }

    /// Whether paths in this mode may be sent to the routing engine
    pub fn is_routable(&self) -> bool {
        !DIRECT_ONLY.contains(self)
    }

    fn names() -> Vec<&'static str> {
        Self::all().iter().map(TravelMode::name).collect()
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TravelMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|mode| mode.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownMode {
                input: s.to_string(),
                suggestion: suggest_mode(wanted, &Self::names()),
            })
    }
}
