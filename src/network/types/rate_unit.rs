use std::fmt;
use std::fmt::Formatter;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a unit token is not one of `pps`, `bps`, `kbps` or `mbps`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rate unit {0:?}")]
pub struct UnknownRateUnit(pub String);

/// Unit of a rate limit, as typed by the operator.
///
/// Each unit maps onto the suffix nftables expects right after the
/// numeric value in a `limit rate` expression.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RateUnit {
    /// Packets per second
    Pps,
    /// Bytes per second
    Bps,
    /// Kilobytes per second
    Kbps,
    /// Megabytes per second
    Mbps,
}

impl RateUnit {
    /// Every unit, in the order they are listed in the usage text.
    pub const ALL: [RateUnit; 4] = [RateUnit::Pps, RateUnit::Bps, RateUnit::Kbps, RateUnit::Mbps];

    /// Returns the command-line token for this unit.
    pub fn token(&self) -> &'static str {
        match self {
            RateUnit::Pps => "pps",
            RateUnit::Bps => "bps",
            RateUnit::Kbps => "kbps",
            RateUnit::Mbps => "mbps",
        }
    }

    /// Returns the nftables text appended to the rate value.
    ///
    /// The leading space on the byte units is part of the nftables
    /// grammar; `pps` has none because a bare `/second` counts packets.
    pub fn suffix(&self) -> &'static str {
        match self {
            RateUnit::Pps => "/second",
            RateUnit::Bps => " bytes/second",
            RateUnit::Kbps => " kbytes/second",
            RateUnit::Mbps => " mbytes/second",
        }
    }
}

impl FromStr for RateUnit {
    type Err = UnknownRateUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RateUnit::ALL
            .into_iter()
            .find(|unit| unit.token() == s)
            .ok_or_else(|| UnknownRateUnit(s.to_string()))
    }
}

impl fmt::Display for RateUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
