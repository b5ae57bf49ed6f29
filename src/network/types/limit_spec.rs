//! Validated per-IP limit, parsed from the `add` command arguments.

use crate::commands::USAGE;
use crate::network::types::rate_unit::{RateUnit, UnknownRateUnit};
use std::net::{AddrParseError, IpAddr, Ipv4Addr, Ipv6Addr};
use std::num::ParseIntError;
use thiserror::Error;

/// Errors produced while turning raw arguments into a [`LimitSpec`].
///
/// Every message starts with a stable prefix naming the offending
/// parameter, followed by the underlying parser diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("not enough arguments to 'iplimits add'\n{}", USAGE)]
    NotEnoughArguments,

    #[error("bad IP parameter: {0}")]
    BadAddress(#[source] AddrParseError),

    #[error("bad IP parameter: must be IPv4")]
    NotIpv4(Ipv6Addr),

    #[error("bad LIMIT parameter: {0}")]
    BadLimit(#[source] RateValueError),

    #[error("bad limit unit {0:?}")]
    BadUnit(String),
}

/// Diagnostic for a LIMIT argument that is not a base-10 `u32`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateValueError {
    #[error("parsing {input:?}: {source}")]
    Parse { input: String, source: ParseIntError },

    #[error("parsing {0:?}: sign prefix not allowed")]
    Signed(String),
}

/// A single rate limit for one IPv4 address, applied in both directions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LimitSpec {
    pub address: Ipv4Addr,
    pub rate_value: u32,
    pub rate_unit: RateUnit,
}

impl LimitSpec {
    pub fn new(address: Ipv4Addr, rate_value: u32, rate_unit: RateUnit) -> Self {
        Self {
            address,
            rate_value,
            rate_unit,
        }
    }

    /// Parses `IP LIMIT UNIT` from the arguments following `add`.
    ///
    /// Arguments past the third are ignored.
    ///
    /// # Arguments
    ///
    /// * `args` - Raw positional arguments
    ///
    /// # Returns
    ///
    /// * `Ok(LimitSpec)` - All three arguments are valid
    /// * `Err(ValidationError)` - The first argument that failed to validate
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, ValidationError> {
        let [ip, limit, unit, ..] = args else {
            return Err(ValidationError::NotEnoughArguments);
        };

        let address = match ip.as_ref().parse::<IpAddr>() {
            Ok(IpAddr::V4(v4)) => v4,
            Ok(IpAddr::V6(v6)) => return Err(ValidationError::NotIpv4(v6)),
            Err(e) => return Err(ValidationError::BadAddress(e)),
        };

        let rate_value = parse_rate_value(limit.as_ref()).map_err(ValidationError::BadLimit)?;

        let rate_unit = unit
            .as_ref()
            .parse::<RateUnit>()
            .map_err(|UnknownRateUnit(token)| ValidationError::BadUnit(token))?;

        Ok(Self::new(address, rate_value, rate_unit))
    }

    /// Returns the rate as nftables reads it, e.g. `2 mbytes/second`.
    pub fn rate_expression(&self) -> String {
        format!("{}{}", self.rate_value, self.rate_unit.suffix())
    }
}

/// Parses an unsigned base-10 integer that must fit in 32 bits.
///
/// `str::parse` accepts a leading `+`; a LIMIT has no sign, so it is
/// rejected here along with `-`, decimals and exponents.
fn parse_rate_value(s: &str) -> Result<u32, RateValueError> {
    if s.starts_with('+') {
        return Err(RateValueError::Signed(s.to_string()));
    }

    s.parse::<u32>().map_err(|source| RateValueError::Parse {
        input: s.to_string(),
        source,
    })
}
