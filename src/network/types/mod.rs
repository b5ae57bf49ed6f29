//! Typed limit values parsed from the command line.

pub mod limit_spec;
pub mod rate_unit;

pub use limit_spec::{LimitSpec, RateValueError, ValidationError};
pub use rate_unit::{RateUnit, UnknownRateUnit};
