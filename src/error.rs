//! Failures reported by the analytics core.
//!
//! Each error is scoped to a single computation call; nothing here is fatal
//! to the process and nothing is retried.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// The requested window holds no records, so there is no current value.
    #[error("no measurements in the requested window")]
    EmptyWindow,

    /// A computed denominator came out as zero.
    #[error("cannot compute {quantity}: denominator is zero")]
    DivisionByZero { quantity: &'static str },

    /// The region name is not in the fixed catalog (exact match only).
    #[error("unknown region '{0}'")]
    UnknownRegion(String),
}

pub type Result<T, E = AnalyticsError> = std::result::Result<T, E>;
