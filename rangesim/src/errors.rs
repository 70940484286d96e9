use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors raised while configuring a sensor or assembling its frame output. None of these are
/// recoverable at runtime; they point at a configuration or wiring mistake in the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorError {
    /// The sensor configuration is malformed, e.g. a non-positive angular resolution or an
    /// inverted working distance.
    InvalidParameter(String),

    /// A ray was built from a direction which has no usable length.
    InvalidRay,

    /// The number of hit results does not match the number of rays in the fan.
    ResultMismatch { rays: usize, results: usize },
}

impl SensorError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SensorError::InvalidParameter(msg.into())
    }
}

impl Display for SensorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorError::InvalidParameter(msg) => write!(f, "invalid sensor parameter: {}", msg),
            SensorError::InvalidRay => write!(f, "ray direction has zero or non-finite length"),
            SensorError::ResultMismatch { rays, results } => write!(
                f,
                "expected one hit result per ray, got {} results for {} rays",
                results, rays
            ),
        }
    }
}

impl Error for SensorError {}
