//! Error types.
//!
//! Only recoverable construction and configuration failures are reported
//! through [`PhysicsError`]. Broken invariants inside a running scene (zero
//! mass, stale body references, bad indices) panic instead.

use std::fmt;

/// Error type for fallible geometry and configuration operations.
#[derive(Clone, Debug, PartialEq)]
pub enum PhysicsError {
    /// A polygon needs at least three vertices.
    TooFewVertices {
        /// Number of vertices supplied
        count: usize,
    },
    /// The polygon's signed area is (numerically) zero, so it has no centroid.
    DegeneratePolygon {
        /// The computed signed area
        area: f64,
    },
    /// A configuration value is out of range.
    InvalidConfiguration {
        /// Description of the invalid value
        reason: &'static str,
    },
    /// Configuration text could not be parsed.
    ConfigParse {
        /// Parser message
        message: String,
    },
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewVertices { count } => {
                write!(f, "polygon needs at least 3 vertices (got {count})")
            }
            Self::DegeneratePolygon { area } => {
                write!(f, "degenerate polygon (signed area {area})")
            }
            Self::InvalidConfiguration { reason } => {
                write!(f, "invalid configuration: {reason}")
            }
            Self::ConfigParse { message } => {
                write!(f, "failed to parse configuration: {message}")
            }
        }
    }
}

impl std::error::Error for PhysicsError {}

impl From<serde_json::Error> for PhysicsError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PhysicsError>;
