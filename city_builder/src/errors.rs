use std::{error, fmt};

/// Dataset-level failures. Anything that goes wrong with a single way or tag is logged and
/// skipped instead; these abort the whole run before any output is written.
#[derive(Clone, Debug, PartialEq)]
pub enum CityError {
    /// The topology has no nodes, so there's nothing to anchor a frame on.
    EmptyTopology,
    /// Projecting a point produced something non-finite.
    BadProjection { lat: f64, lon: f64, reason: String },
    InvalidConfig(String),
}

impl fmt::Display for CityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CityError::EmptyTopology => write!(f, "the map doesn't contain any nodes"),
            CityError::BadProjection { lat, lon, reason } => {
                write!(f, "can't project ({}, {}): {}", lat, lon, reason)
            }
            CityError::InvalidConfig(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl error::Error for CityError {}
