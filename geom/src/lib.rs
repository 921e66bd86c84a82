//! Planar geometry in a local metric frame. Everything is in meters, with x pointing east and y
//! pointing north.

mod angle;
mod distance;
mod gps;
mod line;
mod polyline;
mod pt;
mod ring;
mod utm;

pub use crate::angle::Angle;
pub use crate::distance::Distance;
pub use crate::gps::LonLat;
pub use crate::line::Line;
pub use crate::polyline::PolyLine;
pub use crate::pt::Pt2D;
pub use crate::ring::Ring;
pub use crate::utm::UtmZone;

/// Segments shorter than this are treated as degenerate when walking a polyline.
pub const EPSILON_DIST: Distance = Distance::const_meters(0.01);

/// Rounds to a fixed number of decimal places. Output coordinates are stored this way so that
/// repeated runs produce byte-identical files.
pub fn round_to(x: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (x * factor).round() / factor
}
