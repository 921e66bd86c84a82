use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An angle, stored in radians. 0 points east and angles grow counter-clockwise, so this doubles
/// as a yaw in an east-north-up frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    pub fn new_rads(rads: f64) -> Angle {
        Angle(rads)
    }

    pub fn degrees(degs: f64) -> Angle {
        Angle(degs.to_radians())
    }

    /// The direction of the vector (dx, dy).
    pub fn from_vector(dx: f64, dy: f64) -> Angle {
        Angle(dy.atan2(dx))
    }

    pub fn opposite(self) -> Angle {
        Angle(self.0 + PI)
    }

    /// The raw value, with no normalization.
    pub fn radians(self) -> f64 {
        self.0
    }

    /// Normalized into [0, 2pi)
    pub fn normalized_radians(self) -> f64 {
        self.0.rem_euclid(2.0 * PI)
    }

    pub fn normalized_degrees(self) -> f64 {
        self.normalized_radians().to_degrees()
    }

    /// Normalized into (-pi, pi]. Yaws are always reported this way.
    pub fn yaw(self) -> f64 {
        let mut rads = self.normalized_radians();
        if rads > PI {
            rads -= 2.0 * PI;
        }
        rads
    }

    pub fn approx_eq(self, other: Angle, within_degrees: f64) -> bool {
        let diff = (self.normalized_degrees() - other.normalized_degrees()).abs();
        diff < within_degrees || (360.0 - diff) < within_degrees
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Angle({} degrees)", self.normalized_degrees())
    }
}
