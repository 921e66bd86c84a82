use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Distance;

/// A WGS84 coordinate. Longitude is x, latitude is y.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> LonLat {
        LonLat {
            longitude: lon,
            latitude: lat,
        }
    }

    pub fn x(&self) -> f64 {
        self.longitude
    }

    pub fn y(&self) -> f64 {
        self.latitude
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Haversine distance
    pub fn gps_dist(self, other: LonLat) -> Distance {
        let earth_radius_m = 6_371_000.0;
        let lon1 = self.longitude.to_radians();
        let lon2 = other.longitude.to_radians();
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();

        let delta_lat = lat2 - lat1;
        let delta_lon = lon2 - lon1;

        let a = (delta_lat / 2.0).sin().powi(2)
            + (delta_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        Distance::meters(earth_radius_m * c)
    }

    /// The arithmetic mean of all points. Returns `None` for an empty input.
    pub fn center(pts: &[LonLat]) -> Option<LonLat> {
        if pts.is_empty() {
            return None;
        }
        let mut lon = 0.0;
        let mut lat = 0.0;
        for pt in pts {
            lon += pt.longitude;
            lat += pt.latitude;
        }
        let len = pts.len() as f64;
        Some(LonLat {
            longitude: lon / len,
            latitude: lat / len,
        })
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LonLat({0}, {1})", self.longitude, self.latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_the_mean() {
        let pts = vec![
            LonLat::new(-122.0, 47.0),
            LonLat::new(-122.2, 47.2),
            LonLat::new(-122.1, 47.1),
        ];
        let center = LonLat::center(&pts).unwrap();
        assert!((center.longitude - -122.1).abs() < 1e-9);
        assert!((center.latitude - 47.1).abs() < 1e-9);
        assert!(LonLat::center(&[]).is_none());
    }

    #[test]
    fn validity_and_distance() {
        assert!(LonLat::new(180.0, -90.0).is_valid());
        assert!(!LonLat::new(181.0, 0.0).is_valid());
        assert!(!LonLat::new(0.0, f64::NAN).is_valid());

        // One degree of latitude is roughly 111km everywhere
        let d = LonLat::new(10.0, 50.0).gps_dist(LonLat::new(10.0, 51.0));
        assert!((d.inner_meters() - 111_195.0).abs() < 100.0);
    }
}
