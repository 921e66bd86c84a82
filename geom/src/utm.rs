//! WGS84 to UTM, using the Krüger series for transverse Mercator. Accurate to well under a
//! millimeter within a zone, which is far more than street geometry needs.

use serde::{Deserialize, Serialize};

use crate::LonLat;

const WGS84_A: f64 = 6_378_137.0;
const WGS84_F: f64 = 1.0 / 298.257_223_563;
const SCALE_FACTOR: f64 = 0.9996;
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// One of the 60 six-degree UTM zones, in one hemisphere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmZone {
    pub number: u8,
    pub northern: bool,
}

impl UtmZone {
    pub fn new(number: u8, northern: bool) -> UtmZone {
        UtmZone {
            number: number.clamp(1, 60),
            northern,
        }
    }

    /// The standard zone containing a point: `floor((lon + 180) / 6) + 1`, with the hemisphere
    /// picked by the sign of the latitude. The antimeridian belongs to zone 60.
    pub fn containing(pt: LonLat) -> UtmZone {
        let raw = ((pt.longitude + 180.0) / 6.0).floor() as i64 + 1;
        UtmZone::new(raw.clamp(1, 60) as u8, pt.latitude >= 0.0)
    }

    pub fn epsg(&self) -> u32 {
        let base = if self.northern { 32600 } else { 32700 };
        base + u32::from(self.number)
    }

    /// Like "33N"
    pub fn label(&self) -> String {
        format!("{}{}", self.number, if self.northern { "N" } else { "S" })
    }

    pub fn central_meridian(&self) -> f64 {
        f64::from(self.number) * 6.0 - 183.0
    }

    /// Returns (easting, northing) in meters. Points outside the zone are still projected using
    /// the zone's central meridian, so one dataset stays in one continuous frame. The false
    /// northing comes from the zone's hemisphere, not the point's.
    pub fn project(&self, pt: LonLat) -> (f64, f64) {
        let n = WGS84_F / (2.0 - WGS84_F);
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let big_a = WGS84_A / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0);
        let alpha = [
            n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0,
            13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0,
            61.0 * n3 / 240.0 - 103.0 * n4 / 140.0,
            49561.0 * n4 / 161_280.0,
        ];
        let ecc = 2.0 * n.sqrt() / (1.0 + n);

        let phi = pt.latitude.to_radians();
        let dlambda = (pt.longitude - self.central_meridian()).to_radians();

        let sin_phi = phi.sin();
        let t = (sin_phi.atanh() - ecc * (ecc * sin_phi).atanh()).sinh();
        let xi = t.atan2(dlambda.cos());
        let eta = (dlambda.sin() / (1.0 + t * t).sqrt()).atanh();

        let mut easting = eta;
        let mut northing = xi;
        for (idx, a) in alpha.iter().enumerate() {
            let j = 2.0 * (idx as f64 + 1.0);
            easting += a * (j * xi).cos() * (j * eta).sinh();
            northing += a * (j * xi).sin() * (j * eta).cosh();
        }
        easting = FALSE_EASTING + SCALE_FACTOR * big_a * easting;
        northing *= SCALE_FACTOR * big_a;
        if !self.northern {
            northing += FALSE_NORTHING_SOUTH;
        }
        (easting, northing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_selection() {
        for (lon, lat, label, epsg) in [
            (-122.3, 47.6, "10N", 32610),
            (16.87, 41.12, "33N", 32633),
            (151.2, -33.9, "56S", 32756),
            (-180.0, 0.0, "1N", 32601),
            (180.0, 10.0, "60N", 32660),
        ] {
            let zone = UtmZone::containing(LonLat::new(lon, lat));
            assert_eq!(zone.label(), label);
            assert_eq!(zone.epsg(), epsg);
        }
    }

    #[test]
    fn known_points() {
        let zone = UtmZone::new(32, true);
        assert_eq!(zone.central_meridian(), 9.0);

        // On the equator and the central meridian
        let (e, n) = zone.project(LonLat::new(9.0, 0.0));
        assert!((e - 500_000.0).abs() < 1e-6);
        assert!(n.abs() < 1e-6);

        // Along the central meridian, northing is the scaled meridian arc. The arc to 45 degrees
        // on WGS84 is 4,984,944.378m.
        let (e, n) = zone.project(LonLat::new(9.0, 45.0));
        assert!((e - 500_000.0).abs() < 1e-6);
        assert!((n - 0.9996 * 4_984_944.378).abs() < 0.01);

        // Symmetric about the central meridian
        let (east, _) = zone.project(LonLat::new(10.0, 45.0));
        let (west, _) = zone.project(LonLat::new(8.0, 45.0));
        assert!(((east - 500_000.0) + (west - 500_000.0)).abs() < 1e-6);
    }

    #[test]
    fn southern_false_northing() {
        let south = UtmZone::new(56, false);
        let north = UtmZone::new(56, true);
        let pt = LonLat::new(151.2, -33.9);
        let (e1, n1) = south.project(pt);
        let (e2, n2) = north.project(pt);
        assert_eq!(e1, e2);
        assert!((n1 - n2 - 10_000_000.0).abs() < 1e-6);
        assert!(n1 > 0.0 && n2 < 0.0);
    }

    #[test]
    fn local_distances_match() {
        // A kilometer or so apart; UTM distance is scaled by ~0.9996 near the central meridian,
        // and haversine uses a sphere, so allow half a percent.
        let zone = UtmZone::new(33, true);
        let a = LonLat::new(15.0, 41.12);
        let b = LonLat::new(15.01, 41.13);
        let (x1, y1) = zone.project(a);
        let (x2, y2) = zone.project(b);
        let projected = ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt();
        let expected = a.gps_dist(b).inner_meters();
        assert!(
            (projected - expected).abs() / expected < 0.005,
            "{} vs {}",
            projected,
            expected
        );
    }
}
