use std::fmt;

use geom::{round_to, LonLat, Pt2D, UtmZone};
use osm_topology::MapTopology;

use crate::export::{EnuPoint, FrameOffset, MapConfig, ProjectionCenter};
use crate::CityError;

/// Turns WGS84 into planar meters. Absolute values don't matter; the frame subtracts the
/// projected origin.
pub trait Projection {
    /// Returns (easting, northing)
    fn forward(&self, pt: LonLat) -> (f64, f64);
}

impl Projection for UtmZone {
    fn forward(&self, pt: LonLat) -> (f64, f64) {
        self.project(pt)
    }
}

/// The one local metric frame shared by everything derived from a dataset. The origin maps to
/// (0, 0), x points east and y north.
pub struct CoordinateFrame {
    origin: LonLat,
    zone: UtmZone,
    height: f64,
    offset: (f64, f64),
    projection: Box<dyn Projection>,
}

impl CoordinateFrame {
    /// Anchors the frame on the mean position of every node.
    pub fn from_topology(map: &MapTopology) -> Result<CoordinateFrame, CityError> {
        CoordinateFrame::from_points(&map.all_points())
    }

    pub fn from_points(pts: &[LonLat]) -> Result<CoordinateFrame, CityError> {
        let origin = LonLat::center(pts).ok_or(CityError::EmptyTopology)?;
        CoordinateFrame::centered_at(origin, 0.0)
    }

    /// Uses the UTM zone containing the origin.
    pub fn centered_at(origin: LonLat, height: f64) -> Result<CoordinateFrame, CityError> {
        let zone = UtmZone::containing(origin);
        CoordinateFrame::with_projection(origin, zone, height, Box::new(zone))
    }

    pub fn with_projection(
        origin: LonLat,
        zone: UtmZone,
        height: f64,
        projection: Box<dyn Projection>,
    ) -> Result<CoordinateFrame, CityError> {
        if !origin.is_valid() {
            return Err(CityError::BadProjection {
                lat: origin.latitude,
                lon: origin.longitude,
                reason: "the origin is out of range".to_string(),
            });
        }
        if !height.is_finite() {
            return Err(CityError::BadProjection {
                lat: origin.latitude,
                lon: origin.longitude,
                reason: format!("bad origin height {}", height),
            });
        }
        let (x, y) = projection.forward(origin);
        if !x.is_finite() || !y.is_finite() {
            return Err(CityError::BadProjection {
                lat: origin.latitude,
                lon: origin.longitude,
                reason: format!("the origin projected to ({}, {})", x, y),
            });
        }
        Ok(CoordinateFrame {
            origin,
            zone,
            height,
            offset: (-x, -y),
            projection,
        })
    }

    /// Geographic to local planar coordinates.
    pub fn project(&self, lat: f64, lon: f64) -> Result<Pt2D, CityError> {
        let (x, y) = self.projection.forward(LonLat::new(lon, lat));
        let (x, y) = (x + self.offset.0, y + self.offset.1);
        if !x.is_finite() || !y.is_finite() {
            return Err(CityError::BadProjection {
                lat,
                lon,
                reason: format!("projected to ({}, {})", x, y),
            });
        }
        Ok(Pt2D::new(x, y))
    }

    pub fn project_pt(&self, pt: LonLat) -> Result<Pt2D, CityError> {
        self.project(pt.latitude, pt.longitude)
    }

    /// Like `project`, with the height relative to the frame's.
    pub fn project_enu(&self, lat: f64, lon: f64, height: f64) -> Result<EnuPoint, CityError> {
        let pt = self.project(lat, lon)?;
        Ok(EnuPoint::new(pt.x(), pt.y(), height - self.height))
    }

    pub fn origin(&self) -> LonLat {
        self.origin
    }

    pub fn zone(&self) -> UtmZone {
        self.zone
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Added to projected coordinates to land in the local frame.
    pub fn offset(&self) -> (f64, f64) {
        self.offset
    }

    pub fn metadata(&self) -> MapConfig {
        MapConfig {
            origin_lat: round_to(self.origin.latitude, 9),
            origin_lon: round_to(self.origin.longitude, 9),
            utm_zone: self.zone.label(),
            gazebo_offset: FrameOffset {
                x: self.offset.0,
                y: self.offset.1,
                yaw: 0.0,
            },
        }
    }

    pub fn projection_center(&self) -> ProjectionCenter {
        ProjectionCenter {
            latitude: self.origin.latitude,
            longitude: self.origin.longitude,
            height: self.height,
        }
    }
}

impl fmt::Debug for CoordinateFrame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CoordinateFrame")
            .field("origin", &self.origin)
            .field("zone", &self.zone.label())
            .field("height", &self.height)
            .field("offset", &self.offset)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Meters are degrees times a constant. Keeps expected values exact.
    struct Flat;

    impl Projection for Flat {
        fn forward(&self, pt: LonLat) -> (f64, f64) {
            (pt.longitude * 1000.0, pt.latitude * 1000.0)
        }
    }

    #[test]
    fn origin_is_zero() {
        let pts = vec![
            LonLat::new(16.86, 41.11),
            LonLat::new(16.88, 41.13),
            LonLat::new(16.87, 41.12),
        ];
        let frame = CoordinateFrame::from_points(&pts).unwrap();
        let origin = frame.project_pt(frame.origin()).unwrap();
        assert!(origin.x().abs() < 1e-6 && origin.y().abs() < 1e-6);
        assert_eq!(frame.zone().label(), "33N");
        assert_eq!(frame.zone().epsg(), 32633);

        // East and north come out positive
        let ne = frame.project(41.13, 16.88).unwrap();
        assert!(ne.x() > 0.0 && ne.y() > 0.0);

        // Same input, same frame
        let again = CoordinateFrame::from_points(&pts).unwrap();
        assert_eq!(again.offset(), frame.offset());
        assert_eq!(again.project(41.13, 16.88).unwrap(), ne);
    }

    #[test]
    fn empty_input() {
        assert_eq!(
            CoordinateFrame::from_points(&[]).unwrap_err(),
            CityError::EmptyTopology
        );
        assert_eq!(
            CoordinateFrame::from_topology(&MapTopology::new()).unwrap_err(),
            CityError::EmptyTopology
        );
    }

    #[test]
    fn custom_projection_and_metadata() {
        let origin = LonLat::new(10.0, 50.0);
        let frame = CoordinateFrame::with_projection(
            origin,
            UtmZone::containing(origin),
            5.0,
            Box::new(Flat),
        )
        .unwrap();
        assert!(frame
            .project(50.001, 10.002)
            .unwrap()
            .approx_eq(Pt2D::new(2.0, 1.0), geom::Distance::meters(1e-6)));

        let enu = frame.project_enu(50.0, 10.0, 7.5).unwrap();
        assert_eq!(enu, EnuPoint::new(0.0, 0.0, 2.5));

        let meta = frame.metadata();
        assert_eq!(meta.utm_zone, "32N");
        assert_eq!(meta.gazebo_offset.x, -10_000.0);
        assert_eq!(meta.gazebo_offset.y, -50_000.0);
        assert_eq!(meta.gazebo_offset.yaw, 0.0);

        let center = frame.projection_center();
        assert_eq!(center.latitude, 50.0);
        assert_eq!(center.height, 5.0);
    }

    #[test]
    fn southern_hemisphere() {
        let frame = CoordinateFrame::from_points(&[LonLat::new(151.2, -33.9)]).unwrap();
        assert_eq!(frame.metadata().utm_zone, "56S");
        // A point 0.01 degrees south lands about 1.1km south
        let pt = frame.project(-33.91, 151.2).unwrap();
        assert!((pt.y() + 1109.0).abs() < 5.0, "{}", pt);
    }
}
