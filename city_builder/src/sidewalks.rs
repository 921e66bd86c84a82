use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use geom::{Distance, Line, Pt2D};
use osm_topology::{MapTopology, WayID};

use crate::{Centerline, CityConfig, CityError, CoordinateFrame, IdCounter, RoadSegment};

/// Explicit footway pieces shorter than this are skipped.
const MIN_EXPLICIT_PIECE: Distance = Distance::const_meters(1.0);

/// A straight rectangular strip of sidewalk, centered on `center` and rotated by `yaw`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SidewalkStrip {
    pub id: String,
    pub center: Pt2D,
    pub length: f64,
    /// In (-pi, pi]
    pub yaw: f64,
    pub width: f64,
    pub height: f64,
}

/// Strips alongside road segments whose way has a `sidewalk` tag come first, then one strip per
/// piece of every explicitly mapped footway.
pub fn make_sidewalks(
    map: &MapTopology,
    frame: &CoordinateFrame,
    centerlines: &[Centerline],
    segments: &[RoadSegment],
    config: &CityConfig,
    ids: &mut IdCounter,
) -> Result<Vec<SidewalkStrip>, CityError> {
    let mut strips = alongside_roads(centerlines, segments, config, ids);
    strips.extend(explicit_footways(map, frame, config, ids)?);
    Ok(strips)
}

fn alongside_roads(
    centerlines: &[Centerline],
    segments: &[RoadSegment],
    config: &CityConfig,
    ids: &mut IdCounter,
) -> Vec<SidewalkStrip> {
    let sides: BTreeMap<WayID, _> = centerlines
        .iter()
        .filter_map(|c| c.sidewalk.map(|side| (c.way_id, side)))
        .collect();

    let mut strips = Vec::new();
    for segment in segments {
        let side = match sides.get(&segment.way_id) {
            Some(side) => *side,
            None => continue,
        };
        let line = Line::new(segment.start, segment.end);
        if line.length() == Distance::ZERO {
            continue;
        }
        let offset = segment.width / 2.0 + config.sidewalk_width / 2.0;
        for direction in side.directions() {
            let shifted = match line.shift_either_direction(Distance::meters(direction * offset)) {
                Some(l) => l,
                None => continue,
            };
            strips.push(SidewalkStrip {
                id: format!("sidewalk_{:05}", ids.next()),
                center: shifted.middle(),
                length: line.length().inner_meters(),
                yaw: line.angle().yaw(),
                width: config.sidewalk_width,
                height: config.sidewalk_height,
            });
        }
    }
    strips
}

fn explicit_footways(
    map: &MapTopology,
    frame: &CoordinateFrame,
    config: &CityConfig,
    ids: &mut IdCounter,
) -> Result<Vec<SidewalkStrip>, CityError> {
    let mut strips = Vec::new();
    for way in map.ways.values() {
        if !way.tags.is("highway", "footway") && !way.tags.is("footway", "sidewalk") {
            continue;
        }
        let mut pts = Vec::new();
        for (_, gps) in map.resolve(&way.nodes) {
            pts.push(frame.project_pt(gps)?);
        }
        for pair in pts.windows(2) {
            let line = Line::new(pair[0], pair[1]);
            if line.length() < MIN_EXPLICIT_PIECE {
                continue;
            }
            strips.push(SidewalkStrip {
                id: format!("sidewalk_{:05}", ids.next()),
                center: line.middle(),
                length: line.length().inner_meters(),
                yaw: line.angle().yaw(),
                width: config.sidewalk_width,
                height: config.sidewalk_height,
            });
        }
    }
    Ok(strips)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::SidewalkSide;
    use geom::PolyLine;

    fn road(way: i64, side: Option<SidewalkSide>, pts: Vec<Pt2D>) -> (Centerline, RoadSegment) {
        let centerline = Centerline {
            way_id: WayID(way),
            nodes: Vec::new(),
            polyline: PolyLine::new(pts.clone()).unwrap(),
            name: String::new(),
            highway_type: "residential".to_string(),
            lanes: 2,
            width: 7.0,
            sidewalk: side,
        };
        let segment = RoadSegment {
            id: format!("segment_{:05}", way),
            start: pts[0],
            end: pts[1],
            width: 7.0,
            height: 0.12,
            way_id: WayID(way),
        };
        (centerline, segment)
    }

    #[test]
    fn both_sides_offset() {
        let (c, s) = road(
            1,
            Some(SidewalkSide::Both),
            vec![Pt2D::new(0.0, 0.0), Pt2D::new(0.0, 60.0)],
        );
        let mut ids = IdCounter::starting_at(1);
        let strips = alongside_roads(&[c], &[s], &CityConfig::default(), &mut ids);
        assert_eq!(strips.len(), 2);

        // Heading north, left is west
        assert_eq!(strips[0].id, "sidewalk_00001");
        assert!(strips[0]
            .center
            .approx_eq(Pt2D::new(-4.25, 30.0), Distance::meters(1e-9)));
        assert_eq!(strips[1].id, "sidewalk_00002");
        assert!(strips[1]
            .center
            .approx_eq(Pt2D::new(4.25, 30.0), Distance::meters(1e-9)));
        for strip in &strips {
            assert_eq!(strip.length, 60.0);
            assert!((strip.yaw - PI / 2.0).abs() < 1e-12);
            assert_eq!(strip.width, 1.5);
            assert_eq!(strip.height, 0.12);
        }
    }

    #[test]
    fn one_side_or_none() {
        let (c1, s1) = road(
            1,
            Some(SidewalkSide::Right),
            vec![Pt2D::new(0.0, 0.0), Pt2D::new(-60.0, 0.0)],
        );
        let (c2, s2) = road(2, None, vec![Pt2D::new(0.0, 0.0), Pt2D::new(60.0, 0.0)]);
        let mut ids = IdCounter::starting_at(1);
        let strips = alongside_roads(&[c1, c2], &[s1, s2], &CityConfig::default(), &mut ids);
        assert_eq!(strips.len(), 1);
        // Heading west, right is north. Yaw of due west is pi, never -pi.
        assert!(strips[0]
            .center
            .approx_eq(Pt2D::new(-30.0, 4.25), Distance::meters(1e-9)));
        assert_eq!(strips[0].yaw, PI);
    }
}
