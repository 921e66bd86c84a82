use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use cityutil::{Counter, Tags, Timer};
use geom::{PolyLine, Pt2D};
use osm_topology::{MapTopology, NodeID, WayID};

use crate::{CityConfig, CityError, CoordinateFrame};

/// Which side of a road the `sidewalk` tag puts sidewalks on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SidewalkSide {
    Left,
    Right,
    Both,
}

impl SidewalkSide {
    /// `sidewalk=no`, `none`, `separate` and anything else unrecognized mean no attribute-derived
    /// sidewalks.
    pub fn from_tags(tags: &Tags) -> Option<SidewalkSide> {
        match tags.get("sidewalk").map(|x| x.as_str()) {
            Some("left") => Some(SidewalkSide::Left),
            Some("right") => Some(SidewalkSide::Right),
            Some("both") => Some(SidewalkSide::Both),
            _ => None,
        }
    }

    /// +1 is left of the direction of travel, -1 is right.
    pub fn directions(self) -> &'static [f64] {
        match self {
            SidewalkSide::Left => &[1.0],
            SidewalkSide::Right => &[-1.0],
            SidewalkSide::Both => &[1.0, -1.0],
        }
    }
}

/// The projected, unsliced geometry of one highway way, plus its resolved attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Centerline {
    pub way_id: WayID,
    /// Only the nodes that resolved, in way order. Can repeat.
    pub nodes: Vec<NodeID>,
    pub polyline: PolyLine,
    pub name: String,
    pub highway_type: String,
    pub lanes: usize,
    pub width: f64,
    pub sidewalk: Option<SidewalkSide>,
}

impl Centerline {
    pub fn points(&self) -> &Vec<Pt2D> {
        self.polyline.points()
    }
}

/// Counts describing the extracted road network.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadSummary {
    pub total_nodes: usize,
    pub total_ways: usize,
    pub total_highways: usize,
    pub total_intersections: usize,
    pub total_lane_centerlines: usize,
    pub named_roads: usize,
    pub highway_types: BTreeMap<String, usize>,
}

impl RoadSummary {
    pub fn new(map: &MapTopology, centerlines: &[Centerline], intersections: usize) -> RoadSummary {
        let mut highway_types = Counter::new();
        for c in centerlines {
            highway_types.inc(c.highway_type.clone());
        }
        RoadSummary {
            total_nodes: map.nodes.len(),
            total_ways: map.ways.len(),
            total_highways: centerlines.len(),
            total_intersections: intersections,
            // Each way is treated as a single lane centerline
            total_lane_centerlines: centerlines.len(),
            named_roads: centerlines.iter().filter(|c| !c.name.is_empty()).count(),
            highway_types: highway_types.consume(),
        }
    }
}

/// Finds every drivable way, in way ID order, and projects it. Ways with fewer than 2 resolvable
/// nodes are skipped.
pub fn extract_centerlines(
    map: &MapTopology,
    frame: &CoordinateFrame,
    config: &CityConfig,
    timer: &mut Timer,
) -> Result<Vec<Centerline>, CityError> {
    let mut centerlines = Vec::new();
    timer.start_iter("extract centerlines", map.ways.len());
    for (id, way) in &map.ways {
        timer.next();
        let highway_type = match way.tags.get("highway") {
            Some(x) if config.is_highway_type(x) => x.clone(),
            _ => continue,
        };

        let mut nodes = Vec::new();
        let mut pts = Vec::new();
        for (node, gps) in map.resolve(&way.nodes) {
            nodes.push(node);
            pts.push(frame.project_pt(gps)?);
        }
        let polyline = match PolyLine::new(pts) {
            Ok(pl) => pl,
            Err(err) => {
                debug!("Skipping {}: {}", id, err);
                continue;
            }
        };

        centerlines.push(Centerline {
            way_id: *id,
            nodes,
            polyline,
            name: way.tags.get("name").cloned().unwrap_or_default(),
            highway_type,
            lanes: lane_count(&way.tags),
            width: road_width(&way.tags, config),
            sidewalk: SidewalkSide::from_tags(&way.tags),
        });
    }
    Ok(centerlines)
}

/// A malformed or missing `lanes` tag means 1 lane. Never less than 1.
pub fn lane_count(tags: &Tags) -> usize {
    tags.get("lanes")
        .and_then(|x| x.trim().parse::<i64>().ok())
        .map(|n| n.max(1) as usize)
        .unwrap_or(1)
}

/// A `width` tag wins, clamped to a minimum. Otherwise a tagged lane count sets it. Otherwise
/// the default.
pub fn road_width(tags: &Tags, config: &CityConfig) -> f64 {
    if let Some(width) = tags.get("width").and_then(|x| parse_meters(x)) {
        return width.max(config.min_road_width);
    }
    if tags.contains_key("lanes") {
        return (lane_count(tags) as f64) * config.lane_width;
    }
    config.default_road_width
}

/// Parses values like "7", "7.5" or "7.5 m". Anything non-finite or with other units is rejected.
pub(crate) fn parse_meters(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('m').unwrap_or(trimmed).trim_end();
    number.parse::<f64>().ok().filter(|x| x.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: Vec<(&str, &str)>) -> Tags {
        pairs.into_iter().collect()
    }

    #[test]
    fn widths() {
        let config = CityConfig::default();
        for (input, expected) in [
            (vec![], 7.0),
            (vec![("width", "10")], 10.0),
            (vec![("width", "2")], 3.0),
            (vec![("width", "6.5 m"), ("lanes", "4")], 6.5),
            (vec![("width", "wide"), ("lanes", "2")], 7.0),
            (vec![("width", "NaN")], 7.0),
            (vec![("lanes", "3")], 10.5),
            (vec![("lanes", "0")], 3.5),
            (vec![("lanes", "two")], 3.5),
        ] {
            let t = tags(input);
            assert_eq!(road_width(&t, &config), expected, "for {}", t);
        }
    }

    #[test]
    fn lanes() {
        for (input, expected) in [(None, 1), (Some("2"), 2), (Some("-3"), 1), (Some("2;3"), 1)] {
            let mut t = Tags::empty();
            if let Some(v) = input {
                t.insert("lanes", v);
            }
            assert_eq!(lane_count(&t), expected);
        }
    }

    #[test]
    fn sidewalk_sides() {
        for (value, expected) in [
            ("left", Some(SidewalkSide::Left)),
            ("right", Some(SidewalkSide::Right)),
            ("both", Some(SidewalkSide::Both)),
            ("no", None),
            ("separate", None),
        ] {
            assert_eq!(
                SidewalkSide::from_tags(&tags(vec![("sidewalk", value)])),
                expected
            );
        }
        assert_eq!(SidewalkSide::Both.directions(), &[1.0, -1.0]);
    }
}
