use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use geom::{round_to, Pt2D, EPSILON_DIST};
use osm_topology::WayID;

use crate::export::{EnuPoint, Orientation};
use crate::{Centerline, IdCounter};

/// Spawn coordinates and yaws are rounded to this many decimal places.
const PRECISION: i32 = 6;

/// A pose exactly on a road centerline, for placing a vehicle or robot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub id: usize,
    pub name: String,
    pub position: EnuPoint,
    pub orientation: Orientation,
    pub way_id: WayID,
    pub road_name: String,
    pub highway_type: String,
}

impl SpawnPoint {
    fn new(
        id: usize,
        centerline: &Centerline,
        pt: Pt2D,
        up: f64,
        yaw: f64,
    ) -> SpawnPoint {
        SpawnPoint {
            id,
            name: format!("spawn_point_{}", id),
            position: EnuPoint::new(
                round_to(pt.x(), PRECISION),
                round_to(pt.y(), PRECISION),
                round_to(up, PRECISION),
            ),
            orientation: Orientation {
                yaw: round_to(yaw, PRECISION),
            },
            way_id: centerline.way_id,
            road_name: centerline.name.clone(),
            highway_type: centerline.highway_type.clone(),
        }
    }

    pub fn pt(&self) -> Pt2D {
        Pt2D::new(self.position.east, self.position.north)
    }

    /// Planar distance to the frame origin.
    pub fn dist_to_origin(&self) -> f64 {
        self.position.east.hypot(self.position.north)
    }
}

/// Walks every centerline in order, sharing one ID counter.
pub fn make_spawn_points(
    centerlines: &[Centerline],
    spacing: f64,
    ids: &mut IdCounter,
) -> Vec<SpawnPoint> {
    let mut result = Vec::new();
    for centerline in centerlines {
        result.extend(along_centerline(centerline, spacing, ids));
    }
    result
}

/// Emits the first vertex, then a point every `spacing` meters of accumulated arc length, then the
/// last vertex unless the previous point already landed there. Points between two vertices are
/// interpolated and take the bearing of that span. Spans shorter than `EPSILON_DIST` still
/// accumulate length but never get points.
pub fn along_centerline(
    centerline: &Centerline,
    spacing: f64,
    ids: &mut IdCounter,
) -> Vec<SpawnPoint> {
    let pts = centerline.points();
    if pts.len() < 2 {
        return Vec::new();
    }
    let mut result = Vec::new();

    let first = centerline.polyline.first_line();
    let yaw = if first.length().inner_meters() == 0.0 {
        0.0
    } else {
        first.angle().yaw()
    };
    result.push(SpawnPoint::new(ids.next(), centerline, pts[0], 0.0, yaw));

    let mut accumulated = 0.0;
    let mut next_spawn = spacing;
    for line in centerline.polyline.lines() {
        let len = line.length();
        if len < EPSILON_DIST {
            accumulated += len.inner_meters();
            continue;
        }
        let len = len.inner_meters();
        let span_start = accumulated;
        let span_end = accumulated + len;
        let yaw = line.angle().yaw();
        while next_spawn < span_end {
            let t = (next_spawn - span_start) / len;
            result.push(SpawnPoint::new(
                ids.next(),
                centerline,
                line.percent_along(t),
                0.0,
                yaw,
            ));
            next_spawn += spacing;
        }
        accumulated = span_end;
    }

    let last_pt = pts[pts.len() - 1];
    let last_east = round_to(last_pt.x(), PRECISION);
    let last_north = round_to(last_pt.y(), PRECISION);
    let duplicate = result
        .last()
        .map(|sp| sp.position.east == last_east && sp.position.north == last_north)
        .unwrap_or(false);
    if !duplicate {
        let last = centerline.polyline.last_line();
        let yaw = if last.length().inner_meters() == 0.0 {
            0.0
        } else {
            last.angle().yaw()
        };
        result.push(SpawnPoint::new(ids.next(), centerline, last_pt, 0.0, yaw));
    }
    result
}

/// The `n` spawn points nearest the frame origin, nearest first. Ties keep ID order.
pub fn closest_to_origin(points: &[SpawnPoint], n: usize) -> Vec<&SpawnPoint> {
    let mut sorted: Vec<&SpawnPoint> = points.iter().collect();
    sorted.sort_by(|a, b| a.dist_to_origin().total_cmp(&b.dist_to_origin()));
    sorted.truncate(n);
    sorted
}

/// Named streets whose name contains the query, or is contained by it, ignoring case. Unnamed
/// roads never match.
pub fn on_street<'a>(points: &'a [SpawnPoint], name: &str) -> Vec<&'a SpawnPoint> {
    let query = name.to_lowercase();
    points
        .iter()
        .filter(|sp| {
            let road = sp.road_name.to_lowercase();
            !road.is_empty() && (road.contains(&query) || query.contains(&road))
        })
        .collect()
}

/// For each named street, finds its spawn point closest to the center of the bounding box of all
/// spawn points. Returns the street whose closest point is nearest, with that point.
pub fn central_street(points: &[SpawnPoint]) -> Option<(&str, &SpawnPoint)> {
    let first = points.first()?;
    let (mut min_e, mut max_e) = (first.position.east, first.position.east);
    let (mut min_n, mut max_n) = (first.position.north, first.position.north);
    for sp in points {
        min_e = min_e.min(sp.position.east);
        max_e = max_e.max(sp.position.east);
        min_n = min_n.min(sp.position.north);
        max_n = max_n.max(sp.position.north);
    }
    let center = Pt2D::new((min_e + max_e) / 2.0, (min_n + max_n) / 2.0);

    // Street name to its closest spawn point
    let mut per_street: BTreeMap<&str, (f64, &SpawnPoint)> = BTreeMap::new();
    for sp in points {
        if sp.road_name.is_empty() {
            continue;
        }
        let dist = sp.pt().dist_to(center).inner_meters();
        let entry = per_street.entry(sp.road_name.as_str()).or_insert((dist, sp));
        if dist < entry.0 {
            *entry = (dist, sp);
        }
    }

    let mut best: Option<(&str, f64, &SpawnPoint)> = None;
    for (name, (dist, sp)) in per_street {
        if best.map(|(_, d, _)| dist < d).unwrap_or(true) {
            best = Some((name, dist, sp));
        }
    }
    best.map(|(name, _, sp)| (name, sp))
}
