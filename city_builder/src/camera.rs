//! Named camera poses for previewing a generated world.

use serde::{Deserialize, Serialize};

use crate::intersections::central_intersection;
use crate::spawn::SpawnPoint;
use crate::{Building, Intersection, RoadSegment, Tree};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    pub name: String,
    pub description: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl CameraView {
    fn new(
        name: &str,
        description: &str,
        (x, y, z): (f64, f64, f64),
        yaw: f64,
        pitch: f64,
    ) -> CameraView {
        CameraView {
            name: name.to_string(),
            description: description.to_string(),
            x,
            y,
            z,
            yaw,
            pitch,
            roll: 0.0,
        }
    }
}

/// Views that only exist when there's something to look at: road views need segments, then one
/// view each for the first building and the first tree.
pub fn make_camera_views(
    segments: &[RoadSegment],
    intersections: &[Intersection],
    buildings: &[Building],
    trees: &[Tree],
) -> Vec<CameraView> {
    let mut views = Vec::new();

    let mut longest: Option<&RoadSegment> = None;
    for s in segments {
        if longest.map(|l| s.length() > l.length()).unwrap_or(true) {
            longest = Some(s);
        }
    }
    if let Some(seg) = longest {
        let mid = seg.midpoint();
        views.push(CameraView::new(
            "long_straight",
            "Long straight road",
            (mid.x(), mid.y(), 5.0),
            seg.yaw(),
            -0.25,
        ));

        let target = central_intersection(intersections)
            .map(|i| i.pt)
            .unwrap_or(mid);
        views.push(CameraView::new(
            "intersection_overhead",
            "Intersection overhead",
            (target.x(), target.y(), 60.0),
            0.0,
            -1.2,
        ));
    }

    if let Some(b) = buildings.first() {
        views.push(CameraView::new(
            "street_level_building",
            "Street-level building view",
            (b.centroid.x(), b.centroid.y() - 10.0, 3.0),
            0.0,
            -0.1,
        ));
    }

    if let Some(t) = trees.first() {
        views.push(CameraView::new(
            "tree_corridor",
            "Tree-lined road view",
            (t.position.x(), t.position.y() - 5.0, 4.0),
            0.0,
            -0.15,
        ));
    }

    views
}

/// Looking straight down from `distance` meters above a point.
pub fn overhead_pose(name: &str, east: f64, north: f64, up: f64, distance: f64) -> CameraView {
    CameraView::new(
        name,
        "Overhead",
        (east, north, up + distance),
        0.0,
        std::f64::consts::FRAC_PI_2,
    )
}

/// Behind a spawn point along its heading, raised by `height`, tilted slightly down.
pub fn chase_pose_for_spawn(sp: &SpawnPoint, distance: f64, height: f64) -> CameraView {
    let yaw = sp.orientation.yaw;
    CameraView::new(
        &format!("chase_{}", sp.name),
        "Chase view",
        (
            sp.position.east - distance * yaw.cos(),
            sp.position.north - distance * yaw.sin(),
            sp.position.up + height,
        ),
        yaw,
        0.3,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{EnuPoint, Orientation};
    use geom::Pt2D;
    use osm_topology::{NodeID, WayID};

    fn segment(id: &str, start: (f64, f64), end: (f64, f64)) -> RoadSegment {
        RoadSegment {
            id: id.to_string(),
            start: Pt2D::new(start.0, start.1),
            end: Pt2D::new(end.0, end.1),
            width: 7.0,
            height: 0.12,
            way_id: WayID(1),
        }
    }

    #[test]
    fn views_follow_entities() {
        assert!(make_camera_views(&[], &[], &[], &[]).is_empty());

        let segments = vec![
            segment("segment_00001", (0.0, 0.0), (60.0, 0.0)),
            segment("segment_00002", (0.0, 0.0), (0.0, 80.0)),
            segment("segment_00003", (10.0, 0.0), (10.0, 80.0)),
        ];
        let views = make_camera_views(&segments, &[], &[], &[]);
        assert_eq!(views.len(), 2);
        // Ties keep the first segment
        assert_eq!(views[0].name, "long_straight");
        assert_eq!((views[0].x, views[0].y, views[0].z), (0.0, 40.0, 5.0));
        assert!((views[0].yaw - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        // No intersections, so the overhead view falls back to the same midpoint
        assert_eq!((views[1].x, views[1].y, views[1].z), (0.0, 40.0, 60.0));

        let intersections = vec![Intersection {
            node_id: NodeID(3),
            pt: Pt2D::new(12.0, -4.0),
            way_ids: vec![WayID(1), WayID(2)],
        }];
        let trees = vec![Tree {
            name: "tree_9".to_string(),
            position: Pt2D::new(1.0, 2.0),
        }];
        let views = make_camera_views(&segments, &intersections, &[], &trees);
        assert_eq!(views.len(), 3);
        assert_eq!((views[1].x, views[1].y), (12.0, -4.0));
        assert_eq!(views[2].name, "tree_corridor");
        assert_eq!((views[2].x, views[2].y, views[2].z), (1.0, -3.0, 4.0));
        assert_eq!(views[2].pitch, -0.15);
    }

    #[test]
    fn poses() {
        let top = overhead_pose("world_center", 0.0, 0.0, 0.0, 50.0);
        assert_eq!(top.z, 50.0);
        assert_eq!(top.yaw, 0.0);

        let sp = SpawnPoint {
            id: 0,
            name: "spawn_point_0".to_string(),
            position: EnuPoint::new(10.0, 20.0, 0.0),
            orientation: Orientation {
                yaw: std::f64::consts::FRAC_PI_2,
            },
            way_id: WayID(1),
            road_name: String::new(),
            highway_type: "residential".to_string(),
        };
        let chase = chase_pose_for_spawn(&sp, 10.0, 5.0);
        assert!((chase.x - 10.0).abs() < 1e-9);
        assert!((chase.y - 10.0).abs() < 1e-9);
        assert_eq!(chase.z, 5.0);
        assert_eq!(chase.yaw, sp.orientation.yaw);
        assert_eq!(chase.name, "chase_spawn_point_0");
    }
}
