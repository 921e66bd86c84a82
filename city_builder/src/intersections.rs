use serde::{Deserialize, Serialize};

use cityutil::MultiMap;
use geom::Pt2D;
use osm_topology::{MapTopology, NodeID, WayID};

use crate::{Centerline, CityError, CoordinateFrame};

/// A node shared by at least two different highway ways.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    pub node_id: NodeID,
    pub pt: Pt2D,
    /// Ascending, no duplicates
    pub way_ids: Vec<WayID>,
}

/// Matches purely by node identity. A way passing through the same node twice still only counts
/// once there. Output is ordered by node ID.
pub fn find_intersections(
    map: &MapTopology,
    frame: &CoordinateFrame,
    centerlines: &[Centerline],
) -> Result<Vec<Intersection>, CityError> {
    let mut ways_per_node: MultiMap<NodeID, WayID> = MultiMap::new();
    for centerline in centerlines {
        for node in &centerline.nodes {
            ways_per_node.insert(*node, centerline.way_id);
        }
    }

    let mut intersections = Vec::new();
    for (node, ways) in ways_per_node.iter() {
        if ways.len() < 2 {
            continue;
        }
        let gps = match map.node_pt(*node) {
            Some(gps) => gps,
            None => continue,
        };
        intersections.push(Intersection {
            node_id: *node,
            pt: frame.project_pt(gps)?,
            way_ids: ways.iter().cloned().collect(),
        });
    }
    Ok(intersections)
}

/// The most connected intersection, breaking ties by the smallest node ID.
pub fn central_intersection(intersections: &[Intersection]) -> Option<&Intersection> {
    let mut best: Option<&Intersection> = None;
    for i in intersections {
        match best {
            Some(b) if b.way_ids.len() > i.way_ids.len() => {}
            Some(b) if b.way_ids.len() == i.way_ids.len() && b.node_id <= i.node_id => {}
            _ => {
                best = Some(i);
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CityConfig;
    use cityutil::{Tags, Timer};
    use geom::LonLat;
    use osm_topology::{Node, Way};

    fn grid() -> MapTopology {
        // Node 5 is shared by ways 100, 101 and 102. Node 3 by 100 and 101. Node 9 is only on
        // a footway.
        let mut map = MapTopology::new();
        for (id, lon, lat) in [
            (1, 10.000, 50.000),
            (2, 10.001, 50.000),
            (3, 10.002, 50.000),
            (4, 10.001, 50.001),
            (5, 10.001, 49.999),
            (6, 10.002, 49.999),
            (9, 10.003, 49.999),
        ] {
            map.nodes.insert(
                NodeID(id),
                Node {
                    pt: LonLat::new(lon, lat),
                    tags: Tags::empty(),
                },
            );
        }
        for (id, nodes, highway) in [
            (100, vec![1, 2, 3, 5], "residential"),
            (101, vec![3, 4, 3, 5], "primary"),
            (102, vec![6, 5, 42], "service"),
            (103, vec![6, 9], "footway"),
        ] {
            map.ways.insert(
                WayID(id),
                Way {
                    nodes: nodes.into_iter().map(NodeID).collect(),
                    tags: vec![("highway", highway)].into_iter().collect(),
                },
            );
        }
        map
    }

    #[test]
    fn shared_nodes() {
        let map = grid();
        let frame = CoordinateFrame::from_topology(&map).unwrap();
        let centerlines = crate::roads::extract_centerlines(
            &map,
            &frame,
            &CityConfig::default(),
            &mut Timer::throwaway(),
        )
        .unwrap();
        let intersections = find_intersections(&map, &frame, &centerlines).unwrap();

        let summary: Vec<(i64, Vec<i64>)> = intersections
            .iter()
            .map(|i| (i.node_id.0, i.way_ids.iter().map(|w| w.0).collect()))
            .collect();
        assert_eq!(
            summary,
            vec![(3, vec![100, 101]), (5, vec![100, 101, 102])]
        );
        // The footway doesn't make node 6 an intersection, and node 4 is only on one way, even
        // though that way touches node 3 twice.
        assert_eq!(central_intersection(&intersections).unwrap().node_id, NodeID(5));
        assert_eq!(
            intersections[1].pt,
            frame.project(49.999, 10.001).unwrap()
        );
    }

    #[test]
    fn ties_pick_smallest_node() {
        let pt = Pt2D::new(0.0, 0.0);
        let make = |id: i64| Intersection {
            node_id: NodeID(id),
            pt,
            way_ids: vec![WayID(1), WayID(2)],
        };
        let intersections = vec![make(8), make(4), make(6)];
        assert_eq!(central_intersection(&intersections).unwrap().node_id, NodeID(4));
        assert!(central_intersection(&[]).is_none());
    }
}
