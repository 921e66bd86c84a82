use serde::{Deserialize, Serialize};

use cityutil::Tags;
use geom::{Pt2D, Ring};
use osm_topology::{MapTopology, WayID};

use crate::{CityError, CoordinateFrame};

/// A green area, drawn as flat ground cover.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Park {
    pub name: String,
    pub way_id: WayID,
    /// In the local frame, without a closing vertex
    pub polygon: Vec<Pt2D>,
}

fn is_green_area(tags: &Tags) -> bool {
    tags.is_any("leisure", &["park", "garden", "recreation_ground"])
        || tags.is_any("landuse", &["grass", "forest", "meadow"])
}

/// Every way tagged as a park or green landuse, in way ID order. Ways without 3 distinct resolved
/// points are skipped. Multipolygon relations aren't assembled.
pub fn extract_parks(map: &MapTopology, frame: &CoordinateFrame) -> Result<Vec<Park>, CityError> {
    let mut parks = Vec::new();
    for (id, way) in &map.ways {
        if !is_green_area(&way.tags) {
            continue;
        }
        let mut pts = Vec::new();
        for (_, gps) in map.resolve(&way.nodes) {
            pts.push(frame.project_pt(gps)?);
        }
        match Ring::new(pts) {
            Ok(ring) => parks.push(Park {
                name: format!("park_{}", id.0),
                way_id: *id,
                polygon: ring.into_points(),
            }),
            Err(err) => debug!("Skipping park {}: {}", id, err),
        }
    }
    Ok(parks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geom::LonLat;
    use osm_topology::{Node, NodeID, Way};

    #[test]
    fn green_areas() {
        let mut map = MapTopology::new();
        for (id, lon, lat) in [
            (1, 16.870, 41.120),
            (2, 16.871, 41.120),
            (3, 16.871, 41.121),
            (4, 16.870, 41.121),
        ] {
            map.nodes.insert(
                NodeID(id),
                Node {
                    pt: LonLat::new(lon, lat),
                    tags: Tags::empty(),
                },
            );
        }
        for (id, nodes, key, value) in [
            (10, vec![1, 2, 3, 1], "leisure", "park"),
            (11, vec![1, 2, 3, 4, 1], "landuse", "forest"),
            (12, vec![1, 2, 3, 1], "landuse", "industrial"),
            (13, vec![1, 2, 1], "leisure", "garden"),
            (14, vec![1, 2, 99, 1], "landuse", "meadow"),
        ] {
            let mut tags = Tags::empty();
            tags.insert(key, value);
            map.ways.insert(
                WayID(id),
                Way {
                    nodes: nodes.into_iter().map(NodeID).collect(),
                    tags,
                },
            );
        }
        let frame = CoordinateFrame::from_topology(&map).unwrap();
        let parks = extract_parks(&map, &frame).unwrap();

        // Industrial isn't green, way 13 has 2 distinct points, and way 14 loses its missing node
        assert_eq!(
            parks.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["park_10", "park_11"]
        );
        assert_eq!(parks[0].polygon.len(), 3);
        assert_eq!(parks[1].polygon.len(), 4);
        assert_eq!(parks[1].polygon[2], frame.project(41.121, 16.871).unwrap());
    }
}
