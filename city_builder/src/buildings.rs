use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use cityutil::{Tags, Timer};
use geom::{Pt2D, Ring};
use osm_topology::{MapTopology, NodeID, OsmID, WayID};

use crate::roads::parse_meters;
use crate::{CityConfig, CityError, CoordinateFrame};

/// A building footprint, extruded to some height.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub name: String,
    pub way_id: WayID,
    /// Relative to `centroid`, open (the first point isn't repeated)
    pub footprint: Vec<Pt2D>,
    pub height: f64,
    /// The area-weighted centroid, in the local frame
    pub centroid: Pt2D,
}

impl Building {
    /// The footprint back in the local frame.
    pub fn absolute_footprint(&self) -> Vec<Pt2D> {
        self.footprint
            .iter()
            .map(|pt| pt.offset(self.centroid.x(), self.centroid.y()))
            .collect()
    }
}

/// Outer rings of building relations come first, using the relation's tags layered over the
/// way's. Then every other way tagged as a building. A way is only ever used once.
pub fn extract_buildings(
    map: &MapTopology,
    frame: &CoordinateFrame,
    config: &CityConfig,
    timer: &mut Timer,
) -> Result<Vec<Building>, CityError> {
    let mut buildings = Vec::new();
    let mut consumed: BTreeSet<WayID> = BTreeSet::new();

    for (rel_id, rel) in &map.relations {
        let is_multipolygon = rel.tags.is("type", "multipolygon");
        if !rel.tags.contains_key("building") && !is_multipolygon {
            continue;
        }
        for (role, member) in &rel.members {
            let way_id = match member {
                OsmID::Way(w) if role == "outer" || role.is_empty() => *w,
                _ => continue,
            };
            let way = match map.ways.get(&way_id) {
                Some(way) => way,
                None => continue,
            };
            if consumed.contains(&way_id) {
                continue;
            }
            let mut tags = way.tags.clone();
            tags.override_with(&rel.tags);
            if !tags.contains_key("building") {
                // A multipolygon for something else, like a park
                continue;
            }
            consumed.insert(way_id);
            match make_building(map, frame, config, way_id, &way.nodes, &tags)? {
                Some(b) => buildings.push(b),
                None => timer.warn(format!(
                    "Skipping outer {} of {}, it's not a valid polygon",
                    way_id, rel_id
                )),
            }
        }
    }

    for (way_id, way) in &map.ways {
        if consumed.contains(way_id) {
            continue;
        }
        if !way
            .tags
            .has_any(&["building", "building:part", "building:levels"])
        {
            continue;
        }
        match make_building(map, frame, config, *way_id, &way.nodes, &way.tags)? {
            Some(b) => buildings.push(b),
            None => debug!("Skipping building {}, it's not a valid polygon", way_id),
        }
    }

    Ok(buildings)
}

fn make_building(
    map: &MapTopology,
    frame: &CoordinateFrame,
    config: &CityConfig,
    way_id: WayID,
    nodes: &[NodeID],
    tags: &Tags,
) -> Result<Option<Building>, CityError> {
    let mut pts = Vec::new();
    for (_, gps) in map.resolve(nodes) {
        pts.push(frame.project_pt(gps)?);
    }
    let ring = match Ring::new(pts) {
        Ok(ring) => ring,
        Err(_) => return Ok(None),
    };
    if ring.area() < config.min_building_area {
        return Ok(None);
    }
    let centroid = ring.centroid();
    let footprint = ring
        .translate(-centroid.x(), -centroid.y())
        .into_points();
    Ok(Some(Building {
        name: format!("building_{}", way_id.0),
        way_id,
        footprint,
        height: building_height(tags, config),
        centroid,
    }))
}

/// An explicit `height` over 2m wins. Otherwise `building:levels`, with a floor. Otherwise the
/// default.
pub fn building_height(tags: &Tags, config: &CityConfig) -> f64 {
    if let Some(height) = tags.get("height").and_then(|x| parse_meters(x)) {
        if height > 2.0 {
            return height;
        }
    }
    if let Some(levels) = tags
        .get("building:levels")
        .and_then(|x| x.trim().parse::<i64>().ok())
    {
        return ((levels as f64) * config.level_height).max(config.min_levels_height);
    }
    config.default_building_height
}
