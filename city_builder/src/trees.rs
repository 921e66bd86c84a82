use serde::{Deserialize, Serialize};

use geom::Pt2D;
use osm_topology::MapTopology;

use crate::{CityError, CoordinateFrame};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub name: String,
    pub position: Pt2D,
}

/// Every `natural=tree` node, in node ID order.
pub fn extract_trees(map: &MapTopology, frame: &CoordinateFrame) -> Result<Vec<Tree>, CityError> {
    let mut trees = Vec::new();
    for (id, node) in &map.nodes {
        if !node.tags.is("natural", "tree") {
            continue;
        }
        trees.push(Tree {
            name: format!("tree_{}", id.0),
            position: frame.project_pt(node.pt)?,
        });
    }
    Ok(trees)
}
