//! The raw street-map topology: nodes, ways and relations with free-form tags, in WGS84. Nothing
//! here is projected or interpreted; that's the job of `city_builder`.

#[macro_use]
extern crate log;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use cityutil::Tags;
use geom::LonLat;

pub mod reader;

#[derive(Clone, Copy, PartialEq, Eq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub struct NodeID(pub i64);
#[derive(Clone, Copy, PartialEq, Eq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub struct WayID(pub i64);
#[derive(Clone, Copy, PartialEq, Eq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub struct RelationID(pub i64);

impl fmt::Display for NodeID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "https://www.openstreetmap.org/node/{}", self.0)
    }
}
impl fmt::Display for WayID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "https://www.openstreetmap.org/way/{}", self.0)
    }
}
impl fmt::Display for RelationID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "https://www.openstreetmap.org/relation/{}", self.0)
    }
}

/// A relation member can point at any kind of object.
#[derive(Clone, Copy, PartialEq, Eq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub enum OsmID {
    Node(NodeID),
    Way(WayID),
    Relation(RelationID),
}

impl fmt::Display for OsmID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OsmID::Node(n) => write!(f, "{}", n),
            OsmID::Way(w) => write!(f, "{}", w),
            OsmID::Relation(r) => write!(f, "{}", r),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub pt: LonLat,
    pub tags: Tags,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Way {
    pub nodes: Vec<NodeID>,
    pub tags: Tags,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub tags: Tags,
    /// Role, member. Members may point at objects that aren't in the topology.
    pub members: Vec<(String, OsmID)>,
}

/// Everything parsed from one map extract. Ordered maps keep every downstream iteration
/// deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapTopology {
    pub nodes: BTreeMap<NodeID, Node>,
    pub ways: BTreeMap<WayID, Way>,
    pub relations: BTreeMap<RelationID, Relation>,
}

impl MapTopology {
    pub fn new() -> MapTopology {
        MapTopology::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node position, in node ID order.
    pub fn all_points(&self) -> Vec<LonLat> {
        self.nodes.values().map(|n| n.pt).collect()
    }

    pub fn node_pt(&self, id: NodeID) -> Option<LonLat> {
        self.nodes.get(&id).map(|n| n.pt)
    }

    /// Resolves a way's node references, silently dropping the ones that don't exist.
    pub fn resolve(&self, refs: &[NodeID]) -> Vec<(NodeID, LonLat)> {
        refs.iter()
            .filter_map(|id| self.node_pt(*id).map(|pt| (*id, pt)))
            .collect()
    }
}
