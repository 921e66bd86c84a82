//! The serialized shape of everything a run produces. Every document that carries coordinates
//! also carries the projection center, so consumers can re-anchor them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    Building, CameraView, Centerline, CityModel, Intersection, Park, RoadSegment, RoadSummary,
    SidewalkStrip, SpawnPoint, Tree,
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnuPoint {
    pub east: f64,
    pub north: f64,
    pub up: f64,
}

impl EnuPoint {
    pub fn new(east: f64, north: f64, up: f64) -> EnuPoint {
        EnuPoint { east, north, up }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub yaw: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectionCenter {
    pub latitude: f64,
    pub longitude: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameOffset {
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
}

/// How the local frame relates to the globe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub origin_lat: f64,
    pub origin_lon: f64,
    /// Like "33N"
    pub utm_zone: String,
    pub gazebo_offset: FrameOffset,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadRecord {
    pub way_id: i64,
    pub name: String,
    pub highway_type: String,
    pub lanes: usize,
    pub centerline_enu: Vec<EnuPoint>,
}

impl RoadRecord {
    pub fn new(centerline: &Centerline) -> RoadRecord {
        RoadRecord {
            way_id: centerline.way_id.0,
            name: centerline.name.clone(),
            highway_type: centerline.highway_type.clone(),
            lanes: centerline.lanes,
            centerline_enu: centerline
                .points()
                .iter()
                .map(|pt| EnuPoint::new(pt.x(), pt.y(), 0.0))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildingRecord {
    pub name: String,
    /// Relative to the centroid
    pub footprint: Vec<(f64, f64)>,
    pub height: f64,
    pub centroid: (f64, f64),
}

impl BuildingRecord {
    pub fn new(building: &Building) -> BuildingRecord {
        BuildingRecord {
            name: building.name.clone(),
            footprint: building
                .footprint
                .iter()
                .map(|pt| (pt.x(), pt.y()))
                .collect(),
            height: building.height,
            centroid: (building.centroid.x(), building.centroid.y()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntersectionRecord {
    pub node_id: i64,
    pub position: EnuPoint,
    pub connected_ways: Vec<i64>,
}

impl IntersectionRecord {
    pub fn new(i: &Intersection) -> IntersectionRecord {
        IntersectionRecord {
            node_id: i.node_id.0,
            position: EnuPoint::new(i.pt.x(), i.pt.y(), 0.0),
            connected_ways: i.way_ids.iter().map(|w| w.0).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadsDocument {
    pub projection_center: ProjectionCenter,
    pub roads: Vec<RoadRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnPointsDocument {
    pub projection_center: ProjectionCenter,
    pub spacing: f64,
    pub spawn_points: Vec<SpawnPoint>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildingsDocument {
    pub projection_center: ProjectionCenter,
    pub buildings: Vec<BuildingRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntersectionsDocument {
    pub projection_center: ProjectionCenter,
    pub intersections: Vec<IntersectionRecord>,
}

/// Geometry for a downstream 3D-world generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldDocument {
    pub projection_center: ProjectionCenter,
    pub segments: Vec<RoadSegment>,
    pub sidewalks: Vec<SidewalkStrip>,
    pub trees: Vec<Tree>,
    pub parks: Vec<Park>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraViewsDocument {
    pub projection_center: ProjectionCenter,
    pub views: Vec<CameraView>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryDocument {
    pub roads: RoadSummary,
    pub segments: usize,
    pub sidewalks: usize,
    pub buildings: usize,
    pub trees: usize,
    pub parks: usize,
    pub spawn_points: usize,
    pub camera_views: usize,
    /// Per-way problems that were skipped over
    pub warnings: Vec<String>,
}

/// Every artifact of a run, keyed by the file name it's written to.
pub struct Documents {
    pub map_config: MapConfig,
    pub roads: RoadsDocument,
    pub spawn_points: SpawnPointsDocument,
    pub buildings: BuildingsDocument,
    pub intersections: IntersectionsDocument,
    pub world: WorldDocument,
    pub camera_views: CameraViewsDocument,
    pub summary: SummaryDocument,
}

impl Documents {
    pub fn new(model: &CityModel) -> Documents {
        let projection_center = model.projection_center;
        Documents {
            map_config: model.map_config.clone(),
            roads: RoadsDocument {
                projection_center,
                roads: model.centerlines.iter().map(RoadRecord::new).collect(),
            },
            spawn_points: SpawnPointsDocument {
                projection_center,
                spacing: model.spawn_spacing,
                spawn_points: model.spawn_points.clone(),
            },
            buildings: BuildingsDocument {
                projection_center,
                buildings: model.buildings.iter().map(BuildingRecord::new).collect(),
            },
            intersections: IntersectionsDocument {
                projection_center,
                intersections: model
                    .intersections
                    .iter()
                    .map(IntersectionRecord::new)
                    .collect(),
            },
            world: WorldDocument {
                projection_center,
                segments: model.segments.clone(),
                sidewalks: model.sidewalks.clone(),
                trees: model.trees.clone(),
                parks: model.parks.clone(),
            },
            camera_views: CameraViewsDocument {
                projection_center,
                views: model.camera_views.clone(),
            },
            summary: SummaryDocument {
                roads: model.summary.clone(),
                segments: model.segments.len(),
                sidewalks: model.sidewalks.len(),
                buildings: model.buildings.len(),
                trees: model.trees.len(),
                parks: model.parks.len(),
                spawn_points: model.spawn_points.len(),
                camera_views: model.camera_views.len(),
                warnings: model.warnings.clone(),
            },
        }
    }

    /// Serializes every document to pretty JSON, keyed by file name.
    pub fn to_json_files(&self) -> anyhow::Result<BTreeMap<&'static str, String>> {
        let mut files = BTreeMap::new();
        files.insert("map_config.json", cityio::to_json(&self.map_config)?);
        files.insert("roads.json", cityio::to_json(&self.roads)?);
        files.insert("spawn_points.json", cityio::to_json(&self.spawn_points)?);
        files.insert("buildings.json", cityio::to_json(&self.buildings)?);
        files.insert("intersections.json", cityio::to_json(&self.intersections)?);
        files.insert("world.json", cityio::to_json(&self.world)?);
        files.insert("camera_views.json", cityio::to_json(&self.camera_views)?);
        files.insert("summary.json", cityio::to_json(&self.summary)?);
        Ok(files)
    }
}
