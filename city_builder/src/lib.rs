//! Turns a street-map topology into the geometry of a drivable 3D city: sliced road segments,
//! sidewalk strips, building footprints, spawn poses and camera views, all in one local metric
//! frame.

#[macro_use]
extern crate log;

mod buildings;
pub mod camera;
mod config;
mod errors;
pub mod export;
mod frame;
mod ids;
mod intersections;
mod parks;
mod pipeline;
mod roads;
mod segments;
mod sidewalks;
pub mod spawn;
mod trees;

pub use crate::buildings::{building_height, extract_buildings, Building};
pub use crate::camera::{make_camera_views, CameraView};
pub use crate::config::CityConfig;
pub use crate::errors::CityError;
pub use crate::export::Documents;
pub use crate::frame::{CoordinateFrame, Projection};
pub use crate::ids::IdCounter;
pub use crate::intersections::{central_intersection, find_intersections, Intersection};
pub use crate::parks::{extract_parks, Park};
pub use crate::pipeline::{generate, CityModel};
pub use crate::roads::{
    extract_centerlines, lane_count, road_width, Centerline, RoadSummary, SidewalkSide,
};
pub use crate::segments::{make_segments, slice_polyline, RoadSegment};
pub use crate::sidewalks::{make_sidewalks, SidewalkStrip};
pub use crate::spawn::{make_spawn_points, SpawnPoint};
pub use crate::trees::{extract_trees, Tree};
