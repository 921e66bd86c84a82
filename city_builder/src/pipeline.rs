use cityutil::Timer;
use osm_topology::MapTopology;

use crate::export::{MapConfig, ProjectionCenter};
use crate::{
    extract_buildings, extract_centerlines, extract_parks, extract_trees, find_intersections,
    make_camera_views, make_segments, make_sidewalks, make_spawn_points, Building, CameraView,
    Centerline, CityConfig, CityError, CoordinateFrame, IdCounter, Intersection, Park, RoadSegment,
    RoadSummary, SidewalkStrip, SpawnPoint, Tree,
};

/// Everything derived from one map extract, all in the same local frame.
#[derive(Clone, Debug, PartialEq)]
pub struct CityModel {
    pub projection_center: ProjectionCenter,
    pub map_config: MapConfig,
    pub centerlines: Vec<Centerline>,
    pub segments: Vec<RoadSegment>,
    pub sidewalks: Vec<SidewalkStrip>,
    pub buildings: Vec<Building>,
    pub trees: Vec<Tree>,
    pub parks: Vec<Park>,
    pub intersections: Vec<Intersection>,
    pub spawn_points: Vec<SpawnPoint>,
    pub spawn_spacing: f64,
    pub camera_views: Vec<CameraView>,
    pub summary: RoadSummary,
    /// Problems with individual objects that were skipped over
    pub warnings: Vec<String>,
}

/// Derives the whole city from a topology. Nothing here touches the filesystem, and the same
/// input and config always produce the same model.
pub fn generate(
    map: &MapTopology,
    config: &CityConfig,
    timer: &mut Timer,
) -> Result<CityModel, CityError> {
    config.validate()?;
    let warnings_before = timer.warnings().len();

    timer.start("set up coordinate frame");
    let frame = CoordinateFrame::from_topology(map)?;
    timer.stop("set up coordinate frame");
    info!(
        "Local frame centered at ({}, {}) in UTM zone {}",
        frame.origin().latitude,
        frame.origin().longitude,
        frame.zone().label()
    );

    timer.start("extract roads");
    // An early return leaves the timer unbalanced, which it tolerates when dropped
    let centerlines = extract_centerlines(map, &frame, config, timer)?;
    timer.stop("extract roads");

    let intersections = find_intersections(map, &frame, &centerlines)?;

    timer.start("slice road segments");
    let segments = make_segments(&centerlines, config, &mut IdCounter::starting_at(1));
    timer.stop("slice road segments");

    let sidewalks = make_sidewalks(
        map,
        &frame,
        &centerlines,
        &segments,
        config,
        &mut IdCounter::starting_at(1),
    )?;

    timer.start("extract buildings");
    let buildings = extract_buildings(map, &frame, config, timer)?;
    timer.stop("extract buildings");

    let trees = extract_trees(map, &frame)?;
    let parks = extract_parks(map, &frame)?;
    let spawn_points = make_spawn_points(
        &centerlines,
        config.spawn_spacing,
        &mut IdCounter::starting_at(0),
    );
    let camera_views = make_camera_views(&segments, &intersections, &buildings, &trees);
    let summary = RoadSummary::new(map, &centerlines, intersections.len());

    timer.note(format!(
        "{} roads became {} segments and {} sidewalks. {} buildings, {} trees, {} parks, {} \
         intersections, {} spawn points",
        centerlines.len(),
        segments.len(),
        sidewalks.len(),
        buildings.len(),
        trees.len(),
        parks.len(),
        intersections.len(),
        spawn_points.len()
    ));

    Ok(CityModel {
        projection_center: frame.projection_center(),
        map_config: frame.metadata(),
        centerlines,
        segments,
        sidewalks,
        buildings,
        trees,
        parks,
        intersections,
        spawn_points,
        spawn_spacing: config.spawn_spacing,
        camera_views,
        summary,
        warnings: timer.warnings()[warnings_before..].to_vec(),
    })
}
