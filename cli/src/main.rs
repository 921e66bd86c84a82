//! Turns an OpenStreetMap extract into the files a simulator needs to build a drivable city, plus
//! a few tools for inspecting the results.

#[macro_use]
extern crate log;

mod generate;
mod spawn_query;

use anyhow::{bail, Result};
use structopt::StructOpt;

use city_builder::CoordinateFrame;
use cityutil::Timer;
use geom::LonLat;

#[derive(StructOpt)]
#[structopt(name = "osm2city", about = "Builds simulator-ready city geometry from OSM")]
enum Command {
    /// Generates roads, sidewalks, buildings, spawn points and camera views from an .osm file
    Generate {
        /// The path to an .osm XML file
        #[structopt()]
        osm: String,
        /// Everything in this directory is replaced
        #[structopt(long, default_value = "output")]
        output_dir: String,
        /// A JSON file overriding any of the default settings
        #[structopt(long)]
        config: Option<String>,
        /// Meters between spawn points along each road
        #[structopt(long)]
        spawn_spacing: Option<f64>,
        /// Road segments are at least this long, in meters, unless the whole road is shorter
        #[structopt(long)]
        min_segment: Option<f64>,
        /// Road segments are shorter than this, in meters
        #[structopt(long)]
        max_segment: Option<f64>,
    },
    /// Prints where one GPS position lands in a local frame
    TestProjection {
        #[structopt(long, allow_hyphen_values = true)]
        lat: f64,
        #[structopt(long, allow_hyphen_values = true)]
        lon: f64,
        /// Meters above the ellipsoid
        #[structopt(long, default_value = "0", allow_hyphen_values = true)]
        height: f64,
        /// Use the frame this .osm file would produce
        #[structopt(long)]
        osm_file: Option<String>,
        /// Center the frame here instead. Requires --center-lon.
        #[structopt(long, allow_hyphen_values = true)]
        center_lat: Option<f64>,
        #[structopt(long, allow_hyphen_values = true)]
        center_lon: Option<f64>,
    },
    /// Picks spawn points out of a generated spawn_points.json, with a chase camera pose for each
    SpawnQuery {
        /// The path to spawn_points.json
        #[structopt()]
        spawn_points: String,
        /// Only points on streets whose name contains this, or is contained by it
        #[structopt(long)]
        street: Option<String>,
        /// The points closest to the frame origin
        #[structopt(long)]
        closest: Option<usize>,
        /// The point on the street nearest the middle of the map
        #[structopt(long)]
        central: bool,
    },
}

fn main() -> Result<()> {
    cityutil::logger::setup();

    match Command::from_args() {
        Command::Generate {
            osm,
            output_dir,
            config,
            spawn_spacing,
            min_segment,
            max_segment,
        } => generate::run(generate::Flags {
            osm,
            output_dir,
            config,
            spawn_spacing,
            min_segment,
            max_segment,
        })?,
        Command::TestProjection {
            lat,
            lon,
            height,
            osm_file,
            center_lat,
            center_lon,
        } => test_projection(lat, lon, height, osm_file, center_lat, center_lon)?,
        Command::SpawnQuery {
            spawn_points,
            street,
            closest,
            central,
        } => spawn_query::run(spawn_points, street, closest, central)?,
    }
    Ok(())
}

fn test_projection(
    lat: f64,
    lon: f64,
    height: f64,
    osm_file: Option<String>,
    center_lat: Option<f64>,
    center_lon: Option<f64>,
) -> Result<()> {
    let frame = match (osm_file, center_lat, center_lon) {
        (Some(path), None, None) => {
            let map = osm_topology::reader::read_file(&path, &mut Timer::throwaway())?;
            CoordinateFrame::from_topology(&map)?
        }
        (None, Some(center_lat), Some(center_lon)) => {
            CoordinateFrame::centered_at(LonLat::new(center_lon, center_lat), 0.0)?
        }
        (None, None, None) => bail!("Pass either --osm-file or --center-lat and --center-lon"),
        _ => bail!("--osm-file can't be combined with --center-lat or --center-lon, and both center coordinates are needed"),
    };
    debug!("Using {:?}", frame);

    let enu = frame.project_enu(lat, lon, height)?;
    println!("{}", cityio::to_json(&frame.metadata())?);
    println!(
        "({}, {}, {}m) -> east {:.3}, north {:.3}, up {:.3}",
        lat, lon, height, enu.east, enu.north, enu.up
    );
    println!(
        "{} from the frame origin along the ground",
        frame.origin().gps_dist(LonLat::new(lon, lat))
    );
    Ok(())
}
