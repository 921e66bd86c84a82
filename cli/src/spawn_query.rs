use anyhow::{bail, Result};
use serde::Serialize;

use city_builder::camera::{chase_pose_for_spawn, overhead_pose};
use city_builder::export::SpawnPointsDocument;
use city_builder::spawn::{central_street, closest_to_origin, on_street};
use city_builder::{CameraView, SpawnPoint};

const CHASE_DISTANCE: f64 = 10.0;
const CHASE_HEIGHT: f64 = 5.0;

#[derive(Serialize)]
struct Pick<'a> {
    spawn_point: &'a SpawnPoint,
    chase_camera: CameraView,
}

#[derive(Serialize)]
struct Answer<'a> {
    /// Looking down on the frame origin
    world_center: CameraView,
    picks: Vec<Pick<'a>>,
}

pub fn run(
    path: String,
    street: Option<String>,
    closest: Option<usize>,
    central: bool,
) -> Result<()> {
    let doc: SpawnPointsDocument = cityio::read_json(&path)?;
    info!(
        "{} spawn points around ({}, {})",
        doc.spawn_points.len(),
        doc.projection_center.latitude,
        doc.projection_center.longitude
    );

    let points: Vec<&SpawnPoint> = if central {
        match central_street(&doc.spawn_points) {
            Some((name, sp)) => {
                info!("The most central street is {}", name);
                vec![sp]
            }
            None => bail!("{} has no spawn points on named streets", path),
        }
    } else if let Some(ref name) = street {
        let matches = on_street(&doc.spawn_points, name);
        if matches.is_empty() {
            bail!("No spawn points on a street matching {}", name);
        }
        matches
    } else {
        closest_to_origin(&doc.spawn_points, closest.unwrap_or(1))
    };

    let answer = Answer {
        world_center: overhead_pose("world_center", 0.0, 0.0, 0.0, 50.0),
        picks: points
            .into_iter()
            .map(|sp| Pick {
                spawn_point: sp,
                chase_camera: chase_pose_for_spawn(sp, CHASE_DISTANCE, CHASE_HEIGHT),
            })
            .collect(),
    };
    println!("{}", cityio::to_json(&answer)?);
    Ok(())
}
