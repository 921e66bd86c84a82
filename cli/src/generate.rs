use anyhow::{Context, Result};

use city_builder::{CityConfig, Documents};
use cityutil::Timer;

pub struct Flags {
    pub osm: String,
    pub output_dir: String,
    pub config: Option<String>,
    pub spawn_spacing: Option<f64>,
    pub min_segment: Option<f64>,
    pub max_segment: Option<f64>,
}

impl Flags {
    /// Defaults, then the config file, then individual flags.
    fn city_config(&self) -> Result<CityConfig> {
        let mut config = match self.config {
            Some(ref path) => CityConfig::load(path)?,
            None => CityConfig::default(),
        };
        if let Some(x) = self.spawn_spacing {
            config.spawn_spacing = x;
        }
        if let Some(x) = self.min_segment {
            config.min_segment_length = x;
        }
        if let Some(x) = self.max_segment {
            config.max_segment_length = x;
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn run(flags: Flags) -> Result<()> {
    let config = flags.city_config()?;
    let mut timer = Timer::new(format!("generate city from {}", flags.osm));

    let map = osm_topology::reader::read_file(&flags.osm, &mut timer)?;
    let model = city_builder::generate(&map, &config, &mut timer)
        .with_context(|| format!("generating a city from {}", flags.osm))?;

    // Serialize everything before touching the output directory, so a failure leaves the last
    // good run in place
    let files = Documents::new(&model).to_json_files()?;
    cityio::replace_dir(&flags.output_dir)?;
    for (name, contents) in files {
        let path = format!("{}/{}", flags.output_dir, name);
        fs_err::write(&path, contents)?;
        debug!("Wrote {}", path);
    }
    timer.note(format!(
        "Wrote {} segments, {} sidewalks, {} buildings, {} trees and {} spawn points to {}",
        model.segments.len(),
        model.sidewalks.len(),
        model.buildings.len(),
        model.trees.len(),
        model.spawn_points.len(),
        flags.output_dir
    ));
    Ok(())
}
