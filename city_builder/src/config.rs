use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::CityError;

/// Every tunable constant of a generation run. Missing fields in a JSON file fall back to the
/// defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    /// Road segments are cut to be at least this long, unless the whole road is shorter.
    pub min_segment_length: f64,
    /// Road segments are cut to be shorter than this wherever the minimum allows it.
    pub max_segment_length: f64,
    /// Used for roads without `width` or `lanes` tags.
    pub default_road_width: f64,
    /// A tagged `width` is never narrower than this.
    pub min_road_width: f64,
    pub lane_width: f64,
    pub road_height: f64,
    pub sidewalk_width: f64,
    pub sidewalk_height: f64,
    /// Per `building:levels`
    pub level_height: f64,
    /// Buildings computed from a level count are at least this tall.
    pub min_levels_height: f64,
    pub default_building_height: f64,
    /// In square meters. Smaller footprints are dropped.
    pub min_building_area: f64,
    /// Distance between spawn points along a centerline.
    pub spawn_spacing: f64,
    /// Values of the `highway` tag treated as drivable roads.
    pub highway_types: Vec<String>,
}

impl Default for CityConfig {
    fn default() -> CityConfig {
        CityConfig {
            min_segment_length: 50.0,
            max_segment_length: 100.0,
            default_road_width: 7.0,
            min_road_width: 3.0,
            lane_width: 3.5,
            road_height: 0.12,
            sidewalk_width: 1.5,
            sidewalk_height: 0.12,
            level_height: 3.2,
            min_levels_height: 3.0,
            default_building_height: 12.0,
            min_building_area: 1.0,
            spawn_spacing: 10.0,
            highway_types: vec![
                "motorway",
                "motorway_link",
                "trunk",
                "trunk_link",
                "primary",
                "primary_link",
                "secondary",
                "secondary_link",
                "tertiary",
                "tertiary_link",
                "unclassified",
                "residential",
                "service",
                "living_street",
            ]
            .into_iter()
            .map(|x| x.to_string())
            .collect(),
        }
    }
}

impl CityConfig {
    /// Reads a JSON config and validates it.
    pub fn load(path: &str) -> Result<CityConfig> {
        let config: CityConfig = cityio::read_json(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CityError> {
        for (name, value) in [
            ("min_segment_length", self.min_segment_length),
            ("max_segment_length", self.max_segment_length),
            ("default_road_width", self.default_road_width),
            ("min_road_width", self.min_road_width),
            ("lane_width", self.lane_width),
            ("sidewalk_width", self.sidewalk_width),
            ("level_height", self.level_height),
            ("min_levels_height", self.min_levels_height),
            ("default_building_height", self.default_building_height),
            ("min_building_area", self.min_building_area),
            ("spawn_spacing", self.spawn_spacing),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CityError::InvalidConfig(format!(
                    "{} must be positive, but it's {}",
                    name, value
                )));
            }
        }
        for (name, value) in [
            ("road_height", self.road_height),
            ("sidewalk_height", self.sidewalk_height),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CityError::InvalidConfig(format!(
                    "{} can't be negative, but it's {}",
                    name, value
                )));
            }
        }
        if self.min_segment_length >= self.max_segment_length {
            return Err(CityError::InvalidConfig(format!(
                "min_segment_length {} must be less than max_segment_length {}",
                self.min_segment_length, self.max_segment_length
            )));
        }
        Ok(())
    }

    pub fn is_highway_type(&self, value: &str) -> bool {
        let value = value.to_lowercase();
        self.highway_types.iter().any(|x| *x == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CityConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.is_highway_type("residential"));
        assert!(config.is_highway_type("Primary_Link"));
        assert!(!config.is_highway_type("footway"));
    }

    #[test]
    fn bad_values() {
        let mut config = CityConfig::default();
        config.spawn_spacing = 0.0;
        assert!(config.validate().is_err());

        let mut config = CityConfig::default();
        config.min_segment_length = 100.0;
        assert!(config.validate().is_err());

        let mut config = CityConfig::default();
        config.road_height = f64::NAN;
        assert!(config.validate().is_err());

        // Zero would let buildings end up flat, or degenerate slivers through
        let mut config = CityConfig::default();
        config.min_levels_height = 0.0;
        assert!(config.validate().is_err());

        let mut config = CityConfig::default();
        config.min_building_area = 0.0;
        assert!(config.validate().is_err());

        let mut config = CityConfig::default();
        config.road_height = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json() {
        let config: CityConfig =
            serde_json::from_str(r#"{"spawn_spacing": 25.0, "min_segment_length": 20.0}"#)
                .unwrap();
        assert_eq!(config.spawn_spacing, 25.0);
        assert_eq!(config.min_segment_length, 20.0);
        assert_eq!(config.max_segment_length, 100.0);
        assert_eq!(config.highway_types.len(), 14);
    }
}
