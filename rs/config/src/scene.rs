use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::enums::Theme;

/// Upper bound on background grid lines along either canvas axis.
pub const MAX_GRID_LINES: f64 = 10_000.0;

/// Config for the clustering scene. Missing fields in a config file fall back to the defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Maximum number of points the canvas holds. Draw gestures beyond this are ignored.
    /// Default: 60
    pub max_points: usize,

    /// Radius around the pointer within which an erase gesture removes points.
    /// Default: 22.0
    pub eraser_radius: f64,

    /// Number of assignment/update rounds for each clustering run. There is no early exit.
    /// Default: 20
    pub num_iterations: usize,

    /// Added to both semi-axes of every cluster ellipse so that tight clusters stay visible.
    /// Default: 10.0
    pub ellipse_padding: f64,

    /// Smallest cluster count the controls accept.
    /// Default: 2
    pub min_clusters: usize,

    /// Largest cluster count the controls accept.
    /// Default: 10
    pub max_clusters: usize,

    /// Cluster count selected when the scene starts.
    /// Default: 2
    pub default_num_clusters: usize,

    /// Default: 800.0
    pub canvas_width: f64,

    /// Default: 600.0
    pub canvas_height: f64,

    /// Distance between background grid lines.
    /// Default: 40.0
    pub grid_spacing: f64,

    /// Default: 5.0
    pub point_radius: f64,

    /// Half the width of the "X" drawn at each centroid.
    /// Default: 8.0
    pub centroid_marker_size: f64,

    /// Default: Light
    pub theme: Theme,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            max_points: 60,
            eraser_radius: 22.0,
            num_iterations: 20,
            ellipse_padding: 10.0,
            min_clusters: 2,
            max_clusters: 10,
            default_num_clusters: 2,
            canvas_width: 800.0,
            canvas_height: 600.0,
            grid_spacing: 40.0,
            point_radius: 5.0,
            centroid_marker_size: 8.0,
            theme: Theme::Light,
        }
    }
}

impl SceneConfig {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene config {}", path.display()))?;
        let config: SceneConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse scene config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_clusters < 1 {
            return Err(anyhow!("Invalid argument: min_clusters must be at least 1"));
        }
        if self.min_clusters > self.max_clusters {
            return Err(anyhow!(
                "Invalid argument: min_clusters {} is larger than max_clusters {}",
                self.min_clusters,
                self.max_clusters
            ));
        }
        if !(self.min_clusters..=self.max_clusters).contains(&self.default_num_clusters) {
            return Err(anyhow!(
                "Invalid argument: default_num_clusters {} is outside [{}, {}]",
                self.default_num_clusters,
                self.min_clusters,
                self.max_clusters
            ));
        }
        if self.num_iterations == 0 {
            return Err(anyhow!("Invalid argument: num_iterations must be at least 1"));
        }

        let positive = [
            ("eraser_radius", self.eraser_radius),
            ("ellipse_padding", self.ellipse_padding),
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("grid_spacing", self.grid_spacing),
            ("point_radius", self.point_radius),
            ("centroid_marker_size", self.centroid_marker_size),
        ];
        for (name, value) in positive {
            // Also rejects NaN.
            if !(value.is_finite() && value > 0.0) {
                return Err(anyhow!(
                    "Invalid argument: {} must be finite and positive, got {}",
                    name,
                    value
                ));
            }
        }

        if self.grid_spacing < 1.0 {
            return Err(anyhow!(
                "Invalid argument: grid_spacing must be at least 1, got {}",
                self.grid_spacing
            ));
        }
        let longest_side = self.canvas_width.max(self.canvas_height);
        if longest_side / self.grid_spacing > MAX_GRID_LINES {
            return Err(anyhow!(
                "Invalid argument: grid_spacing {} draws more than {} lines across a {} canvas",
                self.grid_spacing,
                MAX_GRID_LINES,
                longest_side
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempdir::TempDir;

    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_points, 60);
        assert_eq!(config.eraser_radius, 22.0);
        assert_eq!(config.num_iterations, 20);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SceneConfig::default();
        config.min_clusters = 0;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.min_clusters = 5;
        config.max_clusters = 4;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.default_num_clusters = 11;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.num_iterations = 0;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.ellipse_padding = 0.0;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.eraser_radius = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.canvas_width = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.canvas_height = f64::INFINITY;
        config.grid_spacing = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.grid_spacing = 1e-300;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.grid_spacing = 0.5;
        assert!(config.validate().is_err());

        // Finite, but still far too many grid lines
        let mut config = SceneConfig::default();
        config.canvas_width = 1e12;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.grid_spacing = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_file_partial() {
        let tmp_dir = TempDir::new("test_scene_config").unwrap();
        let path = tmp_dir.path().join("scene.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"max_points: 30\neraser_radius: 20.0\ntheme: dark\n")
            .unwrap();

        let config = SceneConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.max_points, 30);
        assert_eq!(config.eraser_radius, 20.0);
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.num_iterations, 20);
        assert_eq!(config.max_clusters, 10);
    }

    #[test]
    fn test_from_yaml_file_invalid() {
        let tmp_dir = TempDir::new("test_scene_config_invalid").unwrap();
        let path = tmp_dir.path().join("scene.yaml");
        std::fs::write(&path, "num_iterations: 0\n").unwrap();
        assert!(SceneConfig::from_yaml_file(&path).is_err());

        assert!(SceneConfig::from_yaml_file(tmp_dir.path().join("missing.yaml")).is_err());

        std::fs::write(&path, "canvas_width: .inf\n").unwrap();
        assert!(SceneConfig::from_yaml_file(&path).is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut config = SceneConfig::default();
        config.theme = Theme::Dark;
        config.grid_spacing = 25.0;
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: SceneConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
