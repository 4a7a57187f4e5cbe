use serde::{Deserialize, Serialize};

/// Color tag of a point. Points start `Unassigned` and are tagged with their cluster index after a
/// clustering run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointColor {
    #[default]
    Unassigned,
    Cluster(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub color: PointColor,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            color: PointColor::Unassigned,
        }
    }

    pub fn coordinates(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
    pub cluster_index: usize,
}

/// Confidence ellipse of one cluster. `angle` is in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub x: f64,
    pub y: f64,
    pub rx: f64,
    pub ry: f64,
    pub angle: f64,
    pub cluster_index: usize,
}
