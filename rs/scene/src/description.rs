//! Renderer-independent description of what the canvas shows. Shapes are listed in paint order:
//! grid, ellipses, points, centroids, then the eraser preview on top.

use config::enums::InteractionMode;
use serde::Serialize;

use crate::palette;
use crate::state::ClusterSceneState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    pub spacing: f64,
    pub stroke: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EllipseShape {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    /// Radians
    pub angle: f64,
    pub stroke: &'static str,
    pub line_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointShape {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: &'static str,
}

/// Drawn as an "X" whose arms reach `size` away from the center on both axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentroidMarker {
    pub cx: f64,
    pub cy: f64,
    pub size: f64,
    pub stroke: &'static str,
    pub line_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EraserPreview {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub stroke: &'static str,
    pub dash: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneDescription {
    pub width: f64,
    pub height: f64,
    pub background: &'static str,
    pub grid: Grid,
    pub ellipses: Vec<EllipseShape>,
    pub points: Vec<PointShape>,
    pub centroids: Vec<CentroidMarker>,
    pub eraser_preview: Option<EraserPreview>,
}

impl SceneDescription {
    pub fn from_state(state: &ClusterSceneState) -> Self {
        let config = state.config();
        let theme = config.theme;

        let ellipses = state
            .ellipses()
            .iter()
            .map(|ellipse| EllipseShape {
                cx: ellipse.x,
                cy: ellipse.y,
                rx: ellipse.rx,
                ry: ellipse.ry,
                angle: ellipse.angle,
                stroke: palette::cluster_color(ellipse.cluster_index),
                line_width: 2.0,
            })
            .collect();

        let points = state
            .points()
            .iter()
            .map(|point| PointShape {
                cx: point.x,
                cy: point.y,
                radius: config.point_radius,
                fill: palette::point_color(point.color, theme),
            })
            .collect();

        let centroids = state
            .centroids()
            .iter()
            .map(|centroid| CentroidMarker {
                cx: centroid.x,
                cy: centroid.y,
                size: config.centroid_marker_size,
                stroke: palette::cluster_color(centroid.cluster_index),
                line_width: 2.0,
            })
            .collect();

        let eraser_preview = match (state.controls().mode(), state.eraser().position) {
            (InteractionMode::Erase, Some((x, y))) => Some(EraserPreview {
                cx: x,
                cy: y,
                radius: config.eraser_radius,
                stroke: palette::ERASER_COLOR,
                dash: [5.0, 5.0],
            }),
            _ => None,
        };

        Self {
            width: config.canvas_width,
            height: config.canvas_height,
            background: palette::background(theme),
            grid: Grid {
                spacing: config.grid_spacing,
                stroke: palette::grid_color(theme),
            },
            ellipses,
            points,
            centroids,
            eraser_preview,
        }
    }
}
