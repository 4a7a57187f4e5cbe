use config::enums::Theme;

use crate::point::PointColor;

pub const CLUSTER_COLORS: [&str; 10] = [
    "#e6194B", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6",
    "#bcf60c", "#fabebe",
];

pub const ERASER_COLOR: &str = "gray";

pub fn cluster_color(cluster_index: usize) -> &'static str {
    CLUSTER_COLORS[cluster_index % CLUSTER_COLORS.len()]
}

pub fn point_color(color: PointColor, theme: Theme) -> &'static str {
    match color {
        PointColor::Unassigned => foreground(theme),
        PointColor::Cluster(cluster_index) => cluster_color(cluster_index),
    }
}

pub fn foreground(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "black",
        Theme::Dark => "white",
    }
}

pub fn background(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "#ffffff",
        Theme::Dark => "#121212",
    }
}

pub fn grid_color(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "#e0e0e0",
        Theme::Dark => "#2c2c2c",
    }
}
