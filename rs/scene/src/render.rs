use std::fmt::Write;

use anyhow::Result;

use crate::description::SceneDescription;

pub trait Renderer {
    fn render(&self, scene: &SceneDescription) -> Result<String>;
}

/// Pretty-printed JSON of the scene description.
pub struct JsonRenderer {}

impl Renderer for JsonRenderer {
    fn render(&self, scene: &SceneDescription) -> Result<String> {
        Ok(serde_json::to_string_pretty(scene)?)
    }
}

/// Standalone SVG document mirroring what the canvas paints.
pub struct SvgRenderer {}

impl SvgRenderer {
    fn write_grid(out: &mut String, scene: &SceneDescription) -> std::fmt::Result {
        let spacing = scene.grid.spacing;
        writeln!(
            out,
            r#"  <g stroke="{}" stroke-width="1">"#,
            scene.grid.stroke
        )?;
        let mut x = spacing;
        while x < scene.width {
            writeln!(
                out,
                r#"    <line x1="{x:.2}" y1="0" x2="{x:.2}" y2="{:.2}"/>"#,
                scene.height
            )?;
            x += spacing;
        }
        let mut y = spacing;
        while y < scene.height {
            writeln!(
                out,
                r#"    <line x1="0" y1="{y:.2}" x2="{:.2}" y2="{y:.2}"/>"#,
                scene.width
            )?;
            y += spacing;
        }
        writeln!(out, "  </g>")
    }

    fn write_scene(out: &mut String, scene: &SceneDescription) -> std::fmt::Result {
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.2} {h:.2}">"#,
            w = scene.width,
            h = scene.height
        )?;
        writeln!(
            out,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            scene.background
        )?;
        Self::write_grid(out, scene)?;

        for ellipse in scene.ellipses.iter() {
            writeln!(
                out,
                r#"  <ellipse cx="{cx:.2}" cy="{cy:.2}" rx="{:.2}" ry="{:.2}" transform="rotate({:.4} {cx:.2} {cy:.2})" fill="none" stroke="{}" stroke-width="{}"/>"#,
                ellipse.rx,
                ellipse.ry,
                ellipse.angle.to_degrees(),
                ellipse.stroke,
                ellipse.line_width,
                cx = ellipse.cx,
                cy = ellipse.cy,
            )?;
        }

        for point in scene.points.iter() {
            writeln!(
                out,
                r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
                point.cx, point.cy, point.radius, point.fill
            )?;
        }

        for centroid in scene.centroids.iter() {
            let (x, y, s) = (centroid.cx, centroid.cy, centroid.size);
            writeln!(
                out,
                r#"  <path d="M {:.2} {:.2} L {:.2} {:.2} M {:.2} {:.2} L {:.2} {:.2}" stroke="{}" stroke-width="{}"/>"#,
                x - s,
                y - s,
                x + s,
                y + s,
                x + s,
                y - s,
                x - s,
                y + s,
                centroid.stroke,
                centroid.line_width
            )?;
        }

        if let Some(preview) = &scene.eraser_preview {
            writeln!(
                out,
                r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="none" stroke="{}" stroke-width="1" stroke-dasharray="{},{}"/>"#,
                preview.cx, preview.cy, preview.radius, preview.stroke, preview.dash[0], preview.dash[1]
            )?;
        }

        writeln!(out, "</svg>")
    }
}

impl Renderer for SvgRenderer {
    fn render(&self, scene: &SceneDescription) -> Result<String> {
        let mut out = String::new();
        Self::write_scene(&mut out, scene)?;
        Ok(out)
    }
}
