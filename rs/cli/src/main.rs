// Clusters a set of 2D points and prints the resulting scene as JSON or SVG.
use std::io::Write;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use config::enums::Theme;
use config::scene::SceneConfig;
use log::{info, warn, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene::point::Point;
use scene::render::{JsonRenderer, Renderer, SvgRenderer};
use scene::state::ClusterSceneState;
use utils::synthetic::generate_random_points;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq)]
enum FormatArgs {
    Json,
    Svg,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq)]
enum ThemeArgs {
    Light,
    Dark,
}

impl From<ThemeArgs> for Theme {
    fn from(value: ThemeArgs) -> Self {
        match value {
            ThemeArgs::Light => Theme::Light,
            ThemeArgs::Dark => Theme::Dark,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
struct Args {
    /// JSON file holding an array of {"x": .., "y": ..} points
    #[arg(long, required_unless_present = "random_points", conflicts_with = "random_points")]
    input_path: Option<String>,

    /// Scatter this many points uniformly over the canvas instead of reading a file
    #[arg(long)]
    random_points: Option<usize>,

    #[arg(long, default_value_t = 2)]
    num_clusters: usize,

    /// Seed for point generation and centroid initialization. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// YAML scene config. Defaults apply to missing fields.
    #[arg(long)]
    config_path: Option<String>,

    #[arg(long, value_enum)]
    theme: Option<ThemeArgs>,

    #[arg(long, default_value_t = FormatArgs::Json, value_enum)]
    format: FormatArgs,

    /// Only place the points, without running k-means
    #[arg(long, default_value_t = false)]
    skip_clustering: bool,

    /// Output file. Writes to stdout when omitted.
    #[arg(long)]
    output_path: Option<String>,
}

fn load_config(args: &Args) -> Result<SceneConfig> {
    let mut config = match &args.config_path {
        Some(path) => SceneConfig::from_yaml_file(path)?,
        None => SceneConfig::default(),
    };
    if let Some(theme) = args.theme {
        config.theme = theme.into();
    }
    Ok(config)
}

fn load_points(args: &Args, config: &SceneConfig, rng: &mut StdRng) -> Result<Vec<Point>> {
    if let Some(num_points) = args.random_points {
        let points = generate_random_points(
            num_points,
            config.canvas_width,
            config.canvas_height,
            rng,
        );
        return Ok(points.into_iter().map(|(x, y)| Point::new(x, y)).collect());
    }

    let path = args
        .input_path
        .as_ref()
        .ok_or_else(|| anyhow!("Either --input-path or --random-points is required"))?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read points from {}", path))?;
    let points: Vec<Point> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse points from {}", path))?;
    Ok(points)
}

fn build_scene(args: &Args) -> Result<String> {
    let config = load_config(args)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let points = load_points(args, &config, &mut rng)?;
    let mut state = ClusterSceneState::new(config)?;
    let mut num_ignored = 0;
    for point in points.iter() {
        if !state.add_point(point.x, point.y) {
            num_ignored += 1;
        }
    }
    if num_ignored > 0 {
        warn!(
            "Canvas holds at most {} points, ignored {} of {}",
            state.config().max_points,
            num_ignored,
            points.len()
        );
    }
    info!("Placed {} points", state.points().len());

    if !args.skip_clustering {
        state.set_num_clusters(args.num_clusters)?;
        state.run_clustering(&mut rng)?;
        info!(
            "Clustered into {} clusters, {} ellipses",
            state.centroids().len(),
            state.ellipses().len()
        );
    }

    let scene = state.describe();
    match args.format {
        FormatArgs::Json => JsonRenderer {}.render(&scene),
        FormatArgs::Svg => SvgRenderer {}.render(&scene),
    }
}

fn write_output(output: &str, output_path: Option<&str>) -> Result<()> {
    match output_path {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file {}", path))?;
            file.write_all(output.as_bytes())?;
            info!("Wrote scene to {}", path);
        }
        None => {
            std::io::stdout().write_all(output.as_bytes())?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_millis()
        .init();

    let args = Args::parse();
    let output = build_scene(&args)?;
    write_output(&output, args.output_path.as_deref())
}
