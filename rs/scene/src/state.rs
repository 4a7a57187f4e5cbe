use anyhow::{anyhow, Result};
use config::enums::{InteractionMode, Theme};
use config::scene::SceneConfig;
use log::debug;
use rand::Rng;

use crate::controls::Controls;
use crate::description::SceneDescription;
use crate::engine::ClusteringEngine;
use crate::point::{Centroid, Ellipse, Point};
use crate::point_store::PointStore;

/// Pointer position of the eraser, and whether an erase drag is in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EraserState {
    pub position: Option<(f64, f64)>,
    pub dragging: bool,
}

/// Everything the canvas can ask of the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneAction {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerLeave,
    SetMode(InteractionMode),
    SetNumClusters(usize),
    SetTheme(Theme),
    Cluster,
    Reset,
}

/// State of one clustering canvas: the points, the toolbar and the last clustering result.
///
/// Centroids and ellipses are only written by [`ClusterSceneState::run_clustering`] and cleared by
/// [`ClusterSceneState::reset`]. Drawing or erasing afterwards leaves them in place until the next
/// run, the same way the canvas keeps showing the last result.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSceneState {
    config: SceneConfig,
    store: PointStore,
    controls: Controls,
    engine: ClusteringEngine,
    centroids: Vec<Centroid>,
    ellipses: Vec<Ellipse>,
    eraser: EraserState,
}

impl ClusterSceneState {
    pub fn new(config: SceneConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store: PointStore::new(config.max_points),
            controls: Controls::new(&config),
            engine: ClusteringEngine::from_config(&config),
            centroids: Vec::new(),
            ellipses: Vec::new(),
            eraser: EraserState::default(),
            config,
        })
    }

    pub fn add_point(&mut self, x: f64, y: f64) -> bool {
        self.store.add_point(x, y)
    }

    /// Erases around `(x, y)` with the configured eraser radius.
    pub fn erase_points(&mut self, x: f64, y: f64) -> usize {
        self.store.erase_points(x, y, self.config.eraser_radius)
    }

    /// Clusters the current points with the selected cluster count. On error (too few points)
    /// nothing changes.
    pub fn run_clustering<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        let k = self.controls.num_clusters();
        if !self.controls.can_cluster(self.store.len()) {
            return Err(anyhow!(
                "Invalid argument: {} clusters requested but only {} points on the canvas",
                k,
                self.store.len()
            ));
        }

        let outcome = self.engine.cluster(self.store.points(), k, rng)?;
        self.store.recolor(&outcome.assignments);
        self.centroids = outcome.centroids;
        self.ellipses = outcome.ellipses;
        Ok(())
    }

    /// Clears points, centroids and ellipses. The toolbar keeps its settings.
    pub fn reset(&mut self) {
        debug!("Resetting scene with {} points", self.store.len());
        self.store.clear();
        self.centroids.clear();
        self.ellipses.clear();
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        match self.controls.mode() {
            InteractionMode::Draw => {
                self.add_point(x, y);
            }
            InteractionMode::Erase => {
                self.eraser.dragging = true;
                self.eraser.position = Some((x, y));
                self.erase_points(x, y);
            }
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if self.controls.mode() != InteractionMode::Erase {
            return;
        }
        self.eraser.position = Some((x, y));
        if self.eraser.dragging {
            self.erase_points(x, y);
        }
    }

    /// Ends an erase drag. Also used when the pointer leaves the canvas.
    pub fn pointer_up(&mut self) {
        self.eraser.dragging = false;
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        if mode != InteractionMode::Erase {
            self.eraser.dragging = false;
        }
        self.controls.set_mode(mode);
    }

    pub fn set_num_clusters(&mut self, num_clusters: usize) -> Result<()> {
        self.controls.set_num_clusters(num_clusters)
    }

    /// Unassigned points are drawn in the theme's foreground color, so they follow this switch.
    pub fn set_theme(&mut self, theme: Theme) {
        self.config.theme = theme;
    }

    /// Returns the state after `action`, leaving `self` untouched. Errors come from
    /// [`SceneAction::SetNumClusters`] and [`SceneAction::Cluster`] only.
    pub fn apply<R: Rng + ?Sized>(&self, action: SceneAction, rng: &mut R) -> Result<Self> {
        let mut next = self.clone();
        match action {
            SceneAction::PointerDown { x, y } => next.pointer_down(x, y),
            SceneAction::PointerMove { x, y } => next.pointer_move(x, y),
            SceneAction::PointerUp | SceneAction::PointerLeave => next.pointer_up(),
            SceneAction::SetMode(mode) => next.set_mode(mode),
            SceneAction::SetNumClusters(num_clusters) => next.set_num_clusters(num_clusters)?,
            SceneAction::SetTheme(theme) => next.set_theme(theme),
            SceneAction::Cluster => next.run_clustering(rng)?,
            SceneAction::Reset => next.reset(),
        }
        Ok(next)
    }

    pub fn describe(&self) -> SceneDescription {
        SceneDescription::from_state(self)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn points(&self) -> &[Point] {
        self.store.points()
    }

    pub fn centroids(&self) -> &[Centroid] {
        &self.centroids
    }

    pub fn ellipses(&self) -> &[Ellipse] {
        &self.ellipses
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn eraser(&self) -> EraserState {
        self.eraser
    }

    pub fn can_cluster(&self) -> bool {
        self.controls.can_cluster(self.store.len())
    }
}
