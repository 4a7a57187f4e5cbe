use anyhow::{anyhow, Result};
use config::enums::InteractionMode;
use config::scene::SceneConfig;

/// Toolbar state: the requested cluster count and the interaction mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    num_clusters: usize,
    mode: InteractionMode,
    min_clusters: usize,
    max_clusters: usize,
}

impl Controls {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            num_clusters: config.default_num_clusters,
            mode: InteractionMode::default(),
            min_clusters: config.min_clusters,
            max_clusters: config.max_clusters,
        }
    }

    pub fn num_clusters(&self) -> usize {
        self.num_clusters
    }

    /// Rejects counts outside `[min_clusters, max_clusters]` and keeps the previous value.
    pub fn set_num_clusters(&mut self, num_clusters: usize) -> Result<()> {
        if num_clusters < self.min_clusters || num_clusters > self.max_clusters {
            return Err(anyhow!(
                "Invalid argument: cluster count {} is outside [{}, {}]",
                num_clusters,
                self.min_clusters,
                self.max_clusters
            ));
        }
        self.num_clusters = num_clusters;
        Ok(())
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    /// Whether the "Cluster" trigger is enabled for a store holding `num_points` points.
    pub fn can_cluster(&self, num_points: usize) -> bool {
        num_points >= self.num_clusters
    }

    pub fn cluster_range(&self) -> (usize, usize) {
        (self.min_clusters, self.max_clusters)
    }
}
