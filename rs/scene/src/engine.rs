use anyhow::Result;
use config::scene::SceneConfig;
use log::debug;
use rand::Rng;
use utils::ellipse::{confidence_ellipse, Covariance2};
use utils::kmeans::kmeans::KMeans;

use crate::point::{Centroid, Ellipse, Point};

#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringOutcome {
    /// Cluster index of each input point, in input order.
    pub assignments: Vec<usize>,
    /// Exactly one centroid per requested cluster, ordered by cluster index.
    pub centroids: Vec<Centroid>,
    /// One ellipse per non-empty cluster, ordered by cluster index.
    pub ellipses: Vec<Ellipse>,
    pub inertia: f64,
}

/// Runs k-means over scene points and summarizes every cluster with a confidence ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusteringEngine {
    num_iterations: usize,
    ellipse_padding: f64,
}

impl Default for ClusteringEngine {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

impl ClusteringEngine {
    pub fn new(num_iterations: usize, ellipse_padding: f64) -> Self {
        Self {
            num_iterations,
            ellipse_padding,
        }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.num_iterations, config.ellipse_padding)
    }

    /// Fails with an invalid-argument error when `points.len() < k` or `k == 0`.
    pub fn cluster<R: Rng + ?Sized>(
        &self,
        points: &[Point],
        k: usize,
        rng: &mut R,
    ) -> Result<ClusteringOutcome> {
        let coordinates = points.iter().map(Point::coordinates).collect::<Vec<_>>();
        let data_points = coordinates.iter().map(|c| c.as_slice()).collect::<Vec<_>>();

        let kmeans = KMeans::new(k, self.num_iterations, 2);
        let result = kmeans.fit(&data_points, rng)?;

        let centroids = (0..k)
            .map(|cluster_index| {
                let centroid = result.centroid(cluster_index);
                Centroid {
                    x: centroid[0],
                    y: centroid[1],
                    cluster_index,
                }
            })
            .collect::<Vec<_>>();

        let mut ellipses = Vec::with_capacity(k);
        for centroid in centroids.iter() {
            let members = result
                .members(centroid.cluster_index)
                .map(|i| (points[i].x, points[i].y));
            // Clusters that ended up without points are skipped.
            let Some(covariance) = Covariance2::around(members, (centroid.x, centroid.y)) else {
                debug!("Cluster {} is empty, no ellipse", centroid.cluster_index);
                continue;
            };
            let axes = confidence_ellipse(&covariance, self.ellipse_padding);
            ellipses.push(Ellipse {
                x: centroid.x,
                y: centroid.y,
                rx: axes.rx,
                ry: axes.ry,
                angle: axes.angle,
                cluster_index: centroid.cluster_index,
            });
        }

        debug!(
            "Clustered {} points into {} clusters ({} non-empty), inertia {:.2}",
            points.len(),
            k,
            ellipses.len(),
            result.inertia
        );

        Ok(ClusteringOutcome {
            assignments: result.assignments,
            centroids,
            ellipses,
            inertia: result.inertia,
        })
    }
}

/// Clusters with the default iteration count and ellipse padding.
pub fn cluster<R: Rng + ?Sized>(
    points: &[Point],
    k: usize,
    rng: &mut R,
) -> Result<ClusteringOutcome> {
    ClusteringEngine::default().cluster(points, k, rng)
}
