use anyhow::{anyhow, Result};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::distance::l2::L2DistanceCalculator;
use crate::CalculateSquared;

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum KMeansVariant {
    Lloyd,
}

pub struct KMeans {
    pub num_clusters: usize,

    // Every run performs exactly this many assignment/update rounds. There is no convergence
    // check, so the output distribution only depends on the initial centroids.
    pub num_iterations: usize,

    // data shape
    pub dimension: usize,

    // Variant for this algorithm. Currently only Lloyd is supported.
    pub variant: KMeansVariant,

    distance_calculator: L2DistanceCalculator,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KMeansResult {
    // Flattened centroids
    pub centroids: Vec<f64>,
    pub assignments: Vec<usize>,
    pub cluster_sizes: Vec<usize>,

    // Sum of squared distances from each point to its final centroid.
    pub inertia: f64,

    dimension: usize,
}

impl KMeansResult {
    pub fn num_clusters(&self) -> usize {
        self.cluster_sizes.len()
    }

    pub fn centroid(&self, cluster_id: usize) -> &[f64] {
        &self.centroids[cluster_id * self.dimension..(cluster_id + 1) * self.dimension]
    }

    /// Indices of the data points assigned to `cluster_id`, in input order.
    pub fn members(&self, cluster_id: usize) -> impl Iterator<Item = usize> + '_ {
        self.assignments
            .iter()
            .enumerate()
            .filter(move |(_, &label)| label == cluster_id)
            .map(|(i, _)| i)
    }
}

impl KMeans {
    pub fn new(num_clusters: usize, num_iterations: usize, dimension: usize) -> Self {
        Self {
            num_clusters,
            num_iterations,
            dimension,
            variant: KMeansVariant::Lloyd,
            distance_calculator: L2DistanceCalculator::new(),
        }
    }

    /// Partition `data_points` into `num_clusters` clusters.
    ///
    /// The initial centroids are the first `num_clusters` points of a full shuffle of the input,
    /// drawn from `rng`. Passing a seeded generator makes the result reproducible.
    pub fn fit<R: Rng + ?Sized>(
        &self,
        data_points: &[&[f64]],
        rng: &mut R,
    ) -> Result<KMeansResult> {
        if self.num_clusters == 0 {
            return Err(anyhow!(
                "Invalid argument: number of clusters must be at least 1"
            ));
        }
        if self.num_iterations == 0 {
            return Err(anyhow!(
                "Invalid argument: number of iterations must be at least 1"
            ));
        }
        if data_points.len() < self.num_clusters {
            return Err(anyhow!(
                "Invalid argument: cannot create {} clusters from {} data points",
                self.num_clusters,
                data_points.len()
            ));
        }

        // Validate dimension
        for data_point in data_points.iter() {
            if data_point.len() != self.dimension {
                return Err(anyhow!(
                    "Dimension of data point {} is not equal to dimension of KMeans object {}",
                    data_point.len(),
                    self.dimension
                ));
            }
        }

        match self.variant {
            KMeansVariant::Lloyd => Ok(self.run_lloyd(data_points, rng)),
        }
    }

    fn initial_centroids<R: Rng + ?Sized>(
        &self,
        data_points: &[&[f64]],
        rng: &mut R,
    ) -> Vec<f64> {
        let mut order = (0..data_points.len()).collect::<Vec<usize>>();
        order.shuffle(rng);

        let mut centroids = Vec::with_capacity(self.num_clusters * self.dimension);
        for &idx in order.iter().take(self.num_clusters) {
            centroids.extend_from_slice(data_points[idx]);
        }
        centroids
    }

    /// Returns the closest centroid and its squared distance. Ties go to the lowest centroid id.
    fn nearest_centroid(&self, data_point: &[f64], centroids: &[f64]) -> (usize, f64) {
        let mut min_distance = f64::INFINITY;
        let mut label = 0;
        for (centroid_id, centroid) in centroids.chunks_exact(self.dimension).enumerate() {
            let distance = self
                .distance_calculator
                .calculate_squared(data_point, centroid);
            if distance < min_distance {
                min_distance = distance;
                label = centroid_id;
            }
        }
        (label, min_distance)
    }

    fn run_lloyd<R: Rng + ?Sized>(&self, data_points: &[&[f64]], rng: &mut R) -> KMeansResult {
        let num_data_points = data_points.len();
        let mut centroids = self.initial_centroids(data_points, rng);
        let mut cluster_labels = vec![0; num_data_points];
        let mut cluster_sizes = vec![0; self.num_clusters];

        for iteration in 0..self.num_iterations {
            // Assignment step
            let mut distsum = 0.0;
            let mut num_moved = 0;
            for (i, data_point) in data_points.iter().enumerate() {
                let (label, distance) = self.nearest_centroid(data_point, &centroids);
                if iteration > 0 && label != cluster_labels[i] {
                    num_moved += 1;
                }
                cluster_labels[i] = label;
                distsum += distance;
            }

            // Update step. A cluster without members keeps its previous position.
            let mut sums = vec![0.0; self.num_clusters * self.dimension];
            cluster_sizes = vec![0; self.num_clusters];
            for (data_point, &label) in data_points.iter().zip(cluster_labels.iter()) {
                cluster_sizes[label] += 1;
                for j in 0..self.dimension {
                    sums[label * self.dimension + j] += data_point[j];
                }
            }
            for (centroid_id, &size) in cluster_sizes.iter().enumerate() {
                if size == 0 {
                    continue;
                }
                for j in 0..self.dimension {
                    centroids[centroid_id * self.dimension + j] =
                        sums[centroid_id * self.dimension + j] / size as f64;
                }
            }

            debug!(
                "Iteration {} - Error: {:.2} | Moved: {} | Empty clusters: {}",
                iteration,
                distsum,
                num_moved,
                cluster_sizes.iter().filter(|&&size| size == 0).count()
            );
        }

        let inertia = data_points
            .iter()
            .zip(cluster_labels.iter())
            .map(|(data_point, &label)| {
                self.distance_calculator.calculate_squared(
                    data_point,
                    &centroids[label * self.dimension..(label + 1) * self.dimension],
                )
            })
            .sum();

        KMeansResult {
            centroids,
            assignments: cluster_labels,
            cluster_sizes,
            inertia,
            dimension: self.dimension,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn as_refs(data: &[Vec<f64>]) -> Vec<&[f64]> {
        data.iter().map(|x| x.as_slice()).collect()
    }

    #[test]
    fn test_kmeans_lloyd() {
        let data = vec![
            vec![0.0, 0.0],
            vec![40.0, 40.0],
            vec![90.0, 90.0],
            vec![1.0, 1.0],
            vec![41.0, 41.0],
            vec![91.0, 91.0],
            vec![2.0, 2.0],
            vec![42.0, 42.0],
            vec![92.0, 92.0],
        ];

        let kmeans = KMeans::new(3, 20, 2);
        assert_eq!(kmeans.num_clusters, 3);
        assert_eq!(kmeans.num_iterations, 20);
        assert_eq!(kmeans.dimension, 2);
        assert_eq!(kmeans.variant, KMeansVariant::Lloyd);

        // A random init may land two seeds in the same group, so only check the structural
        // properties here and leave separation to the well-separated tests below.
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = kmeans
                .fit(&as_refs(&data), &mut rng)
                .expect("KMeans run should succeed");

            assert_eq!(result.centroids.len(), 3 * 2);
            assert_eq!(result.num_clusters(), 3);
            assert_eq!(result.assignments.len(), data.len());
            assert!(result.assignments.iter().all(|&label| label < 3));
            assert_eq!(result.cluster_sizes.iter().sum::<usize>(), data.len());
        }
    }

    #[test]
    fn test_kmeans_two_separated_groups() {
        let data = vec![
            vec![10.0, 10.0],
            vec![12.0, 11.0],
            vec![11.0, 9.0],
            vec![100.0, 100.0],
            vec![102.0, 99.0],
            vec![101.0, 101.0],
        ];

        let kmeans = KMeans::new(2, 20, 2);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = kmeans.fit(&as_refs(&data), &mut rng).unwrap();

            assert_eq!(result.assignments[0], result.assignments[1]);
            assert_eq!(result.assignments[0], result.assignments[2]);
            assert_eq!(result.assignments[3], result.assignments[4]);
            assert_eq!(result.assignments[3], result.assignments[5]);
            assert_ne!(result.assignments[0], result.assignments[3]);

            let low = result.centroid(result.assignments[0]);
            let high = result.centroid(result.assignments[3]);
            assert_abs_diff_eq!(low[0], 11.0, epsilon = 1e-9);
            assert_abs_diff_eq!(low[1], 10.0, epsilon = 1e-9);
            assert_abs_diff_eq!(high[0], 101.0, epsilon = 1e-9);
            assert_abs_diff_eq!(high[1], 100.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_kmeans_same_seed_same_result() {
        let mut rng = StdRng::seed_from_u64(7);
        let data = (0..50)
            .map(|_| vec![rng.gen_range(0.0..500.0), rng.gen_range(0.0..500.0)])
            .collect::<Vec<_>>();

        let kmeans = KMeans::new(5, 20, 2);
        let first = kmeans
            .fit(&as_refs(&data), &mut StdRng::seed_from_u64(42))
            .unwrap();
        let second = kmeans
            .fit(&as_refs(&data), &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_kmeans_centroid_is_mean_of_members() {
        let mut rng = StdRng::seed_from_u64(3);
        let data = (0..40)
            .map(|_| vec![rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0)])
            .collect::<Vec<_>>();

        let kmeans = KMeans::new(4, 20, 2);
        let result = kmeans.fit(&as_refs(&data), &mut rng).unwrap();
        for cluster_id in 0..4 {
            let members = result.members(cluster_id).collect::<Vec<_>>();
            assert_eq!(members.len(), result.cluster_sizes[cluster_id]);
            if members.is_empty() {
                continue;
            }
            let mean_x = members.iter().map(|&i| data[i][0]).sum::<f64>() / members.len() as f64;
            let mean_y = members.iter().map(|&i| data[i][1]).sum::<f64>() / members.len() as f64;
            assert_abs_diff_eq!(result.centroid(cluster_id)[0], mean_x, epsilon = 1e-9);
            assert_abs_diff_eq!(result.centroid(cluster_id)[1], mean_y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_kmeans_as_many_clusters_as_points() {
        let data = vec![vec![0.0, 0.0], vec![10.0, 0.0], vec![0.0, 10.0]];
        let kmeans = KMeans::new(3, 20, 2);
        let result = kmeans
            .fit(&as_refs(&data), &mut StdRng::seed_from_u64(1))
            .unwrap();

        assert_eq!(result.cluster_sizes, vec![1, 1, 1]);
        assert_abs_diff_eq!(result.inertia, 0.0);
        for (i, point) in data.iter().enumerate() {
            let centroid = result.centroid(result.assignments[i]);
            assert_abs_diff_eq!(centroid[0], point[0]);
            assert_abs_diff_eq!(centroid[1], point[1]);
        }
    }

    #[test]
    fn test_kmeans_duplicate_points_leave_empty_cluster() {
        // Both seeds sit on the same spot, so the second centroid never wins a tie.
        let data = vec![vec![5.0, 5.0], vec![5.0, 5.0]];
        let kmeans = KMeans::new(2, 20, 2);
        let result = kmeans
            .fit(&as_refs(&data), &mut StdRng::seed_from_u64(9))
            .unwrap();

        assert_eq!(result.assignments, vec![0, 0]);
        assert_eq!(result.cluster_sizes, vec![2, 0]);
        assert_eq!(result.members(1).count(), 0);
        assert_abs_diff_eq!(result.centroid(1)[0], 5.0);
        assert_abs_diff_eq!(result.centroid(1)[1], 5.0);
    }

    #[test]
    fn test_kmeans_invalid_arguments() {
        let data = vec![vec![0.0, 0.0], vec![1.0, 1.0]];
        let mut rng = StdRng::seed_from_u64(0);

        let err = KMeans::new(3, 20, 2)
            .fit(&as_refs(&data), &mut rng)
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid argument"));

        assert!(KMeans::new(0, 20, 2).fit(&as_refs(&data), &mut rng).is_err());
        assert!(KMeans::new(2, 0, 2).fit(&as_refs(&data), &mut rng).is_err());
        assert!(KMeans::new(2, 20, 3).fit(&as_refs(&data), &mut rng).is_err());
    }
}
