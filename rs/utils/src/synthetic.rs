//! Synthetic point clouds for demos, benches and tests.

use rand::Rng;

// Generate `num_points` points scattered uniformly over a `width` x `height` area
pub fn generate_random_points<R: Rng + ?Sized>(
    num_points: usize,
    width: f64,
    height: f64,
    rng: &mut R,
) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(num_points);
    for _ in 0..num_points {
        points.push((rng.gen_range(0.0..width), rng.gen_range(0.0..height)));
    }
    points
}

// Generate `points_per_blob` points around each center, each coordinate offset by at most `spread`
pub fn generate_blobs<R: Rng + ?Sized>(
    centers: &[(f64, f64)],
    points_per_blob: usize,
    spread: f64,
    rng: &mut R,
) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(centers.len() * points_per_blob);
    for &(cx, cy) in centers {
        for _ in 0..points_per_blob {
            points.push((
                cx + rng.gen_range(-spread..=spread),
                cy + rng.gen_range(-spread..=spread),
            ));
        }
    }
    points
}
