pub mod distance;
pub mod ellipse;
pub mod kmeans;
pub mod synthetic;

pub trait DistanceCalculator {
    fn calculate(&self, a: &[f64], b: &[f64]) -> f64;
}

/// Trait for calculating the squared distance between two vectors. An optimization for when the true
/// L2 distance is not needed.
pub trait CalculateSquared {
    fn calculate_squared(&self, a: &[f64], b: &[f64]) -> f64;
}
