use crate::{CalculateSquared, DistanceCalculator};

/// Euclidean distance over points of any dimension. The scene only ever feeds it 2D points, so
/// there is no lane-conforming variant.
#[derive(Debug, Default, Clone, Copy)]
pub struct L2DistanceCalculator {}

impl L2DistanceCalculator {
    pub fn new() -> Self {
        Self {}
    }
}

impl CalculateSquared for L2DistanceCalculator {
    fn calculate_squared(&self, a: &[f64], b: &[f64]) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| (x - y) * (x - y))
            .sum::<f64>()
    }
}

impl DistanceCalculator for L2DistanceCalculator {
    fn calculate(&self, a: &[f64], b: &[f64]) -> f64 {
        self.calculate_squared(a, b).sqrt()
    }
}
