use log::debug;
use utils::distance::l2::L2DistanceCalculator;
use utils::DistanceCalculator;

use crate::point::{Point, PointColor};

/// Ordered collection of at most `max_points` points. Insertion order is preserved, and erasing
/// keeps the relative order of the remaining points.
#[derive(Debug, Clone, PartialEq)]
pub struct PointStore {
    points: Vec<Point>,
    max_points: usize,
}

impl PointStore {
    pub fn new(max_points: usize) -> Self {
        Self {
            points: Vec::with_capacity(max_points),
            max_points,
        }
    }

    /// Appends an unassigned point. A full store silently ignores the call and returns false.
    pub fn add_point(&mut self, x: f64, y: f64) -> bool {
        if self.is_full() {
            debug!(
                "Ignoring point ({:.1}, {:.1}): store is full with {} points",
                x, y, self.max_points
            );
            return false;
        }
        self.points.push(Point::new(x, y));
        true
    }

    /// Removes every point within `radius` (inclusive) of `(x, y)` and returns how many were
    /// removed.
    pub fn erase_points(&mut self, x: f64, y: f64, radius: f64) -> usize {
        let distance_calculator = L2DistanceCalculator::new();
        let center = [x, y];
        let before = self.points.len();
        self.points
            .retain(|point| distance_calculator.calculate(&point.coordinates(), &center) > radius);
        let removed = before - self.points.len();
        if removed > 0 {
            debug!(
                "Erased {} points around ({:.1}, {:.1}), {} left",
                removed,
                x,
                y,
                self.points.len()
            );
        }
        removed
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Tags point `i` with `assignments[i]`. `assignments` must cover every point.
    pub fn recolor(&mut self, assignments: &[usize]) {
        debug_assert_eq!(assignments.len(), self.points.len());
        for (point, &cluster_index) in self.points.iter_mut().zip(assignments.iter()) {
            point.color = PointColor::Cluster(cluster_index);
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.points.len() >= self.max_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_point_stops_at_capacity() {
        let mut store = PointStore::new(60);
        for i in 0..60 {
            assert!(store.add_point(i as f64, i as f64));
        }
        assert!(store.is_full());
        assert!(!store.add_point(100.0, 100.0));
        assert_eq!(store.len(), 60);
        assert_eq!(store.points()[59], Point::new(59.0, 59.0));
    }

    #[test]
    fn test_new_points_are_unassigned() {
        let mut store = PointStore::new(5);
        store.add_point(1.0, 2.0);
        assert_eq!(store.points()[0].color, PointColor::Unassigned);
    }

    #[test]
    fn test_erase_points_within_radius() {
        let mut store = PointStore::new(60);
        store.add_point(100.0, 100.0); // center
        store.add_point(122.0, 100.0); // exactly on the radius
        store.add_point(100.0, 121.9);
        store.add_point(115.0, 115.0); // ~21.2 away
        store.add_point(116.0, 116.0); // ~22.6 away
        store.add_point(300.0, 300.0);

        let removed = store.erase_points(100.0, 100.0, 22.0);
        assert_eq!(removed, 4);
        assert_eq!(
            store.points(),
            &[Point::new(116.0, 116.0), Point::new(300.0, 300.0)]
        );

        assert_eq!(store.erase_points(0.0, 0.0, 22.0), 0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_erase_keeps_order_and_colors() {
        let mut store = PointStore::new(10);
        store.add_point(0.0, 0.0);
        store.add_point(50.0, 0.0);
        store.add_point(100.0, 0.0);
        store.recolor(&[2, 0, 1]);

        store.erase_points(50.0, 0.0, 5.0);
        let colors = store.points().iter().map(|p| p.color).collect::<Vec<_>>();
        assert_eq!(colors, vec![PointColor::Cluster(2), PointColor::Cluster(1)]);
    }

    #[test]
    fn test_clear() {
        let mut store = PointStore::new(3);
        store.add_point(1.0, 1.0);
        store.add_point(2.0, 2.0);
        store.clear();
        assert!(store.is_empty());
        assert!(store.add_point(3.0, 3.0));
    }
}
