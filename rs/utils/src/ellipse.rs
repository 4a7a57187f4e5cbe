//! Covariance of a 2D point cloud and the confidence ellipse drawn around it.

/// Population covariance (divided by `n`) of a set of 2D points around a given center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Covariance2 {
    pub xx: f64,
    pub yy: f64,
    pub xy: f64,
}

impl Covariance2 {
    /// Returns `None` when `points` is empty.
    pub fn around<I>(points: I, center: (f64, f64)) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (cx, cy) = center;
        let mut sum = Self::default();
        let mut n = 0usize;
        for (x, y) in points {
            let dx = x - cx;
            let dy = y - cy;
            sum.xx += dx * dx;
            sum.yy += dy * dy;
            sum.xy += dx * dy;
            n += 1;
        }
        if n == 0 {
            return None;
        }
        let n = n as f64;
        Some(Self {
            xx: sum.xx / n,
            yy: sum.yy / n,
            xy: sum.xy / n,
        })
    }

    /// Eigenvalues of the symmetric 2x2 matrix, largest first.
    pub fn eigenvalues(&self) -> (f64, f64) {
        let half_trace = (self.xx + self.yy) / 2.0;
        let common = (((self.xx - self.yy) / 2.0).powi(2) + self.xy * self.xy).sqrt();
        (half_trace + common, half_trace - common)
    }

    /// Angle in radians between the x axis and the principal axis.
    pub fn orientation(&self) -> f64 {
        0.5 * (2.0 * self.xy).atan2(self.xx - self.yy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseAxes {
    pub rx: f64,
    pub ry: f64,
    pub angle: f64,
}

/// Semi-axes are the square roots of the eigenvalues plus `padding`. The absolute value guards
/// against tiny negative eigenvalues produced by rounding on degenerate clouds.
pub fn confidence_ellipse(covariance: &Covariance2, padding: f64) -> EllipseAxes {
    let (lambda1, lambda2) = covariance.eigenvalues();
    EllipseAxes {
        rx: lambda1.abs().sqrt() + padding,
        ry: lambda2.abs().sqrt() + padding,
        angle: covariance.orientation(),
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_4;

    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_covariance_empty() {
        assert_eq!(Covariance2::around(Vec::<(f64, f64)>::new(), (0.0, 0.0)), None);
    }

    #[test]
    fn test_covariance_axis_aligned() {
        let points = vec![(-2.0, 0.0), (2.0, 0.0), (0.0, -1.0), (0.0, 1.0)];
        let cov = Covariance2::around(points, (0.0, 0.0)).unwrap();
        assert_abs_diff_eq!(cov.xx, 2.0);
        assert_abs_diff_eq!(cov.yy, 0.5);
        assert_abs_diff_eq!(cov.xy, 0.0);

        let axes = confidence_ellipse(&cov, 10.0);
        assert_abs_diff_eq!(axes.rx, 2.0f64.sqrt() + 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(axes.ry, 0.5f64.sqrt() + 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(axes.angle, 0.0);
    }

    #[test]
    fn test_covariance_diagonal_line() {
        let points = vec![(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)];
        let cov = Covariance2::around(points, (2.0, 2.0)).unwrap();
        assert_abs_diff_eq!(cov.xx, 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(cov.xy, 2.0 / 3.0, epsilon = 1e-12);

        let (lambda1, lambda2) = cov.eigenvalues();
        assert_abs_diff_eq!(lambda1, 4.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(lambda2, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(cov.orientation(), FRAC_PI_4, epsilon = 1e-12);

        let axes = confidence_ellipse(&cov, 10.0);
        assert!(axes.rx > axes.ry);
        assert_abs_diff_eq!(axes.ry, 10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_single_point_has_zero_spread() {
        let cov = Covariance2::around(vec![(4.0, 7.0)], (4.0, 7.0)).unwrap();
        assert_eq!(cov, Covariance2::default());

        let axes = confidence_ellipse(&cov, 10.0);
        assert_abs_diff_eq!(axes.rx, 10.0);
        assert_abs_diff_eq!(axes.ry, 10.0);
        assert_abs_diff_eq!(axes.angle, 0.0);
    }
}
