use crate::airfoil::generate::{Naca00xx, ThicknessProfile};
use crate::errors::BoundaryError;
use itertools::Itertools;
use log::debug;
use ncollide2d::na::Point3;

/// An ordered set of boundary points tracing an airfoil perimeter exactly once.
///
/// The points run along the upper surface from the trailing edge (x=1) to the leading edge (x=0),
/// then along the lower surface back to the trailing edge. For `N` chord samples there are
/// `2N - 1` points and the leading edge appears once, at index `N - 1`.
///
/// The loop is *not* explicitly closed: the first and last points share x=1 but are distinct
/// coordinates, and a consumer is expected to connect the last point back to the first. Because
/// the thickness formula leaves a small residual at the trailing edge, the two points are
/// generally separated by a small gap which is left in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    points: Vec<Point3<f64>>,
    samples: usize,
}

impl Boundary {
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point3<f64>> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The number of chord samples `N` the boundary was generated from
    pub fn num_samples(&self) -> usize {
        self.samples
    }

    pub fn leading_edge_index(&self) -> usize {
        self.samples - 1
    }

    pub fn leading_edge(&self) -> Point3<f64> {
        self.points[self.leading_edge_index()]
    }

    pub fn trailing_edge_upper(&self) -> Point3<f64> {
        self.points[0]
    }

    pub fn trailing_edge_lower(&self) -> Point3<f64> {
        self.points[self.points.len() - 1]
    }

    /// The distance between the first and last points, which the consumer bridges when it closes
    /// the loop
    pub fn trailing_edge_gap(&self) -> f64 {
        (self.trailing_edge_upper() - self.trailing_edge_lower()).norm()
    }

    /// Returns true if the first and last points coincide within `tol`, meaning that a consumer
    /// connecting them would produce a zero length edge.
    pub fn is_explicitly_closed(&self, tol: f64) -> bool {
        self.trailing_edge_gap() <= tol
    }

    /// Iterates the index pairs of every edge in the loop, including the closing edge from the
    /// last point back to the first
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.points.len()).circular_tuple_windows()
    }

    /// The signed area enclosed by the loop in the x-y plane. Positive for a counter-clockwise
    /// traversal, which is the orientation `generate_boundary` produces.
    pub fn signed_area(&self) -> f64 {
        let twice: f64 = self
            .points
            .iter()
            .circular_tuple_windows()
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum();
        twice * 0.5
    }

    /// The length of the closed loop, including the closing edge
    pub fn perimeter(&self) -> f64 {
        self.points
            .iter()
            .circular_tuple_windows()
            .map(|(a, b)| (b - a).norm())
            .sum()
    }
}

/// Generates `n` evenly spaced chord fractions from 0.0 to 1.0 inclusive.
pub fn abscissas(n: usize) -> Result<Vec<f64>, BoundaryError> {
    if n < 2 {
        return Err(BoundaryError::InvalidSampleCount { requested: n });
    }

    let step = (n - 1) as f64;
    Ok((0..n).map(|i| i as f64 / step).collect())
}

/// Builds the boundary loop of a symmetric airfoil from `n` chord samples.
///
/// The half-thickness is evaluated once per sample and shared by both surfaces. The output is
/// written into a single buffer sized up front: the upper surface is copied in reverse into the
/// first `n` slots and the negated lower surface, without its leading edge point, into the
/// remaining `n - 1`.
pub fn generate_boundary<P: ThicknessProfile + ?Sized>(
    profile: &P,
    n: usize,
) -> Result<Boundary, BoundaryError> {
    let xs = abscissas(n)?;
    let ys = profile.half_thickness_batch(&xs);

    let mut points = vec![Point3::origin(); 2 * n - 1];
    let (upper, lower) = points.split_at_mut(n);

    for (p, (x, y)) in upper.iter_mut().zip(xs.iter().zip(ys.iter()).rev()) {
        *p = Point3::new(*x, *y, 0.0);
    }

    for (p, (x, y)) in lower.iter_mut().zip(xs.iter().zip(ys.iter()).skip(1)) {
        *p = Point3::new(*x, -*y, 0.0);
    }

    debug!("generated {} boundary points from {} samples", points.len(), n);
    Ok(Boundary { points, samples: n })
}

/// Builds the boundary loop of a NACA 0012 airfoil from `n` chord samples
pub fn generate_airfoil_points(n: usize) -> Result<Boundary, BoundaryError> {
    generate_boundary(&Naca00xx::naca0012(), n)
}

/// A straightforward point-by-point construction of the same boundary as `generate_boundary`.
/// The profile is evaluated a second time for the lower surface and every point is pushed onto the
/// result individually. This exists as a reference for the bulk version.
pub fn generate_boundary_naive<P: ThicknessProfile + ?Sized>(
    profile: &P,
    n: usize,
) -> Result<Boundary, BoundaryError> {
    if n < 2 {
        return Err(BoundaryError::InvalidSampleCount { requested: n });
    }

    let mut points = Vec::new();
    for i in (0..n).rev() {
        let x = i as f64 / (n - 1) as f64;
        points.push(Point3::new(x, profile.half_thickness(x), 0.0));
    }
    for i in 1..n {
        let x = i as f64 / (n - 1) as f64;
        points.push(Point3::new(x, -profile.half_thickness(x), 0.0));
    }

    Ok(Boundary { points, samples: n })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::prelude::*;
    use test_case::test_case;

    #[test_case(2)]
    #[test_case(3)]
    #[test_case(10)]
    #[test_case(100)]
    #[test_case(1001)]
    fn test_boundary_shape(n: usize) {
        let b = generate_airfoil_points(n).unwrap();
        assert_eq!(2 * n - 1, b.len());
        assert_eq!(n, b.num_samples());
        assert!(b.points().iter().all(|p| p.z == 0.0));
    }

    #[test_case(0)]
    #[test_case(1)]
    fn test_invalid_sample_count(n: usize) {
        let result = generate_airfoil_points(n);
        assert_eq!(Err(BoundaryError::InvalidSampleCount { requested: n }), result);
        assert!(abscissas(n).is_err());
        assert!(generate_boundary_naive(&Naca00xx::default(), n).is_err());
    }

    #[test]
    fn test_hundred_samples() {
        let naca = Naca00xx::naca0012();
        let b = generate_airfoil_points(100).unwrap();
        let y1 = naca.half_thickness(1.0);

        assert_eq!(199, b.len());
        assert_eq!(Point3::new(1.0, y1, 0.0), b.points()[0]);
        assert_eq!(Point3::new(0.0, 0.0, 0.0), b.points()[99]);
        assert_eq!(Point3::new(1.0, -y1, 0.0), b.points()[198]);
        assert_eq!(Point3::new(0.0, 0.0, 0.0), b.leading_edge());
    }

    #[test]
    fn test_two_samples() {
        let y1 = Naca00xx::naca0012().half_thickness(1.0);
        let b = generate_airfoil_points(2).unwrap();
        let expected = vec![
            Point3::new(1.0, y1, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, -y1, 0.0),
        ];
        assert_eq!(expected, b.into_points());
    }

    #[test_case(2)]
    #[test_case(7)]
    #[test_case(250)]
    fn test_leading_edge_appears_once(n: usize) {
        let b = generate_airfoil_points(n).unwrap();
        let at_zero: Vec<usize> = b
            .points()
            .iter()
            .positions(|p| p.x == 0.0)
            .collect();
        assert_eq!(vec![n - 1], at_zero);
        assert_eq!(n - 1, b.leading_edge_index());
    }

    #[test_case(2)]
    #[test_case(50)]
    #[test_case(333)]
    fn test_surfaces_are_mirrored(n: usize) {
        let b = generate_airfoil_points(n).unwrap();
        let p = b.points();
        let last = p.len() - 1;
        for k in 0..n {
            let upper = p[k];
            let lower = p[last - k];
            assert_eq!(upper.x, lower.x);
            assert_eq!(upper.y, -lower.y);
        }
    }

    #[test]
    fn test_trailing_edge_coincides_in_x() {
        let b = generate_airfoil_points(100).unwrap();
        assert_eq!(1.0, b.trailing_edge_upper().x);
        assert_eq!(1.0, b.trailing_edge_lower().x);
        assert_relative_eq!(0.00252, b.trailing_edge_gap(), epsilon = 1e-8);
        assert!(!b.is_explicitly_closed(1e-6));
        assert!(b.is_explicitly_closed(1e-2));
    }

    #[test_case(10)]
    #[test_case(100)]
    #[test_case(1000)]
    fn test_matches_naive_reference(n: usize) {
        let naca = Naca00xx::naca0012();
        let fast = generate_boundary(&naca, n).unwrap();
        let slow = generate_boundary_naive(&naca, n).unwrap();
        assert_eq!(slow, fast);
    }

    #[test]
    fn test_abscissas_random_counts() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let n: usize = rng.gen_range(2..5000);
            let xs = abscissas(n).unwrap();
            assert_eq!(n, xs.len());
            assert_eq!(0.0, xs[0]);
            assert_eq!(1.0, xs[n - 1]);
            assert!(xs.iter().all(|x| *x >= 0.0));
            assert!(xs.iter().tuple_windows().all(|(a, b)| a < b));
        }
    }

    #[test]
    fn test_orientation_is_counter_clockwise() {
        let b = generate_airfoil_points(500).unwrap();
        // A NACA 00xx section has an area of roughly 0.685 * t * c^2
        assert_relative_eq!(0.685 * 0.12, b.signed_area(), epsilon = 1e-3);
    }

    #[test]
    fn test_edges_wrap_around() {
        let b = generate_airfoil_points(3).unwrap();
        let edges: Vec<(usize, usize)> = b.edges().collect();
        assert_eq!(vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)], edges);
    }

    #[test]
    fn test_perimeter_is_slightly_over_twice_chord() {
        let b = generate_airfoil_points(1000).unwrap();
        let l = b.perimeter();
        assert!(l > 2.0 && l < 2.1, "perimeter {l}");
    }
}
