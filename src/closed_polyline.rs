use crate::airfoil::Boundary;
use crate::errors::BoundaryError;
use crate::geometry::distances2::{dist, planar};
use ncollide2d::na::Point2;
use ncollide2d::shape::Polyline;

pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// A boundary loop flattened into the x-y plane with its closing edge made explicit, as a mesher
/// that does not accept implicitly cyclic input would need it.
pub struct ClosedPolyline {
    pub line: Polyline<f64>,
    closing_appended: bool,
}

impl ClosedPolyline {
    /// Create a new closed polyline. The boundary points will be copied and adjacent duplicates
    /// removed. If the first and last points are already within `tol` of each other the loop is
    /// treated as closed and the last point is snapped onto the first; otherwise the first point
    /// is copied to the end.
    pub fn new(boundary: &Boundary, tol: Option<f64>) -> Result<ClosedPolyline, BoundaryError> {
        let tol_value = tol.unwrap_or(DEFAULT_TOLERANCE);

        let mut vertices: Vec<Point2<f64>> = boundary.points().iter().map(planar).collect();
        vertices.dedup_by(|a, b| dist(&*a, &*b) < tol_value);

        let (first, last) = match (vertices.first(), vertices.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => return Err(BoundaryError::NotEnoughPoints { remaining: 0 }),
        };

        let closing_appended = dist(&first, &last) > tol_value;
        if closing_appended {
            vertices.push(first);
        } else if let Some(end) = vertices.last_mut() {
            *end = first;
        }

        let distinct = vertices.len() - 1;
        if distinct < 3 {
            return Err(BoundaryError::NotEnoughPoints {
                remaining: distinct,
            });
        }

        Ok(ClosedPolyline {
            line: Polyline::new(vertices, None),
            closing_appended,
        })
    }

    /// True when the input was open and a copy of the first vertex had to be appended
    pub fn closing_appended(&self) -> bool {
        self.closing_appended
    }

    /// The number of distinct vertices, not counting the repeated closing vertex
    pub fn vertex_count(&self) -> usize {
        self.line.points().len() - 1
    }

    pub fn perimeter(&self) -> f64 {
        let points = self.line.points();
        self.line
            .edges()
            .iter()
            .map(|e| dist(&points[e.indices.x], &points[e.indices.y]))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airfoil::{generate_airfoil_points, generate_boundary, Naca00xx};
    use approx::assert_relative_eq;

    #[test]
    fn test_open_boundary_gets_closing_vertex() {
        let b = generate_airfoil_points(100).unwrap();
        let closed = ClosedPolyline::new(&b, None).unwrap();
        assert!(closed.closing_appended());
        assert_eq!(b.len(), closed.vertex_count());

        let points = closed.line.points();
        assert_eq!(points[0], points[points.len() - 1]);
    }

    #[test]
    fn test_loose_tolerance_treats_trailing_edge_as_closed() {
        let b = generate_airfoil_points(100).unwrap();
        let closed = ClosedPolyline::new(&b, Some(1e-2)).unwrap();
        assert!(!closed.closing_appended());
        assert_eq!(b.len() - 1, closed.vertex_count());
    }

    #[test]
    fn test_perimeter_matches_boundary() {
        let b = generate_airfoil_points(400).unwrap();
        let closed = ClosedPolyline::new(&b, None).unwrap();
        assert_relative_eq!(b.perimeter(), closed.perimeter(), epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_profile_is_rejected() {
        let b = generate_boundary(&Naca00xx::new(1e-12), 2).unwrap();
        let result = ClosedPolyline::new(&b, None);
        assert!(matches!(
            result,
            Err(BoundaryError::NotEnoughPoints { remaining: 2 })
        ));
    }
}
