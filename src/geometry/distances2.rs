use ncollide2d::na::{Point2, Point3, RealField};

/// Return the distance between two 2D points
pub fn dist<N: RealField + Copy>(a: &Point2<N>, b: &Point2<N>) -> N {
    (a - b).norm()
}

/// Drop the z coordinate of a point lying in the x-y plane
pub fn planar<N: RealField + Copy>(p: &Point3<N>) -> Point2<N> {
    Point2::new(p.x, p.y)
}
