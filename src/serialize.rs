use crate::airfoil::Boundary;
use ncollide2d::na::Point3;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
#[serde(remote = "Point3<f64>")]
pub struct Point3f64 {
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Serialize)]
struct BoundaryPoint(#[serde(with = "Point3f64")] Point3<f64>);

/// How a consumer should close the loop described by a `BoundaryRecord`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Closure {
    /// The last point connects back to the first; the two are not duplicated
    Implicit,
}

/// A self describing export of a boundary loop
#[derive(Serialize)]
pub struct BoundaryRecord {
    pub thickness: f64,
    pub num_samples: usize,
    pub closure: Closure,
    points: Vec<BoundaryPoint>,
}

impl BoundaryRecord {
    pub fn new(boundary: &Boundary, thickness: f64) -> BoundaryRecord {
        BoundaryRecord {
            thickness,
            num_samples: boundary.num_samples(),
            closure: Closure::Implicit,
            points: boundary.points().iter().map(|p| BoundaryPoint(*p)).collect(),
        }
    }
}

pub fn to_json(boundary: &Boundary, thickness: f64) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&BoundaryRecord::new(boundary, thickness))
}

/// Writes one `x, y, z` line per boundary point
pub fn write_xyz<W: Write>(boundary: &Boundary, mut writer: W) -> io::Result<()> {
    for p in boundary.points() {
        writeln!(writer, "{}, {}, {}", p.x, p.y, p.z)?;
    }

    writer.flush()
}
