//! The hand-off between a boundary loop and an external 2D mesher.
//!
//! Meshing itself happens outside this crate. A boundary is described to the mesher as a Gmsh
//! geometry script: one point per boundary point, one straight line per edge (including the edge
//! which closes the loop from the last point back to the first), a curve loop and a plane surface.

pub mod msh;

use crate::airfoil::Boundary;
use crate::errors::MeshError;
use log::{debug, warn};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};

pub use msh::{parse_statistics, MeshStatistics};

pub const DEFAULT_CHARACTERISTIC_LENGTH: f64 = 0.1;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Triangle,
    /// Triangles recombined into quadrangles
    Quad,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshOptions {
    /// Target element size at every boundary point
    pub characteristic_length: f64,
    pub element: ElementKind,
    /// Gmsh verbosity level, 0 is silent and 2 prints errors and warnings
    pub verbosity: u8,
}

impl Default for MeshOptions {
    fn default() -> Self {
        MeshOptions {
            characteristic_length: DEFAULT_CHARACTERISTIC_LENGTH,
            element: ElementKind::Triangle,
            verbosity: 2,
        }
    }
}

/// What the mesher produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshReport {
    pub output: Option<PathBuf>,
    pub size_bytes: Option<u64>,
    /// Present when the mesh was written in the ASCII `.msh` format
    pub statistics: Option<MeshStatistics>,
}

/// Something which can turn a closed boundary into a 2D mesh, optionally writing it to a file
pub trait Mesher {
    fn mesh(
        &self,
        boundary: &Boundary,
        options: &MeshOptions,
        output: Option<&Path>,
    ) -> Result<MeshReport, MeshError>;
}

/// Writes the Gmsh geometry script describing the boundary's plane surface
pub fn write_geo<W: Write>(
    boundary: &Boundary,
    options: &MeshOptions,
    mut writer: W,
) -> io::Result<()> {
    writeln!(writer, "// NACA airfoil boundary, {} points", boundary.len())?;
    writeln!(writer, "lc = {};", options.characteristic_length)?;

    for (i, p) in boundary.points().iter().enumerate() {
        writeln!(writer, "Point({}) = {{{}, {}, {}, lc}};", i + 1, p.x, p.y, p.z)?;
    }

    for (i, (a, b)) in boundary.edges().enumerate() {
        writeln!(writer, "Line({}) = {{{}, {}}};", i + 1, a + 1, b + 1)?;
    }

    writeln!(writer, "Curve Loop(1) = {{1:{}}};", boundary.len())?;
    writeln!(writer, "Plane Surface(1) = {{1}};")?;
    if options.element == ElementKind::Quad {
        writeln!(writer, "Recombine Surface{{1}};")?;
    }

    writer.flush()
}

/// Runs the `gmsh` command line program on a generated geometry script
#[derive(Debug, Clone)]
pub struct GmshCli {
    pub program: PathBuf,
}

impl Default for GmshCli {
    fn default() -> Self {
        GmshCli::new("gmsh")
    }
}

impl GmshCli {
    pub fn new(program: impl Into<PathBuf>) -> GmshCli {
        GmshCli {
            program: program.into(),
        }
    }

    /// Opens the Gmsh user interface on an existing mesh file and waits for it to be closed
    pub fn preview(&self, path: &Path) -> Result<(), MeshError> {
        let status = Command::new(&self.program).arg(path).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(MeshError::Failed {
                status,
                stderr: String::new(),
            })
        }
    }
}

fn scratch_path(extension: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "naca-mesh-{}-{}.{}",
        std::process::id(),
        n,
        extension
    ))
}

/// Reads the node and element counts back from a `.msh` file. Other formats and unreadable files
/// yield None, since the counts are informational only.
fn read_statistics(path: &Path) -> Option<MeshStatistics> {
    let is_msh = path
        .extension()
        .map_or(false, |e| e.eq_ignore_ascii_case("msh"));
    if !is_msh {
        return None;
    }

    let parsed = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|text| parse_statistics(&text).map_err(|e| e.to_string()));
    match parsed {
        Ok(stats) => Some(stats),
        Err(e) => {
            debug!("no statistics for {}: {}", path.display(), e);
            None
        }
    }
}

fn remove_scratch(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != io::ErrorKind::NotFound {
            warn!("could not remove {}: {}", path.display(), e);
        }
    }
}

impl Mesher for GmshCli {
    fn mesh(
        &self,
        boundary: &Boundary,
        options: &MeshOptions,
        output: Option<&Path>,
    ) -> Result<MeshReport, MeshError> {
        let script = scratch_path("geo");
        write_geo(boundary, options, BufWriter::new(File::create(&script)?))?;

        // Without an output the mesh still has to land somewhere, so it goes to scratch space
        let target = match output {
            Some(p) => p.to_path_buf(),
            None => scratch_path("msh"),
        };

        let mut command = Command::new(&self.program);
        command
            .arg(&script)
            .arg("-2")
            .arg("-o")
            .arg(&target)
            .arg("-v")
            .arg(options.verbosity.to_string());
        debug!("running {:?}", command);

        let result = command.output();
        remove_scratch(&script);
        let finished = result?;

        if !finished.status.success() {
            if output.is_none() {
                remove_scratch(&target);
            }
            return Err(MeshError::Failed {
                status: finished.status,
                stderr: String::from_utf8_lossy(&finished.stderr).trim().to_string(),
            });
        }

        match output {
            Some(p) => {
                let size = match fs::metadata(p) {
                    Ok(m) => m.len(),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        return Err(MeshError::MissingOutput(p.to_path_buf()))
                    }
                    Err(e) => return Err(e.into()),
                };
                debug!("mesh written to {} ({} bytes)", p.display(), size);
                Ok(MeshReport {
                    output: Some(p.to_path_buf()),
                    size_bytes: Some(size),
                    statistics: read_statistics(p),
                })
            }
            None => {
                let statistics = read_statistics(&target);
                remove_scratch(&target);
                Ok(MeshReport {
                    output: None,
                    size_bytes: None,
                    statistics,
                })
            }
        }
    }
}
