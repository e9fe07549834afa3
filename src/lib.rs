//! Generation of closed NACA 00xx airfoil boundaries for 2D unstructured meshing.
//!
//! The core of the crate is [`airfoil::generate`], which evaluates the thickness distribution of a
//! symmetric airfoil, and [`airfoil::boundary`], which assembles it into a single ordered loop of
//! points. The remaining modules prepare that loop for an external mesher and handle its output.

pub mod airfoil;
pub mod closed_polyline;
pub mod errors;
pub mod geometry;
pub mod logging;
pub mod mesher;
pub mod output;
pub mod params;
pub mod serialize;
