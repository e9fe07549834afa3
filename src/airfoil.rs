//! Symmetric airfoil sections and the boundary loops built from them.

pub mod boundary;
pub mod generate;

pub use boundary::{abscissas, generate_airfoil_points, generate_boundary, Boundary};
pub use generate::{Naca00xx, ThicknessProfile, DEFAULT_THICKNESS};
