//! Handling of the output file requested on the command line.

use crate::airfoil::Boundary;
use crate::serialize::{to_json, write_xyz};
use log::info;
use std::fmt::{Display, Formatter};
use std::fs::{self, File};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

pub const DEFAULT_FILE_NAME: &str = "airfoil.msh";
pub const DEFAULT_EXTENSION: &str = "msh";

/// File extensions Gmsh can write, plus the direct boundary exports
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "msh",
    "unv",
    "vtk",
    "mesh",
    "bdf",
    "cgns",
    "med",
    "stl",
    "inp",
    "geo_unrolled",
    "p3d",
    "su2",
    "x3d",
    "json",
    "xyz",
];

/// An adjustment or warning produced while interpreting an output path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathNote {
    Directory(PathBuf),
    MissingExtension(PathBuf),
    UnsupportedExtension(String),
}

impl Display for PathNote {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PathNote::Directory(p) => write!(
                f,
                "'{}' appears to be a directory, writing '{}' inside it",
                p.display(),
                DEFAULT_FILE_NAME
            ),
            PathNote::MissingExtension(p) => {
                write!(f, "no file extension given. Defaulting to '{}'", p.display())
            }
            PathNote::UnsupportedExtension(ext) => {
                write!(f, "extension '.{}' is likely not supported by the mesher", ext)
            }
        }
    }
}

fn expand_home(raw: &Path, home: Option<&Path>) -> PathBuf {
    match (raw.strip_prefix("~"), home) {
        (Ok(rest), Some(h)) => h.join(rest),
        _ => raw.to_path_buf(),
    }
}

fn looks_like_directory(raw: &Path, expanded: &Path) -> bool {
    let text = raw.to_string_lossy();
    text.ends_with(MAIN_SEPARATOR) || text.ends_with('/') || text == "." || expanded.is_dir()
}

/// Interprets a user supplied output path. A leading `~` is expanded with `home`, a directory
/// gets the default file name inside it, and a missing extension defaults to `.msh`. Unknown
/// extensions are kept but noted.
pub fn validate_output_path(raw: &Path, home: Option<&Path>) -> (PathBuf, Vec<PathNote>) {
    let mut notes = Vec::new();
    let expanded = expand_home(raw, home);

    if looks_like_directory(raw, &expanded) {
        let path = expanded.join(DEFAULT_FILE_NAME);
        notes.push(PathNote::Directory(expanded));
        return (path, notes);
    }

    match expanded.extension().map(|e| e.to_string_lossy().to_lowercase()) {
        None => {
            let path = expanded.with_extension(DEFAULT_EXTENSION);
            notes.push(PathNote::MissingExtension(path.clone()));
            (path, notes)
        }
        Some(ext) => {
            if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
                notes.push(PathNote::UnsupportedExtension(ext));
            }
            (expanded, notes)
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Overwrite {
    Proceed,
    Declined,
}

/// Decides whether an existing file may be replaced. Nothing is asked when the file does not
/// exist or `force` is set. A non-interactive session proceeds with a warning on `prompt`;
/// an interactive one asks, and only `y` or `yes` (in any case) proceeds.
pub fn check_overwrite<R: BufRead, W: Write>(
    path: &Path,
    force: bool,
    interactive: bool,
    mut input: R,
    mut prompt: W,
) -> io::Result<Overwrite> {
    if force || !path.exists() {
        return Ok(Overwrite::Proceed);
    }

    if !interactive {
        writeln!(prompt, "warning: overwriting existing file '{}'", path.display())?;
        return Ok(Overwrite::Proceed);
    }

    write!(prompt, "File '{}' already exists. Overwrite? [y/N] ", path.display())?;
    prompt.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(Overwrite::Proceed),
        _ => Ok(Overwrite::Declined),
    }
}

/// Creates the parent directory of `path` if it is missing, returning it when it was created
pub fn ensure_parent_dir(path: &Path) -> io::Result<Option<PathBuf>> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            fs::create_dir_all(dir)?;
            info!("created directory '{}'", dir.display());
            Ok(Some(dir.to_path_buf()))
        }
        _ => Ok(None),
    }
}

/// Whether a graphical preview can be opened. Only X11 and Wayland sessions on Linux and the
/// other unixes can be detected as missing.
pub fn display_available<F: Fn(&str) -> Option<String>>(env: F) -> bool {
    if cfg!(any(target_os = "macos", target_os = "windows")) {
        return true;
    }

    ["DISPLAY", "WAYLAND_DISPLAY"]
        .into_iter()
        .any(|k| env(k).map_or(false, |v| !v.is_empty()))
}

pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

/// Outputs which receive the boundary points directly instead of a mesh
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExportKind {
    Json,
    Xyz,
}

/// The boundary export selected by the extension of `path`, ignoring case
pub fn export_kind(path: &Path) -> Option<ExportKind> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "json" => Some(ExportKind::Json),
        "xyz" => Some(ExportKind::Xyz),
        _ => None,
    }
}

/// Writes the boundary itself when `path` names a point export. Returns false, writing nothing,
/// if the path should be handed to the mesher instead.
pub fn write_boundary_export(
    path: &Path,
    boundary: &Boundary,
    thickness: f64,
) -> io::Result<bool> {
    match export_kind(path) {
        Some(ExportKind::Json) => fs::write(path, to_json(boundary, thickness)?)?,
        Some(ExportKind::Xyz) => write_xyz(boundary, BufWriter::new(File::create(path)?))?,
        None => return Ok(false),
    }

    let size = fs::metadata(path)?.len();
    info!("boundary written to {} ({})", path.display(), format_size(size));
    Ok(true)
}
